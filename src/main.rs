#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use tictactoe::{cli::run_cli, init_logging, prelude::*, serve};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use tokio::net::TcpListener;

#[cfg(feature = "std")]
const DEFAULT_BIND: &str = "0.0.0.0:8000";
#[cfg(feature = "std")]
const DEFAULT_CONNECT: &str = "127.0.0.1:8000";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Run the move service and wait for players to connect.
    Serve {
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible play (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play at the terminal against a move service on the network.
    Play {
        #[arg(long, default_value = DEFAULT_CONNECT)]
        connect: String,
    },
    /// Play at the terminal against an in-process move service.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible play (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn engine_for(seed: Option<u64>) -> MinimaxEngine {
    match seed {
        Some(s) => MinimaxEngine::seeded(s),
        None => MinimaxEngine::from_entropy(),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, seed } => {
            let listener = TcpListener::bind(&bind).await?;
            println!("Move service listening on {}", listener.local_addr()?);
            if let Some(s) = seed {
                println!("Using fixed seed: {} (play will be reproducible)", s);
            }
            serve(listener, move || engine_for(seed)).await?;
        }
        Commands::Play { connect } => {
            println!("Playing against the move service at {}", connect);
            let client = RemoteMoveClient::with_connector(TcpConnector::new(connect));
            run_cli(GameController::new(client)).await?;
        }
        Commands::Local { seed } => {
            let (server_side, client_side) = InMemoryTransport::pair();
            let mut server = MoveServer::new(engine_for(seed), server_side);
            let service = tokio::spawn(async move { server.run().await });

            run_cli(GameController::new(RemoteMoveClient::new(client_side))).await?;
            // Dropping the controller closed the client side; the service
            // winds down on its own.
            if let Err(e) = service.await? {
                log::debug!("local move service stopped: {}", e);
            }
        }
    }
    Ok(())
}
