//! Terminal front end: renders the board and reads moves from stdin.

use std::io::{self, BufRead, Write};

use crate::client::MoveSource;
use crate::controller::{GameController, GameView, MoveOutcome};
use crate::engine::{Rejection, CELLS};

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play the cell at this 0-based index.
    Play(usize),
    /// Start a new game.
    NewGame,
    Quit,
}

/// Parse a 1-based cell number ("1".."9") into a 0-based index.
pub fn parse_cell(input: &str) -> Result<usize, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let n: usize = input
        .parse()
        .map_err(|_| format!("Invalid cell '{}' - must be a number 1-{}", input, CELLS))?;
    if n == 0 || n > CELLS {
        return Err(format!("Cell {} out of bounds - must be 1-{}", n, CELLS));
    }
    Ok(n - 1)
}

/// Parse one line of input into a [`Command`].
pub fn parse_command(input: &str) -> Result<Command, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "n" | "new" => Ok(Command::NewGame),
        other => parse_cell(other).map(Command::Play),
    }
}

/// Print the board and status line.
pub fn print_view(view: &GameView) {
    println!();
    print!("{}", view.board);
    if !view.status.is_empty() {
        println!("{}", view.status);
    }
}

fn prompt() -> io::Result<Option<String>> {
    print!("Your move (1-{}, n = new game, q = quit): ", CELLS);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().lock().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// Play games at the terminal until the player quits or stdin closes.
///
/// Input is not read while the remote move is pending: the loop awaits the
/// controller before prompting again.
pub async fn run_cli<S: MoveSource>(mut controller: GameController<S>) -> anyhow::Result<()> {
    print_view(&controller.view());
    while let Some(line) = prompt()? {
        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::NewGame => controller.reset(),
            Command::Play(index) => match controller.human_move(index).await {
                MoveOutcome::Ignored(Rejection::Illegal(e)) => println!("{}", e),
                MoveOutcome::Ignored(Rejection::GameOver) => {
                    println!("The game is over - type n for a new game")
                }
                MoveOutcome::Ignored(Rejection::NotHumansTurn) => {
                    println!("Waiting for the opponent")
                }
                MoveOutcome::RemoteFailed(e) => log::debug!("remote failure: {}", e),
                MoveOutcome::Finished(_) | MoveOutcome::Replied(_) => {}
            },
        }
        print_view(&controller.view());
    }
    Ok(())
}
