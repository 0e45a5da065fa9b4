//! Game controller: the single entry point for a presentation layer.
//!
//! A human move is applied through the turn state machine; unless it ends
//! the game, the controller then awaits the opposing move from its
//! [`MoveSource`] and applies the reply. Observers read the board, status
//! line and busy flag, either directly or through [`GameController::subscribe`].

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::client::{MoveSource, RemoteMoveError};
use crate::engine::{Board, GameState, GameStatus, HumanMove, Rejection, TurnMachine, TurnState};

/// Status line shown after the move service could not be reached.
pub const CONNECTION_ERROR: &str = "Error connecting to server.";

/// Everything a presentation layer needs to render the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub board: Board,
    pub status: String,
    pub busy: bool,
}

/// What a call to [`GameController::human_move`] did.
#[derive(Debug)]
pub enum MoveOutcome {
    /// The move was ignored; nothing changed.
    Ignored(Rejection),
    /// The human move ended the game; no remote request was made.
    Finished(GameStatus),
    /// The remote reply was applied; the session is now in this state.
    Replied(TurnState),
    /// The remote move could not be obtained; the human moves again from
    /// the position after their own move.
    RemoteFailed(RemoteMoveError),
}

/// Drives one game session against a [`MoveSource`].
pub struct GameController<S: MoveSource> {
    machine: TurnMachine,
    source: S,
    notice: Option<String>,
    view: watch::Sender<GameView>,
}

impl<S: MoveSource> GameController<S> {
    /// New game against `source`.
    pub fn new(source: S) -> Self {
        Self::with_machine(source, TurnMachine::new())
    }

    /// Resume from a saved position.
    pub fn from_state(source: S, state: GameState) -> Self {
        Self::with_machine(source, TurnMachine::from_state(state))
    }

    fn with_machine(source: S, machine: TurnMachine) -> Self {
        let (view, _) = watch::channel(GameView {
            board: machine.board(),
            status: machine.status().to_string(),
            busy: machine.is_busy(),
        });
        Self {
            machine,
            source,
            notice: None,
            view,
        }
    }

    pub fn board(&self) -> Board {
        self.machine.board()
    }

    pub fn ply(&self) -> u8 {
        self.machine.ply()
    }

    pub fn turn(&self) -> TurnState {
        self.machine.turn()
    }

    pub fn game_status(&self) -> GameStatus {
        self.machine.status()
    }

    /// `"Winner: X"`, `"Winner: O"`, `"Tie!"`, the connection error after a
    /// failed remote request, or empty.
    pub fn status_text(&self) -> String {
        match self.machine.status() {
            GameStatus::InProgress => self.notice.clone().unwrap_or_default(),
            status => status.to_string(),
        }
    }

    /// `true` while the remote move is pending.
    pub fn is_busy(&self) -> bool {
        self.machine.is_busy()
    }

    /// Current view of the game.
    pub fn view(&self) -> GameView {
        GameView {
            board: self.board(),
            status: self.status_text(),
            busy: self.is_busy(),
        }
    }

    /// Receiver that sees every view change, including the busy window
    /// while a remote request is in flight.
    pub fn subscribe(&self) -> watch::Receiver<GameView> {
        self.view.subscribe()
    }

    /// The move source driving the opposing player.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn publish(&self) {
        self.view.send_replace(self.view());
    }

    /// Play the human mark at `index`, then obtain and apply the opposing
    /// move unless the game is over.
    pub async fn human_move(&mut self, index: usize) -> MoveOutcome {
        match self.machine.human_move(index) {
            HumanMove::Ignored(reason) => {
                debug!("ignoring move at {}: {}", index, reason);
                return MoveOutcome::Ignored(reason);
            }
            HumanMove::GameOver => {
                self.notice = None;
                self.publish();
                let status = self.machine.status();
                info!("game over after human move: {:?}", status);
                return MoveOutcome::Finished(status);
            }
            HumanMove::AwaitingRemote => {}
        }

        self.notice = None;
        self.publish();

        let result = self
            .source
            .request_move(self.machine.board(), self.machine.ply())
            .await;
        let outcome = match result {
            Ok(reply) => {
                if reply.board.occupied() != reply.turn as usize {
                    warn!(
                        "remote reply has {} marks at turn {}; applying as sent",
                        reply.board.occupied(),
                        reply.turn
                    );
                }
                match self.machine.remote_result(reply.board, reply.turn) {
                    Some(turn) => MoveOutcome::Replied(turn),
                    None => MoveOutcome::Replied(self.machine.turn()),
                }
            }
            Err(e) => {
                warn!("remote move failed: {}", e);
                self.machine.remote_failure();
                self.notice = Some(CONNECTION_ERROR.to_string());
                MoveOutcome::RemoteFailed(e)
            }
        };
        self.publish();
        outcome
    }

    /// Start a new game.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.notice = None;
        self.publish();
    }
}
