use super::{
    board::Board,
    common::{IllegalMoveError, Mark},
    config::{HUMAN_MARK, MAX_PLY},
};
use core::fmt;

/// Outcome of the game derived from a board. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won(Mark),
    Tie,
}

/// Status line shown to the player: empty while the game is running.
impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => Ok(()),
            GameStatus::Won(mark) => write!(f, "Winner: {}", mark),
            GameStatus::Tie => write!(f, "Tie!"),
        }
    }
}

/// Whose input the session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingHuman,
    AwaitingRemote,
    GameOver,
}

/// Serializable snapshot of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub board: Board,
    pub ply: u8,
}

/// Why a human move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A remote move is still pending.
    NotHumansTurn,
    /// The game has ended.
    GameOver,
    /// The target cell is taken or off the board.
    Illegal(IllegalMoveError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotHumansTurn => write!(f, "Waiting for the remote move"),
            Rejection::GameOver => write!(f, "The game is over"),
            Rejection::Illegal(e) => write!(f, "{}", e),
        }
    }
}

/// Result of offering a human move to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanMove {
    /// The move was ignored; nothing changed.
    Ignored(Rejection),
    /// The move was applied and the remote player is up.
    AwaitingRemote,
    /// The move was applied and ended the game.
    GameOver,
}

/// Turn state machine for one session: board, ply and whose move is pending.
#[derive(Debug, Clone)]
pub struct TurnMachine {
    board: Board,
    ply: u8,
    turn: TurnState,
}

impl TurnMachine {
    /// Fresh game: empty board, ply 0, human to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            ply: 0,
            turn: TurnState::AwaitingHuman,
        }
    }

    /// Current board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Moves made so far.
    pub fn ply(&self) -> u8 {
        self.ply
    }

    /// Current turn state.
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// Status derived from the current board.
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// `true` while a remote move is pending.
    pub fn is_busy(&self) -> bool {
        self.turn == TurnState::AwaitingRemote
    }

    /// Offer a human move at `index`.
    ///
    /// Moves that arrive out of turn, after the game has ended, or onto an
    /// occupied or non-existent cell are ignored and leave the state intact.
    pub fn human_move(&mut self, index: usize) -> HumanMove {
        match self.turn {
            TurnState::AwaitingRemote => return HumanMove::Ignored(Rejection::NotHumansTurn),
            TurnState::GameOver => return HumanMove::Ignored(Rejection::GameOver),
            TurnState::AwaitingHuman => {}
        }
        if self.board.is_terminal() {
            return HumanMove::Ignored(Rejection::GameOver);
        }
        let next = match self.board.apply_move(index, HUMAN_MARK) {
            Ok(b) => b,
            Err(e) => return HumanMove::Ignored(Rejection::Illegal(e)),
        };
        self.board = next;
        self.ply = self.ply.saturating_add(1);

        // ply >= MAX_PLY implies a full board; kept as a guard against a
        // miscounted ply from the remote side.
        if self.board.is_terminal() || self.ply >= MAX_PLY {
            self.turn = TurnState::GameOver;
            HumanMove::GameOver
        } else {
            self.turn = TurnState::AwaitingRemote;
            HumanMove::AwaitingRemote
        }
    }

    /// Apply the board and ply returned by the remote player.
    ///
    /// The values replace the current state wholesale without re-validation.
    /// Returns `None` (and changes nothing) unless a remote move was pending.
    pub fn remote_result(&mut self, board: Board, ply: u8) -> Option<TurnState> {
        if self.turn != TurnState::AwaitingRemote {
            return None;
        }
        self.board = board;
        self.ply = ply;
        self.turn = if board.is_terminal() {
            TurnState::GameOver
        } else {
            TurnState::AwaitingHuman
        };
        Some(self.turn)
    }

    /// The remote move could not be obtained: hand the turn back to the
    /// human at the unchanged position.
    pub fn remote_failure(&mut self) -> bool {
        if self.turn != TurnState::AwaitingRemote {
            return false;
        }
        self.turn = TurnState::AwaitingHuman;
        true
    }

    /// Start a new game.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Snapshot of board and ply.
    pub fn state(&self) -> GameState {
        GameState {
            board: self.board,
            ply: self.ply,
        }
    }

    /// Resume from a snapshot. Terminal boards resume as game over,
    /// everything else with the human to move.
    pub fn from_state(state: GameState) -> Self {
        let turn = if state.board.is_terminal() {
            TurnState::GameOver
        } else {
            TurnState::AwaitingHuman
        };
        Self {
            board: state.board,
            ply: state.ply,
            turn,
        }
    }
}

impl Default for TurnMachine {
    fn default() -> Self {
        Self::new()
    }
}
