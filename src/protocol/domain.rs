use crate::engine::{Board, GameState};

/// Position carried in both directions of a move exchange.
///
/// Serializes as `{ "board": [cell; 9], "turn": n }` with empty cells as
/// `null` and marks as `"X"` / `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MovePayload {
    pub board: Board,
    pub turn: u8,
}

impl MovePayload {
    pub fn new(board: Board, turn: u8) -> Self {
        Self { board, turn }
    }
}

impl From<GameState> for MovePayload {
    fn from(state: GameState) -> Self {
        MovePayload {
            board: state.board,
            turn: state.ply,
        }
    }
}

impl From<MovePayload> for GameState {
    fn from(payload: MovePayload) -> Self {
        GameState {
            board: payload.board,
            ply: payload.turn,
        }
    }
}
