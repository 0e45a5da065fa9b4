//! Common types for tic-tac-toe: marks and move errors.

use core::fmt;

/// Symbol placed in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The mark of the other player.
    pub const fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Errors returned when a move cannot be applied to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveError {
    /// Index lies outside `0..CELLS`.
    OutOfRange { index: usize },
    /// Target cell already holds a mark.
    Occupied { index: usize, mark: Mark },
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveError::OutOfRange { index } => {
                write!(f, "Cell index {} is out of range", index)
            }
            IllegalMoveError::Occupied { index, mark } => {
                write!(f, "Cell {} is already taken by {}", index, mark)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IllegalMoveError {}
