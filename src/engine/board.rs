//! The 3×3 board: cell occupancy and line-based winner/tie detection.

use super::common::{IllegalMoveError, Mark};
use super::config::{CELLS, LINES};
use super::game::GameStatus;
use core::fmt;

/// Contents of a single cell; `None` is an empty cell.
pub type Cell = Option<Mark>;

/// Fixed nine-cell grid, indexed row by row from the top-left corner.
///
/// Boards are small `Copy` values; [`Board::apply_move`] returns a new board
/// and leaves its input untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Create an empty board.
    pub const fn new() -> Self {
        Board { cells: [None; CELLS] }
    }

    /// Build a board from raw cell values.
    pub const fn from_cells(cells: [Cell; CELLS]) -> Self {
        Board { cells }
    }

    /// Immutable view of all nine cells.
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Contents of the cell at `index`.
    pub fn cell(&self, index: usize) -> Result<Cell, IllegalMoveError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(IllegalMoveError::OutOfRange { index })
    }

    /// Place `mark` at `index`, returning the resulting board.
    ///
    /// Fails if the index is off the board or the cell is taken. Turn order
    /// is not checked here.
    pub fn apply_move(&self, index: usize, mark: Mark) -> Result<Board, IllegalMoveError> {
        if let Some(existing) = self.cell(index)? {
            return Err(IllegalMoveError::Occupied {
                index,
                mark: existing,
            });
        }
        let mut next = *self;
        next.cells[index] = Some(mark);
        Ok(next)
    }

    /// Mark holding three in a row, if any. Lines are checked rows first,
    /// then columns, then diagonals; the first match wins.
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Some(mark) if self.cells[b] == Some(mark) && self.cells[c] == Some(mark) => {
                Some(mark)
            }
            _ => None,
        })
    }

    /// Returns `true` when every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns `true` once the game on this board has ended.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Derived game status.
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(mark) => GameStatus::Won(mark),
            None if self.is_full() => GameStatus::Tie,
            None => GameStatus::InProgress,
        }
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
    }
}

impl From<[Cell; CELLS]> for Board {
    fn from(cells: [Cell; CELLS]) -> Self {
        Board::from_cells(cells)
    }
}

/// Renders three rows; empty cells show their 1-based number.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "--+---+--")?;
            }
            for col in 0..3 {
                let i = row * 3 + col;
                if col > 0 {
                    write!(f, " | ")?;
                }
                match self.cells[i] {
                    Some(mark) => write!(f, "{}", mark)?,
                    None => write!(f, "{}", i + 1)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
