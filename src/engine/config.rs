use super::common::Mark;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// Largest ply a game can reach; a board with this many marks is full.
pub const MAX_PLY: u8 = CELLS as u8;

/// Mark placed by the local human player.
pub const HUMAN_MARK: Mark = Mark::X;

/// Mark placed by the remote move service.
pub const REMOTE_MARK: Mark = Mark::O;

/// Winning lines, scanned in this order: rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];
