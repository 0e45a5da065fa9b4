// Minimax move search with alpha-beta pruning.
// Uses no_std and avoids heap allocations.

use super::{board::Board, common::Mark, config::CELLS};
use rand::{seq::SliceRandom, Rng};

/// Bound on any score; wins are worth at most `CELLS + 1`.
const INF: i32 = 100;

/// Fill `moves` with the empty cells of `board` in random order and return
/// how many were written. Random ordering varies play between equally good
/// moves.
fn shuffled_moves<R: Rng + ?Sized>(
    board: &Board,
    moves: &mut [usize; CELLS],
    rng: &mut R,
) -> usize {
    let mut n = 0;
    for i in board.empty_cells() {
        moves[n] = i;
        n += 1;
    }
    moves[..n].shuffle(rng);
    n
}

/// Score `board` from `me`'s point of view with `to_move` next.
///
/// A win scores `depth + 1` so that quicker wins and slower losses are
/// preferred; anything unresolved within `depth` plies scores zero.
fn minimax<R: Rng + ?Sized>(
    board: &Board,
    me: Mark,
    to_move: Mark,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    rng: &mut R,
) -> i32 {
    if let Some(winner) = board.winner() {
        let score = depth as i32 + 1;
        return if winner == me { score } else { -score };
    }
    if depth == 0 || board.is_full() {
        return 0;
    }

    let mut moves = [0usize; CELLS];
    let n = shuffled_moves(board, &mut moves, rng);
    let maximizing = to_move == me;
    let mut best = if maximizing { -INF } else { INF };

    for &m in &moves[..n] {
        let Ok(next) = board.apply_move(m, to_move) else {
            continue;
        };
        let score = minimax(&next, me, to_move.opponent(), depth - 1, alpha, beta, rng);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Choose the best cell for `me` to play, searching `depth` plies ahead.
///
/// Returns `None` when the board has no empty cell. Each candidate is scored
/// with a full window so ties between equally good moves are broken by the
/// random move order.
pub fn find_best_move<R: Rng + ?Sized>(
    board: &Board,
    me: Mark,
    depth: u8,
    rng: &mut R,
) -> Option<usize> {
    let mut moves = [0usize; CELLS];
    let n = shuffled_moves(board, &mut moves, rng);
    let mut best: Option<(usize, i32)> = None;

    for &m in &moves[..n] {
        let Ok(next) = board.apply_move(m, me) else {
            continue;
        };
        let score = minimax(
            &next,
            me,
            me.opponent(),
            depth.saturating_sub(1),
            -INF,
            INF,
            rng,
        );
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((m, score));
        }
    }
    best.map(|(m, _)| m)
}
