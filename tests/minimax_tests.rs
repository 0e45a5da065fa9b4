use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tictactoe::{find_best_move, Board, Cell, Mark, MinimaxEngine, MovePayload, MAX_PLY};

const X: Cell = Some(Mark::X);
const O: Cell = Some(Mark::O);
const E: Cell = None;

#[test]
fn test_takes_immediate_win() {
    // O completes the middle column; X also threatens the top row.
    let board = Board::from_cells([X, O, X, E, O, E, X, E, E]);
    for seed in 0..16 {
        let mut rng = SmallRng::seed_from_u64(seed);
        assert_eq!(find_best_move(&board, Mark::O, MAX_PLY, &mut rng), Some(7));
    }
}

#[test]
fn test_blocks_immediate_loss() {
    // X threatens the top row; nothing else is open for either side.
    let board = Board::from_cells([X, E, X, E, O, E, E, E, E]);
    for seed in 0..16 {
        let mut rng = SmallRng::seed_from_u64(seed);
        assert_eq!(find_best_move(&board, Mark::O, MAX_PLY, &mut rng), Some(1));
    }
}

#[test]
fn test_full_board_has_no_move() {
    let board = Board::from_cells([X, O, X, X, O, O, O, X, X]);
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(find_best_move(&board, Mark::O, MAX_PLY, &mut rng), None);
}

#[test]
fn test_same_seed_same_game() {
    let state = MovePayload::new(Board::from_cells([E, E, E, E, X, E, E, E, E]), 1);
    let a = MinimaxEngine::seeded(99).play(state).unwrap();
    let b = MinimaxEngine::seeded(99).play(state).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_engine_refuses_finished_game() {
    let state = MovePayload::new(Board::from_cells([X, X, X, O, O, E, E, E, E]), 5);
    let err = MinimaxEngine::seeded(0).play(state).unwrap_err();
    assert!(err.to_string().contains("already over"));
}

#[test]
fn test_engine_plays_its_own_mark() {
    let mut engine = MinimaxEngine::seeded(4);
    assert_eq!(engine.mark(), Mark::O);
    let reply = engine.play(MovePayload::new(Board::new(), 0)).unwrap();
    assert_eq!(reply.turn, 1);
    assert_eq!(reply.board.cells().iter().filter(|c| **c == O).count(), 1);
}

/// Play a whole game with X choosing cells from `picks` and O from the engine.
fn play_out(picks: &[usize], seed: u64) -> Board {
    let mut engine = MinimaxEngine::seeded(seed);
    let mut state = MovePayload::new(Board::new(), 0);
    let mut picks = picks.iter().copied();
    while !state.board.is_terminal() {
        let free: Vec<usize> = state.board.empty_cells().collect();
        let pick = free[picks.next().unwrap_or(0) % free.len()];
        state.board = state.board.apply_move(pick, Mark::X).unwrap();
        state.turn += 1;
        if state.board.is_terminal() {
            break;
        }
        state = engine.play(state).unwrap();
    }
    state.board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn engine_never_loses(picks in prop::collection::vec(0usize..9, 5), seed in any::<u64>()) {
        let board = play_out(&picks, seed);
        prop_assert_ne!(board.winner(), Some(Mark::X));
    }
}
