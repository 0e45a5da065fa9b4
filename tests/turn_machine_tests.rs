use proptest::prelude::*;
use tictactoe::{
    Board, Cell, GameState, GameStatus, HumanMove, IllegalMoveError, Mark, Rejection, TurnMachine,
    TurnState,
};

const X: Cell = Some(Mark::X);
const O: Cell = Some(Mark::O);
const E: Cell = None;

fn machine_at(cells: [Cell; 9]) -> TurnMachine {
    let board = Board::from_cells(cells);
    TurnMachine::from_state(GameState {
        board,
        ply: board.occupied() as u8,
    })
}

#[test]
fn test_initial_state() {
    let m = TurnMachine::new();
    assert_eq!(m.turn(), TurnState::AwaitingHuman);
    assert_eq!(m.ply(), 0);
    assert_eq!(m.board(), Board::new());
    assert_eq!(m.status(), GameStatus::InProgress);
    assert!(!m.is_busy());
}

#[test]
fn test_human_move_hands_turn_to_remote() {
    let mut m = TurnMachine::new();
    assert_eq!(m.human_move(4), HumanMove::AwaitingRemote);
    assert_eq!(m.turn(), TurnState::AwaitingRemote);
    assert_eq!(m.ply(), 1);
    assert_eq!(m.board().cell(4).unwrap(), X);
    assert!(m.is_busy());
}

#[test]
fn test_moves_ignored_while_remote_pending() {
    let mut m = TurnMachine::new();
    m.human_move(0);
    let before = m.state();
    assert_eq!(m.human_move(1), HumanMove::Ignored(Rejection::NotHumansTurn));
    assert_eq!(m.state(), before);
}

#[test]
fn test_illegal_moves_are_ignored() {
    let mut m = machine_at([X, O, E, E, E, E, E, E, E]);
    let before = m.state();
    assert_eq!(
        m.human_move(1),
        HumanMove::Ignored(Rejection::Illegal(IllegalMoveError::Occupied {
            index: 1,
            mark: Mark::O
        }))
    );
    assert_eq!(
        m.human_move(9),
        HumanMove::Ignored(Rejection::Illegal(IllegalMoveError::OutOfRange { index: 9 }))
    );
    assert_eq!(m.state(), before);
    assert_eq!(m.turn(), TurnState::AwaitingHuman);
}

#[test]
fn test_winning_human_move_ends_game() {
    let mut m = machine_at([X, X, E, O, O, E, E, E, E]);
    assert_eq!(m.human_move(2), HumanMove::GameOver);
    assert_eq!(m.turn(), TurnState::GameOver);
    assert_eq!(m.ply(), 5);
    assert_eq!(m.status(), GameStatus::Won(Mark::X));
    assert_eq!(m.human_move(5), HumanMove::Ignored(Rejection::GameOver));
}

#[test]
fn test_last_cell_ties() {
    let mut m = machine_at([X, O, X, X, O, O, O, X, E]);
    assert_eq!(m.human_move(8), HumanMove::GameOver);
    assert_eq!(m.status(), GameStatus::Tie);
    assert_eq!(m.ply(), 9);
}

#[test]
fn test_remote_result_replaces_state() {
    let mut m = TurnMachine::new();
    m.human_move(4);
    let reply = Board::from_cells([E, E, E, E, X, E, E, O, E]);
    assert_eq!(m.remote_result(reply, 2), Some(TurnState::AwaitingHuman));
    assert_eq!(m.board(), reply);
    assert_eq!(m.ply(), 2);
    assert!(!m.is_busy());
}

#[test]
fn test_remote_result_is_trusted() {
    let mut m = TurnMachine::new();
    m.human_move(0);
    // Not a single-move delta from the sent board; applied anyway.
    let reply = Board::from_cells([E, O, E, E, E, E, E, E, E]);
    assert_eq!(m.remote_result(reply, 7), Some(TurnState::AwaitingHuman));
    assert_eq!(m.board(), reply);
    assert_eq!(m.ply(), 7);
}

#[test]
fn test_remote_win_ends_game() {
    let mut m = machine_at([X, E, E, O, O, E, X, E, E]);
    m.human_move(8);
    let reply = Board::from_cells([X, E, E, O, O, O, X, E, X]);
    assert_eq!(m.remote_result(reply, 6), Some(TurnState::GameOver));
    assert_eq!(m.status(), GameStatus::Won(Mark::O));
}

#[test]
fn test_remote_result_ignored_unless_pending() {
    let mut m = TurnMachine::new();
    assert_eq!(m.remote_result(Board::from_cells([O; 9]), 9), None);
    assert_eq!(m.board(), Board::new());
    assert!(!m.remote_failure());
}

#[test]
fn test_remote_failure_keeps_position() {
    let mut m = TurnMachine::new();
    m.human_move(4);
    let after_human = m.state();
    assert!(m.remote_failure());
    assert_eq!(m.turn(), TurnState::AwaitingHuman);
    assert_eq!(m.state(), after_human);
    // the player may move again from the same position
    assert_eq!(m.human_move(0), HumanMove::AwaitingRemote);
    assert_eq!(m.ply(), 2);
}

#[test]
fn test_reset() {
    let mut m = machine_at([X, X, E, O, O, E, E, E, E]);
    m.human_move(2);
    m.reset();
    assert_eq!(m.turn(), TurnState::AwaitingHuman);
    assert_eq!(m.state(), GameState::default());
}

#[test]
fn test_from_terminal_state_is_game_over() {
    let m = machine_at([O, O, O, X, X, E, X, E, E]);
    assert_eq!(m.turn(), TurnState::GameOver);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Alternate human moves with a remote player that takes the first free
    /// cell; ply always matches the number of marks and the game always ends.
    #[test]
    fn ply_tracks_occupancy(picks in prop::collection::vec(0usize..9, 1..40)) {
        let mut m = TurnMachine::new();
        for pick in picks {
            let before = m.state();
            match m.human_move(pick) {
                HumanMove::Ignored(_) => prop_assert_eq!(m.state(), before),
                HumanMove::GameOver => {
                    prop_assert!(m.board().is_terminal());
                }
                HumanMove::AwaitingRemote => {
                    let board = m.board();
                    let free = board.empty_cells().next().unwrap();
                    let reply = board.apply_move(free, Mark::O).unwrap();
                    m.remote_result(reply, m.ply() + 1);
                }
            }
            prop_assert_eq!(m.ply() as usize, m.board().occupied());
            prop_assert_eq!(m.turn() == TurnState::GameOver, m.board().is_terminal());
        }
    }
}
