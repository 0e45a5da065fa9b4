//! Move-generation service: the remote player behind the protocol.

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::engine::{find_best_move, Mark, MAX_PLY, REMOTE_MARK};
use crate::protocol::{MoveApi, MovePayload};

/// Plays the remote mark using a full-depth minimax search.
pub struct MinimaxEngine {
    rng: SmallRng,
    mark: Mark,
}

impl MinimaxEngine {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            mark: REMOTE_MARK,
        }
    }

    /// Engine with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Engine seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        let mut seed_rng = rand::rng();
        Self::new(SmallRng::from_rng(&mut seed_rng))
    }

    /// Mark this engine plays.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Play one move on `state`, returning the new position with the turn
    /// advanced by one.
    pub fn play(&mut self, state: MovePayload) -> anyhow::Result<MovePayload> {
        if state.board.is_terminal() {
            return Err(anyhow::anyhow!("Game is already over"));
        }
        // Search as deep as the moves left in the game.
        let depth = MAX_PLY.saturating_sub(state.turn).max(1);
        let index = find_best_move(&state.board, self.mark, depth, &mut self.rng)
            .ok_or_else(|| anyhow::anyhow!("No empty cell to play"))?;
        let board = state
            .board
            .apply_move(index, self.mark)
            .map_err(|e| anyhow::anyhow!(e))?;
        debug!("{} plays cell {} at turn {}", self.mark, index, state.turn);
        Ok(MovePayload::new(board, state.turn.saturating_add(1)))
    }
}

#[async_trait::async_trait]
impl MoveApi for MinimaxEngine {
    async fn next_move(&mut self, state: MovePayload) -> anyhow::Result<MovePayload> {
        self.play(state)
    }
}
