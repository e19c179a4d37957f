use indian_poker_engine::rules::Action;
use indian_poker_engine::state::State;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha20Rng;

use crate::Agent;

/// Picks uniformly among the legal actions.
pub struct RandomAgent {
    rng: ChaCha20Rng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl Agent for RandomAgent {
    fn step(&mut self, state: &State) -> Action {
        // only reachable with an empty set once the hand is over
        state
            .legal_actions
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Action::Fold)
    }

    fn name(&self) -> &str {
        "RandomAgent"
    }
}
