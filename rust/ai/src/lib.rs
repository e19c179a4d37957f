//! # indian-poker-ai: Agents and Self-Play for Indian Poker
//!
//! Agents that pick actions from a seat's [`State`], and the [`arena::Arena`]
//! that seats them at a [`Game`](indian_poker_engine::game::Game) and plays
//! hands to completion.
//!
//! ## Core Components
//!
//! - [`Agent`] - Trait every policy implements
//! - [`random`] - Uniform random policy
//! - [`baseline`] - Rule-based policy reading the visible rival cards
//! - [`arena`] - Hand runner collecting trajectories and payoffs
//! - [`create_agent`] - Factory by kind name
//!
//! ## Quick Start
//!
//! ```rust
//! use indian_poker_ai::arena::{Arena, ArenaConfig};
//! use indian_poker_ai::create_agent;
//! use indian_poker_engine::config::GameConfig;
//!
//! let agents = vec![
//!     create_agent("rule", None).unwrap(),
//!     create_agent("random", Some(3)).unwrap(),
//! ];
//! let config = GameConfig { seed: Some(42), ..GameConfig::default() };
//! let mut arena = Arena::new(config, agents, ArenaConfig::default()).unwrap();
//! let (trajectories, payoffs) = arena.run(false).unwrap();
//! assert_eq!(trajectories.len(), 2);
//! assert_eq!(payoffs.iter().sum::<i64>(), 0);
//! ```

use indian_poker_engine::rules::Action;
use indian_poker_engine::state::State;

pub mod arena;
pub mod baseline;
pub mod errors;
pub mod logging;
pub mod random;

pub use errors::ArenaError;

/// A policy for one seat.
///
/// # Example Implementation
///
/// ```rust
/// use indian_poker_ai::Agent;
/// use indian_poker_engine::rules::Action;
/// use indian_poker_engine::state::State;
///
/// struct AlwaysCall;
///
/// impl Agent for AlwaysCall {
///     fn step(&mut self, state: &State) -> Action {
///         if state.legal_actions.contains(&Action::Call) {
///             Action::Call
///         } else {
///             Action::Check
///         }
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysCall"
///     }
/// }
/// ```
pub trait Agent: Send {
    /// Action chosen while training.
    fn step(&mut self, state: &State) -> Action;

    /// Action chosen during evaluation. Same as [`Agent::step`] unless the
    /// policy explores while training.
    fn eval_step(&mut self, state: &State) -> Action {
        self.step(state)
    }

    fn name(&self) -> &str;
}

/// Creates an agent by kind: `"random"` or `"rule"`. `seed` only matters for
/// the random agent.
///
/// ```rust
/// use indian_poker_ai::create_agent;
///
/// let agent = create_agent("rule", None).unwrap();
/// assert_eq!(agent.name(), "RuleAgent");
/// assert!(create_agent("neural", None).is_err());
/// ```
pub fn create_agent(kind: &str, seed: Option<u64>) -> Result<Box<dyn Agent>, ArenaError> {
    match kind {
        "random" => Ok(Box::new(random::RandomAgent::new(seed))),
        "rule" => Ok(Box::new(baseline::RuleAgent::new())),
        _ => Err(ArenaError::UnknownAgent(kind.to_string())),
    }
}
