//! # indian-poker-engine: Indian Poker Game Engine Core
//!
//! A deterministic Indian poker engine built as a reinforcement-learning
//! environment. Every seat is dealt one card it cannot see while seeing
//! everybody else's; one betting round follows, then the highest card wins.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded shuffling and the per-hand [`deck::Dealer`]
//! - [`player`] - Seat state: hand, committed chips, stack, status
//! - [`rules`] - The action set and betting legality
//! - [`round`] - The betting-round state machine
//! - [`hand`] - Hand ranking
//! - [`judger`] - Showdown and payoff distribution
//! - [`game`] - Hand orchestration, step / step-back, multi-hand sessions
//! - [`state`] - Per-seat observations
//! - [`config`] - Table configuration (TOML and environment)
//! - [`logger`] - Hand history records in JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use indian_poker_engine::config::GameConfig;
//! use indian_poker_engine::game::Game;
//! use indian_poker_engine::rules::Action;
//!
//! let mut game = Game::new(GameConfig { seed: Some(42), ..GameConfig::default() }).unwrap();
//! let (state, _seat) = game.init_game().unwrap();
//! assert_eq!(state.pot, 3);
//!
//! while !game.is_over() {
//!     let legal = game.get_legal_actions().unwrap();
//!     let action = if legal.contains(&Action::Check) { Action::Check } else { Action::Call };
//!     game.step(action).unwrap();
//! }
//! let payoffs = game.get_payoffs().unwrap();
//! assert_eq!(payoffs.iter().sum::<i64>(), 0);
//! ```
//!
//! ## Step Back
//!
//! Every step can be undone, which search and training code relies on:
//!
//! ```rust
//! use indian_poker_engine::config::GameConfig;
//! use indian_poker_engine::game::Game;
//! use indian_poker_engine::rules::Action;
//!
//! let mut game = Game::new(GameConfig { seed: Some(1), ..GameConfig::default() }).unwrap();
//! game.init_game().unwrap();
//! let before = game.snapshot().cloned();
//! game.step(Action::Call).unwrap();
//! assert!(game.step_back());
//! assert_eq!(game.snapshot().cloned(), before);
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod judger;
pub mod logger;
pub mod player;
pub mod round;
pub mod rules;
pub mod state;
