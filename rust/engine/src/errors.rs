use thiserror::Error;

use crate::rules::Action;
use crate::state::State;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Cannot reset player {seat} with {in_chips} chips still in play")]
    ResetWithChipsInPlay { seat: usize, in_chips: u32 },
    #[error("Session not initialized; call init_game first")]
    SessionNotInitialized,
    #[error("Session over: only {solvent} seat(s) still have chips")]
    SessionOver { solvent: usize },
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Hand not complete")]
    HandNotComplete,
    #[error("Action {action} not allowed; legal actions: {legal:?}")]
    IllegalAction {
        action: Action,
        legal: Vec<Action>,
        /// State of the acting seat when the action was rejected. Filled in by
        /// the game; the round alone cannot build a state view.
        state: Option<Box<State>>,
    },
    #[error("Seat {seat} out of range for {num_players} players")]
    InvalidSeat { seat: usize, num_players: usize },
    #[error("Expected {expected} payoffs, got {actual}")]
    PayoffLength { expected: usize, actual: usize },
    #[error("No contenders left to judge")]
    NoContenders,
    #[error("Seat {seat} has an empty hand")]
    EmptyHand { seat: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
