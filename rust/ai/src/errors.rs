use indian_poker_engine::errors::GameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown agent kind: {0}")]
    UnknownAgent(String),
    #[error("Expected {expected} agents, got {actual}")]
    AgentCount { expected: usize, actual: usize },
}
