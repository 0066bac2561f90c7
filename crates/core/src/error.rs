use thiserror::Error;

/// Errors that can occur around the tree search engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeSearchError {
    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Game is already over")]
    GameOver,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for tree search operations
pub type Result<T> = std::result::Result<T, TreeSearchError>;
