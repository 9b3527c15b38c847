//! Error types for the clubplan ecosystem.

use thiserror::Error;

/// Errors that can occur in clubplan operations.
#[derive(Error, Debug)]
pub enum ClubPlanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Import cache error: {0}")]
    Cache(String),

    #[error("Match store error: {0}")]
    Store(String),

    #[error("Match not found: {0}")]
    MatchNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for clubplan operations.
pub type ClubPlanResult<T> = Result<T, ClubPlanError>;
