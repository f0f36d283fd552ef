//! Error types for the foosball ladder
//!
//! Operations return `anyhow::Result` and raise `LadderError` variants for the
//! failures a caller may want to match on (via `downcast_ref`).

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ladder scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Invalid rating input: {reason}")]
    InvalidRating { reason: String },

    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Invalid player: {reason}")]
    InvalidPlayer { reason: String },

    #[error("Player already exists: {name}")]
    DuplicatePlayer { name: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

impl LadderError {
    pub(crate) fn invalid_match(reason: impl Into<String>) -> Self {
        Self::InvalidMatch {
            reason: reason.into(),
        }
    }
}
