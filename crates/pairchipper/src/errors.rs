//! # Error Types

use crate::regex::ErrorWrapper;

/// Errors from pairchipper operations.
#[derive(Debug, thiserror::Error)]
pub enum PairchipperError {
    /// A caller-supplied argument or configuration value is unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// There are no adjacent symbol pairs left to rank.
    ///
    /// This is a terminal condition, not a failure; the training loop
    /// maps it to [`crate::training::TrainingState::Converged`].
    #[error("empty vocabulary: no adjacent symbol pairs remain")]
    EmptyVocabulary,

    /// Regex compilation or matching error.
    #[error(transparent)]
    Regex(#[from] ErrorWrapper),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PairchipperError {
    /// Build an [`PairchipperError::InvalidArgument`] from a message.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for pairchipper operations.
pub type PCResult<T> = core::result::Result<T, PairchipperError>;
