//! Form store error types.

use thiserror::Error;

/// Result type for form store operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors reported by the form store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The store could not be reached or answered with something that is not JSON.
    #[error("Could not connect to server: {0}")]
    Transport(String),

    /// The store answered but rejected the operation.
    #[error("{message}")]
    Logical { message: String },
}

impl RepositoryError {
    pub fn logical(message: impl Into<String>) -> Self {
        Self::Logical {
            message: message.into(),
        }
    }

    /// Returns true if the store could not be reached.
    #[cfg(test)]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
