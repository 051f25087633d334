use thiserror::Error;

/// Failure categories surfaced to the UI. None of them are fatal: callers
/// degrade to an empty or stale view and show the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BolaoError {
    /// Bad user input, shown as a prompt.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Local storage read/write failure, shown as an alert.
    #[error("persistence failed: {0}")]
    Persistence(String),
    /// Feed unreachable, non-2xx or undecodable, shown inline.
    #[error("feed request failed: {0}")]
    Feed(String),
}

impl BolaoError {
    pub fn is_validation(&self) -> bool {
        matches!(self, BolaoError::Validation(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, BolaoError::Persistence(_))
    }

    pub fn is_feed(&self) -> bool {
        matches!(self, BolaoError::Feed(_))
    }
}

pub type Result<T, E = BolaoError> = std::result::Result<T, E>;
