use thiserror::Error;

/// Core error type shared across Surveysynth crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The table violates the equal-length column contract.
    #[error("invalid table: {0}")]
    InvalidTable(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by Surveysynth crates.
pub type Result<T> = std::result::Result<T, Error>;
