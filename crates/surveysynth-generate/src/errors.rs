use thiserror::Error;

/// Errors emitted by the synthesis engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The caller asked for a negative number of synthetic rows.
    #[error("invalid row count: {0}")]
    InvalidRowCount(i64),
    /// A categorical draw was attempted over an empty value set.
    #[error("empty value domain for column '{0}'")]
    EmptyDomain(String),
    /// A weighted draw received an unusable weight vector.
    #[error("invalid weights: {0}")]
    InvalidWeights(String),
}
