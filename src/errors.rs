use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Plan generation was requested for a snapshot that cannot support it
    /// (no income data). Callers must branch on this rather than render a
    /// zero-filled plan.
    #[error("Insufficient data to generate a plan: {0}")]
    InsufficientData(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository error: {0}")]
    Repository(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
