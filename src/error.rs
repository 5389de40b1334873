use thiserror::Error;

/// Errors that stop the run before any check is made.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Missing or malformed command-line input. Raised before any request is made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
