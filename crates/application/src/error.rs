//! Application error types

use thiserror::Error;

use crate::ports::ConfigError;

/// Application-level errors.
///
/// Failures of individual cases are not errors at this level; they are
/// recorded in the run summary.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The backend configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A request payload could not be encoded as JSON.
    #[error("failed to encode request payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
