//! Configuration source port

use std::path::PathBuf;

use async_trait::async_trait;
use statuscheck_domain::{BackendUrl, DomainError};
use thiserror::Error;

/// Errors that can occur while resolving the backend URL.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The configuration file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The required key is absent.
    #[error("key {key} not found in {}", path.display())]
    MissingKey {
        /// Key that was looked up.
        key: String,
        /// File that was searched.
        path: PathBuf,
    },

    /// The configured value is not a usable URL.
    #[error(transparent)]
    InvalidUrl(#[from] DomainError),
}

/// Port for obtaining the base URL of the backend under test.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Resolves the backend base URL.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the source is missing or malformed.
    async fn backend_url(&self) -> Result<BackendUrl, ConfigError>;
}
