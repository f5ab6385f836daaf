//! Env-file configuration source.
//!
//! The backend URL lives in the env file of the sibling frontend component:
//!
//! ```text
//! /app/frontend/.env
//!   REACT_APP_BACKEND_URL=https://backend.example.com
//! ```
//!
//! A non-empty `REACT_APP_BACKEND_URL` in the process environment takes
//! precedence over the file, and `STATUSCHECK_ENV_FILE` relocates the file.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use statuscheck_application::ports::{ConfigError, ConfigSource};
use statuscheck_domain::BackendUrl;
use tracing::debug;

/// Key holding the backend URL.
pub const BACKEND_URL_KEY: &str = "REACT_APP_BACKEND_URL";

/// Env file read when no override is given.
pub const DEFAULT_ENV_FILE: &str = "/app/frontend/.env";

/// Process variable relocating the env file.
pub const ENV_FILE_VAR: &str = "STATUSCHECK_ENV_FILE";

/// Returns the value of the first line starting with `key=`.
///
/// Everything after the first `=` is the value; surrounding whitespace and
/// one pair of matching quotes are removed.
#[must_use]
pub fn find_key(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.strip_prefix(key)?.strip_prefix('=')?.trim();
        Some(unquote(value).to_string())
    })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Configuration source backed by an env file.
#[derive(Debug, Clone)]
pub struct EnvFileConfigSource {
    path: PathBuf,
    override_value: Option<String>,
}

impl EnvFileConfigSource {
    /// Creates a source reading the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            override_value: None,
        }
    }

    /// Creates a source from the process environment.
    ///
    /// The file is `$STATUSCHECK_ENV_FILE` when set, [`DEFAULT_ENV_FILE`]
    /// otherwise; `$REACT_APP_BACKEND_URL` becomes the override.
    #[must_use]
    pub fn from_env() -> Self {
        let path = std::env::var_os(ENV_FILE_VAR)
            .filter(|p| !p.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_ENV_FILE), PathBuf::from);
        Self::new(path).with_override(std::env::var(BACKEND_URL_KEY).ok())
    }

    /// Sets a value that wins over the file when non-empty.
    #[must_use]
    pub fn with_override(mut self, value: Option<String>) -> Self {
        self.override_value = value.filter(|v| !v.trim().is_empty());
        self
    }

    async fn read_value(&self) -> Result<String, ConfigError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ConfigError::NotFound(self.path.clone()),
                _ => ConfigError::Io {
                    path: self.path.clone(),
                    source,
                },
            })?;

        find_key(&content, BACKEND_URL_KEY).ok_or_else(|| ConfigError::MissingKey {
            key: BACKEND_URL_KEY.to_string(),
            path: self.path.clone(),
        })
    }
}

#[async_trait]
impl ConfigSource for EnvFileConfigSource {
    async fn backend_url(&self) -> Result<BackendUrl, ConfigError> {
        let raw = match &self.override_value {
            Some(value) => {
                debug!(key = BACKEND_URL_KEY, "using backend URL from process environment");
                value.clone()
            }
            None => {
                debug!(path = %self.path.display(), "reading backend URL from env file");
                self.read_value().await?
            }
        };

        Ok(BackendUrl::parse(&raw)?)
    }
}
