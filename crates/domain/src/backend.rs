//! Backend base URL
//!
//! The single configuration value the runner needs: the root address of the
//! backend under test.

use std::fmt;

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Resolved root address of the backend under test.
///
/// Always an absolute `http`/`https` URL without a trailing `/`, so endpoint
/// paths can be appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUrl(String);

impl BackendUrl {
    /// Parses a raw configuration value into a base URL.
    ///
    /// Surrounding whitespace is ignored and a single trailing `/` is
    /// stripped.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the value is empty, cannot be
    /// parsed, or does not use the `http`/`https` scheme.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUrl("URL is empty".to_string()));
        }

        let parsed =
            Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{e}: {trimmed}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {trimmed}",
                parsed.scheme()
            )));
        }

        let base = trimmed.strip_suffix('/').unwrap_or(trimmed);
        Ok(Self(base.to_string()))
    }

    /// Returns the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the full URL of an endpoint below the base.
    ///
    /// `path` is expected to start with `/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl fmt::Display for BackendUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
