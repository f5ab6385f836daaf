//! Records exchanged with the backend under test.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

/// Prefix of every generated client name.
pub const CLIENT_NAME_PREFIX: &str = "test_client_";

/// Greeting the root endpoint must return.
pub const GREETING_MESSAGE: &str = "Hello World";

/// Payload sent to create a status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCheckCreate {
    /// Caller-chosen client name.
    pub client_name: String,
}

impl StatusCheckCreate {
    /// Builds a payload whose client name is derived from `now`.
    ///
    /// The name has the form `test_client_YYYYMMDDHHMMSS`, written in the
    /// wall-clock time of `now`'s own offset and unique per run at one-second
    /// resolution.
    #[must_use]
    pub fn at<Tz>(now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            client_name: format!("{CLIENT_NAME_PREFIX}{}", now.format("%Y%m%d%H%M%S")),
        }
    }
}
