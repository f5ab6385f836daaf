//! Statuscheck Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, ConfigError, ConfigSource, HttpClient, HttpClientError, Reporter};
pub use use_cases::{RunStatusChecks, RunSuite, status_check_suite};
