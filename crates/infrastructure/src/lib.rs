//! Statuscheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod config;
pub mod reporting;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::EnvFileConfigSource;
pub use reporting::ConsoleReporter;
