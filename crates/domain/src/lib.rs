//! Statuscheck Domain - Core types
//!
//! This crate defines the domain model of the backend smoke-test runner.
//! All types here are pure Rust with no I/O dependencies.

pub mod backend;
pub mod error;
pub mod request;
pub mod response;
pub mod status_check;
pub mod testing;

pub use backend::BackendUrl;
pub use error::{DomainError, DomainResult};
pub use status_check::{CLIENT_NAME_PREFIX, GREETING_MESSAGE, StatusCheckCreate};
pub use testing::{
    Assertion, AssertionResult, CaseOutcome, CaseResult, Evaluation, RunSummary, TestCase,
};
