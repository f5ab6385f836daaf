//! Use cases
//!
//! - [`RunSuite`] executes test cases one after another and aggregates
//!   their results.
//! - [`RunStatusChecks`] resolves the backend, builds the status-check suite
//!   and runs it.

mod run_suite;
mod status_checks;

pub use run_suite::RunSuite;
pub use status_checks::{
    RunStatusChecks, root_endpoint_case, status_check_suite, status_get_case, status_post_case,
};
