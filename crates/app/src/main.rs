//! statuscheck - Main Entry Point
//!
//! Resolves the backend URL, runs the status-check suite against it and
//! exits with 0 when every case passed, 1 otherwise. The report goes to
//! stdout; logs go to stderr and are filtered through `RUST_LOG`.

use std::process::ExitCode;
use std::sync::Arc;

use statuscheck_application::{ApplicationError, RunStatusChecks};
use statuscheck_infrastructure::{
    ConsoleReporter, EnvFileConfigSource, ReqwestHttpClient, SystemClock,
};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = match ReqwestHttpClient::new() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create HTTP client");
            println!("Failed to create HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let use_case = RunStatusChecks::new(
        EnvFileConfigSource::from_env(),
        SystemClock::new(),
        Arc::new(client),
    );
    let mut reporter = ConsoleReporter::stdout();

    match use_case.execute(&mut reporter).await {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(ApplicationError::Config(e)) => {
            error!(error = %e, "aborting before any case ran");
            println!("Configuration error: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "aborting before any case ran");
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
