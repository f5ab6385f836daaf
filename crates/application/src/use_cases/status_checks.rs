//! Status Check Suite
//!
//! The three cases exercised against the backend, in the order they run:
//! the root greeting, creation of a status check and listing of status
//! checks.

use std::sync::Arc;

use serde_json::Value;
use statuscheck_domain::{
    Assertion, BackendUrl, GREETING_MESSAGE, RunSummary, StatusCheckCreate, TestCase,
    request::RequestSpec,
};
use tracing::info;

use crate::ApplicationResult;
use crate::ports::{Clock, ConfigSource, HttpClient, Reporter};
use crate::use_cases::RunSuite;

const ROOT_PATH: &str = "/api";
const STATUS_PATH: &str = "/api/status";
const RECORD_FIELDS: [&str; 3] = ["id", "client_name", "timestamp"];

/// `GET /api` must answer 200 with the greeting message.
#[must_use]
pub fn root_endpoint_case(base: &BackendUrl) -> TestCase {
    TestCase::new(
        "test_root_endpoint",
        "Test the root API endpoint",
        "Root endpoint",
        RequestSpec::get(base.endpoint(ROOT_PATH)),
    )
    .with_assertion(Assertion::StatusCode { expected: 200 })
    .with_assertion(Assertion::FieldEquals {
        field: "message".to_string(),
        expected: Value::from(GREETING_MESSAGE),
    })
    .echoing_body()
}

/// `POST /api/status` must answer 200, echo the client name and assign
/// `id` and `timestamp`.
///
/// # Errors
///
/// Returns an error if `payload` cannot be encoded as JSON.
pub fn status_post_case(
    base: &BackendUrl,
    payload: &StatusCheckCreate,
) -> serde_json::Result<TestCase> {
    let body = serde_json::to_value(payload)?;
    Ok(TestCase::new(
        "test_status_endpoint_post",
        "Test creating a status check",
        "POST status endpoint",
        RequestSpec::post_json(base.endpoint(STATUS_PATH), body),
    )
    .with_assertion(Assertion::StatusCode { expected: 200 })
    .with_assertion(Assertion::FieldEquals {
        field: "client_name".to_string(),
        expected: Value::from(payload.client_name.as_str()),
    })
    .with_assertion(Assertion::FieldPresent {
        field: "id".to_string(),
    })
    .with_assertion(Assertion::FieldPresent {
        field: "timestamp".to_string(),
    })
    .echoing_body())
}

/// `GET /api/status` must answer 200 with a list whose first element, if
/// any, is a complete record. An empty list passes.
#[must_use]
pub fn status_get_case(base: &BackendUrl) -> TestCase {
    TestCase::new(
        "test_status_endpoint_get",
        "Test getting status checks",
        "GET status endpoint",
        RequestSpec::get(base.endpoint(STATUS_PATH)),
    )
    .with_assertion(Assertion::StatusCode { expected: 200 })
    .with_assertion(Assertion::IsArray)
    .with_assertion(Assertion::FirstElementHasFields {
        fields: RECORD_FIELDS.iter().map(ToString::to_string).collect(),
        item_label: "status checks".to_string(),
    })
}

/// Builds the full suite. The POST case runs before the GET case so that a
/// freshly created record is normally visible to the listing.
///
/// # Errors
///
/// Returns an error if the creation payload cannot be encoded as JSON.
pub fn status_check_suite(
    base: &BackendUrl,
    clock: &dyn Clock,
) -> serde_json::Result<Vec<TestCase>> {
    let payload = StatusCheckCreate::at(&clock.now());
    Ok(vec![
        root_endpoint_case(base),
        status_post_case(base, &payload)?,
        status_get_case(base),
    ])
}

/// Use case for the complete run: configuration, suite, execution.
pub struct RunStatusChecks<S: ConfigSource, K: Clock, C: HttpClient> {
    config: S,
    clock: K,
    runner: RunSuite<C>,
}

impl<S: ConfigSource, K: Clock, C: HttpClient> RunStatusChecks<S, K, C> {
    /// Creates the use case from its ports.
    pub const fn new(config: S, clock: K, client: Arc<C>) -> Self {
        Self {
            config,
            clock,
            runner: RunSuite::new(client),
        }
    }

    /// Resolves the backend URL, then runs the suite against it.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Config`](crate::ApplicationError::Config)
    /// if the backend URL cannot be resolved, and
    /// [`ApplicationError::Payload`](crate::ApplicationError::Payload) if the
    /// suite cannot be built; no request is sent in either case. Case
    /// failures are not errors: they are reported in the summary.
    pub async fn execute(&self, reporter: &mut dyn Reporter) -> ApplicationResult<RunSummary> {
        let base = self.config.backend_url().await?;
        info!(base_url = %base, "resolved backend URL");

        let cases = status_check_suite(&base, &self.clock)?;
        reporter.run_started(&base, &cases);
        Ok(self.runner.run(&cases, reporter).await)
    }
}
