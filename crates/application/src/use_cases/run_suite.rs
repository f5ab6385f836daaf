//! Run Suite Use Case
//!
//! Executes test cases strictly one after another. Each case is its own
//! failure domain: a transport error or failed assertion is recorded against
//! that case and the run moves on to the next one.

use std::sync::Arc;
use std::time::Instant;

use statuscheck_domain::{CaseOutcome, CaseResult, RunSummary, TestCase};
use tracing::{debug, warn};

use crate::ports::{HttpClient, Reporter};

/// Use case for running a list of test cases.
///
/// # Example
///
/// ```ignore
/// let runner = RunSuite::new(Arc::new(ReqwestHttpClient::new()?));
/// let summary = runner.run(&cases, &mut reporter).await;
/// std::process::exit(summary.exit_code().into());
/// ```
pub struct RunSuite<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> RunSuite<C> {
    /// Creates a new `RunSuite` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Runs every case in order and returns the aggregated summary.
    pub async fn run(&self, cases: &[TestCase], reporter: &mut dyn Reporter) -> RunSummary {
        let start = Instant::now();
        let mut results = Vec::with_capacity(cases.len());

        for case in cases {
            results.push(self.run_case(case, reporter).await);
        }

        let summary = RunSummary::new(results, start.elapsed());
        reporter.run_finished(&summary);
        summary
    }

    /// Runs a single case: one request, then its assertions.
    pub async fn run_case(&self, case: &TestCase, reporter: &mut dyn Reporter) -> CaseResult {
        reporter.case_started(case);
        let start = Instant::now();

        debug!(
            case = %case.name,
            method = %case.request.method,
            url = %case.request.url,
            "sending request"
        );
        let (outcome, assertions) = match self.client.execute(&case.request).await {
            Ok(response) => {
                debug!(
                    case = %case.name,
                    status = response.status.as_u16(),
                    content_type = ?response.get_header("content-type"),
                    elapsed_ms = response.duration.as_millis(),
                    "response received"
                );
                reporter.response_received(case, &response);
                let evaluation = case.evaluate(&response);
                (evaluation.outcome, evaluation.results)
            }
            Err(e) => {
                warn!(case = %case.name, error = %e, "request failed");
                (
                    CaseOutcome::Errored {
                        reason: e.to_string(),
                    },
                    Vec::new(),
                )
            }
        };

        let result = CaseResult {
            name: case.name.clone(),
            description: case.description.clone(),
            outcome,
            assertions,
            duration: start.elapsed(),
        };
        reporter.case_finished(case, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use statuscheck_domain::{Assertion, request::{HttpMethod, RequestSpec}};

    use crate::ports::HttpClientError;
    use crate::test_support::{RecordingReporter, ScriptedHttpClient, json_response};

    fn ping_case(name: &str, url: &str) -> TestCase {
        TestCase::new(name, "Ping", "Ping", RequestSpec::get(url))
            .with_assertion(Assertion::StatusCode { expected: 200 })
            .with_assertion(Assertion::FieldEquals {
                field: "ok".into(),
                expected: json!(true),
            })
    }

    #[tokio::test]
    async fn test_all_cases_pass() {
        let client = ScriptedHttpClient::new()
            .on(HttpMethod::Get, "http://x/a", Ok(json_response(200, &json!({"ok": true}))))
            .on(HttpMethod::Get, "http://x/b", Ok(json_response(200, &json!({"ok": true}))));
        let runner = RunSuite::new(Arc::new(client));
        let mut reporter = RecordingReporter::default();

        let summary = runner
            .run(&[ping_case("a", "http://x/a"), ping_case("b", "http://x/b")], &mut reporter)
            .await;

        assert!(summary.was_successful());
        assert_eq!(summary.tests_run(), 2);
        assert_eq!(
            reporter.events,
            vec![
                "case_started a",
                "response a 200",
                "case_finished a ok",
                "case_started b",
                "response b 200",
                "case_finished b ok",
                "run_finished run=2 errors=0 failures=0",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_run() {
        let client = ScriptedHttpClient::new()
            .on(
                HttpMethod::Get,
                "http://x/a",
                Ok(json_response(404, &json!({"detail": "Not Found"}))),
            )
            .on(HttpMethod::Get, "http://x/b", Ok(json_response(200, &json!({"ok": true}))));
        let client = Arc::new(client);
        let runner = RunSuite::new(Arc::clone(&client));
        let mut reporter = RecordingReporter::default();

        let summary = runner
            .run(&[ping_case("a", "http://x/a"), ping_case("b", "http://x/b")], &mut reporter)
            .await;

        assert_eq!(client.requests().len(), 2);
        assert_eq!(summary.failures(), 1);
        assert_eq!(summary.errors(), 0);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(
            summary.results[0].outcome,
            CaseOutcome::Failed {
                reason: "Expected status 200, got 404".into()
            }
        );
        assert!(summary.results[1].outcome.is_passed());
    }

    #[tokio::test]
    async fn test_transport_error_is_recorded_as_error() {
        let client = ScriptedHttpClient::new().on(
            HttpMethod::Get,
            "http://x/a",
            Err(HttpClientError::ConnectionFailed("reset by peer".into())),
        );
        let runner = RunSuite::new(Arc::new(client));
        let mut reporter = RecordingReporter::default();

        let summary = runner.run(&[ping_case("a", "http://x/a")], &mut reporter).await;

        assert_eq!(summary.errors(), 1);
        assert_eq!(summary.failures(), 0);
        assert!(!summary.was_successful());
        assert!(summary.results[0].assertions.is_empty());
        assert_eq!(
            reporter.events,
            vec![
                "case_started a",
                "case_finished a ERROR",
                "run_finished run=1 errors=1 failures=0",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_suite_is_successful() {
        let runner = RunSuite::new(Arc::new(ScriptedHttpClient::new()));
        let mut reporter = RecordingReporter::default();

        let summary = runner.run(&[], &mut reporter).await;

        assert!(summary.was_successful());
        assert_eq!(summary.tests_run(), 0);
    }
}
