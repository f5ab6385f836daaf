//! Mock ports shared by the unit tests of this crate.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use statuscheck_domain::{
    BackendUrl, CaseResult, RunSummary, TestCase,
    request::{HttpMethod, RequestSpec},
    response::ResponseSpec,
};

use crate::ports::{
    Clock, ConfigError, ConfigSource, HttpClient, HttpClientError, HttpFuture, Reporter,
};

/// Builds a response with a JSON body.
pub fn json_response(status: u16, body: &serde_json::Value) -> ResponseSpec {
    ResponseSpec::new(
        status,
        HashMap::new(),
        body.to_string().as_bytes(),
        Duration::from_millis(5),
    )
}

/// HTTP client answering from a fixed script keyed by method and URL.
///
/// Unscripted requests fail with a connection-refused error.
#[derive(Default)]
pub struct ScriptedHttpClient {
    script: HashMap<(HttpMethod, String), Result<ResponseSpec, HttpClientError>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        mut self,
        method: HttpMethod,
        url: &str,
        result: Result<ResponseSpec, HttpClientError>,
    ) -> Self {
        self.script.insert((method, url.to_string()), result);
        self
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
        self.requests.lock().unwrap().push(request.clone());
        let result = self
            .script
            .get(&(request.method, request.url.clone()))
            .cloned()
            .unwrap_or_else(|| {
                Err(HttpClientError::ConnectionRefused {
                    host: "localhost".to_string(),
                    port: 8000,
                })
            });
        Box::pin(async move { result })
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    pub fn new_year_2024() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().fixed_offset())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Config source returning a fixed value or a missing-key error.
pub struct StaticConfig(pub Option<&'static str>);

#[async_trait]
impl ConfigSource for StaticConfig {
    async fn backend_url(&self) -> Result<BackendUrl, ConfigError> {
        match self.0 {
            Some(raw) => Ok(BackendUrl::parse(raw)?),
            None => Err(ConfigError::MissingKey {
                key: "REACT_APP_BACKEND_URL".to_string(),
                path: "/app/frontend/.env".into(),
            }),
        }
    }
}

/// Reporter recording one line per event.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn run_started(&mut self, base_url: &BackendUrl, cases: &[TestCase]) {
        self.events.push(format!("run_started {base_url} {}", cases.len()));
    }

    fn case_started(&mut self, case: &TestCase) {
        self.events.push(format!("case_started {}", case.name));
    }

    fn response_received(&mut self, case: &TestCase, response: &ResponseSpec) {
        self.events
            .push(format!("response {} {}", case.name, response.status.as_u16()));
    }

    fn case_finished(&mut self, case: &TestCase, result: &CaseResult) {
        self.events
            .push(format!("case_finished {} {}", case.name, result.outcome.verdict()));
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        self.events.push(format!(
            "run_finished run={} errors={} failures={}",
            summary.tests_run(),
            summary.errors(),
            summary.failures()
        ));
    }
}
