//! Human-readable console reporter.
//!
//! Writes progress lines as the run advances, then a detail section for
//! every case that did not pass, the timing line and the summary counts.

use std::fmt::Display;
use std::io::{self, Stdout, Write};

use statuscheck_application::ports::Reporter;
use statuscheck_domain::{
    BackendUrl, CaseOutcome, CaseResult, RunSummary, TestCase, response::ResponseSpec,
};
use tracing::warn;

const HEAVY_RULE: &str =
    "======================================================================";
const LIGHT_RULE: &str =
    "----------------------------------------------------------------------";

/// Reporter writing plain text to any [`Write`] sink.
///
/// Write failures are logged and otherwise ignored: the exit code, not the
/// report, is the contract of a run.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    /// Creates a reporter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "failed to write report line");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "failed to flush report");
        }
    }

    fn write_details(&mut self, summary: &RunSummary) {
        for result in &summary.results {
            let Some(reason) = result.outcome.reason() else {
                continue;
            };
            self.line(HEAVY_RULE);
            self.line(format_args!(
                "{}: {} ({})",
                result.outcome.verdict(),
                result.name,
                result.description
            ));
            self.line(LIGHT_RULE);
            for assertion in result.assertions.iter().filter(|a| a.passed) {
                self.line(format_args!("  passed: {}", assertion.assertion.description()));
            }
            self.line(reason);
            self.line("");
        }
    }
}

/// Trailer of the xUnit style result line, e.g. `FAILED (failures=1, errors=2)`.
fn verdict_line(summary: &RunSummary) -> String {
    if summary.was_successful() {
        return "OK".to_string();
    }
    let mut counts = Vec::with_capacity(2);
    if summary.failures() > 0 {
        counts.push(format!("failures={}", summary.failures()));
    }
    if summary.errors() > 0 {
        counts.push(format!("errors={}", summary.errors()));
    }
    format!("FAILED ({})", counts.join(", "))
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn run_started(&mut self, base_url: &BackendUrl, cases: &[TestCase]) {
        let noun = if cases.len() == 1 { "case" } else { "cases" };
        self.line(format_args!("Starting status check API tests: {} {noun}", cases.len()));
        self.line(format_args!("Using backend URL: {base_url}"));
        self.line("");
    }

    fn case_started(&mut self, case: &TestCase) {
        self.line(format_args!("{} ({}) ...", case.name, case.description));
        self.line(format_args!("Testing {}: {}", case.label, case.request.url));
        self.flush();
    }

    fn response_received(&mut self, case: &TestCase, response: &ResponseSpec) {
        self.line(format_args!("Status code: {}", response.status.as_u16()));
        if case.echo_body {
            self.line(format_args!("Response: {}", response.body));
        }
    }

    fn case_finished(&mut self, case: &TestCase, result: &CaseResult) {
        for note in result.assertions.iter().filter_map(|a| a.note.as_deref()) {
            self.line(note);
        }
        match &result.outcome {
            CaseOutcome::Passed => self.line(format_args!("✅ {} test passed", case.label)),
            CaseOutcome::Failed { reason } | CaseOutcome::Errored { reason } => {
                self.line(format_args!("❌ {} test failed: {reason}", case.label));
            }
        }
        self.line(result.outcome.verdict());
        self.line("");
        self.flush();
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        self.write_details(summary);
        self.line(LIGHT_RULE);
        self.line(format_args!(
            "Ran {} tests in {:.3}s",
            summary.tests_run(),
            summary.duration.as_secs_f64()
        ));
        self.line("");
        self.line(verdict_line(summary));
        self.line("");
        self.line("=== Test Summary ===");
        self.line(format_args!("Tests run: {}", summary.tests_run()));
        self.line(format_args!("Errors: {}", summary.errors()));
        self.line(format_args!("Failures: {}", summary.failures()));
        self.flush();
    }
}
