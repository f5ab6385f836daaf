//! Run reporter port

use statuscheck_domain::{BackendUrl, CaseResult, RunSummary, TestCase, response::ResponseSpec};

/// Port receiving progress events of a run, in execution order.
pub trait Reporter {
    /// The base URL was resolved and the run is about to start.
    fn run_started(&mut self, base_url: &BackendUrl, cases: &[TestCase]);

    /// A case is about to issue its request.
    fn case_started(&mut self, case: &TestCase);

    /// A case received a response (before assertions are evaluated).
    fn response_received(&mut self, case: &TestCase, response: &ResponseSpec);

    /// A case completed.
    fn case_finished(&mut self, case: &TestCase, result: &CaseResult);

    /// All cases completed.
    fn run_finished(&mut self, summary: &RunSummary);
}
