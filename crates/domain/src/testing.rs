//! Response testing and assertions.
//!
//! This module provides the types for defining test cases against the
//! backend, evaluating their assertions on a response, and aggregating the
//! per-case results of a run.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::request::RequestSpec;
use crate::response::ResponseSpec;

/// A test assertion to run against a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check a top-level field of a JSON object body equals a value.
    FieldEquals {
        /// Field name.
        field: String,
        /// Expected value (as JSON).
        expected: Value,
    },
    /// Check a top-level field of a JSON object body is present and not null.
    FieldPresent {
        /// Field name.
        field: String,
    },
    /// Check the JSON body is an array.
    IsArray,
    /// Check the first element of a JSON array body has the given non-null
    /// fields. An empty array passes.
    FirstElementHasFields {
        /// Required field names.
        fields: Vec<String>,
        /// Plural noun for the elements, used in notes (e.g. "status checks").
        item_label: String,
    },
}

impl Assertion {
    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::FieldEquals { field, expected } => format!("JSON {field} equals {expected}"),
            Self::FieldPresent { field } => format!("JSON {field} is not null"),
            Self::IsArray => "Body is a JSON array".to_string(),
            Self::FirstElementHasFields { fields, .. } => {
                format!("First element has {}", fields.join(", "))
            }
        }
    }

    /// Returns true if evaluating this assertion requires a decoded body.
    #[must_use]
    pub const fn needs_json(&self) -> bool {
        !matches!(self, Self::StatusCode { .. })
    }

    /// Evaluates this assertion.
    ///
    /// `json` is the decoded body; it must be `Some` whenever
    /// [`needs_json`](Self::needs_json) returns true.
    ///
    /// # Errors
    ///
    /// Returns the reason when the body cannot be inspected at all: it was
    /// not decoded, or a field lookup hits a value that is not an object.
    pub fn check(
        &self,
        response: &ResponseSpec,
        json: Option<&Value>,
    ) -> Result<AssertionResult, String> {
        match (self, json) {
            (Self::StatusCode { expected }, _) => Ok(self.check_status_code(response, *expected)),
            (_, None) => Err("Response body was not decoded".to_string()),
            (Self::FieldEquals { field, expected }, Some(json)) => {
                self.check_field_equals(json, field, expected)
            }
            (Self::FieldPresent { field }, Some(json)) => self.check_field_present(json, field),
            (Self::IsArray, Some(json)) => Ok(self.check_is_array(json)),
            (Self::FirstElementHasFields { fields, item_label }, Some(json)) => {
                self.check_first_element(json, fields, item_label)
            }
        }
    }

    fn check_status_code(&self, response: &ResponseSpec, expected: u16) -> AssertionResult {
        let actual = response.status.as_u16();
        if actual == expected {
            AssertionResult::pass_with_value(self.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                self.clone(),
                actual.to_string(),
                format!("Expected status {expected}, got {actual}"),
            )
        }
    }

    fn check_field_equals(
        &self,
        json: &Value,
        field: &str,
        expected: &Value,
    ) -> Result<AssertionResult, String> {
        let object = as_object(json, "Response body")?;
        Ok(match object.get(field) {
            Some(actual) if actual == expected => {
                AssertionResult::pass_with_value(self.clone(), actual.to_string())
            }
            Some(actual) => AssertionResult::fail_with_value(
                self.clone(),
                actual.to_string(),
                format!("Field '{field}' mismatch: expected {expected}, got {actual}"),
            ),
            None => AssertionResult::fail(
                self.clone(),
                format!("Field '{field}' not found, expected {expected}"),
            ),
        })
    }

    fn check_field_present(&self, json: &Value, field: &str) -> Result<AssertionResult, String> {
        let object = as_object(json, "Response body")?;
        Ok(match object.get(field) {
            Some(Value::Null) | None => {
                AssertionResult::fail(self.clone(), format!("Field '{field}' is missing or null"))
            }
            Some(actual) => AssertionResult::pass_with_value(self.clone(), actual.to_string()),
        })
    }

    fn check_is_array(&self, json: &Value) -> AssertionResult {
        match json {
            Value::Array(items) => {
                AssertionResult::pass_with_value(self.clone(), format!("{} elements", items.len()))
            }
            other => AssertionResult::fail_with_value(
                self.clone(),
                json_kind(other),
                format!("Expected a JSON array, got {}", json_kind(other)),
            ),
        }
    }

    fn check_first_element(
        &self,
        json: &Value,
        fields: &[String],
        item_label: &str,
    ) -> Result<AssertionResult, String> {
        let Value::Array(items) = json else {
            return Ok(AssertionResult::fail(
                self.clone(),
                format!("Expected a JSON array, got {}", json_kind(json)),
            ));
        };

        let Some(first) = items.first() else {
            return Ok(AssertionResult::pass(self.clone())
                .with_note(format!("No {item_label} found, but endpoint works")));
        };

        let record = as_object(first, "First element")?;
        let note = format!("Found {} {item_label}", items.len());
        let missing: Vec<&str> = fields
            .iter()
            .filter(|field| record.get(field.as_str()).is_none_or(Value::is_null))
            .map(String::as_str)
            .collect();

        Ok(if missing.is_empty() {
            AssertionResult::pass(self.clone()).with_note(note)
        } else {
            AssertionResult::fail_with_value(
                self.clone(),
                first.to_string(),
                format!("First element is missing or has null {}", missing.join(", ")),
            )
            .with_note(note)
        })
    }
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, String> {
    value
        .as_object()
        .ok_or_else(|| format!("{what} is not a JSON object, got {}", json_kind(value)))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
    /// Informational line for the report, independent of the outcome.
    pub note: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
            note: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::pass(assertion)
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
            note: None,
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::fail(assertion, error)
        }
    }

    /// Attach a report note (builder pattern).
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// One independently reported test operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Identifier, e.g. `test_root_endpoint`.
    pub name: String,
    /// One-line description shown next to the name.
    pub description: String,
    /// Short label used in progress lines, e.g. `Root endpoint`.
    pub label: String,
    /// Request to issue.
    pub request: RequestSpec,
    /// Assertions, evaluated in order up to the first failure.
    pub assertions: Vec<Assertion>,
    /// Whether the report echoes the raw response body.
    pub echo_body: bool,
}

impl TestCase {
    /// Create a case with no assertions.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        label: impl Into<String>,
        request: RequestSpec,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            label: label.into(),
            request,
            assertions: Vec::new(),
            echo_body: false,
        }
    }

    /// Add an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Echo the response body in the report (builder pattern).
    #[must_use]
    pub const fn echoing_body(mut self) -> Self {
        self.echo_body = true;
        self
    }

    /// Evaluates the assertions against a response.
    ///
    /// Evaluation stops at the first failed assertion. The body is decoded
    /// once, right before the first assertion that needs it. A body that is
    /// not valid JSON, or whose shape prevents a field lookup, makes the case
    /// an error rather than a failure.
    #[must_use]
    pub fn evaluate(&self, response: &ResponseSpec) -> Evaluation {
        let mut results = Vec::with_capacity(self.assertions.len());
        let mut json: Option<Value> = None;

        for assertion in &self.assertions {
            if assertion.needs_json() && json.is_none() {
                match response.json() {
                    Ok(value) => json = Some(value),
                    Err(e) => {
                        return Evaluation {
                            results,
                            outcome: CaseOutcome::Errored {
                                reason: format!("Response body is not valid JSON: {e}"),
                            },
                        };
                    }
                }
            }

            let result = match assertion.check(response, json.as_ref()) {
                Ok(result) => result,
                Err(reason) => {
                    return Evaluation {
                        results,
                        outcome: CaseOutcome::Errored { reason },
                    };
                }
            };
            let failure = result.error.clone().filter(|_| !result.passed);
            results.push(result);

            if let Some(reason) = failure {
                return Evaluation {
                    results,
                    outcome: CaseOutcome::Failed { reason },
                };
            }
        }

        Evaluation {
            results,
            outcome: CaseOutcome::Passed,
        }
    }
}

/// Assertion results and verdict for one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Evaluated assertions, in order.
    pub results: Vec<AssertionResult>,
    /// Verdict.
    pub outcome: CaseOutcome,
}

/// Verdict of a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Every assertion held.
    Passed,
    /// An assertion did not hold.
    Failed {
        /// Failure message.
        reason: String,
    },
    /// The case could not be evaluated (transport failure, body that cannot
    /// be decoded or inspected).
    Errored {
        /// Error message.
        reason: String,
    },
}

impl CaseOutcome {
    /// Check if the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Failure or error message, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed { reason } | Self::Errored { reason } => Some(reason),
        }
    }

    /// Short verdict word used in the report.
    #[must_use]
    pub const fn verdict(&self) -> &'static str {
        match self {
            Self::Passed => "ok",
            Self::Failed { .. } => "FAIL",
            Self::Errored { .. } => "ERROR",
        }
    }
}

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    /// Case identifier.
    pub name: String,
    /// Case description.
    pub description: String,
    /// Verdict.
    pub outcome: CaseOutcome,
    /// Evaluated assertions.
    pub assertions: Vec<AssertionResult>,
    /// Wall-clock duration of the case.
    pub duration: Duration,
}

/// Aggregated results of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Per-case results, in execution order.
    pub results: Vec<CaseResult>,
    /// Wall-clock duration of the whole run.
    pub duration: Duration,
}

impl RunSummary {
    /// Create a summary from case results.
    #[must_use]
    pub const fn new(results: Vec<CaseResult>, duration: Duration) -> Self {
        Self { results, duration }
    }

    /// Number of cases run.
    #[must_use]
    pub fn tests_run(&self) -> usize {
        self.results.len()
    }

    /// Number of errored cases.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, CaseOutcome::Errored { .. }))
            .count()
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, CaseOutcome::Failed { .. }))
            .count()
    }

    /// True iff no case failed or errored.
    #[must_use]
    pub fn was_successful(&self) -> bool {
        self.errors() == 0 && self.failures() == 0
    }

    /// Process exit code: 0 on success, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.was_successful())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(status, HashMap::new(), body.as_bytes(), Duration::ZERO)
    }

    fn record_fields() -> Vec<String> {
        vec!["id".into(), "client_name".into(), "timestamp".into()]
    }

    fn list_case() -> TestCase {
        TestCase::new("list", "List things", "List", RequestSpec::get("http://x/api/status"))
            .with_assertion(Assertion::StatusCode { expected: 200 })
            .with_assertion(Assertion::IsArray)
            .with_assertion(Assertion::FirstElementHasFields {
                fields: record_fields(),
                item_label: "status checks".into(),
            })
    }

    fn result(outcome: CaseOutcome) -> CaseResult {
        CaseResult {
            name: "case".into(),
            description: String::new(),
            outcome,
            assertions: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_assertion_description() {
        assert_eq!(
            Assertion::StatusCode { expected: 200 }.description(),
            "Status code = 200"
        );
        assert_eq!(
            Assertion::FieldEquals {
                field: "message".into(),
                expected: Value::from("Hello World"),
            }
            .description(),
            "JSON message equals \"Hello World\""
        );
    }

    #[test]
    fn test_status_code_mismatch() {
        let assertion = Assertion::StatusCode { expected: 200 };
        let result = assertion.check(&response(404, ""), None).unwrap();
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("404"));
        assert_eq!(result.error.as_deref(), Some("Expected status 200, got 404"));
    }

    #[test]
    fn test_field_equals() {
        let assertion = Assertion::FieldEquals {
            field: "message".into(),
            expected: Value::from("Hello World"),
        };
        let ok = serde_json::json!({"message": "Hello World"});
        let wrong = serde_json::json!({"message": "Hi"});
        let absent = serde_json::json!({});

        assert!(assertion.check(&response(200, ""), Some(&ok)).unwrap().passed);
        assert!(!assertion.check(&response(200, ""), Some(&wrong)).unwrap().passed);
        assert!(!assertion.check(&response(200, ""), Some(&absent)).unwrap().passed);
    }

    #[test]
    fn test_field_present_rejects_null() {
        let assertion = Assertion::FieldPresent { field: "id".into() };
        let present = serde_json::json!({"id": "abc-123"});
        let null = serde_json::json!({"id": null});
        let list = serde_json::json!([]);

        assert!(assertion.check(&response(200, ""), Some(&present)).unwrap().passed);
        assert!(!assertion.check(&response(200, ""), Some(&null)).unwrap().passed);
        assert_eq!(
            assertion.check(&response(200, ""), Some(&list)),
            Err("Response body is not a JSON object, got array".to_string())
        );
    }

    #[test]
    fn test_non_object_body_is_error() {
        let case = TestCase::new("root", "Root", "Root", RequestSpec::get("http://x/api"))
            .with_assertion(Assertion::StatusCode { expected: 200 })
            .with_assertion(Assertion::FieldEquals {
                field: "message".into(),
                expected: Value::from("Hello World"),
            });

        let evaluation = case.evaluate(&response(200, r#"["Hello World"]"#));

        assert_eq!(
            evaluation.outcome,
            CaseOutcome::Errored {
                reason: "Response body is not a JSON object, got array".into()
            }
        );
        assert_eq!(evaluation.results.len(), 1);
    }

    #[test]
    fn test_non_object_first_element_is_error() {
        let evaluation = list_case().evaluate(&response(200, r#"["abc-123"]"#));
        assert_eq!(
            evaluation.outcome,
            CaseOutcome::Errored {
                reason: "First element is not a JSON object, got string".into()
            }
        );
    }

    #[test]
    fn test_empty_list_passes() {
        let evaluation = list_case().evaluate(&response(200, "[]"));
        assert_eq!(evaluation.outcome, CaseOutcome::Passed);
        assert_eq!(
            evaluation.results[2].note.as_deref(),
            Some("No status checks found, but endpoint works")
        );
    }

    #[test]
    fn test_first_element_checked() {
        let body = r#"[{"id":"abc-123","client_name":"c","timestamp":"2024-01-01T00:00:00Z"},{}]"#;
        let evaluation = list_case().evaluate(&response(200, body));
        assert_eq!(evaluation.outcome, CaseOutcome::Passed);
        assert_eq!(
            evaluation.results[2].note.as_deref(),
            Some("Found 2 status checks")
        );

        let evaluation = list_case().evaluate(&response(200, r#"[{"id":"a","client_name":null}]"#));
        assert_eq!(
            evaluation.outcome,
            CaseOutcome::Failed {
                reason: "First element is missing or has null client_name, timestamp".into()
            }
        );
    }

    #[test]
    fn test_object_is_not_array() {
        let evaluation = list_case().evaluate(&response(200, r#"{"items":[]}"#));
        assert_eq!(
            evaluation.outcome,
            CaseOutcome::Failed {
                reason: "Expected a JSON array, got object".into()
            }
        );
        assert_eq!(evaluation.results.len(), 2);
    }

    #[test]
    fn test_status_failure_stops_evaluation() {
        let evaluation = list_case().evaluate(&response(404, "not json"));
        assert!(matches!(evaluation.outcome, CaseOutcome::Failed { .. }));
        assert_eq!(evaluation.results.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let evaluation = list_case().evaluate(&response(200, "<html>"));
        assert!(matches!(evaluation.outcome, CaseOutcome::Errored { .. }));
        assert_eq!(evaluation.results.len(), 1);
    }

    #[test]
    fn test_outcome_verdicts() {
        assert_eq!(CaseOutcome::Passed.verdict(), "ok");
        assert_eq!(CaseOutcome::Failed { reason: "x".into() }.verdict(), "FAIL");
        assert_eq!(CaseOutcome::Errored { reason: "y".into() }.reason(), Some("y"));
    }

    #[test]
    fn test_run_summary_counts() {
        let summary = RunSummary::new(
            vec![
                result(CaseOutcome::Failed { reason: "404".into() }),
                result(CaseOutcome::Passed),
                result(CaseOutcome::Errored { reason: "refused".into() }),
            ],
            Duration::from_millis(30),
        );
        assert_eq!(summary.tests_run(), 3);
        assert_eq!(summary.failures(), 1);
        assert_eq!(summary.errors(), 1);
        assert!(!summary.was_successful());
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_run_summary_success() {
        let summary = RunSummary::new(vec![result(CaseOutcome::Passed)], Duration::ZERO);
        assert!(summary.was_successful());
        assert_eq!(summary.exit_code(), 0);
    }
}
