//! Contract checks and their results.
//!
//! A verifier turns an [`ExpectedContract`](crate::contract::ExpectedContract)
//! into a list of [`Check`]s and reports one [`CheckResult`] per check.

use serde::{Deserialize, Serialize};

use crate::contract::ExpectedValue;
use crate::operation::Operation;

/// A single expectation checked against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Status code equals.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Status reason text equals.
    StatusText {
        /// Expected reason text.
        expected: String,
    },
    /// Header value list equals.
    Header {
        /// Header name (case-insensitive).
        name: String,
        /// Expected values, in order.
        expected: Vec<String>,
    },
    /// Body parses as non-null JSON.
    JsonBody,
    /// Body field exists with a non-null value.
    FieldPresent {
        /// Field name.
        field: String,
    },
    /// Body has exactly this many top-level keys.
    FieldCount {
        /// Expected key count.
        expected: usize,
    },
    /// Body field equals a literal.
    FieldValue {
        /// Field name.
        field: String,
        /// Expected value.
        expected: ExpectedValue,
    },
}

impl Check {
    /// Get a human-readable description of this check.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::StatusText { expected } => format!("Status text = '{expected}'"),
            Self::Header { name, expected } => {
                format!("Header '{name}' = {}", format_list(expected))
            }
            Self::JsonBody => "Body is non-null JSON".to_string(),
            Self::FieldPresent { field } => format!("Field '{field}' present"),
            Self::FieldCount { expected } => format!("Body has {expected} fields"),
            Self::FieldValue { field, expected } => {
                format!("Field '{field}' = {}", expected.describe())
            }
        }
    }
}

/// Renders a value list the way the contracts document them: `[a, b]`.
#[must_use]
pub fn format_list<S: AsRef<str>>(values: &[S]) -> String {
    let joined: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
    format!("[{}]", joined.join(", "))
}

/// Result of running a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    /// The check that was run.
    pub check: Check,
    /// Whether the check passed.
    pub passed: bool,
    /// Observed value (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl CheckResult {
    /// Create a passed result with observed value.
    #[must_use]
    pub fn pass_with_value(check: Check, actual: impl Into<String>) -> Self {
        Self {
            check,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(check: Check, error: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with observed value.
    #[must_use]
    pub fn fail_with_value(
        check: Check,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            check,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// Results of verifying one operation's response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationResults {
    /// Operation that was verified.
    pub operation: Operation,
    /// Individual check results.
    pub results: Vec<CheckResult>,
    /// Total number of checks.
    pub total: usize,
    /// Number of passed checks.
    pub passed: usize,
    /// Number of failed checks.
    pub failed: usize,
}

impl OperationResults {
    /// Create new operation results.
    #[must_use]
    pub fn new(operation: Operation, results: Vec<CheckResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            operation,
            results,
            total,
            passed,
            failed,
        }
    }

    /// Check if all checks passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Iterates over failed checks.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Formats each failure as `operation: message`.
    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        self.failures()
            .map(|r| {
                format!(
                    "{}: {}",
                    self.operation,
                    r.error.as_deref().unwrap_or("check failed")
                )
            })
            .collect()
    }
}
