//! # Types Module
//!
//! Structured per-test results. These are what the grading engine records;
//! human-readable feedback is rendered from them afterwards.

use serde::{Deserialize, Serialize};

/// How a single test case ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    /// Output did not match. Both sides are stored trimmed.
    Failed { expected: String, actual: String },
    /// The compile or run step exceeded the problem's time limit.
    Timeout { limit_secs: f64 },
    /// Evaluation stopped here; later tests were never run.
    CompileError { message: String },
    /// Infrastructure failure; evaluation stopped here.
    UnexpectedError { message: String },
}

/// The result of one test case, numbered from 1 in test-case order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test: usize,
    #[serde(flatten)]
    pub status: TestStatus,
    /// Anything the program wrote to stderr, when non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl TestResult {
    pub fn new(test: usize, status: TestStatus) -> Self {
        Self {
            test,
            status,
            stderr: None,
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = Some(stderr.into());
        self
    }

    pub fn passed(&self) -> bool {
        matches!(self.status, TestStatus::Passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_is_flattened_into_result() {
        let result = TestResult::new(
            2,
            TestStatus::Failed {
                expected: "100".into(),
                actual: "99".into(),
            },
        );
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"test": 2, "status": "failed", "expected": "100", "actual": "99"})
        );
    }

    #[test]
    fn test_stderr_only_serialized_when_present() {
        let result = TestResult::new(1, TestStatus::Passed).with_stderr("DeprecationWarning");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"test": 1, "status": "passed", "stderr": "DeprecationWarning"})
        );

        let parsed: TestResult =
            serde_json::from_value(json!({"test": 3, "status": "timeout", "limit_secs": 2.0}))
                .unwrap();
        assert_eq!(parsed, TestResult::new(3, TestStatus::Timeout { limit_secs: 2.0 }));
        assert!(!parsed.passed());
    }
}
