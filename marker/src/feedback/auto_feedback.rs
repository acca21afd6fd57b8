//! # AutoFeedback Strategy
//!
//! Template-based feedback. Each result yields its status line; a result that
//! carries stderr output is preceded by a `Runtime stderr` warning line.
//!
//! ```text
//! Test 1: Runtime stderr: DeprecationWarning: ...
//! Test 1: Passed
//! Test 2: Failed: expected `100`, got `99`
//! Test 3: Timeout after 2s
//! ```

use crate::traits::feedback::Feedback;
use crate::types::{TestResult, TestStatus};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct AutoFeedback;

impl AutoFeedback {
    fn status_line(result: &TestResult) -> String {
        let test = result.test;
        match &result.status {
            TestStatus::Passed => format!("Test {test}: Passed"),
            TestStatus::Failed { expected, actual } => {
                format!("Test {test}: Failed: expected `{expected}`, got `{actual}`")
            }
            TestStatus::Timeout { limit_secs } => format!("Test {test}: Timeout after {limit_secs}s"),
            TestStatus::CompileError { message } => {
                format!("Test {test}: Compilation error: {}", message.trim())
            }
            TestStatus::UnexpectedError { message } => {
                format!("Test {test}: Unexpected error: {}", message.trim())
            }
        }
    }
}

#[async_trait]
impl Feedback for AutoFeedback {
    async fn assemble_feedback(&self, results: &[TestResult]) -> Vec<String> {
        let mut lines = Vec::with_capacity(results.len());
        for result in results {
            if let Some(stderr) = &result.stderr {
                lines.push(format!("Test {}: Runtime stderr: {}", result.test, stderr.trim()));
            }
            lines.push(Self::status_line(result));
        }
        lines
    }
}
