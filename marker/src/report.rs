//! # Grade Report Module
//!
//! The per-student result of one grading run, as written by a
//! [`ReportSink`](crate::traits::report_sink::ReportSink).
//!
//! ```json
//! {
//!   "student_id": "alice",
//!   "problem_id": "Q1",
//!   "score": 10,
//!   "total_marks": 10,
//!   "feedback": ["Test 1: Passed", "Test 2: Passed"],
//!   "meta": { "compile_error": false, "unexpected_error": false, "no_submission": false,
//!             "language_mismatch": false, "language": "python", "submission_file": "main.py" },
//!   "results": [ { "test": 1, "status": "passed" }, { "test": 2, "status": "passed" } ],
//!   "graded_at": "2025-01-01T12:00:00Z"
//! }
//! ```
//!
//! `graded_at` is the only field that changes between two runs on the same
//! submission and problem.

use crate::types::TestResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use util::languages::Language;

/// Diagnostic flags describing how grading went.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// The toolchain rejected the submission; later tests were not run.
    pub compile_error: bool,
    /// An infrastructure failure stopped evaluation.
    pub unexpected_error: bool,
    /// No file with a supported extension was found.
    pub no_submission: bool,
    /// The problem declares a language other than the one detected.
    pub language_mismatch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    pub student_id: String,
    pub problem_id: String,
    /// Always within `0..=total_marks`.
    pub score: u32,
    pub total_marks: u32,
    pub feedback: Vec<String>,
    pub meta: ReportMeta,
    /// One entry per test case that was evaluated, in order.
    #[serde(default)]
    pub results: Vec<TestResult>,
    pub graded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TestStatus;

    fn report() -> GradeReport {
        GradeReport {
            student_id: "alice".into(),
            problem_id: "Q1".into(),
            score: 5,
            total_marks: 10,
            feedback: vec!["Test 1: Passed".into(), "Test 2: Timeout after 2s".into()],
            meta: ReportMeta {
                language: Some(Language::Python),
                submission_file: Some("main.py".into()),
                ..ReportMeta::default()
            },
            results: vec![
                TestResult::new(1, TestStatus::Passed),
                TestResult::new(2, TestStatus::Timeout { limit_secs: 2.0 }),
            ],
            graded_at: Utc::now(),
        }
    }

    #[test]
    fn test_json_shape() {
        let original = report();
        let value = serde_json::to_value(&original).unwrap();
        assert_eq!(value["score"], 5);
        assert_eq!(value["feedback"][1], "Test 2: Timeout after 2s");
        assert_eq!(value["meta"]["compile_error"], false);
        assert_eq!(value["meta"]["language"], "python");
        assert_eq!(value["results"][1]["status"], "timeout");
        assert!(value["graded_at"].as_str().unwrap().contains('T'));

        let back: GradeReport = serde_json::from_value(value).unwrap();
        assert_eq!(back, original);
    }
}
