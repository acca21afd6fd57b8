//! # Marker Library
//!
//! Grades one student's submission against a [`Problem`].
//!
//! ## Key Concepts
//! - **MarkingJob**: grades a single submission folder and produces a [`GradeReport`].
//! - **Comparators**: decide whether a program's output matches the expected output.
//! - **Feedback**: renders human-readable lines from the structured per-test results.
//! - **Report sinks**: persist finished reports (JSON files, or memory in tests).
//!
//! Grading never fails. Missing submissions, compile errors, timeouts and
//! infrastructure faults all end up as results and feedback in the report.

pub mod comparators;
pub mod error;
pub mod feedback;
pub mod report;
pub mod scorer;
pub mod sinks;
pub mod traits;
pub mod types;

use crate::comparators::exact_comparator::ExactComparator;
use crate::feedback::auto_feedback::AutoFeedback;
use crate::report::{GradeReport, ReportMeta};
use crate::traits::comparator::OutputComparator;
use crate::traits::feedback::Feedback;
use crate::traits::report_sink::ReportSink;
use crate::types::{TestResult, TestStatus};

use chrono::Utc;
use code_runner::{ExecutionOutcome, Executor};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use util::languages;
use util::problem::Problem;

/// A marking job for a single student's submission folder.
///
/// # Fields
/// - `student_id`: Identifies the student in the report.
/// - `submission_dir`: Folder holding the student's source file.
/// - `problem`: Test cases, marks and time limit.
/// - `executor`: Runs the submission once per test case.
/// - `comparator`: Strategy for judging output (default: [`ExactComparator`]).
/// - `feedback`: Strategy for rendering feedback lines (default: [`AutoFeedback`]).
/// - `sink`: Optional destination the finished report is handed to.
pub struct MarkingJob<'a> {
    student_id: String,
    submission_dir: PathBuf,
    problem: &'a Problem,
    executor: &'a dyn Executor,
    comparator: Box<dyn OutputComparator + 'a>,
    feedback: Box<dyn Feedback + 'a>,
    sink: Option<&'a dyn ReportSink>,
}

impl<'a> MarkingJob<'a> {
    pub fn new(
        student_id: impl Into<String>,
        submission_dir: impl Into<PathBuf>,
        problem: &'a Problem,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            submission_dir: submission_dir.into(),
            problem,
            executor,
            comparator: Box::new(ExactComparator),
            feedback: Box::new(AutoFeedback),
            sink: None,
        }
    }

    /// Set a custom output comparator strategy for this marking job.
    pub fn with_comparator<C: OutputComparator + 'a>(mut self, comparator: C) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    /// Set a custom feedback strategy for this marking job.
    pub fn with_feedback<F: Feedback + 'a>(mut self, feedback: F) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    /// Hand the finished report to `sink`. A failing sink is logged; the
    /// report is still returned.
    pub fn with_sink(mut self, sink: &'a dyn ReportSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run the marking process and produce the report.
    ///
    /// # Steps
    /// 1. Finds the submission file. Without one the score is 0 and nothing runs.
    /// 2. Executes every test case in order. A compile error or unexpected
    ///    error stops evaluation; a timeout fails only that test.
    /// 3. Scores `passed / total * marks`, rounded half-to-even.
    /// 4. Renders feedback, submits the report to the sink and returns it.
    pub async fn mark(self) -> GradeReport {
        let problem = self.problem;

        let Some(source) = languages::find_submission(&self.submission_dir) else {
            info!(
                student_id = %self.student_id,
                problem_id = %problem.problem_id,
                dir = %self.submission_dir.display(),
                "no supported submission file"
            );
            let meta = ReportMeta {
                no_submission: true,
                ..ReportMeta::default()
            };
            let feedback = vec![format!(
                "No supported submission file found (supported: {})",
                languages::supported_extensions()
            )];
            return self.finish(0, feedback, meta, Vec::new()).await;
        };

        let language = languages::detect(&source);
        let mut meta = ReportMeta {
            language,
            submission_file: source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            ..ReportMeta::default()
        };
        if let Some(detected) = language {
            if problem.language.conflicts_with(detected) {
                meta.language_mismatch = true;
                warn!(
                    student_id = %self.student_id,
                    problem_id = %problem.problem_id,
                    declared = ?problem.language,
                    %detected,
                    "submission language differs from the problem's language"
                );
            }
        }

        let results = self.evaluate(&source, &mut meta).await;
        let passed = results.iter().filter(|r| r.passed()).count();
        let score = scorer::compute_score(passed, problem.test_cases.len(), problem.marks);
        let feedback = self.feedback.assemble_feedback(&results).await;

        self.finish(score, feedback, meta, results).await
    }

    async fn evaluate(&self, source: &Path, meta: &mut ReportMeta) -> Vec<TestResult> {
        let limit = self.problem.timeout();
        let mut results = Vec::with_capacity(self.problem.test_cases.len());

        for (index, case) in self.problem.test_cases.iter().enumerate() {
            let test = index + 1;
            let outcome = self.executor.execute(source, &case.input, limit).await;

            let result = match outcome {
                ExecutionOutcome::Success { stdout, stderr } => {
                    let status = if self
                        .comparator
                        .matches(Some(&stdout), Some(&case.expected_output))
                    {
                        TestStatus::Passed
                    } else {
                        TestStatus::Failed {
                            expected: case.expected_output.trim().to_string(),
                            actual: stdout.trim().to_string(),
                        }
                    };
                    let result = TestResult::new(test, status);
                    if stderr.trim().is_empty() {
                        result
                    } else {
                        result.with_stderr(stderr)
                    }
                }
                ExecutionOutcome::Timeout => TestResult::new(
                    test,
                    TestStatus::Timeout {
                        limit_secs: self.problem.timeout_secs,
                    },
                ),
                ExecutionOutcome::CompileError { message } => {
                    meta.compile_error = true;
                    debug!(student_id = %self.student_id, test, "compile error, stopping");
                    results.push(TestResult::new(test, TestStatus::CompileError { message }));
                    break;
                }
                ExecutionOutcome::UnexpectedError { message } => {
                    meta.unexpected_error = true;
                    warn!(student_id = %self.student_id, test, %message, "unexpected error, stopping");
                    results.push(TestResult::new(test, TestStatus::UnexpectedError { message }));
                    break;
                }
            };

            debug!(student_id = %self.student_id, test, passed = result.passed(), "test evaluated");
            results.push(result);
        }

        results
    }

    async fn finish(
        self,
        score: u32,
        feedback: Vec<String>,
        meta: ReportMeta,
        results: Vec<TestResult>,
    ) -> GradeReport {
        let report = GradeReport {
            student_id: self.student_id,
            problem_id: self.problem.problem_id.clone(),
            score,
            total_marks: self.problem.marks,
            feedback,
            meta,
            results,
            graded_at: Utc::now(),
        };

        if let Some(sink) = self.sink {
            if let Err(err) = sink.submit(&report).await {
                error!(
                    student_id = %report.student_id,
                    problem_id = %report.problem_id,
                    error = %err,
                    "failed to store report"
                );
            }
        }

        info!(
            student_id = %report.student_id,
            problem_id = %report.problem_id,
            score = report.score,
            total_marks = report.total_marks,
            "graded"
        );
        report
    }
}
