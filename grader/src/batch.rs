//! Grades every student under a submissions root.
//!
//! Student ids are the names of the root's immediate subdirectories, processed
//! in sorted order. Up to `jobs` students are graded at once; results, summary
//! lines and the summary file always follow sorted order.

use code_runner::Executor;
use futures::stream::{self, StreamExt};
use marker::MarkingJob;
use marker::report::GradeReport;
use marker::traits::report_sink::ReportSink;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::{error, info, warn};
use util::paths;
use util::problem::Problem;

/// One line of the batch summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub student_id: String,
    pub problem_id: String,
    pub score: u32,
    pub total_marks: u32,
}

impl From<&GradeReport> for StudentSummary {
    fn from(report: &GradeReport) -> Self {
        Self {
            student_id: report.student_id.clone(),
            problem_id: report.problem_id.clone(),
            score: report.score,
            total_marks: report.total_marks,
        }
    }
}

impl StudentSummary {
    /// `<student_id>: <score>/<total_marks>`
    pub fn line(&self) -> String {
        format!("{}: {}/{}", self.student_id, self.score, self.total_marks)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The submissions root does not exist.
    NoSubmissionsRoot(PathBuf),
    /// The submissions root has no student subdirectories.
    NoStudents(PathBuf),
    /// Every student was graded; summaries are in sorted student order.
    Graded(Vec<StudentSummary>),
}

impl BatchOutcome {
    pub fn summaries(&self) -> &[StudentSummary] {
        match self {
            BatchOutcome::Graded(summaries) => summaries,
            _ => &[],
        }
    }
}

/// Grades every student folder under `submissions_root` against `problem`.
///
/// Each report goes to `sink`, each summary line is printed to stdout as it
/// becomes available, and `<reports_dir>/summary_<problem_id>.json` is written
/// at the end. An absent or empty root is reported through the outcome and
/// produces no reports.
pub async fn run_all(
    problem: &Problem,
    submissions_root: &Path,
    reports_dir: &Path,
    executor: &dyn Executor,
    sink: &dyn ReportSink,
    jobs: usize,
) -> BatchOutcome {
    let Some(student_ids) = paths::student_ids(submissions_root) else {
        warn!(root = %submissions_root.display(), "submissions root does not exist");
        return BatchOutcome::NoSubmissionsRoot(submissions_root.to_path_buf());
    };
    if student_ids.is_empty() {
        warn!(root = %submissions_root.display(), "no student folders found");
        return BatchOutcome::NoStudents(submissions_root.to_path_buf());
    }

    info!(
        problem_id = %problem.problem_id,
        students = student_ids.len(),
        jobs,
        "grading batch"
    );

    let summaries: Vec<StudentSummary> = stream::iter(student_ids)
        .map(|student_id| {
            let dir = paths::student_dir(submissions_root, &student_id);
            async move {
                let report = MarkingJob::new(student_id, dir, problem, executor)
                    .with_sink(sink)
                    .mark()
                    .await;
                StudentSummary::from(&report)
            }
        })
        .buffered(jobs.max(1))
        .inspect(|summary| println!("{}", summary.line()))
        .collect()
        .await;

    match write_summary(reports_dir, &problem.problem_id, &summaries) {
        Ok(path) => info!(path = %path.display(), "batch summary written"),
        Err(err) => error!(error = %err, "failed to write batch summary"),
    }

    BatchOutcome::Graded(summaries)
}

/// Writes `<reports_dir>/summary_<problem_id>.json`, replacing any earlier one.
pub fn write_summary(
    reports_dir: &Path,
    problem_id: &str,
    summaries: &[StudentSummary],
) -> io::Result<PathBuf> {
    paths::ensure_dir(reports_dir)?;
    let path = paths::summary_path(reports_dir, problem_id);
    let json = serde_json::to_string_pretty(summaries).map_err(io::Error::other)?;
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_summary_line() {
        let summary = StudentSummary {
            student_id: "s1".into(),
            problem_id: "Q1".into(),
            score: 7,
            total_marks: 10,
        };
        assert_eq!(summary.line(), "s1: 7/10");
    }

    #[test]
    fn test_write_summary_creates_dir() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("reports");
        let summaries = vec![StudentSummary {
            student_id: "s1".into(),
            problem_id: "Q1".into(),
            score: 7,
            total_marks: 10,
        }];

        let path = write_summary(&reports, "Q1", &summaries).unwrap();

        assert_eq!(path, reports.join("summary_Q1.json"));
        let back: Vec<StudentSummary> =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, summaries);
    }
}
