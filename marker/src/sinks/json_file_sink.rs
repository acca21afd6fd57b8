use crate::error::MarkerError;
use crate::report::GradeReport;
use crate::traits::report_sink::ReportSink;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use util::paths;

/// Writes each report to `<reports_dir>/<student_id>_<problem_id>.json`,
/// replacing any earlier report for the same pair.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    reports_dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn path_for(&self, student_id: &str, problem_id: &str) -> PathBuf {
        paths::report_path(&self.reports_dir, student_id, problem_id)
    }
}

#[async_trait]
impl ReportSink for JsonFileSink {
    async fn submit(&self, report: &GradeReport) -> Result<(), MarkerError> {
        let path = self.path_for(&report.student_id, &report.problem_id);
        let json = serde_json::to_string_pretty(report)?;

        tokio::fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|source| MarkerError::Io {
                path: self.reports_dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| MarkerError::Io {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "report written");
        Ok(())
    }
}
