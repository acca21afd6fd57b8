use crate::error::MarkerError;
use crate::report::GradeReport;
use async_trait::async_trait;

/// Destination for finished reports.
///
/// Implementations must tolerate concurrent submits for different students.
/// A later report for the same (student, problem) pair replaces the earlier one.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn submit(&self, report: &GradeReport) -> Result<(), MarkerError>;
}
