use crate::error::MarkerError;
use crate::report::GradeReport;
use crate::traits::report_sink::ReportSink;
use async_trait::async_trait;
use std::sync::Mutex;

/// Collects reports in submission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<GradeReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<GradeReport> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ReportSink for MemorySink {
    async fn submit(&self, report: &GradeReport) -> Result<(), MarkerError> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(report.clone());
        Ok(())
    }
}
