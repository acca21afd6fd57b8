//! Marker error types.
//!
//! Grading itself never fails: every execution problem becomes part of the
//! report. [`MarkerError`] only covers handing a finished report to a
//! [`ReportSink`](crate::traits::report_sink::ReportSink).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkerError {
    /// Writing a report failed (directory not creatable, disk full, ...).
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
