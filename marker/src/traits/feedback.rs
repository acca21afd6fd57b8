//!
//! # Feedback Trait
//!
//! Pluggable strategies for turning per-test results into the human-readable
//! `feedback` lines of a report.
//!

use crate::types::TestResult;
use async_trait::async_trait;

/// Renders feedback lines from a submission's results, in result order.
///
/// A strategy may emit more than one line per result (a stderr warning
/// followed by the pass/fail line, say) but must not reorder results.
#[async_trait]
pub trait Feedback: Send + Sync {
    async fn assemble_feedback(&self, results: &[TestResult]) -> Vec<String>;
}
