//! # Feedback Strategies Module
//!
//! - [`auto_feedback`]: one templated line per test result, plus a warning
//!   line for any stderr output.

pub mod auto_feedback;
