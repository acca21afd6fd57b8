//! # Report Sinks
//!
//! - [`json_file_sink`]: one pretty-printed JSON file per (student, problem).
//! - [`memory_sink`]: keeps reports in memory, for tests and embedding.

pub mod json_file_sink;
pub mod memory_sink;
