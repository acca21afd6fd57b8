//! Traits Module
//!
//! Extension points of the marker:
//!
//! - [`comparator`]: how actual output is judged against expected output.
//! - [`feedback`]: how structured results become feedback lines.
//! - [`report_sink`]: where finished reports go.

pub mod comparator;
pub mod feedback;
pub mod report_sink;
