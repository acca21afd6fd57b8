//! # Grader
//!
//! Batch front end for the autograder: grades every student folder under a
//! submissions root against one problem, and authors problem files.
//!
//! - [`batch`]: the batch orchestrator ([`batch::run_all`]).
//! - [`authoring`]: builds and saves problem files from CLI input.
//! - [`cli`]: command-line arguments.

pub mod authoring;
pub mod batch;
pub mod cli;
