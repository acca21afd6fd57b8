//! # Code Runner
//!
//! The execution sandbox: given a submission source file and an input string,
//! detect the language, compile when the language needs it, run the program
//! under a wall-clock limit and classify what happened as an
//! [`ExecutionOutcome`].
//!
//! Every compile-and-run sequence works in its own scratch directory, which is
//! removed on every exit path. Nothing is ever returned as an error: missing
//! toolchains, I/O failures and timeouts all become outcomes.
//!
//! This is not a security boundary. Programs run as the current user with no
//! resource, filesystem or network isolation beyond the scratch directory.

pub mod error;
pub mod outcome;
pub mod process;
pub mod scratch;
pub mod slots;
pub mod toolchain_config;
pub mod toolchains;

pub use crate::outcome::ExecutionOutcome;
pub use crate::toolchain_config::ToolchainConfig;

use crate::error::SandboxError;
use crate::process::ProcessOutput;
use crate::slots::SlotQueue;
use crate::toolchains::{BuildContext, toolchain_for};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use util::languages::{self, Language};

/// Anything that can run a submission against one input. The marker depends on
/// this rather than on [`Sandbox`] so grading logic can be tested without toolchains.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, source: &Path, stdin: &str, limit: Duration) -> ExecutionOutcome;
}

/// Appends a line terminator when missing, for programs that read whole lines.
pub fn normalize_input(stdin: &str) -> String {
    if stdin.ends_with('\n') {
        stdin.to_string()
    } else {
        format!("{stdin}\n")
    }
}

/// Runs submissions with locally installed toolchains.
#[derive(Clone)]
pub struct Sandbox {
    toolchains: ToolchainConfig,
    scratch_root: Option<PathBuf>,
    slots: SlotQueue,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(ToolchainConfig::default())
    }
}

impl Sandbox {
    pub const DEFAULT_MAX_CONCURRENT: usize = 4;

    pub fn new(toolchains: ToolchainConfig) -> Self {
        Self {
            toolchains,
            scratch_root: None,
            slots: SlotQueue::new(Self::DEFAULT_MAX_CONCURRENT),
        }
    }

    /// Create scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Cap on compile-and-run sequences in flight at once, shared by all clones.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.slots = SlotQueue::new(max_concurrent);
        self
    }

    async fn compile_and_run(
        &self,
        language: Language,
        source: &Path,
        stdin: &str,
        limit: Duration,
    ) -> Result<ProcessOutput, SandboxError> {
        let toolchain = toolchain_for(language, &self.toolchains);
        let ctx = BuildContext {
            scratch_root: self.scratch_root.as_deref(),
            limit,
        };
        // `program` owns the scratch dir; it is dropped (and removed) when this returns.
        let program = toolchain.compile(source, ctx).await?;
        toolchain.run(&program, stdin, limit).await
    }
}

#[async_trait]
impl Executor for Sandbox {
    async fn execute(&self, source: &Path, stdin: &str, limit: Duration) -> ExecutionOutcome {
        let Some(language) = languages::detect(source) else {
            return ExecutionOutcome::compile_error("Unsupported language/extension");
        };

        let _slot = self.slots.acquire().await;
        let stdin = normalize_input(stdin);

        match self.compile_and_run(language, source, &stdin, limit).await {
            Ok(output) => ExecutionOutcome::Success {
                stdout: output.stdout,
                stderr: output.stderr,
            },
            Err(err) => {
                match &err {
                    SandboxError::Spawn { .. } | SandboxError::Io { .. } => {
                        warn!(%language, source = %source.display(), error = %err, "sandbox failure")
                    }
                    _ => debug!(%language, source = %source.display(), error = %err, "execution failed"),
                }
                err.into()
            }
        }
    }
}
