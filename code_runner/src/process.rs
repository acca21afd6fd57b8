//! Subprocess execution under a wall-clock limit.

use crate::error::SandboxError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

/// An argv list plus working directory, built by a toolchain and run by [`run_with_timeout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

/// Captured output of a finished process, decoded lossily as UTF-8.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Best diagnostic text for a failed step: stderr, then stdout (some
    /// compilers report there), then the exit status.
    pub fn diagnostics(&self) -> String {
        if !self.stderr.trim().is_empty() {
            self.stderr.clone()
        } else if !self.stdout.trim().is_empty() {
            self.stdout.clone()
        } else {
            format!("process exited with {}", self.status)
        }
    }
}

/// Runs `spec` to completion, feeding `stdin` when given.
///
/// If `limit` elapses first the child is killed (it is spawned with
/// `kill_on_drop`) and [`SandboxError::Timeout`] is returned; nothing it
/// printed is kept.
pub async fn run_with_timeout(
    spec: &CommandSpec,
    stdin: Option<&str>,
    limit: Duration,
) -> Result<ProcessOutput, SandboxError> {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &spec.cwd {
        command.current_dir(dir);
    }

    let mut child = command.spawn().map_err(|source| SandboxError::Spawn {
        program: spec.program.clone(),
        source,
    })?;

    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        let input = input.to_owned();
        tokio::spawn(async move {
            // The program may exit without reading its input; a broken pipe is fine.
            let _ = pipe.write_all(input.as_bytes()).await;
        });
    }

    let output = match timeout(limit, child.wait_with_output()).await {
        Ok(result) => result
            .map_err(|e| SandboxError::io(format!("waiting for `{}`", spec.program), e))?,
        Err(_) => {
            tracing::debug!(program = %spec.program, ?limit, "process timed out, killed");
            return Err(SandboxError::Timeout(limit));
        }
    };

    Ok(ProcessOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
