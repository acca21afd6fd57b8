//! Per-language compile and run strategies.
//!
//! Every supported [`Language`] maps to one [`Toolchain`]. `compile` turns a
//! source file into a runnable [`Program`] (staging it in a scratch directory
//! and invoking the compiler where the language needs one); `run` executes the
//! program with piped stdin. Both steps share the caller's time limit.

pub mod csharp;
pub mod java;
pub mod native;
pub mod python;

use crate::error::SandboxError;
use crate::process::{CommandSpec, ProcessOutput, run_with_timeout};
use crate::scratch::ScratchDir;
use crate::toolchain_config::ToolchainConfig;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use util::languages::Language;

/// Something ready to execute. Owns the scratch directory its artifacts live
/// in, so the directory disappears together with the program.
#[derive(Debug)]
pub struct Program {
    pub command: CommandSpec,
    scratch: Option<ScratchDir>,
}

impl Program {
    /// A program that runs straight from the original source (no scratch).
    pub fn direct(command: CommandSpec) -> Self {
        Self {
            command,
            scratch: None,
        }
    }

    pub fn in_scratch(command: CommandSpec, scratch: ScratchDir) -> Self {
        Self {
            command,
            scratch: Some(scratch),
        }
    }

    pub fn scratch(&self) -> Option<&ScratchDir> {
        self.scratch.as_ref()
    }
}

/// Where compile steps may create scratch directories, and how long each step may take.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub scratch_root: Option<&'a Path>,
    pub limit: Duration,
}

impl BuildContext<'_> {
    pub fn scratch(&self) -> Result<ScratchDir, SandboxError> {
        ScratchDir::create(self.scratch_root)
    }
}

#[async_trait]
pub trait Toolchain: Send + Sync {
    fn language(&self) -> Language;

    /// Prepares `source` for execution. Compiler rejections surface as
    /// [`SandboxError::Compile`].
    async fn compile(&self, source: &Path, ctx: BuildContext<'_>) -> Result<Program, SandboxError>;

    /// Runs a prepared program with `stdin` piped in.
    async fn run(
        &self,
        program: &Program,
        stdin: &str,
        limit: Duration,
    ) -> Result<ProcessOutput, SandboxError> {
        run_with_timeout(&program.command, Some(stdin), limit).await
    }
}

/// Selects the toolchain for `language`.
pub fn toolchain_for(language: Language, config: &ToolchainConfig) -> Box<dyn Toolchain> {
    match language {
        Language::Python => Box::new(python::PythonToolchain::new(&config.python)),
        Language::Java => Box::new(java::JavaToolchain::new(&config.javac, &config.java)),
        Language::C => Box::new(native::NativeToolchain::new(Language::C, &config.cc)),
        Language::Cpp => Box::new(native::NativeToolchain::new(Language::Cpp, &config.cxx)),
        Language::CSharp => Box::new(csharp::CSharpToolchain::new(
            &config.csharp_compiler,
            &config.csharp_runtime,
        )),
    }
}

/// Runs a compiler invocation and maps a non-zero exit to [`SandboxError::Compile`].
pub(crate) async fn run_compiler(spec: &CommandSpec, limit: Duration) -> Result<(), SandboxError> {
    let output = run_with_timeout(spec, None, limit).await?;
    if output.success() {
        Ok(())
    } else {
        Err(SandboxError::Compile(output.diagnostics()))
    }
}
