use super::{BuildContext, Program, Toolchain, run_compiler};
use crate::error::SandboxError;
use crate::process::CommandSpec;
use async_trait::async_trait;
use std::path::Path;
use util::languages::Language;

const EXECUTABLE: &str = "a.out";

/// C and C++: compile the staged source into a scratch-local executable, then
/// run that binary from inside the scratch directory.
#[derive(Debug, Clone)]
pub struct NativeToolchain {
    language: Language,
    compiler: String,
}

impl NativeToolchain {
    pub fn new(language: Language, compiler: &str) -> Self {
        Self {
            language,
            compiler: compiler.to_string(),
        }
    }
}

#[async_trait]
impl Toolchain for NativeToolchain {
    fn language(&self) -> Language {
        self.language
    }

    async fn compile(&self, source: &Path, ctx: BuildContext<'_>) -> Result<Program, SandboxError> {
        let scratch = ctx.scratch()?;
        let staged = scratch.stage(source)?;
        let executable = scratch.join(EXECUTABLE);

        let compile = CommandSpec::new(&self.compiler)
            .arg(&staged)
            .arg("-o")
            .arg(&executable)
            .current_dir(scratch.path());
        run_compiler(&compile, ctx.limit).await?;

        let run = CommandSpec::new(executable.to_string_lossy()).current_dir(scratch.path());
        Ok(Program::in_scratch(run, scratch))
    }
}
