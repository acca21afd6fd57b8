use super::{BuildContext, Program, Toolchain, run_compiler};
use crate::error::SandboxError;
use crate::process::CommandSpec;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use util::languages::Language;

const IMAGE: &str = "Program.exe";

/// Compiles to a managed executable image and runs it through the runtime launcher.
#[derive(Debug, Clone)]
pub struct CSharpToolchain {
    compiler: String,
    runtime: String,
}

impl CSharpToolchain {
    pub fn new(compiler: &str, runtime: &str) -> Self {
        Self {
            compiler: compiler.to_string(),
            runtime: runtime.to_string(),
        }
    }
}

#[async_trait]
impl Toolchain for CSharpToolchain {
    fn language(&self) -> Language {
        Language::CSharp
    }

    async fn compile(&self, source: &Path, ctx: BuildContext<'_>) -> Result<Program, SandboxError> {
        let scratch = ctx.scratch()?;
        let staged = scratch.stage(source)?;
        let image = scratch.join(IMAGE);

        let mut out_flag = OsString::from("-out:");
        out_flag.push(&image);
        let compile = CommandSpec::new(&self.compiler)
            .arg(out_flag)
            .arg(&staged)
            .current_dir(scratch.path());
        run_compiler(&compile, ctx.limit).await?;

        let run = CommandSpec::new(&self.runtime)
            .arg(&image)
            .current_dir(scratch.path());
        Ok(Program::in_scratch(run, scratch))
    }
}
