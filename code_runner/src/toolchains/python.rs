use super::{BuildContext, Program, Toolchain};
use crate::error::SandboxError;
use crate::process::CommandSpec;
use async_trait::async_trait;
use std::path::Path;
use util::languages::Language;

/// Interprets the source in place. There is no compile phase, so a broken
/// script shows up as run-time stderr, never as a compile error.
#[derive(Debug, Clone)]
pub struct PythonToolchain {
    interpreter: String,
}

impl PythonToolchain {
    pub fn new(interpreter: &str) -> Self {
        Self {
            interpreter: interpreter.to_string(),
        }
    }
}

#[async_trait]
impl Toolchain for PythonToolchain {
    fn language(&self) -> Language {
        Language::Python
    }

    async fn compile(&self, source: &Path, _ctx: BuildContext<'_>) -> Result<Program, SandboxError> {
        Ok(Program::direct(
            CommandSpec::new(&self.interpreter).arg(source),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_compile_is_a_no_op() {
        let toolchain = PythonToolchain::new("python3");
        let ctx = BuildContext {
            scratch_root: None,
            limit: Duration::from_secs(1),
        };
        let program = toolchain
            .compile(Path::new("/subs/alice/main.py"), ctx)
            .await
            .unwrap();
        assert_eq!(program.command.program, "python3");
        assert_eq!(program.command.args, vec!["/subs/alice/main.py"]);
        assert!(program.scratch().is_none());
    }
}
