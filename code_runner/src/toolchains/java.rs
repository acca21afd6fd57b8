use super::{BuildContext, Program, Toolchain, run_compiler};
use crate::error::SandboxError;
use crate::process::CommandSpec;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use util::languages::Language;

static PUBLIC_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"public\s+class\s+([A-Za-z_]\w*)").expect("static regex"));
static ANY_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bclass\s+([A-Za-z_]\w*)").expect("static regex"));

/// Name of the class to launch: the public class if one is declared, otherwise
/// the first class declared.
pub fn detect_class_name(code: &str) -> Option<String> {
    PUBLIC_CLASS
        .captures(code)
        .or_else(|| ANY_CLASS.captures(code))
        .map(|caps| caps[1].to_string())
}

#[derive(Debug, Clone)]
pub struct JavaToolchain {
    javac: String,
    java: String,
}

impl JavaToolchain {
    pub fn new(javac: &str, java: &str) -> Self {
        Self {
            javac: javac.to_string(),
            java: java.to_string(),
        }
    }
}

#[async_trait]
impl Toolchain for JavaToolchain {
    fn language(&self) -> Language {
        Language::Java
    }

    async fn compile(&self, source: &Path, ctx: BuildContext<'_>) -> Result<Program, SandboxError> {
        let scratch = ctx.scratch()?;
        let staged = scratch.stage(source)?;

        let bytes = fs::read(&staged)
            .map_err(|e| SandboxError::io(format!("reading {}", staged.display()), e))?;
        let class_name = detect_class_name(&String::from_utf8_lossy(&bytes))
            .ok_or_else(|| SandboxError::Compile("No class found in Java file".into()))?;

        let file_name = staged.file_name().unwrap_or(staged.as_os_str());
        let javac = CommandSpec::new(&self.javac)
            .arg(file_name)
            .current_dir(scratch.path());
        run_compiler(&javac, ctx.limit).await?;

        let run = CommandSpec::new(&self.java)
            .arg("-cp")
            .arg(scratch.path())
            .arg(&class_name)
            .current_dir(scratch.path());
        Ok(Program::in_scratch(run, scratch))
    }
}
