use serde::{Deserialize, Serialize};
use std::env;

/// Names (or paths) of the toolchain binaries the sandbox invokes.
///
/// Deserializes from JSON with every field optional, and can be overridden from
/// the environment (`PYTHON_BIN`, `JAVAC_BIN`, `JAVA_BIN`, `CC_BIN`, `CXX_BIN`,
/// `CSHARP_COMPILER_BIN`, `CSHARP_RUNTIME_BIN`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolchainConfig {
    #[serde(default = "default_python")]
    pub python: String,
    #[serde(default = "default_javac")]
    pub javac: String,
    #[serde(default = "default_java")]
    pub java: String,
    #[serde(default = "default_cc")]
    pub cc: String,
    #[serde(default = "default_cxx")]
    pub cxx: String,
    #[serde(default = "default_csharp_compiler")]
    pub csharp_compiler: String,
    #[serde(default = "default_csharp_runtime")]
    pub csharp_runtime: String,
}

fn default_python() -> String {
    "python3".into()
}
fn default_javac() -> String {
    "javac".into()
}
fn default_java() -> String {
    "java".into()
}
fn default_cc() -> String {
    "gcc".into()
}
fn default_cxx() -> String {
    "g++".into()
}
fn default_csharp_compiler() -> String {
    "mcs".into()
}
fn default_csharp_runtime() -> String {
    "mono".into()
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            javac: default_javac(),
            java: default_java(),
            cc: default_cc(),
            cxx: default_cxx(),
            csharp_compiler: default_csharp_compiler(),
            csharp_runtime: default_csharp_runtime(),
        }
    }
}

impl ToolchainConfig {
    /// Defaults, overridden by any toolchain variables set in the environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut String); 7] = [
            ("PYTHON_BIN", &mut self.python),
            ("JAVAC_BIN", &mut self.javac),
            ("JAVA_BIN", &mut self.java),
            ("CC_BIN", &mut self.cc),
            ("CXX_BIN", &mut self.cxx),
            ("CSHARP_COMPILER_BIN", &mut self.csharp_compiler),
            ("CSHARP_RUNTIME_BIN", &mut self.csharp_runtime),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = value;
            }
        }
        self
    }
}
