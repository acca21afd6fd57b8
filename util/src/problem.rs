//! # Problem definitions
//!
//! A [`Problem`] is what an instructor authors: an identifier, the declared
//! language, total marks, a per-process timeout and an ordered list of
//! [`TestCase`]s. Problems are stored as JSON files:
//!
//! ```json
//! {
//!   "problem_id": "Q1",
//!   "language": "auto",
//!   "marks": 10,
//!   "timeout": 2,
//!   "test_cases": [{ "input": "5", "output": "25" }]
//! }
//! ```
//!
//! A problem is immutable once loaded for a grading run.

use crate::languages::Language;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use std::{fs, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid problem JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid problem: {0}")]
    Invalid(String),
}

/// Language declared on a problem. `Auto` accepts whatever the submission is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemLanguage {
    #[default]
    Auto,
    Python,
    Java,
    C,
    #[serde(alias = "c++", alias = "cc")]
    Cpp,
    #[serde(alias = "c#")]
    CSharp,
}

impl ProblemLanguage {
    /// The concrete language the problem asks for, if any.
    pub fn expected(self) -> Option<Language> {
        match self {
            ProblemLanguage::Auto => None,
            ProblemLanguage::Python => Some(Language::Python),
            ProblemLanguage::Java => Some(Language::Java),
            ProblemLanguage::C => Some(Language::C),
            ProblemLanguage::Cpp => Some(Language::Cpp),
            ProblemLanguage::CSharp => Some(Language::CSharp),
        }
    }

    /// True when `detected` conflicts with a concretely declared language.
    pub fn conflicts_with(self, detected: Language) -> bool {
        self.expected().is_some_and(|expected| expected != detected)
    }
}

impl FromStr for ProblemLanguage {
    type Err = ProblemError;

    /// Accepts the same names as the problem file, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ProblemLanguage::Auto),
            "python" => Ok(ProblemLanguage::Python),
            "java" => Ok(ProblemLanguage::Java),
            "c" => Ok(ProblemLanguage::C),
            "cpp" | "c++" | "cc" => Ok(ProblemLanguage::Cpp),
            "csharp" | "c#" => Ok(ProblemLanguage::CSharp),
            other => Err(ProblemError::Invalid(format!("unknown language `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TestCase {
    #[serde(default)]
    pub input: String,
    #[serde(rename = "output", default)]
    pub expected_output: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Problem {
    pub problem_id: String,
    #[serde(default)]
    pub language: ProblemLanguage,
    /// Total marks, shared equally between test cases.
    pub marks: u32,
    /// Wall-clock bound in seconds for each compile or run subprocess.
    #[serde(rename = "timeout", default = "default_timeout_secs")]
    pub timeout_secs: f64,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

fn default_timeout_secs() -> f64 {
    2.0
}

impl Problem {
    pub fn new(problem_id: impl Into<String>, marks: u32, test_cases: Vec<TestCase>) -> Self {
        Self {
            problem_id: problem_id.into(),
            language: ProblemLanguage::Auto,
            marks,
            timeout_secs: default_timeout_secs(),
            test_cases,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: f64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_language(mut self, language: ProblemLanguage) -> Self {
        self.language = language;
        self
    }

    /// The per-process limit. Values too large for a `Duration` saturate to
    /// `Duration::MAX`; non-positive or NaN values fall back to the default.
    pub fn timeout(&self) -> Duration {
        match Duration::try_from_secs_f64(self.timeout_secs) {
            Ok(limit) => limit,
            Err(_) if self.timeout_secs > 0.0 => Duration::MAX,
            Err(_) => Duration::from_secs_f64(default_timeout_secs()),
        }
    }

    /// Checks the invariants a grading run relies on.
    pub fn validate(&self) -> Result<(), ProblemError> {
        if self.problem_id.trim().is_empty() {
            return Err(ProblemError::Invalid("problem_id cannot be empty".into()));
        }
        if self.marks == 0 {
            return Err(ProblemError::Invalid("marks must be positive".into()));
        }
        if !(self.timeout_secs.is_finite() && self.timeout_secs > 0.0)
            || Duration::try_from_secs_f64(self.timeout_secs).is_err()
        {
            return Err(ProblemError::Invalid(format!(
                "timeout must be a positive number of seconds, got {}",
                self.timeout_secs
            )));
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, ProblemError> {
        let problem: Problem = serde_json::from_str(text)?;
        problem.validate()?;
        Ok(problem)
    }

    /// Reads and validates a problem file.
    pub fn load(path: &Path) -> Result<Self, ProblemError> {
        let text = fs::read_to_string(path).map_err(|source| ProblemError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Writes the problem as `<dir>/<problem_id>.json`, replacing any previous file.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ProblemError> {
        self.validate()?;
        let path = paths::problem_path(dir, &self.problem_id);
        let io_err = |source: io::Error| ProblemError::Io {
            path: path.clone(),
            source,
        };
        paths::ensure_parent_dir(&path).map_err(io_err)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(io_err)?;
        Ok(path)
    }
}

/// Parses authoring text with one `input|output` pair per line.
///
/// Each line splits on its first `|` and both halves are trimmed. Lines without
/// a `|` are skipped.
pub fn parse_test_cases(text: &str) -> Vec<TestCase> {
    text.lines()
        .filter_map(|line| line.split_once('|'))
        .map(|(input, output)| TestCase::new(input.trim(), output.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_problem() {
        let json = r#"
        {
            "problem_id": "Q1",
            "language": "c++",
            "marks": 10,
            "timeout": 1.5,
            "test_cases": [
                { "input": "5", "output": "25" },
                { "input": "10", "output": "100" }
            ]
        }
        "#;
        let problem = Problem::from_json(json).unwrap();
        assert_eq!(problem.problem_id, "Q1");
        assert_eq!(problem.language, ProblemLanguage::Cpp);
        assert_eq!(problem.marks, 10);
        assert_eq!(problem.timeout(), Duration::from_millis(1500));
        assert_eq!(problem.test_cases[1], TestCase::new("10", "100"));
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let json = r#"{ "problem_id": "Q2", "marks": 5, "test_cases": [ {} , { "input": "x" } ] }"#;
        let problem = Problem::from_json(json).unwrap();
        assert_eq!(problem.language, ProblemLanguage::Auto);
        assert_eq!(problem.timeout_secs, 2.0);
        assert_eq!(problem.test_cases[0], TestCase::new("", ""));
        assert_eq!(problem.test_cases[1].expected_output, "");
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let zero_marks = r#"{ "problem_id": "Q", "marks": 0, "test_cases": [] }"#;
        assert!(matches!(
            Problem::from_json(zero_marks),
            Err(ProblemError::Invalid(_))
        ));

        let zero_timeout = r#"{ "problem_id": "Q", "marks": 3, "timeout": 0, "test_cases": [] }"#;
        assert!(matches!(
            Problem::from_json(zero_timeout),
            Err(ProblemError::Invalid(_))
        ));

        let blank_id = r#"{ "problem_id": "  ", "marks": 3 }"#;
        assert!(Problem::from_json(blank_id).is_err());
    }

    #[test]
    fn test_rejects_timeout_beyond_duration_range() {
        let huge = r#"{ "problem_id": "Q", "marks": 10, "timeout": 1e20, "test_cases": [] }"#;
        assert!(matches!(
            Problem::from_json(huge),
            Err(ProblemError::Invalid(_))
        ));
    }

    #[test]
    fn test_timeout_never_panics() {
        let huge = Problem::new("Q", 1, vec![]).with_timeout_secs(1e20);
        assert_eq!(huge.timeout(), Duration::MAX);

        let nan = Problem::new("Q", 1, vec![]).with_timeout_secs(f64::NAN);
        assert_eq!(nan.timeout(), Duration::from_secs(2));

        let negative = Problem::new("Q", 1, vec![]).with_timeout_secs(-1.0);
        assert_eq!(negative.timeout(), Duration::from_secs(2));

        let normal = Problem::new("Q", 1, vec![]).with_timeout_secs(1.5);
        assert_eq!(normal.timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Problem::from_json("{ not json"),
            Err(ProblemError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_declared_language_conflicts() {
        assert!(!ProblemLanguage::Auto.conflicts_with(Language::Java));
        assert!(!ProblemLanguage::Java.conflicts_with(Language::Java));
        assert!(ProblemLanguage::Python.conflicts_with(Language::C));
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("C++".parse::<ProblemLanguage>().unwrap(), ProblemLanguage::Cpp);
        assert_eq!("c#".parse::<ProblemLanguage>().unwrap(), ProblemLanguage::CSharp);
        assert_eq!(" auto ".parse::<ProblemLanguage>().unwrap(), ProblemLanguage::Auto);
        assert!(matches!(
            "ruby".parse::<ProblemLanguage>(),
            Err(ProblemError::Invalid(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let problem = Problem::new("Q7", 10, vec![TestCase::new("1", "1")])
            .with_timeout_secs(5.0)
            .with_language(ProblemLanguage::CSharp);

        let path = problem.save(&dir.path().join("problems")).unwrap();
        assert_eq!(path.file_name().unwrap(), "Q7.json");

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["language"], "csharp");
        assert_eq!(raw["timeout"], 5.0);
        assert_eq!(raw["test_cases"][0]["output"], "1");

        assert_eq!(Problem::load(&path).unwrap(), problem);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Problem::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ProblemError::Io { .. }));
    }

    #[test]
    fn test_parse_test_cases_text() {
        let cases = parse_test_cases("5|25\n 10 | 100 \nno separator\n\n3|a|b");
        assert_eq!(
            cases,
            vec![
                TestCase::new("5", "25"),
                TestCase::new("10", "100"),
                TestCase::new("3", "a|b"),
            ]
        );
    }
}
