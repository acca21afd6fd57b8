//! Process-wide grader configuration.
//!
//! Values come from an optional `.env` file and the environment. Every key has a
//! default, so loading never fails; unparsable numbers fall back to their default.

use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub problems_dir: PathBuf,
    pub submissions_dir: PathBuf,
    pub reports_dir: PathBuf,
    /// Students graded at the same time by the batch orchestrator.
    pub max_concurrent_jobs: usize,
    /// Toolchain invocations allowed to run at the same time.
    pub max_concurrent_processes: usize,
    pub scratch_root: Option<PathBuf>,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            log_dir: "logs".into(),
            log_file: "grader.log".into(),
            log_to_stdout: false,
            problems_dir: PathBuf::from("problems"),
            submissions_dir: PathBuf::from("submissions"),
            reports_dir: PathBuf::from("reports"),
            max_concurrent_jobs: 1,
            max_concurrent_processes: 4,
            scratch_root: None,
        }
    }
}

impl Config {
    /// Loads `env_path` (if present) and initializes the global config once.
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();
        CONFIG.get_or_init(Self::from_env)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` is the
    /// environment-backed case; tests pass a map instead.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);
        let count = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(default)
        };

        Self {
            log_level: text("LOG_LEVEL", defaults.log_level),
            log_dir: text("LOG_DIR", defaults.log_dir),
            log_file: text("LOG_FILE", defaults.log_file),
            log_to_stdout: lookup("LOG_TO_STDOUT")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.log_to_stdout),
            problems_dir: lookup("PROBLEMS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.problems_dir),
            submissions_dir: lookup("SUBMISSIONS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.submissions_dir),
            reports_dir: lookup("REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),
            max_concurrent_jobs: count("MAX_CONCURRENT_JOBS", defaults.max_concurrent_jobs),
            max_concurrent_processes: count(
                "MAX_CONCURRENT_PROCESSES",
                defaults.max_concurrent_processes,
            ),
            scratch_root: lookup("SCRATCH_ROOT")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}
