//! Problem authoring: turn CLI input into a validated problem file.

use std::path::{Path, PathBuf};
use tracing::info;
use util::problem::{Problem, ProblemError, ProblemLanguage, parse_test_cases};

/// Everything needed to author a problem.
#[derive(Debug, Clone)]
pub struct NewProblem {
    pub problem_id: String,
    pub language: ProblemLanguage,
    pub marks: u32,
    pub timeout_secs: f64,
    /// Test cases in `input|output` form, one per line.
    pub cases: String,
}

/// Builds the problem, validates it and saves it as `<problems_dir>/<id>.json`.
pub fn create_problem(
    new: NewProblem,
    problems_dir: &Path,
) -> Result<(Problem, PathBuf), ProblemError> {
    let test_cases = parse_test_cases(&new.cases);
    let problem = Problem::new(new.problem_id, new.marks, test_cases)
        .with_language(new.language)
        .with_timeout_secs(new.timeout_secs);
    problem.validate()?;

    let path = problem.save(problems_dir)?;
    info!(
        problem_id = %problem.problem_id,
        cases = problem.test_cases.len(),
        path = %path.display(),
        "problem saved"
    );
    Ok((problem, path))
}

/// Test cases typed on the command line: shells pass `\n` literally inside
/// quoted arguments, so it is read as a line break. File contents are used as-is.
pub fn inline_cases(text: &str) -> String {
    text.replace("\\n", "\n")
}
