use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use util::problem::ProblemLanguage;

#[derive(Parser, Debug)]
#[command(name = "grader", version, about = "Grade student submissions against problem test cases")]
pub struct Cli {
    /// Path of the .env file to load before reading configuration
    #[arg(long, global = true, default_value = ".env")]
    pub env_file: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Grade every student folder against one problem
    Grade(GradeArgs),
    /// Write a new problem file from `input|output` test cases
    NewProblem(NewProblemArgs),
}

#[derive(Args, Debug)]
pub struct GradeArgs {
    /// Problem JSON file
    #[arg(long)]
    pub problem: PathBuf,
    /// Root holding one folder per student (default: SUBMISSIONS_DIR)
    #[arg(long)]
    pub submissions: Option<PathBuf>,
    /// Where reports and the batch summary are written (default: REPORTS_DIR)
    #[arg(long)]
    pub reports: Option<PathBuf>,
    /// Students graded at once (default: MAX_CONCURRENT_JOBS)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,
    /// Toolchain processes allowed at once (default: MAX_CONCURRENT_PROCESSES)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_processes: Option<u16>,
}

#[derive(Args, Debug)]
pub struct NewProblemArgs {
    /// Problem identifier, also the file name
    #[arg(long)]
    pub id: String,
    /// auto, python, java, c, cpp or csharp
    #[arg(long, default_value = "auto")]
    pub language: ProblemLanguage,
    #[arg(long)]
    pub marks: u32,
    /// Per-process time limit in seconds
    #[arg(long, default_value_t = 2.0)]
    pub timeout: f64,
    /// Test cases as `input|output` lines
    #[arg(long, conflicts_with = "cases_file", required_unless_present = "cases_file")]
    pub cases: Option<String>,
    /// File with one `input|output` test case per line
    #[arg(long)]
    pub cases_file: Option<PathBuf>,
    /// Directory the problem file is written to (default: PROBLEMS_DIR)
    #[arg(long)]
    pub problems_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grade() {
        let cli = Cli::parse_from([
            "grader", "grade", "--problem", "q1.json", "--jobs", "4", "--reports", "out",
        ]);
        let Command::Grade(args) = cli.command else {
            panic!("expected grade");
        };
        assert_eq!(args.problem, PathBuf::from("q1.json"));
        assert_eq!(args.jobs, Some(4));
        assert_eq!(args.reports, Some(PathBuf::from("out")));
        assert!(args.submissions.is_none());
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["grader", "grade", "--problem", "q.json", "--jobs", "0"]).is_err());
    }

    #[test]
    fn test_parse_new_problem() {
        let cli = Cli::parse_from([
            "grader",
            "new-problem",
            "--id",
            "Q1",
            "--language",
            "c++",
            "--marks",
            "10",
            "--cases",
            "5|25",
        ]);
        let Command::NewProblem(args) = cli.command else {
            panic!("expected new-problem");
        };
        assert_eq!(args.language, ProblemLanguage::Cpp);
        assert_eq!(args.timeout, 2.0);
        assert_eq!(args.cases.as_deref(), Some("5|25"));
    }

    #[test]
    fn test_new_problem_needs_cases() {
        assert!(Cli::try_parse_from(["grader", "new-problem", "--id", "Q1", "--marks", "1"]).is_err());
    }
}
