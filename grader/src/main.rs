use anyhow::{Context, Result};
use clap::Parser;
use code_runner::{Sandbox, ToolchainConfig};
use common::config::Config;
use common::logger::init_logging;
use grader::authoring::{NewProblem, create_problem, inline_cases};
use grader::batch::{BatchOutcome, run_all};
use grader::cli::{Cli, Command, GradeArgs, NewProblemArgs};
use marker::sinks::json_file_sink::JsonFileSink;
use std::fs;
use util::problem::Problem;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration and initialize logging
    let config = Config::init(&cli.env_file);
    let _log_guard = init_logging(config);

    match cli.command {
        Command::Grade(args) => grade(config, args).await,
        Command::NewProblem(args) => new_problem(config, args),
    }
}

async fn grade(config: &Config, args: GradeArgs) -> Result<()> {
    let problem = Problem::load(&args.problem)
        .with_context(|| format!("failed to load problem {}", args.problem.display()))?;

    let submissions = args.submissions.unwrap_or_else(|| config.submissions_dir.clone());
    let reports = args.reports.unwrap_or_else(|| config.reports_dir.clone());
    let jobs = args.jobs.map_or(config.max_concurrent_jobs, usize::from);
    let max_processes = args
        .max_processes
        .map_or(config.max_concurrent_processes, usize::from);

    let mut sandbox = Sandbox::new(ToolchainConfig::from_env()).with_max_concurrent(max_processes);
    if let Some(root) = &config.scratch_root {
        sandbox = sandbox.with_scratch_root(root);
    }
    let sink = JsonFileSink::new(&reports);

    match run_all(&problem, &submissions, &reports, &sandbox, &sink, jobs).await {
        BatchOutcome::NoSubmissionsRoot(root) => {
            println!("No submissions found: {} does not exist", root.display());
        }
        BatchOutcome::NoStudents(root) => {
            println!("No submissions found in {}", root.display());
        }
        BatchOutcome::Graded(summaries) => {
            tracing::info!(students = summaries.len(), "batch complete");
        }
    }
    Ok(())
}

fn new_problem(config: &Config, args: NewProblemArgs) -> Result<()> {
    let cases = match (args.cases, &args.cases_file) {
        (Some(cases), _) => inline_cases(&cases),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read test cases from {}", path.display()))?,
        (None, None) => anyhow::bail!("either --cases or --cases-file is required"),
    };
    let problems_dir = args
        .problems_dir
        .unwrap_or_else(|| config.problems_dir.clone());

    let (problem, path) = create_problem(
        NewProblem {
            problem_id: args.id,
            language: args.language,
            marks: args.marks,
            timeout_secs: args.timeout,
            cases,
        },
        &problems_dir,
    )
    .context("failed to create problem")?;

    println!(
        "Saved {} ({} test cases) to {}",
        problem.problem_id,
        problem.test_cases.len(),
        path.display()
    );
    Ok(())
}
