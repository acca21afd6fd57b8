use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

// Problems: {PROBLEMS_DIR}/{problem_id}.json
pub fn problem_path(problems_dir: &Path, problem_id: &str) -> PathBuf {
    problems_dir.join(format!("{problem_id}.json"))
}

// Per-student submissions: {SUBMISSIONS_DIR}/{student_id}/
pub fn student_dir(submissions_root: &Path, student_id: &str) -> PathBuf {
    submissions_root.join(student_id)
}

// Reports: {REPORTS_DIR}/{student_id}_{problem_id}.json
pub fn report_path(reports_dir: &Path, student_id: &str, problem_id: &str) -> PathBuf {
    reports_dir.join(format!("{student_id}_{problem_id}.json"))
}

// Batch summary: {REPORTS_DIR}/summary_{problem_id}.json
pub fn summary_path(reports_dir: &Path, problem_id: &str) -> PathBuf {
    reports_dir.join(format!("summary_{problem_id}.json"))
}

/// Names of the immediate subdirectories of `root`, sorted. Each one is a student id.
/// Returns `None` when `root` is missing or not a directory.
pub fn student_ids(root: &Path) -> Option<Vec<String>> {
    let entries = fs::read_dir(root).ok()?;
    let mut ids: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().to_str().map(str::to_owned))
        .collect();
    ids.sort();
    Some(ids)
}
