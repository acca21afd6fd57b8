//! Builders for on-disk fixtures shared by the crates' tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a fresh submissions root. Keep the returned `TempDir` in scope for as
/// long as the files are needed; it is removed on drop.
pub fn setup_submissions_root() -> TempDir {
    TempDir::new().expect("failed to create tempdir")
}

/// Writes `{root}/{student_id}/{file_name}` with `contents` and returns its path.
pub fn write_submission(root: &Path, student_id: &str, file_name: &str, contents: &str) -> PathBuf {
    let dir = root.join(student_id);
    fs::create_dir_all(&dir).expect("failed to create student dir");
    let path = dir.join(file_name);
    fs::write(&path, contents).expect("failed to write submission");
    path
}
