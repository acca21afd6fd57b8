use crate::error::SandboxError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A per-invocation working directory, removed when dropped.
///
/// Holding one for the whole compile-and-run sequence means every exit path
/// (success, compile failure, timeout, I/O error) releases it.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Creates a fresh directory under `root`, or under the system temp dir.
    pub fn create(root: Option<&Path>) -> Result<Self, SandboxError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("grader-");
        let dir = match root {
            Some(root) => {
                fs::create_dir_all(root).map_err(|e| {
                    SandboxError::io(format!("creating scratch root {}", root.display()), e)
                })?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .map_err(|e| SandboxError::io("creating scratch directory", e))?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Copies `source` into the scratch directory under its own file name.
    pub fn stage(&self, source: &Path) -> Result<PathBuf, SandboxError> {
        let name = source.file_name().ok_or_else(|| {
            SandboxError::io(
                format!("staging {}", source.display()),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;
        let dest = self.dir.path().join(name);
        fs::copy(source, &dest)
            .map_err(|e| SandboxError::io(format!("copying {}", source.display()), e))?;
        Ok(dest)
    }
}
