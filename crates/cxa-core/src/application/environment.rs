//! Explicit process context.
//!
//! The working directory and the scratch directory are passed to every
//! component instead of being read from the process, so a pipeline can run
//! against any pair of directories.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    cwd: PathBuf,
    temp_dir: PathBuf,
}

impl Environment {
    pub fn new(cwd: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Directory the project is created in.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Scratch space for fetched packages. Owned by the caller.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Scratch subdirectory reserved for one package identifier.
    pub fn package_scratch(&self, namespace: &str) -> PathBuf {
        let safe: String = namespace
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c => c,
            })
            .collect();
        self.temp_dir.join(safe)
    }
}
