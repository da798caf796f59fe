//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cxa-adapters` crate provides implementations.

use std::fmt;
use std::path::Path;

use crate::application::Environment;
use crate::domain::{PackageRef, TemplateDescriptor};
use crate::error::CxaResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cxa_adapters::filesystem::LocalFilesystem` (production)
/// - `cxa_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create exactly one directory. Fails with
    /// [`ApplicationError::AlreadyExists`](crate::application::ApplicationError::AlreadyExists)
    /// when anything is already at `path`.
    fn create_dir(&self, path: &Path) -> CxaResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CxaResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> CxaResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> CxaResult<()>;

    /// Recursively copy the contents of `from` into `to`, overwriting files
    /// at identical paths. Returns the number of files copied.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> CxaResult<usize>;

    /// Rename a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> CxaResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> CxaResult<()>;
}

/// Port for turning a template identifier into a local directory.
///
/// Implemented by:
/// - `cxa_adapters::fetcher::NpmPackageFetcher` (registry via `npm pack`,
///   plus `file:` references)
#[cfg_attr(test, mockall::automock)]
pub trait PackageFetcher: Send + Sync {
    /// Materialise `package` under `env.temp_dir` and describe where it landed.
    fn fetch(&self, package: &PackageRef, env: &Environment) -> CxaResult<TemplateDescriptor>;
}

/// Exit status of an external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Port for running external programs (the package manager).
///
/// Implemented by:
/// - `cxa_adapters::process::ProcessRunner` (blocking `std::process`)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `argv[0]` with the remaining arguments inside `cwd`, blocking
    /// until it exits. `Err` only when the program could not be started.
    fn run(&self, argv: &[String], cwd: &Path) -> CxaResult<CommandStatus>;
}
