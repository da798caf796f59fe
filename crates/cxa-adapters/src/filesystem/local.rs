//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use cxa_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CxaError, CxaResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> CxaResult<()> {
        fs::create_dir(path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ApplicationError::AlreadyExists {
                path: path.to_path_buf(),
            }
            .into(),
            _ => map_io_error(path, e, "create directory"),
        })
    }

    fn create_dir_all(&self, path: &Path) -> CxaResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_to_string(&self, path: &Path) -> CxaResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> CxaResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    /// Symlinks are recreated as links (never followed) on Unix and skipped
    /// with a warning elsewhere.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> CxaResult<usize> {
        let mut copied = 0;
        for entry in WalkDir::new(from).min_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(from).to_path_buf();
                CxaError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk directory: {e}"),
                })
            })?;
            let rel = entry
                .path()
                .strip_prefix(from)
                .map_err(|_| CxaError::Internal {
                    message: format!("walked outside of {}", from.display()),
                })?;
            let target = to.join(rel);

            if entry.file_type().is_dir() {
                self.create_dir_all(&target)?;
            } else if entry.file_type().is_file() {
                if let Some(parent) = target.parent() {
                    self.create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(entry.path(), e, "copy file"))?;
                trace!(file = %rel.display(), "copied");
                copied += 1;
            } else if entry.path_is_symlink() {
                if let Some(parent) = target.parent() {
                    self.create_dir_all(parent)?;
                }
                if copy_symlink(entry.path(), &target)? {
                    trace!(link = %rel.display(), "symlink recreated");
                    copied += 1;
                }
            }
        }
        Ok(copied)
    }

    fn rename(&self, from: &Path, to: &Path) -> CxaResult<()> {
        fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn remove_dir_all(&self, path: &Path) -> CxaResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

/// Recreate the link at `src` as `dst`. Returns whether anything was written.
#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> CxaResult<bool> {
    let link = fs::read_link(src).map_err(|e| map_io_error(src, e, "read symlink"))?;
    if dst.symlink_metadata().is_ok() {
        fs::remove_file(dst).map_err(|e| map_io_error(dst, e, "replace file"))?;
    }
    std::os::unix::fs::symlink(&link, dst).map_err(|e| map_io_error(dst, e, "create symlink"))?;
    Ok(true)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, _dst: &Path) -> CxaResult<bool> {
    tracing::warn!(path = %src.display(), "symlinks are not copied on this platform, skipping");
    Ok(false)
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CxaError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_dir_all_merges_and_overwrites() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("src/nested")).unwrap();
        fs::write(src.path().join("src/nested/a.js"), "a").unwrap();
        fs::write(src.path().join("README.md"), "new").unwrap();

        let dst = TempDir::new().unwrap();
        fs::write(dst.path().join("README.md"), "old").unwrap();
        fs::write(dst.path().join("keep.txt"), "kept").unwrap();

        let copied = LocalFilesystem.copy_dir_all(src.path(), dst.path()).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dst.path().join("README.md")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dst.path().join("src/nested/a.js")).unwrap(), "a");
        assert!(dst.path().join("keep.txt").exists());
    }

    #[test]
    fn copy_preserves_bytes() {
        let src = TempDir::new().unwrap();
        let bytes = [0u8, 159, 146, 150, b'\n'];
        fs::write(src.path().join("blob.bin"), bytes).unwrap();

        let dst = TempDir::new().unwrap();
        LocalFilesystem.copy_dir_all(src.path(), dst.path()).unwrap();
        assert_eq!(fs::read(dst.path().join("blob.bin")).unwrap(), bytes);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_recreated_not_followed() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("real.txt"), "data").unwrap();
        std::os::unix::fs::symlink("real.txt", src.path().join("alias.txt")).unwrap();

        let dst = TempDir::new().unwrap();
        let copied = LocalFilesystem.copy_dir_all(src.path(), dst.path()).unwrap();

        assert_eq!(copied, 2);
        let alias = dst.path().join("alias.txt");
        assert!(alias.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&alias).unwrap(), Path::new("real.txt"));
        assert_eq!(fs::read_to_string(&alias).unwrap(), "data");
    }

    #[test]
    fn create_dir_refuses_an_existing_directory() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("my-app");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("thesis.tex"), "years of work").unwrap();

        let err = LocalFilesystem.create_dir(&project).unwrap_err();
        assert_eq!(
            err,
            CxaError::Application(ApplicationError::AlreadyExists {
                path: project.clone()
            })
        );
        assert!(project.join("thesis.tex").is_file());

        LocalFilesystem.create_dir(&dir.path().join("fresh")).unwrap();
        assert!(dir.path().join("fresh").is_dir());
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem
            .read_to_string(&dir.path().join("nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            CxaError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
