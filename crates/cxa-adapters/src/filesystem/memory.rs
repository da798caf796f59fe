//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use cxa_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CxaError, CxaResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can hand one clone to a service and
/// inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_chain(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_dir_chain(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    fn read(&self) -> CxaResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> CxaResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> CxaError {
    CxaError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

fn not_found(path: &Path) -> CxaError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    /// Only the leaf has to be new; missing parents are filled in.
    fn create_dir(&self, path: &Path) -> CxaResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Err(ApplicationError::AlreadyExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        inner.add_dir_chain(path);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> CxaResult<()> {
        self.write()?.add_dir_chain(path);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> CxaResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> CxaResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> CxaResult<usize> {
        let mut inner = self.write()?;
        if !inner.directories.contains(from) {
            return Err(not_found(from));
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|d| d.strip_prefix(from).ok().map(|rel| to.join(rel)))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, c)| p.strip_prefix(from).ok().map(|rel| (to.join(rel), c.clone())))
            .collect();

        for dir in dirs {
            inner.add_dir_chain(&dir);
        }
        let copied = files.len();
        inner.files.extend(files);
        Ok(copied)
    }

    fn rename(&self, from: &Path, to: &Path) -> CxaResult<()> {
        let mut inner = self.write()?;
        let content = inner.files.remove(from).ok_or_else(|| not_found(from))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> CxaResult<()> {
        let mut inner = self.write()?;
        inner.directories.retain(|d| !d.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}
