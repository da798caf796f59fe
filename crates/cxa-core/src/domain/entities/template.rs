//! A fetched template package on local disk.
//!
//! # Package layout
//!
//! ```text
//! <root>/
//! ├── template.json            ← base manifest
//! ├── files/                   ← copied verbatim into the project
//! │   └── gitignore            ← restored to .gitignore after copy
//! └── addons/
//!     └── <addon>/
//!         ├── template.json
//!         └── files/
//! ```

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{AddonName, PackageRef};

/// Fixed manifest file name inside a template or addon directory.
pub const MANIFEST_FILE: &str = "template.json";
/// Directory whose contents are copied into the new project.
pub const FILES_DIR: &str = "files";
/// Directory holding the addons of a template.
pub const ADDONS_DIR: &str = "addons";

/// Identifier plus the directory it resolved to. Read-only after fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    identifier: PackageRef,
    root: PathBuf,
}

impl TemplateDescriptor {
    pub fn new(identifier: PackageRef, root: impl Into<PathBuf>) -> Self {
        Self {
            identifier,
            root: root.into(),
        }
    }

    pub fn identifier(&self) -> &PackageRef {
        &self.identifier
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn files_dir(&self) -> PathBuf {
        self.root.join(FILES_DIR)
    }

    pub fn addon_dir(&self, addon: &AddonName) -> PathBuf {
        self.root.join(ADDONS_DIR).join(addon.as_str())
    }

    pub fn addon_files_dir(&self, addon: &AddonName) -> PathBuf {
        self.addon_dir(addon).join(FILES_DIR)
    }
}
