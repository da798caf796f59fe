//! Manifest Loader - typed reads of `template.json` and `package.json`.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{MANIFEST_FILE, Manifest, ProjectManifest},
    error::CxaResult,
};

/// Reads manifests through the [`Filesystem`] port and validates their shape.
pub struct ManifestLoader<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> ManifestLoader<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Load `dir/template.json`.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::ManifestMissing`] when the file is absent,
    /// [`ApplicationError::ManifestInvalid`] when it is not the declared shape,
    /// [`ApplicationError::ManifestRejected`] when a script or dependency
    /// entry breaks a content rule.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load(&self, dir: &Path) -> CxaResult<Manifest> {
        let path = dir.join(MANIFEST_FILE);
        if !self.filesystem.exists(&path) {
            return Err(ApplicationError::ManifestMissing { path }.into());
        }

        let raw = self.filesystem.read_to_string(&path)?;
        let manifest =
            Manifest::from_template_json(&raw).map_err(|e| ApplicationError::ManifestInvalid {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        manifest
            .validate()
            .map_err(|error| ApplicationError::ManifestRejected {
                path: path.clone(),
                error,
            })?;

        debug!(
            scripts = manifest.scripts.len(),
            dependencies = manifest.dependencies.len(),
            dev_dependencies = manifest.dev_dependencies.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    /// Load the `package.json` generated by the package manager's init.
    pub fn load_project(&self, path: &Path) -> CxaResult<ProjectManifest> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::ManifestMissing {
                path: path.to_path_buf(),
            }
            .into());
        }
        let raw = self.filesystem.read_to_string(path)?;
        ProjectManifest::parse(&raw).map_err(|reason| {
            ApplicationError::ManifestInvalid {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        })
    }
}
