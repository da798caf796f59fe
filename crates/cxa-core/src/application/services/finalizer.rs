//! Manifest merge and dependency installation.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::{
        ports::{CommandRunner, Filesystem},
        services::{ManifestLoader, advance, run_checked},
    },
    domain::{CombinedManifest, DependencyKind, InitStage, Manifest, PackageManager, Scripts},
    error::{CxaError, CxaResult},
};

/// Name of the manifest generated by the package manager's init.
pub const PROJECT_MANIFEST_FILE: &str = "package.json";

/// What [`ProjectFinalizer::finalize`] wrote and installed.
#[derive(Debug, Clone, PartialEq)]
pub struct Finalized {
    pub scripts: Scripts,
    pub runtime_install: Vec<String>,
    pub dev_install: Vec<String>,
}

pub struct ProjectFinalizer<'a> {
    filesystem: &'a dyn Filesystem,
    runner: &'a dyn CommandRunner,
    package_manager: PackageManager,
}

impl<'a> ProjectFinalizer<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        runner: &'a dyn CommandRunner,
        package_manager: PackageManager,
    ) -> Self {
        Self {
            filesystem,
            runner,
            package_manager,
        }
    }

    /// Merge scripts into `package.json` then install both dependency lists,
    /// advancing `stage` through `ManifestMerged` and `DependenciesInstalled`.
    #[instrument(skip_all, fields(project = %project_dir.display(), pm = %self.package_manager))]
    pub fn finalize(
        &self,
        project_dir: &Path,
        template: &Manifest,
        combined: &CombinedManifest,
        stage: &mut InitStage,
    ) -> CxaResult<Finalized> {
        let scripts = self.merge_manifest(project_dir, template, combined)?;
        advance(stage, InitStage::ManifestMerged);

        let (runtime_install, dev_install) = self.install(project_dir, template, combined)?;
        advance(stage, InitStage::DependenciesInstalled);

        Ok(Finalized {
            scripts,
            runtime_install,
            dev_install,
        })
    }

    /// Rewrite `package.json` with `generated ∪ template ∪ combined` scripts.
    fn merge_manifest(
        &self,
        project_dir: &Path,
        template: &Manifest,
        combined: &CombinedManifest,
    ) -> CxaResult<Scripts> {
        let path = project_dir.join(PROJECT_MANIFEST_FILE);
        let mut project = ManifestLoader::new(self.filesystem).load_project(&path)?;

        project.merge_scripts([&template.scripts, combined.scripts()]);
        let body = project.to_pretty_json().map_err(|e| CxaError::Internal {
            message: format!("could not serialize {}: {e}", path.display()),
        })?;
        self.filesystem.write_file(&path, &body)?;

        let scripts = project.scripts();
        info!(scripts = scripts.len(), "package.json updated");
        Ok(scripts)
    }

    /// One runtime install, then one dev install. Both always run.
    fn install(
        &self,
        project_dir: &Path,
        template: &Manifest,
        combined: &CombinedManifest,
    ) -> CxaResult<(Vec<String>, Vec<String>)> {
        let mut merged = template.clone();
        merged.merge(combined.as_manifest());

        let runtime = merged.dependency_names();
        let dev = merged.dev_dependency_names();

        for (names, kind) in [
            (&runtime, DependencyKind::Runtime),
            (&dev, DependencyKind::Development),
        ] {
            info!(kind = %kind, count = names.len(), "installing");
            let argv = self.package_manager.install_command(names, kind);
            run_checked(self.runner, &argv, project_dir)?;
        }

        Ok((runtime, dev))
    }
}
