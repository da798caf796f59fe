//! Project Materializer - create the project directory and lay files down.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, Environment,
        ports::{CommandRunner, Filesystem},
        services::{advance, run_checked},
    },
    domain::{AddonSelection, InitStage, PackageManager, ProjectName, TemplateDescriptor},
    error::CxaResult,
};

/// Root-level file shipped without its leading dot (packaging strips
/// dotfiles), paired with its restored name.
pub const DOTFILE_PLACEHOLDERS: &[(&str, &str)] = &[("gitignore", ".gitignore")];

pub struct ProjectMaterializer<'a> {
    filesystem: &'a dyn Filesystem,
    runner: &'a dyn CommandRunner,
    package_manager: PackageManager,
}

impl<'a> ProjectMaterializer<'a> {
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

    /// Path the project will occupy, failing if anything is already there.
    pub fn target_dir(&self, env: &Environment, name: &ProjectName) -> CxaResult<PathBuf> {
        let project_dir = env.cwd().join(name.as_str());
        if self.filesystem.exists(&project_dir) {
            return Err(ApplicationError::ProjectExists {
                name: name.to_string(),
                path: project_dir,
            }
            .into());
        }
        Ok(project_dir)
    }

    /// Full materialization: create, init, copy template and addon files,
    /// restore dotfiles. Advances `stage` through `DirectoryCreated` and
    /// `FilesCopied`.
    #[instrument(skip_all, fields(project = %name, template = %template.identifier()))]
    pub fn materialize(
        &self,
        env: &Environment,
        name: &ProjectName,
        template: &TemplateDescriptor,
        addons: &AddonSelection,
        stage: &mut InitStage,
    ) -> CxaResult<PathBuf> {
        let project_dir = self.target_dir(env, name)?;
        self.create_dir(name, &project_dir)?;
        advance(stage, InitStage::DirectoryCreated);

        self.init_package(&project_dir)?;
        self.copy_files(&project_dir, template, addons)?;
        self.restore_dotfiles(&project_dir);
        advance(stage, InitStage::FilesCopied);
        Ok(project_dir)
    }

    /// Claim the project directory. Something appearing at the path after
    /// [`target_dir`](Self::target_dir) is still a conflict, never a merge.
    fn create_dir(&self, name: &ProjectName, project_dir: &Path) -> CxaResult<()> {
        self.filesystem.create_dir(project_dir).map_err(|e| {
            if matches!(
                e.as_application(),
                Some(ApplicationError::AlreadyExists { .. })
            ) {
                ApplicationError::ProjectExists {
                    name: name.to_string(),
                    path: project_dir.to_path_buf(),
                }
                .into()
            } else {
                e
            }
        })?;
        info!(path = %project_dir.display(), "project directory created");
        Ok(())
    }

    /// `<pm> init -y` inside the project.
    fn init_package(&self, project_dir: &Path) -> CxaResult<()> {
        run_checked(self.runner, &self.package_manager.init_command(), project_dir)
    }

    /// Copy `files/` of the template, then of each addon in order. Later
    /// copies overwrite earlier ones at identical paths.
    fn copy_files(
        &self,
        project_dir: &Path,
        template: &TemplateDescriptor,
        addons: &AddonSelection,
    ) -> CxaResult<usize> {
        let mut copied = self.copy_tree(&template.files_dir(), project_dir)?;
        for addon in addons {
            let count = self.copy_tree(&template.addon_files_dir(addon), project_dir)?;
            debug!(addon = %addon, files = count, "addon files copied");
            copied += count;
        }
        info!(files = copied, "files copied");
        Ok(copied)
    }

    /// Rename placeholder dotfiles at the project root. Failures are logged
    /// and skipped.
    fn restore_dotfiles(&self, project_dir: &Path) -> Vec<PathBuf> {
        let mut restored = Vec::new();
        for (placeholder, dotfile) in DOTFILE_PLACEHOLDERS {
            let from = project_dir.join(placeholder);
            if !self.filesystem.exists(&from) {
                continue;
            }
            let to = project_dir.join(dotfile);
            match self.filesystem.rename(&from, &to) {
                Ok(()) => {
                    debug!(file = %dotfile, "dotfile restored");
                    restored.push(to);
                }
                Err(e) => warn!(
                    from = %from.display(),
                    to = %to.display(),
                    error = %e,
                    "could not restore dotfile, continuing"
                ),
            }
        }
        restored
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> CxaResult<usize> {
        if !self.filesystem.is_dir(from) {
            debug!(dir = %from.display(), "no files directory, nothing to copy");
            return Ok(0);
        }
        self.filesystem.copy_dir_all(from, to)
    }
}
