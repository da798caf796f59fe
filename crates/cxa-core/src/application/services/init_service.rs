//! Init Service - main application orchestrator.
//!
//! Runs one `init` invocation end to end:
//! 1. Validate the project name and check the target is free
//! 2. Fetch the template and load its manifest
//! 3. Resolve every addon (nothing is written before this succeeds)
//! 4. Create the project, copy files, merge `package.json`
//! 5. Install runtime then development dependencies
//!
//! Failures after the directory exists roll it back unless told not to.
//! Every error leaving [`InitService::init`] is tagged with the step that
//! was running (see [`crate::error::CxaError::stage`]).

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, Environment,
        ports::{CommandRunner, Filesystem, PackageFetcher},
        services::{
            AddonAggregator, ManifestLoader, ProjectFinalizer, ProjectMaterializer, advance,
        },
    },
    domain::{
        AddonSelection, CombinedManifest, InitStage, Manifest, PackageManager, PackageRef,
        ProjectName, Scripts, TemplateDescriptor,
    },
    error::CxaResult,
};

/// Behaviour switches for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitOptions {
    pub package_manager: PackageManager,
    /// Leave a half-built project on disk instead of removing it.
    pub keep_on_failure: bool,
}

/// What to create.
#[derive(Debug, Clone, PartialEq)]
pub struct InitRequest {
    pub name: String,
    pub template: PackageRef,
    pub addons: AddonSelection,
}

impl InitRequest {
    pub fn new(name: impl Into<String>, template: PackageRef) -> Self {
        Self {
            name: name.into(),
            template,
            addons: AddonSelection::empty(),
        }
    }

    pub fn with_addons(mut self, addons: AddonSelection) -> Self {
        self.addons = addons;
        self
    }
}

/// Report of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct InitOutcome {
    pub project_dir: PathBuf,
    pub template: TemplateDescriptor,
    pub scripts: Scripts,
    pub runtime_install: Vec<String>,
    pub dev_install: Vec<String>,
    pub addons: Vec<String>,
}

/// Resolved inputs, ready for the writing half of the pipeline.
struct Plan {
    name: ProjectName,
    template: TemplateDescriptor,
    manifest: Manifest,
    combined: CombinedManifest,
}

/// Main init service.
pub struct InitService {
    fetcher: Box<dyn PackageFetcher>,
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    options: InitOptions,
}

impl InitService {
    /// Create a new init service with the given adapters.
    pub fn new(
        fetcher: Box<dyn PackageFetcher>,
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            fetcher,
            filesystem,
            runner,
            options: InitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InitOptions) -> Self {
        self.options = options;
        self
    }

    /// Create a project.
    #[instrument(
        skip_all,
        fields(
            project = %request.name,
            template = %request.template,
            addons = request.addons.len(),
            pm = %self.options.package_manager
        )
    )]
    pub fn init(&self, request: &InitRequest, env: &Environment) -> CxaResult<InitOutcome> {
        let mut stage = InitStage::Start;

        let result = self
            .plan(request, env, &mut stage)
            .and_then(|plan| self.build(&plan, request, env, &mut stage));

        match result {
            Ok(outcome) => {
                advance(&mut stage, InitStage::Done);
                info!(path = %outcome.project_dir.display(), "project ready");
                Ok(outcome)
            }
            Err(e) => {
                let failed = stage.next();
                error!(stage = %failed, error = %e, "init failed");
                if stage.has_created_directory() {
                    self.cleanup(&env.cwd().join(&request.name));
                }
                Err(e.at_stage(failed))
            }
        }
    }

    /// Everything that only reads: validation, fetch, manifest and addon
    /// resolution.
    fn plan(
        &self,
        request: &InitRequest,
        env: &Environment,
        stage: &mut InitStage,
    ) -> CxaResult<Plan> {
        let name = ProjectName::parse(request.name.as_str())?;
        self.materializer().target_dir(env, &name)?;
        advance(stage, InitStage::NameValidated);

        let identifier = request.template.clone().resolve_against(env.cwd());
        let template = self.fetcher.fetch(&identifier, env)?;
        let loader = ManifestLoader::new(self.filesystem.as_ref());
        let manifest = loader.load(template.root())?;
        advance(stage, InitStage::TemplateFetched);

        let combined = AddonAggregator::new(loader).aggregate(&template, &request.addons)?;
        advance(stage, InitStage::AddonsResolved);

        Ok(Plan {
            name,
            template,
            manifest,
            combined,
        })
    }

    /// Everything that writes.
    fn build(
        &self,
        plan: &Plan,
        request: &InitRequest,
        env: &Environment,
        stage: &mut InitStage,
    ) -> CxaResult<InitOutcome> {
        let project_dir = self.materializer().materialize(
            env,
            &plan.name,
            &plan.template,
            &request.addons,
            stage,
        )?;

        let finalized = ProjectFinalizer::new(
            self.filesystem.as_ref(),
            self.runner.as_ref(),
            self.options.package_manager,
        )
        .finalize(&project_dir, &plan.manifest, &plan.combined, stage)?;

        Ok(InitOutcome {
            project_dir,
            template: plan.template.clone(),
            scripts: finalized.scripts,
            runtime_install: finalized.runtime_install,
            dev_install: finalized.dev_install,
            addons: request.addons.names(),
        })
    }

    fn materializer(&self) -> ProjectMaterializer<'_> {
        ProjectMaterializer::new(
            self.filesystem.as_ref(),
            self.runner.as_ref(),
            self.options.package_manager,
        )
    }

    /// Best-effort rollback on failure.
    fn cleanup(&self, project_dir: &Path) {
        if self.options.keep_on_failure {
            warn!(path = %project_dir.display(), "keeping partial project");
            return;
        }
        if let Err(e) = self.filesystem.remove_dir_all(project_dir) {
            let failure = ApplicationError::RollbackFailed {
                path: project_dir.to_path_buf(),
                reason: e.to_string(),
            };
            warn!(error = %failure, "rollback failed");
        } else {
            info!(path = %project_dir.display(), "rollback successful");
        }
    }
}
