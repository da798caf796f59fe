//! Implementation of the `cxa init` command.
//!
//! Responsibility: resolve flags against configuration, wire the adapters
//! into an [`InitService`], and display the outcome. No business logic lives
//! here.

use serde_json::json;
use tracing::{debug, info, instrument};

use cxa_adapters::{LocalFilesystem, NpmPackageFetcher, ProcessRunner};
use cxa_core::{
    application::{
        ApplicationError, Environment, InitOptions, InitOutcome, InitRequest, InitService,
    },
    domain::{AddonSelection, PackageManager, PackageRef},
    error::CxaError,
};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute `cxa init`.
///
/// 1. Resolve template, package manager, and failure policy
/// 2. Build the environment (cwd + scratch directory dropped on return)
/// 3. Run the init pipeline behind a spinner
/// 4. Print a summary
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let template = match (&args.template, &config.defaults.template) {
        (Some(flag), _) => flag.clone(),
        (None, Some(configured)) => {
            output.info(&format!("Using template '{configured}' from configuration"))?;
            configured.clone()
        }
        (None, None) => {
            return Err(CliError::MissingOption {
                option: "--template",
            });
        }
    };
    let template = PackageRef::parse(&template).map_err(CxaError::from)?;
    let addons = AddonSelection::from_names(&args.addons).map_err(CxaError::from)?;
    let options = resolve_options(&args, &config);

    debug!(
        template = %template,
        addons = addons.len(),
        package_manager = %options.package_manager,
        keep_on_failure = options.keep_on_failure,
        "Init resolved"
    );

    let cwd = std::env::current_dir().with_cli_context(|| "Failed to read current directory")?;
    let scratch = tempfile::Builder::new()
        .prefix("cxa-")
        .tempdir()
        .with_cli_context(|| "Failed to create scratch directory")?;
    let env = Environment::new(cwd, scratch.path());

    let show_command_output = global.verbosity().shows_command_output();
    let service = InitService::new(
        Box::new(
            NpmPackageFetcher::new(Box::new(ProcessRunner::new().quiet(true)))
                .with_template_prefix(config.registry.template_prefix.as_str()),
        ),
        Box::new(LocalFilesystem),
        Box::new(ProcessRunner::new().quiet(!show_command_output)),
    )
    .with_options(options);

    let request = InitRequest::new(args.name.as_str(), template).with_addons(addons);

    let spinner = output.spinner(&format!("Creating {}...", args.name));
    let result = service.init(&request, &env);
    spinner.finish_and_clear();
    let project_dir = env.cwd().join(&args.name);
    let left_partial = match &result {
        Err(err) => !matches!(
            err.as_application(),
            Some(ApplicationError::ProjectExists { .. })
        ),
        Ok(_) => false,
    };
    if left_partial && options.keep_on_failure && project_dir.is_dir() {
        output.warning(&format!(
            "Leaving {} in place for inspection",
            project_dir.display()
        ))?;
    }
    let outcome = result?;

    info!(path = %outcome.project_dir.display(), "Project created");
    report(&outcome, options.package_manager, &output)
}

/// Flags win over configuration; `--keep-on-failure` can only switch the
/// policy on.
fn resolve_options(args: &InitArgs, config: &AppConfig) -> InitOptions {
    let package_manager = if args.use_alt_package_manager {
        PackageManager::Yarn
    } else {
        config.defaults.package_manager
    };
    InitOptions {
        package_manager,
        keep_on_failure: args.keep_on_failure || config.behavior.keep_on_failure,
    }
}

fn report(
    outcome: &InitOutcome,
    package_manager: PackageManager,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        output.json(&json!({
            "project_dir": outcome.project_dir,
            "template": outcome.template.identifier().to_string(),
            "addons": outcome.addons,
            "scripts": outcome.scripts,
            "dependencies": outcome.runtime_install,
            "devDependencies": outcome.dev_install,
        }))?;
        return Ok(());
    }

    output.success(&format!(
        "Created {} at {}",
        outcome
            .project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        outcome.project_dir.display(),
    ))?;
    output.detail("template", &outcome.template.identifier().to_string())?;
    if !outcome.addons.is_empty() {
        output.detail("addons", &outcome.addons.join(", "))?;
    }
    output.detail("dependencies", &outcome.runtime_install.len().to_string())?;
    output.detail("devDependencies", &outcome.dev_install.len().to_string())?;

    output.print("")?;
    output.header("Next steps:")?;
    output.print(&format!("  cd {}", outcome.project_dir.display()))?;
    if outcome.scripts.contains_key("start") {
        output.print(&format!("  {package_manager} start"))?;
    }

    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(yarn: bool, keep: bool) -> InitArgs {
        InitArgs {
            name: "app".into(),
            template: Some("react".into()),
            addons: vec![],
            use_alt_package_manager: yarn,
            keep_on_failure: keep,
        }
    }

    #[test]
    fn config_package_manager_is_used_without_flag() {
        let mut config = AppConfig::default();
        config.defaults.package_manager = PackageManager::Yarn;
        assert_eq!(
            resolve_options(&args(false, false), &config).package_manager,
            PackageManager::Yarn
        );
    }

    #[test]
    fn yarn_flag_overrides_config() {
        let options = resolve_options(&args(true, false), &AppConfig::default());
        assert_eq!(options.package_manager, PackageManager::Yarn);
        assert!(!options.keep_on_failure);
    }

    #[test]
    fn keep_on_failure_from_either_source() {
        let mut config = AppConfig::default();
        assert!(resolve_options(&args(false, true), &config).keep_on_failure);

        config.behavior.keep_on_failure = true;
        assert!(resolve_options(&args(false, false), &config).keep_on_failure);
    }
}
