//! Template package fetcher.
//!
//! Registry templates are retrieved with `npm pack <prefix><name>` and the
//! resulting tarball is unpacked in-process. `file:` templates are copied.
//! Everything lands under the caller's scratch directory, one subdirectory
//! per package, and nothing is cleaned up here.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::{debug, info, instrument};

use cxa_core::{
    application::{
        ApplicationError, Environment,
        ports::{CommandRunner, Filesystem, PackageFetcher},
    },
    domain::{PackageRef, TemplateDescriptor},
    error::CxaResult,
};

use crate::filesystem::{LocalFilesystem, map_io_error};

/// Default registry naming convention: template `react` is published as
/// `cxa-template-react`.
pub const DEFAULT_TEMPLATE_PREFIX: &str = "cxa-template-";

/// Directory npm puts at the root of every packed tarball.
const PACKAGE_ROOT: &str = "package";
const EXTRACT_DIR: &str = "extract";

pub struct NpmPackageFetcher {
    runner: Box<dyn CommandRunner>,
    template_prefix: String,
}

impl NpmPackageFetcher {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self {
            runner,
            template_prefix: DEFAULT_TEMPLATE_PREFIX.to_string(),
        }
    }

    pub fn with_template_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.template_prefix = prefix.into();
        self
    }

    fn fetch_registry(&self, name: &str, env: &Environment) -> CxaResult<PathBuf> {
        let package = PackageRef::Registry(name.to_string())
            .package_name(&self.template_prefix)
            .unwrap_or_else(|| name.to_string());
        let not_found = |reason: String| ApplicationError::TemplateNotFound {
            identifier: name.to_string(),
            reason,
        };

        let scratch = fresh_dir(&env.package_scratch(&package))?;
        let argv = vec!["npm".to_string(), "pack".to_string(), package.clone()];
        let status = self.runner.run(&argv, &scratch)?;
        if !status.success() {
            return Err(not_found(format!("`npm pack {package}` exited with {status}")).into());
        }

        let tarball = find_tarball(&scratch)?
            .ok_or_else(|| not_found(format!("npm pack produced no tarball for {package}")))?;
        debug!(tarball = %tarball.display(), "package downloaded");

        let extract_dir = scratch.join(EXTRACT_DIR);
        unpack(&tarball, &extract_dir)?;

        let root = extract_dir.join(PACKAGE_ROOT);
        if !root.is_dir() {
            return Err(not_found(format!("{package} has no `{PACKAGE_ROOT}/` root")).into());
        }
        Ok(root)
    }

    fn fetch_local(
        &self,
        package: &PackageRef,
        source: &Path,
        env: &Environment,
    ) -> CxaResult<PathBuf> {
        if !source.is_dir() {
            return Err(ApplicationError::TemplateNotFound {
                identifier: package.to_string(),
                reason: format!("{} is not a directory", source.display()),
            }
            .into());
        }

        let scratch = fresh_dir(&env.package_scratch(&package.working_name()))?;
        let copied = LocalFilesystem.copy_dir_all(source, &scratch)?;
        debug!(files = copied, "local template copied");
        Ok(scratch)
    }
}

impl PackageFetcher for NpmPackageFetcher {
    #[instrument(skip(self, env), fields(package = %package))]
    fn fetch(&self, package: &PackageRef, env: &Environment) -> CxaResult<TemplateDescriptor> {
        let root = match package {
            PackageRef::Registry(name) => self.fetch_registry(name, env)?,
            PackageRef::Local(path) => self.fetch_local(package, path, env)?,
        };
        info!(root = %root.display(), "template fetched");
        Ok(TemplateDescriptor::new(package.clone(), root))
    }
}

/// Create `dir`, clearing anything left by an earlier fetch of the same
/// package.
fn fresh_dir(dir: &Path) -> CxaResult<PathBuf> {
    let local = LocalFilesystem;
    if local.exists(dir) {
        local.remove_dir_all(dir)?;
    }
    local.create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

fn find_tarball(dir: &Path) -> CxaResult<Option<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| map_io_error(dir, e, "list directory"))?;
    for entry in entries {
        let path = entry.map_err(|e| map_io_error(dir, e, "list directory"))?.path();
        if path.extension().is_some_and(|ext| ext == "tgz") {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

fn unpack(tarball: &Path, dest: &Path) -> CxaResult<()> {
    let file = File::open(tarball).map_err(|e| map_io_error(tarball, e, "open tarball"))?;
    Archive::new(GzDecoder::new(file))
        .unpack(dest)
        .map_err(|e| map_io_error(tarball, e, "extract tarball"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxa_core::application::ports::CommandStatus;
    use cxa_core::error::CxaError;
    use flate2::{Compression, write::GzEncoder};
    use tempfile::TempDir;

    /// Stands in for `npm pack`: drops a prebuilt tarball into the cwd.
    struct FakePack {
        tarball: Option<Vec<u8>>,
    }

    impl CommandRunner for FakePack {
        fn run(&self, argv: &[String], cwd: &Path) -> CxaResult<CommandStatus> {
            assert_eq!(argv[..2], ["npm", "pack"]);
            match &self.tarball {
                Some(bytes) => {
                    fs::write(cwd.join("pkg-1.0.0.tgz"), bytes).unwrap();
                    Ok(CommandStatus::SUCCESS)
                }
                None => Ok(CommandStatus::from_code(Some(1))),
            }
        }
    }

    fn packed(files: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        for (path, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn env(tmp: &TempDir) -> Environment {
        Environment::new(tmp.path().join("cwd"), tmp.path().join("scratch"))
    }

    #[test]
    fn registry_template_is_packed_and_extracted() {
        let tmp = TempDir::new().unwrap();
        let runner = FakePack {
            tarball: Some(packed(&[
                ("package/template.json", r#"{"package":{}}"#),
                ("package/files/gitignore", "node_modules\n"),
            ])),
        };
        let fetcher = NpmPackageFetcher::new(Box::new(runner));

        let descriptor = fetcher
            .fetch(&PackageRef::Registry("react".into()), &env(&tmp))
            .unwrap();

        let root = tmp.path().join("scratch/cxa-template-react/extract/package");
        assert_eq!(descriptor.root(), root);
        assert!(root.join("template.json").is_file());
        assert_eq!(
            fs::read_to_string(root.join("files/gitignore")).unwrap(),
            "node_modules\n"
        );
    }

    #[test]
    fn failed_pack_is_template_not_found() {
        let tmp = TempDir::new().unwrap();
        let runner = FakePack { tarball: None };
        let err = NpmPackageFetcher::new(Box::new(runner))
            .fetch(&PackageRef::Registry("nope".into()), &env(&tmp))
            .unwrap_err();
        assert!(matches!(
            err,
            CxaError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn tarball_without_package_root_is_template_not_found() {
        let tmp = TempDir::new().unwrap();
        let runner = FakePack {
            tarball: Some(packed(&[("other/template.json", "{}")])),
        };
        let err = NpmPackageFetcher::new(Box::new(runner))
            .fetch(&PackageRef::Registry("odd".into()), &env(&tmp))
            .unwrap_err();
        assert!(matches!(
            err,
            CxaError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn custom_prefix_is_used() {
        let tmp = TempDir::new().unwrap();
        let fetcher = NpmPackageFetcher::new(Box::new(FakePack { tarball: None }))
            .with_template_prefix("acme-tpl-");

        assert!(
            fetcher
                .fetch(&PackageRef::Registry("web".into()), &env(&tmp))
                .is_err()
        );
        assert!(tmp.path().join("scratch/acme-tpl-web").is_dir());
    }

    #[test]
    fn local_template_is_copied_into_scratch() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("my-template");
        fs::create_dir_all(source.join("files")).unwrap();
        fs::write(source.join("template.json"), "{}").unwrap();
        fs::write(source.join("files/index.js"), "x").unwrap();

        let fetcher = NpmPackageFetcher::new(Box::new(FakePack { tarball: None }));
        let descriptor = fetcher
            .fetch(&PackageRef::Local(source), &env(&tmp))
            .unwrap();

        assert_eq!(descriptor.root(), tmp.path().join("scratch/my-template"));
        assert!(descriptor.root().join("files/index.js").is_file());
    }

    #[test]
    fn missing_local_template_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let fetcher = NpmPackageFetcher::new(Box::new(FakePack { tarball: None }));
        let err = fetcher
            .fetch(&PackageRef::Local(tmp.path().join("absent")), &env(&tmp))
            .unwrap_err();
        assert!(matches!(
            err,
            CxaError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }
}
