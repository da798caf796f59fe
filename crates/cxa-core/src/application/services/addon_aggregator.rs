//! Addon Aggregator - resolve selected addons and fold their manifests.

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, services::ManifestLoader},
    domain::{AddonSelection, CombinedManifest, TemplateDescriptor},
    error::CxaResult,
};

pub struct AddonAggregator<'a> {
    loader: ManifestLoader<'a>,
}

impl<'a> AddonAggregator<'a> {
    pub fn new(loader: ManifestLoader<'a>) -> Self {
        Self { loader }
    }

    /// Load every addon manifest from `addons/<name>` and fold them in
    /// selection order.
    ///
    /// Every addon is attempted so the error names all of the missing ones.
    /// Nothing is written, so a failure here leaves no partial state.
    #[instrument(skip_all, fields(template = %template.identifier(), addons = addons.len()))]
    pub fn aggregate(
        &self,
        template: &TemplateDescriptor,
        addons: &AddonSelection,
    ) -> CxaResult<CombinedManifest> {
        let mut combined = CombinedManifest::new();
        let mut missing = Vec::new();

        for addon in addons {
            match self.loader.load(&template.addon_dir(addon)) {
                Ok(manifest) => {
                    debug!(addon = %addon, "addon manifest loaded");
                    combined.push(&manifest);
                }
                Err(e) => {
                    warn!(addon = %addon, error = %e, "addon not found");
                    missing.push(addon.as_str().to_string());
                }
            }
        }

        if !missing.is_empty() {
            return Err(ApplicationError::AddonsNotFound { names: missing }.into());
        }

        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::PackageRef;
    use crate::error::CxaError;
    use std::path::Path;

    fn template() -> TemplateDescriptor {
        TemplateDescriptor::new(PackageRef::Registry("react".into()), "/tpl")
    }

    /// Filesystem with manifests for `eslint` and `jest` only.
    fn fs_with_addons() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|p: &Path| {
            p == Path::new("/tpl/addons/eslint/template.json")
                || p == Path::new("/tpl/addons/jest/template.json")
        });
        fs.expect_read_to_string().returning(|p: &Path| {
            if p.starts_with("/tpl/addons/eslint") {
                Ok(r#"{"package":{"scripts":{"build":"eslint build","lint":"eslint ."},
                      "devDependencies":[{"name":"eslint"}]}}"#
                    .to_string())
            } else {
                Ok(r#"{"package":{"scripts":{"build":"jest build","test":"jest"},
                      "devDependencies":[{"name":"jest"}]}}"#
                    .to_string())
            }
        });
        fs
    }

    #[test]
    fn empty_selection_yields_empty_manifest() {
        let fs = MockFilesystem::new();
        let combined = AddonAggregator::new(ManifestLoader::new(&fs))
            .aggregate(&template(), &AddonSelection::empty())
            .unwrap();
        assert!(combined.is_empty());
    }

    #[test]
    fn folds_in_selection_order() {
        let fs = fs_with_addons();
        let aggregator = AddonAggregator::new(ManifestLoader::new(&fs));

        let combined = aggregator
            .aggregate(&template(), &AddonSelection::parse("eslint,jest").unwrap())
            .unwrap();
        assert_eq!(combined.scripts()["build"], "jest build");
        assert_eq!(combined.dev_dependencies().len(), 2);

        let reversed = aggregator
            .aggregate(&template(), &AddonSelection::parse("jest,eslint").unwrap())
            .unwrap();
        assert_eq!(reversed.scripts()["build"], "eslint build");
    }

    #[test]
    fn reports_every_missing_addon() {
        let fs = fs_with_addons();
        let err = AddonAggregator::new(ManifestLoader::new(&fs))
            .aggregate(
                &template(),
                &AddonSelection::parse("eslint,typo,jest,nope").unwrap(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            CxaError::Application(ApplicationError::AddonsNotFound {
                names: vec!["typo".into(), "nope".into()]
            })
        );
    }
}
