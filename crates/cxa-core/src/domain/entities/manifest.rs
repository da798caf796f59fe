//! Template manifests and the merge rules between them.
//!
//! A template (and each of its addons) ships a `template.json`:
//!
//! ```json
//! {
//!   "package": {
//!     "scripts": { "start": "react-scripts start" },
//!     "dependencies": [{ "name": "react", "version": "^18" }],
//!     "devDependencies": [{ "name": "eslint" }]
//!   }
//! }
//! ```
//!
//! Merge semantics are flat and by presence only:
//! - `scripts` merge by key, later source wins;
//! - dependency lists concatenate, order kept, duplicates kept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{error::DomainError, value_objects::DependencyKind};

/// Ordered script table. Insertion order is kept so merged output stays
/// readable; re-inserting an existing key replaces its command in place.
pub type Scripts = Map<String, Value>;

/// One entry of a `dependencies` / `devDependencies` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    pub name: String,
    /// Version constraint. Carried for completeness; installs use names only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DependencySpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// The `package` section of a template or addon manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub scripts: Scripts,
    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,
    #[serde(default)]
    pub dev_dependencies: Vec<DependencySpec>,
}

/// On-disk shape of `template.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFile {
    #[serde(default)]
    pub package: Manifest,
}

impl Manifest {
    /// Parse a `template.json` document and check the parts serde cannot.
    pub fn from_template_json(raw: &str) -> Result<Self, serde_json::Error> {
        let file: TemplateFile = serde_json::from_str(raw)?;
        Ok(file.package)
    }

    /// Script values must be command strings; dependency names non-empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, command) in &self.scripts {
            if !command.is_string() {
                return Err(DomainError::ScriptNotString { name: name.clone() });
            }
        }
        for (list, deps) in [
            (DependencyKind::Runtime, &self.dependencies),
            (DependencyKind::Development, &self.dev_dependencies),
        ] {
            if let Some(index) = deps.iter().position(|dep| dep.name.trim().is_empty()) {
                return Err(DomainError::EmptyDependencyName { list, index });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    /// Fold `other` on top of `self`: scripts override, lists concatenate.
    pub fn merge(&mut self, other: &Manifest) {
        merge_scripts(&mut self.scripts, &other.scripts);
        self.dependencies.extend(other.dependencies.iter().cloned());
        self.dev_dependencies
            .extend(other.dev_dependencies.iter().cloned());
    }

    pub fn dependency_names(&self) -> Vec<String> {
        self.dependencies.iter().map(|d| d.name.clone()).collect()
    }

    pub fn dev_dependency_names(&self) -> Vec<String> {
        self.dev_dependencies.iter().map(|d| d.name.clone()).collect()
    }
}

/// Copy every script of `overlay` into `base`, replacing on key collision.
pub fn merge_scripts(base: &mut Scripts, overlay: &Scripts) {
    for (name, command) in overlay {
        base.insert(name.clone(), command.clone());
    }
}

// ── CombinedManifest ─────────────────────────────────────────────────────────

/// Accumulator of addon manifests folded in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedManifest {
    manifest: Manifest,
    sources: usize,
}

impl CombinedManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the next manifest in; later calls win on script collisions.
    pub fn push(&mut self, manifest: &Manifest) {
        self.manifest.merge(manifest);
        self.sources += 1;
    }

    /// Number of manifests folded in so far.
    pub fn source_count(&self) -> usize {
        self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.is_empty()
    }

    pub fn as_manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn scripts(&self) -> &Scripts {
        &self.manifest.scripts
    }

    pub fn dependencies(&self) -> &[DependencySpec] {
        &self.manifest.dependencies
    }

    pub fn dev_dependencies(&self) -> &[DependencySpec] {
        &self.manifest.dev_dependencies
    }
}

impl<'a> FromIterator<&'a Manifest> for CombinedManifest {
    fn from_iter<I: IntoIterator<Item = &'a Manifest>>(iter: I) -> Self {
        let mut combined = Self::new();
        for manifest in iter {
            combined.push(manifest);
        }
        combined
    }
}

// ── ProjectManifest ──────────────────────────────────────────────────────────

/// The generated `package.json` of the new project.
///
/// Held as a raw JSON object so fields this tool knows nothing about are
/// written back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectManifest {
    document: Map<String, Value>,
}

impl ProjectManifest {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(document)) => Ok(Self { document }),
            Ok(_) => Err("package.json is not a JSON object".into()),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Current `scripts`; a missing or non-object field reads as empty.
    pub fn scripts(&self) -> Scripts {
        match self.document.get("scripts") {
            Some(Value::Object(scripts)) => scripts.clone(),
            _ => Scripts::new(),
        }
    }

    /// Apply `sources` over the existing scripts, each overriding the last.
    pub fn merge_scripts<'a>(&mut self, sources: impl IntoIterator<Item = &'a Scripts>) {
        let mut scripts = self.scripts();
        for source in sources {
            merge_scripts(&mut scripts, source);
        }
        self.document
            .insert("scripts".to_string(), Value::Object(scripts));
    }

    /// Pretty-printed with a trailing newline, the way npm writes it.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(&self.document)?;
        out.push('\n');
        Ok(out)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scripts(pairs: &[(&str, &str)]) -> Scripts {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    fn manifest(script: &[(&str, &str)], deps: &[&str], dev: &[&str]) -> Manifest {
        Manifest {
            scripts: scripts(script),
            dependencies: deps.iter().map(|d| DependencySpec::new(*d)).collect(),
            dev_dependencies: dev.iter().map(|d| DependencySpec::new(*d)).collect(),
        }
    }

    #[test]
    fn parses_full_template_json() {
        let raw = r#"{
            "package": {
                "scripts": { "start": "node index.js" },
                "dependencies": [{ "name": "react", "version": "^18.2.0" }],
                "devDependencies": [{ "name": "eslint" }]
            }
        }"#;
        let m = Manifest::from_template_json(raw).unwrap();
        assert_eq!(m.scripts.get("start"), Some(&json!("node index.js")));
        assert_eq!(
            m.dependencies,
            vec![DependencySpec::new("react").with_version("^18.2.0")]
        );
        assert_eq!(m.dev_dependency_names(), vec!["eslint".to_string()]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        assert!(Manifest::from_template_json("{}").unwrap().is_empty());
        assert!(
            Manifest::from_template_json(r#"{"package":{}}"#)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert!(Manifest::from_template_json(r#"{"package":{"dependencies":{"a":"1"}}}"#).is_err());
        assert!(Manifest::from_template_json("not json").is_err());
    }

    #[test]
    fn validate_rejects_non_string_script() {
        let m = Manifest::from_template_json(r#"{"package":{"scripts":{"build":1}}}"#).unwrap();
        assert_eq!(
            m.validate(),
            Err(DomainError::ScriptNotString {
                name: "build".into()
            })
        );
    }

    #[test]
    fn validate_rejects_blank_dependency_name() {
        let m = manifest(&[], &["react", " "], &[]);
        assert_eq!(
            m.validate(),
            Err(DomainError::EmptyDependencyName {
                list: DependencyKind::Runtime,
                index: 1
            })
        );
    }

    #[test]
    fn blank_dev_dependency_is_indexed_within_its_own_list() {
        let m = manifest(&[], &["react", "react-dom"], &["", "jest"]);
        let err = m.validate().unwrap_err();
        assert_eq!(
            err,
            DomainError::EmptyDependencyName {
                list: DependencyKind::Development,
                index: 0
            }
        );
        assert_eq!(err.to_string(), "devDependencies entry #0 has an empty name");
        assert!(err.suggestions()[0].contains("devDependencies[0]"));
    }

    #[test]
    fn later_addon_wins_script_collision() {
        let a1 = manifest(&[("build", "a1 build"), ("lint", "eslint .")], &[], &[]);
        let a2 = manifest(&[("build", "a2 build")], &[], &[]);
        let combined: CombinedManifest = [&a1, &a2].into_iter().collect();

        assert_eq!(combined.scripts().get("build"), Some(&json!("a2 build")));
        assert_eq!(combined.scripts().get("lint"), Some(&json!("eslint .")));
        assert_eq!(combined.source_count(), 2);
    }

    #[test]
    fn dependency_lists_concatenate_without_dedup() {
        let a1 = manifest(&[], &["lodash", "react"], &["jest"]);
        let a2 = manifest(&[], &["react"], &["jest", "eslint"]);
        let combined: CombinedManifest = [&a1, &a2].into_iter().collect();

        assert_eq!(combined.dependencies().len(), 3);
        assert_eq!(combined.dev_dependencies().len(), 3);
        let names: Vec<_> = combined.dependencies().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["lodash", "react", "react"]);
    }

    #[test]
    fn empty_fold_is_empty() {
        let combined: CombinedManifest = std::iter::empty().collect();
        assert!(combined.is_empty());
        assert_eq!(combined.source_count(), 0);
    }

    #[test]
    fn project_manifest_keeps_unknown_fields_and_merges_in_order() {
        let raw = r#"{"name":"my-app","version":"1.0.0","scripts":{"test":"echo none","x":"keep"}}"#;
        let mut pm = ProjectManifest::parse(raw).unwrap();
        let template = scripts(&[("start", "serve"), ("test", "template test")]);
        let addons = scripts(&[("test", "jest")]);

        pm.merge_scripts([&template, &addons]);

        let merged = pm.scripts();
        assert_eq!(merged.get("test"), Some(&json!("jest")));
        assert_eq!(merged.get("start"), Some(&json!("serve")));
        assert_eq!(merged.get("x"), Some(&json!("keep")));
        assert_eq!(pm.get("name"), Some(&json!("my-app")));
    }

    #[test]
    fn project_manifest_without_scripts_gains_them() {
        let mut pm = ProjectManifest::parse(r#"{"name":"a"}"#).unwrap();
        pm.merge_scripts([&scripts(&[("start", "go")])]);
        assert_eq!(pm.scripts().len(), 1);
    }

    #[test]
    fn project_manifest_must_be_object() {
        assert!(ProjectManifest::parse("[]").is_err());
        assert!(ProjectManifest::parse("{").is_err());
    }

    #[test]
    fn pretty_output_ends_with_newline() {
        let pm = ProjectManifest::parse(r#"{"name":"a"}"#).unwrap();
        let out = pm.to_pretty_json().unwrap();
        assert!(out.ends_with("}\n"));
        assert!(out.contains("  \"name\": \"a\""));
    }
}
