//! Domain value objects: ProjectName, AddonName, PackageRef, PackageManager.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Each
//! one validates itself at construction, so anything holding a `ProjectName`
//! or an `AddonName` can use it as a single path segment without re-checking.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Reject anything that is not exactly one normal path segment.
fn check_segment(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("name cannot be empty".into());
    }
    if value.contains('/') || value.contains('\\') {
        return Err("name cannot contain path separators".into());
    }
    if value == "." || value == ".." {
        return Err("name cannot be a relative directory reference".into());
    }
    Ok(())
}

// ── ProjectName ──────────────────────────────────────────────────────────────

/// Name of the project directory to create inside the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: String| DomainError::InvalidProjectName {
            name: name.clone(),
            reason,
        };

        check_segment(&name).map_err(invalid)?;
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'".into()));
        }
        if name.trim() != name {
            return Err(invalid("name cannot start or end with whitespace".into()));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── AddonName ────────────────────────────────────────────────────────────────

/// Name of an addon nested under `addons/<name>` in a template package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddonName(String);

impl AddonName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        check_segment(&name).map_err(|reason| DomainError::InvalidAddonName {
            name: name.clone(),
            reason,
        })?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── PackageRef ───────────────────────────────────────────────────────────────

/// Scheme prefix marking a template that lives on the local filesystem.
pub const LOCAL_SCHEME: &str = "file:";

/// Where a template package comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageRef {
    /// `file:<path>` or `file://<path>`; relative paths are resolved later
    /// against the invocation's working directory.
    Local(PathBuf),
    /// A template name looked up in the package registry.
    Registry(String),
}

impl PackageRef {
    pub fn parse(identifier: &str) -> Result<Self, DomainError> {
        let identifier = identifier.trim();
        let invalid = |reason: &str| DomainError::InvalidIdentifier {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        };

        if let Some(rest) = identifier.strip_prefix(LOCAL_SCHEME) {
            let path = rest.strip_prefix("//").unwrap_or(rest);
            if path.is_empty() {
                return Err(invalid("local reference has no path"));
            }
            return Ok(Self::Local(PathBuf::from(path)));
        }

        if identifier.is_empty() {
            return Err(invalid("identifier cannot be empty"));
        }
        if identifier.chars().any(char::is_whitespace) {
            return Err(invalid("registry names cannot contain whitespace"));
        }
        Ok(Self::Registry(identifier.to_string()))
    }

    /// Working name: the final path segment for local packages, the bare
    /// template name for registry packages.
    pub fn working_name(&self) -> String {
        match self {
            Self::Local(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "template".to_string()),
            Self::Registry(name) => name.clone(),
        }
    }

    /// Registry package name under the template naming convention
    /// (`cxa-template-react` for `react`). `None` for local packages.
    pub fn package_name(&self, prefix: &str) -> Option<String> {
        match self {
            Self::Local(_) => None,
            Self::Registry(name) if name.starts_with(prefix) => Some(name.clone()),
            Self::Registry(name) => Some(format!("{prefix}{name}")),
        }
    }

    /// Resolve a local reference against `cwd`. Registry refs are unchanged.
    pub fn resolve_against(self, cwd: &Path) -> Self {
        match self {
            Self::Local(path) if path.is_relative() => Self::Local(cwd.join(path)),
            other => other,
        }
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{LOCAL_SCHEME}{}", path.display()),
            Self::Registry(name) => f.write_str(name),
        }
    }
}

impl FromStr for PackageRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── PackageManager ───────────────────────────────────────────────────────────

/// Which dependency list an install command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Runtime,
    Development,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime => f.write_str("dependencies"),
            Self::Development => f.write_str("devDependencies"),
        }
    }
}

/// The external package manager driving `init` and dependency installs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    /// Argv that produces a baseline `package.json` in the current directory.
    pub fn init_command(&self) -> Vec<String> {
        vec![self.as_str().into(), "init".into(), "-y".into()]
    }

    /// Argv that installs `names` into the given dependency list.
    ///
    /// Always yields a command. With no names npm falls back to a plain
    /// install; yarn's `add` rejects an empty list, so it gets `yarn install`.
    pub fn install_command(&self, names: &[String], kind: DependencyKind) -> Vec<String> {
        let mut argv = vec![self.as_str().to_string()];
        let verb: &[&str] = match (self, kind) {
            (Self::Npm, DependencyKind::Runtime) => &["install", "--save"],
            (Self::Npm, DependencyKind::Development) => &["install", "--save-dev"],
            (Self::Yarn, _) if names.is_empty() => &["install"],
            (Self::Yarn, DependencyKind::Runtime) => &["add"],
            (Self::Yarn, DependencyKind::Development) => &["add", "--dev"],
        };
        argv.extend(verb.iter().map(|s| s.to_string()));
        argv.extend(names.iter().cloned());
        argv
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            other => Err(DomainError::UnknownPackageManager(other.to_string())),
        }
    }
}
