//! Ordered addon selection.
//!
//! Order is significant twice: it is the merge precedence of addon manifests
//! and the overwrite precedence when addon files are copied.

use crate::domain::{error::DomainError, value_objects::AddonName};

/// Delimiter accepted between addon names in a single `--addon` value.
pub const ADDON_DELIMITER: char = ',';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonSelection(Vec<AddonName>);

impl AddonSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `"eslint,jest"`. Whitespace around names is trimmed and empty
    /// segments are skipped; duplicates are kept.
    pub fn parse(delimited: &str) -> Result<Self, DomainError> {
        Self::from_names(delimited.split(ADDON_DELIMITER))
    }

    /// Build from an explicit sequence. Each item may itself be delimited,
    /// so `["eslint,jest", "prettier"]` yields three addons.
    pub fn from_names<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut addons = Vec::new();
        for raw in names {
            for part in raw.as_ref().split(ADDON_DELIMITER) {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                addons.push(AddonName::parse(part)?);
            }
        }
        Ok(Self(addons))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AddonName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|a| a.as_str().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a AddonSelection {
    type Item = &'a AddonName;
    type IntoIter = std::slice::Iter<'a, AddonName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_delimited_string_in_order() {
        let sel = AddonSelection::parse("eslint, jest ,prettier").unwrap();
        assert_eq!(sel.names(), ["eslint", "jest", "prettier"]);
    }

    #[test]
    fn skips_empty_segments() {
        let sel = AddonSelection::parse(",eslint,,jest,").unwrap();
        assert_eq!(sel.len(), 2);
        assert!(AddonSelection::parse("").unwrap().is_empty());
    }

    #[test]
    fn explicit_sequence_may_contain_delimited_items() {
        let sel = AddonSelection::from_names(["eslint,jest", "prettier"]).unwrap();
        assert_eq!(sel.names(), ["eslint", "jest", "prettier"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let sel = AddonSelection::parse("a,b,a").unwrap();
        assert_eq!(sel.names(), ["a", "b", "a"]);
    }

    #[test]
    fn path_like_names_are_rejected() {
        assert!(matches!(
            AddonSelection::parse("eslint,../../etc"),
            Err(DomainError::InvalidAddonName { .. })
        ));
    }
}
