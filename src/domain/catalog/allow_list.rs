//! The closed set of names a recommendation may carry.

use std::collections::HashSet;

use serde::Deserialize;

use super::catalog::Catalog;
use super::errors::CatalogError;

/// Where the allow list comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "names")]
pub enum AllowListSource {
    /// Every catalog name, in catalog order.
    #[default]
    Catalog,
    /// A fixed literal list, independent of the catalog.
    Fixed(Vec<String>),
}

/// Canonical names in enumeration order.
///
/// Enumeration order matters: fuzzy-match ties go to the earlier entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    names: Vec<String>,
    index: HashSet<String>,
}

impl AllowList {
    /// Builds an allow list from names. Blank and repeated names are dropped.
    pub fn new<I, S>(names: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut index = HashSet::new();
        for name in names {
            let name: String = name.into();
            let name = name.trim().to_string();
            if name.is_empty() || !index.insert(name.clone()) {
                continue;
            }
            ordered.push(name);
        }

        if ordered.is_empty() {
            return Err(CatalogError::EmptyAllowList);
        }

        Ok(Self {
            names: ordered,
            index,
        })
    }

    pub fn from_source(source: &AllowListSource, catalog: &Catalog) -> Result<Self, CatalogError> {
        match source {
            AllowListSource::Catalog => Self::new(catalog.names()),
            AllowListSource::Fixed(names) => Self::new(names.iter().cloned()),
        }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Case-insensitive exact match, returning the canonical spelling.
    pub fn find_ignore_case(&self, candidate: &str) -> Option<&str> {
        let lowered = candidate.to_lowercase();
        self.names
            .iter()
            .find(|name| name.to_lowercase() == lowered)
            .map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn first(&self) -> &str {
        // Construction guarantees at least one name.
        &self.names[0]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed list; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Keeps only names accepted by `keep`, preserving order.
    ///
    /// Returns `None` when nothing would remain, so callers can never end up
    /// holding an empty allow list.
    pub fn restricted_to(&self, keep: impl Fn(&str) -> bool) -> Option<Self> {
        Self::new(self.names.iter().filter(|name| keep(name)).cloned()).ok()
    }

    /// Renders the names as a comma-separated list for prompts.
    pub fn joined(&self) -> String {
        self.names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CaffeineProfile, CatalogItem};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("Latte", CaffeineProfile::Caffeinated),
            CatalogItem::new("Matcha Latte", CaffeineProfile::Caffeinated),
        ])
        .unwrap()
    }

    #[test]
    fn empty_list_is_a_configuration_error() {
        let err = AllowList::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, CatalogError::EmptyAllowList);

        let err = AllowList::new(["", "   "]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyAllowList);
    }

    #[test]
    fn catalog_source_keeps_catalog_order() {
        let list = AllowList::from_source(&AllowListSource::Catalog, &catalog()).unwrap();
        assert_eq!(list.names(), &["Latte".to_string(), "Matcha Latte".to_string()]);
        assert_eq!(list.first(), "Latte");
    }

    #[test]
    fn fixed_source_ignores_catalog() {
        let source = AllowListSource::Fixed(vec!["Americano".to_string()]);
        let list = AllowList::from_source(&source, &catalog()).unwrap();
        assert!(list.contains("Americano"));
        assert!(!list.contains("Latte"));
    }

    #[test]
    fn contains_is_case_sensitive_but_find_ignore_case_is_not() {
        let list = AllowList::new(["Matcha Latte"]).unwrap();
        assert!(!list.contains("matcha latte"));
        assert_eq!(list.find_ignore_case("MATCHA latte"), Some("Matcha Latte"));
        assert_eq!(list.find_ignore_case("Matcha"), None);
    }

    #[test]
    fn duplicates_are_collapsed() {
        let list = AllowList::new(["Latte", "Latte", "Mocha"]).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn restricted_to_never_yields_empty_list() {
        let list = AllowList::new(["Latte", "Mocha"]).unwrap();
        assert_eq!(list.restricted_to(|n| n == "Mocha").unwrap().names(), &["Mocha".to_string()]);
        assert!(list.restricted_to(|_| false).is_none());
    }

    #[test]
    fn fixed_source_deserializes_from_tagged_form() {
        let source: AllowListSource =
            serde_json::from_str(r#"{"kind":"fixed","names":["Latte","Mocha"]}"#).unwrap();
        assert_eq!(
            source,
            AllowListSource::Fixed(vec!["Latte".to_string(), "Mocha".to_string()])
        );
    }
}
