//! Known hallucinated or synonym names mapped to canonical catalog names.

use std::collections::HashMap;

use super::allow_list::AllowList;
use super::catalog::Catalog;
use super::errors::CatalogError;

/// Surface string -> canonical name.
///
/// Keys are matched after trimming and lower-casing. Every value is a member
/// of the allow list the map was built against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: HashMap<String, String>,
}

fn alias_key(surface: &str) -> String {
    surface.trim().to_lowercase()
}

impl AliasMap {
    /// Builds a map from explicit pairs, rejecting targets outside the allow list.
    pub fn from_pairs<I, A, C>(pairs: I, allow_list: &AllowList) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        let mut map = Self::default();
        for (alias, canonical) in pairs {
            map.insert(alias.into(), canonical.into(), allow_list)?;
        }
        Ok(map)
    }

    /// Builds a map from the catalog's per-item aliases plus extra pairs.
    ///
    /// Item aliases whose item is outside the allow list (possible with a
    /// fixed allow list) are skipped; extra pairs must always resolve.
    pub fn build(
        catalog: &Catalog,
        extra: &[(String, String)],
        allow_list: &AllowList,
    ) -> Result<Self, CatalogError> {
        let mut map = Self::default();

        for item in catalog.items() {
            if !allow_list.contains(&item.name) {
                if !item.aliases.is_empty() {
                    tracing::debug!(item = %item.name, "Skipping aliases for item outside allow list");
                }
                continue;
            }
            for alias in &item.aliases {
                map.insert(alias.clone(), item.name.clone(), allow_list)?;
            }
        }

        for (alias, canonical) in extra {
            map.insert(alias.clone(), canonical.clone(), allow_list)?;
        }

        Ok(map)
    }

    fn insert(
        &mut self,
        alias: String,
        canonical: String,
        allow_list: &AllowList,
    ) -> Result<(), CatalogError> {
        if !allow_list.contains(&canonical) {
            return Err(CatalogError::UnknownAliasTarget {
                alias,
                target: canonical,
            });
        }

        let key = alias_key(&alias);
        if key.is_empty() {
            return Ok(());
        }
        match self.entries.get(&key) {
            Some(existing) if *existing != canonical => Err(CatalogError::ConflictingAlias {
                alias,
                first: existing.clone(),
                second: canonical,
            }),
            _ => {
                self.entries.insert(key, canonical);
                Ok(())
            }
        }
    }

    /// Looks up a surface string, returning the canonical name.
    pub fn resolve(&self, surface: &str) -> Option<&str> {
        self.entries.get(&alias_key(surface)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses `alias=Canonical` pairs separated by commas, as used in configuration.
pub fn parse_alias_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| {
            let (alias, canonical) = pair.split_once('=')?;
            let (alias, canonical) = (alias.trim(), canonical.trim());
            if alias.is_empty() || canonical.is_empty() {
                None
            } else {
                Some((alias.to_string(), canonical.to_string()))
            }
        })
        .collect()
}
