//! Catalog configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::catalog::{parse_alias_pairs, AllowListSource};

/// Where the drink catalog comes from and how the allow list is derived.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Catalog document (.json, .yaml or .yml)
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Extra aliases as `alias=Canonical` pairs (comma-separated)
    pub extra_aliases: Option<String>,

    /// Fixed allow list (comma-separated); catalog names when unset
    pub allow_list: Option<String>,
}

impl CatalogConfig {
    pub fn alias_pairs(&self) -> Vec<(String, String)> {
        self.extra_aliases
            .as_deref()
            .map(parse_alias_pairs)
            .unwrap_or_default()
    }

    pub fn allow_list_source(&self) -> AllowListSource {
        let fixed: Vec<String> = self
            .allow_list
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if fixed.is_empty() {
            AllowListSource::Catalog
        } else {
            AllowListSource::Fixed(fixed)
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyCatalogPath);
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            extra_aliases: None,
            allow_list: None,
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("data/catalog.json")
}
