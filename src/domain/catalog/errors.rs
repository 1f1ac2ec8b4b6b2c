//! Catalog configuration errors.
//!
//! Every variant here is fatal at startup: an engine cannot serve a single
//! cycle without a non-empty, internally consistent catalog.

use thiserror::Error;

/// Errors raised while loading or assembling the catalog, allow list and aliases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Catalog contains no items")]
    Empty,

    #[error("Allow list contains no names")]
    EmptyAllowList,

    #[error("Catalog item at position {position} has a blank name")]
    BlankName { position: usize },

    #[error("Duplicate catalog name: {0}")]
    DuplicateName(String),

    #[error("Alias '{alias}' points at '{target}', which is not an allowed name")]
    UnknownAliasTarget { alias: String, target: String },

    #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Failed to read catalog at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse catalog at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_alias_target_names_both_sides() {
        let err = CatalogError::UnknownAliasTarget {
            alias: "Flat White".to_string(),
            target: "Cortado".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Alias 'Flat White' points at 'Cortado', which is not an allowed name"
        );
    }

    #[test]
    fn empty_catalog_displays_plainly() {
        assert_eq!(CatalogError::Empty.to_string(), "Catalog contains no items");
    }
}
