//! Catalog Source Port - where the drink catalog comes from.
//!
//! The catalog is read once at startup. Sources only produce raw items;
//! uniqueness and non-emptiness are checked by `Catalog::new`.

use crate::domain::catalog::{CatalogError, CatalogItem};

/// Port for loading catalog items.
pub trait CatalogSource: Send + Sync {
    /// Loads every item, in catalog order.
    fn load(&self) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Human-readable origin for logs (a path, "static", ...).
    fn describe(&self) -> String;
}
