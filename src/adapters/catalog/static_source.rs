//! In-memory Catalog Source Adapter

use crate::domain::catalog::{CatalogError, CatalogItem};
use crate::ports::CatalogSource;

/// Serves a fixed list of items, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    items: Vec<CatalogItem>,
}

impl StaticCatalogSource {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.items.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} items)", self.items.len())
    }
}
