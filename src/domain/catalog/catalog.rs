//! The immutable drink catalog.

use std::collections::HashSet;

use super::errors::CatalogError;
use super::filter::UiFilter;
use super::item::CatalogItem;

/// Ordered, read-only list of recommendable items.
///
/// Built once at startup; construction rejects empty catalogs, blank names
/// and duplicate names.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(CatalogError::BlankName { position });
            }
            if !seen.insert(item.name.as_str()) {
                return Err(CatalogError::DuplicateName(item.name.clone()));
            }
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed catalog; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Canonical names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Items admitted by the UI filter, in catalog order.
    pub fn filtered(&self, filter: &UiFilter) -> Vec<&CatalogItem> {
        self.items.iter().filter(|item| filter.admits(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CaffeinePreference, CaffeineProfile, ServingForm, TempPreference};

    fn item(name: &str) -> CatalogItem {
        CatalogItem::new(name, CaffeineProfile::Caffeinated).with_forms([ServingForm::Hot])
    }

    #[test]
    fn rejects_empty_catalog() {
        assert_eq!(Catalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Catalog::new(vec![item("Latte"), item("Latte")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("Latte".to_string()));
    }

    #[test]
    fn rejects_blank_names() {
        let err = Catalog::new(vec![item("Latte"), item("  ")]).unwrap_err();
        assert_eq!(err, CatalogError::BlankName { position: 1 });
    }

    #[test]
    fn names_preserve_catalog_order() {
        let catalog = Catalog::new(vec![item("Mocha"), item("Latte"), item("Americano")]).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Mocha", "Latte", "Americano"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn filtered_drops_items_without_requested_form() {
        let catalog = Catalog::new(vec![
            item("Americano"),
            CatalogItem::new("Cold Brew", CaffeineProfile::Caffeinated).with_forms([ServingForm::Iced]),
        ])
        .unwrap();
        let iced = UiFilter::new(TempPreference::Iced, CaffeinePreference::Any);

        let names: Vec<_> = catalog.filtered(&iced).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cold Brew"]);
    }

    #[test]
    fn get_finds_by_exact_name() {
        let catalog = Catalog::new(vec![item("Latte")]).unwrap();
        assert!(catalog.get("Latte").is_some());
        assert!(catalog.get("latte").is_none());
    }
}
