//! Process-wide catalog context: catalog, allow list and alias map together.

use std::borrow::Cow;

use super::alias::AliasMap;
use super::allow_list::{AllowList, AllowListSource};
use super::catalog::Catalog;
use super::errors::CatalogError;
use super::filter::UiFilter;

/// The read-only data every dialogue cycle consults.
///
/// Built once at startup and shared behind an `Arc`; nothing in it is ever
/// mutated, so concurrent cycles read it without locking.
#[derive(Debug, Clone)]
pub struct CatalogContext {
    catalog: Catalog,
    allow_list: AllowList,
    aliases: AliasMap,
}

impl CatalogContext {
    /// Assembles the context, validating alias targets against the allow list.
    pub fn build(
        catalog: Catalog,
        source: &AllowListSource,
        extra_aliases: &[(String, String)],
    ) -> Result<Self, CatalogError> {
        let allow_list = AllowList::from_source(source, &catalog)?;
        let aliases = AliasMap::build(&catalog, extra_aliases, &allow_list)?;

        tracing::info!(
            items = catalog.len(),
            allowed = allow_list.len(),
            aliases = aliases.len(),
            "Catalog context ready"
        );

        Ok(Self {
            catalog,
            allow_list,
            aliases,
        })
    }

    /// Convenience constructor using the catalog as allow list and item aliases only.
    pub fn from_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        Self::build(catalog, &AllowListSource::Catalog, &[])
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// The allow list that governs one cycle.
    ///
    /// With `filter_affects_allow_list` the base list is narrowed to names
    /// of items the UI filter admits. Names absent from the catalog (fixed
    /// lists) are kept, since the filter has nothing to say about them. If
    /// narrowing would leave nothing, the base list is used unchanged.
    pub fn effective_allow_list(
        &self,
        filter: &UiFilter,
        filter_affects_allow_list: bool,
    ) -> Cow<'_, AllowList> {
        if !filter_affects_allow_list || filter.is_unrestricted() {
            return Cow::Borrowed(&self.allow_list);
        }

        let narrowed = self.allow_list.restricted_to(|name| match self.catalog.get(name) {
            Some(item) => filter.admits(item),
            None => true,
        });

        match narrowed {
            Some(list) => Cow::Owned(list),
            None => {
                tracing::warn!(?filter, "UI filter excludes every allowed name; using full allow list");
                Cow::Borrowed(&self.allow_list)
            }
        }
    }
}
