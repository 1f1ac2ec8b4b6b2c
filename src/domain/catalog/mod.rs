//! Catalog domain module.
//!
//! The closed world of recommendable drinks: the catalog itself, the allow
//! list derived from it, the alias map and the UI filter.

mod alias;
mod allow_list;
mod catalog;
mod context;
mod errors;
mod filter;
mod item;

pub use alias::{parse_alias_pairs, AliasMap};
pub use allow_list::{AllowList, AllowListSource};
pub use catalog::Catalog;
pub use context::CatalogContext;
pub use errors::CatalogError;
pub use filter::{CaffeinePreference, TempPreference, UiFilter};
pub use item::{CaffeineProfile, CatalogItem, ServingForm};
