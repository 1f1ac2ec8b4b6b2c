//! Catalog Source Adapters.
//!
//! - `FileCatalogSource` - JSON or YAML catalog document on disk
//! - `StaticCatalogSource` - in-memory item list

mod file_source;
mod static_source;

pub use file_source::FileCatalogSource;
pub use static_source::StaticCatalogSource;
