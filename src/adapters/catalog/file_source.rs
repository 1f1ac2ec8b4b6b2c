//! File-based Catalog Source Adapter
//!
//! Reads a catalog document from disk. The format follows the extension:
//! `.json` via serde_json, `.yaml`/`.yml` via serde_yaml.
//!
//! ```json
//! { "version": "2.2", "drinks": [ { "name": "Latte", "tags": ["creamy"], ... } ] }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::catalog::{CatalogError, CatalogItem};
use crate::ports::CatalogSource;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    version: Option<String>,
    drinks: Vec<CatalogItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
}

/// Loads catalog items from a JSON or YAML file.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> Result<DocumentFormat, CatalogError> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            _ => Err(CatalogError::UnsupportedFormat(self.path.display().to_string())),
        }
    }

    fn parse_error(&self, message: impl ToString) -> CatalogError {
        CatalogError::Parse {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let format = self.format()?;

        let raw = fs::read_to_string(&self.path).map_err(|e| CatalogError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let document: CatalogDocument = match format {
            DocumentFormat::Json => serde_json::from_str(&raw).map_err(|e| self.parse_error(e))?,
            DocumentFormat::Yaml => serde_yaml::from_str(&raw).map_err(|e| self.parse_error(e))?,
        };

        tracing::debug!(
            path = %self.path.display(),
            version = document.version.as_deref().unwrap_or("unversioned"),
            items = document.drinks.len(),
            "Read catalog document"
        );

        Ok(document.drinks)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
