//! Catalog item and its descriptive enums.

use serde::{Deserialize, Serialize};

/// How a drink can be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServingForm {
    Iced,
    Hot,
}

/// Caffeine content of a drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaffeineProfile {
    Caffeinated,
    LowCaffeine,
    NoCaffeine,
}

impl CaffeineProfile {
    /// Anything other than `no-caffeine` counts as caffeinated.
    pub fn is_caffeinated(&self) -> bool {
        !matches!(self, CaffeineProfile::NoCaffeine)
    }
}

/// One recommendable drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Canonical name, unique within the catalog.
    pub name: String,
    /// Descriptive tags, rendered in order on the prompt menu.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Forms the drink can be served in.
    #[serde(default)]
    pub forms: Vec<ServingForm>,
    pub caffeine_profile: CaffeineProfile,
    /// Known non-canonical spellings the model uses for this item.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl CatalogItem {
    /// Creates an item with no tags, forms or aliases.
    pub fn new(name: impl Into<String>, caffeine_profile: CaffeineProfile) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            forms: Vec::new(),
            caffeine_profile,
            aliases: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_forms(mut self, forms: impl IntoIterator<Item = ServingForm>) -> Self {
        self.forms = forms.into_iter().collect();
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the item can be served in the given form.
    pub fn serves(&self, form: ServingForm) -> bool {
        self.forms.contains(&form)
    }

    pub fn is_caffeinated(&self) -> bool {
        self.caffeine_profile.is_caffeinated()
    }

    /// Renders the `name: tag, tag, ...` menu line used in prompts.
    pub fn menu_line(&self) -> String {
        format!("{}: {}", self.name, self.tags.join(", "))
    }
}
