//! UI filter applied to the catalog before the model ever sees it.

use serde::{Deserialize, Serialize};

use super::item::{CatalogItem, ServingForm};

/// Temperature preference from the chat UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempPreference {
    Iced,
    Hot,
    #[default]
    Any,
}

/// Caffeine preference from the chat UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaffeinePreference {
    #[default]
    Any,
    NoCaffeine,
    CaffeinatedOnly,
}

/// Narrows the catalog shown in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiFilter {
    #[serde(default)]
    pub temp: TempPreference,
    #[serde(default)]
    pub caffeine: CaffeinePreference,
}

impl UiFilter {
    pub fn new(temp: TempPreference, caffeine: CaffeinePreference) -> Self {
        Self { temp, caffeine }
    }

    /// A filter that admits every item.
    pub fn any() -> Self {
        Self::default()
    }

    /// Returns true if the filter narrows nothing.
    pub fn is_unrestricted(&self) -> bool {
        self.temp == TempPreference::Any && self.caffeine == CaffeinePreference::Any
    }

    /// Returns true if the item survives the filter.
    pub fn admits(&self, item: &CatalogItem) -> bool {
        let temp_ok = match self.temp {
            TempPreference::Any => true,
            TempPreference::Iced => item.serves(ServingForm::Iced),
            TempPreference::Hot => item.serves(ServingForm::Hot),
        };
        let caffeine_ok = match self.caffeine {
            CaffeinePreference::Any => true,
            CaffeinePreference::NoCaffeine => !item.is_caffeinated(),
            CaffeinePreference::CaffeinatedOnly => item.is_caffeinated(),
        };
        temp_ok && caffeine_ok
    }
}
