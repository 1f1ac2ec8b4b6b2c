//! Deterministic last-resort selection.
//!
//! Runs only after a repaired pick still failed to resolve. It never calls the
//! collaborator: the choice is a pure function of the conversation text and
//! the allow list.

use regex::Regex;

use crate::domain::catalog::AllowList;
use crate::domain::foundation::Confidence;

use super::grammar::Recommendation;

/// Justification attached to every fallback pick.
pub const FALLBACK_WHY: &str = "Based on your preferences";

/// One row of the priority table: pick `item` when every keyword in
/// `all_of` appears and, if `any_of` is non-empty, at least one of those does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackRule {
    pub item: String,
    pub all_of: Vec<String>,
    pub any_of: Vec<String>,
}

impl FallbackRule {
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            all_of: Vec::new(),
            any_of: Vec::new(),
        }
    }

    pub fn requires<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all_of.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn any<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.any_of.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// `text` must already be lower-cased.
    pub fn matches(&self, text: &str) -> bool {
        self.all_of.iter().all(|k| contains_word(text, k))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| contains_word(text, k)))
    }
}

/// Whole-word match, allowing a plain plural ("lemons", "peaches").
fn contains_word(text: &str, keyword: &str) -> bool {
    Regex::new(&format!(r"\b{}(?:e?s)?\b", regex::escape(keyword)))
        .map(|pattern| pattern.is_match(text))
        .unwrap_or(false)
}

/// Specific combinations first, then single flavors, then generic moods.
pub fn default_rules() -> Vec<FallbackRule> {
    vec![
        FallbackRule::new("Strawberry Matcha Latte").requires(["strawberry", "matcha"]),
        FallbackRule::new("Yuzu Tonic").requires(["yuzu"]),
        FallbackRule::new("Espresso Tonic")
            .requires(["tonic"])
            .any(["espresso", "coffee", "bitter"]),
        FallbackRule::new("Yuzu Tonic").any(["citrus", "zest", "tonic", "crisp", "lemon", "sour"]),
        FallbackRule::new("Hojicha Latte").any(["hojicha", "roasted tea", "toasty"]),
        FallbackRule::new("Matcha Latte").any(["matcha", "green tea"]),
        FallbackRule::new("Maple Latte").any(["maple"]),
        FallbackRule::new("Vanilla Latte").any(["vanilla", "dessert", "treat"]),
        FallbackRule::new("Chai Latte").any(["chai", "spice", "cinnamon"]),
        FallbackRule::new("Mocha").any(["chocolate", "mocha", "cocoa"]),
        FallbackRule::new("Cold Brew").any(["cold brew", "strong", "bold"]),
    ]
}

/// Keyword-driven selector guaranteeing an allow-listed pick.
#[derive(Debug, Clone)]
pub struct FallbackSelector {
    rules: Vec<FallbackRule>,
    default_item: String,
    confidence: Confidence,
}

impl FallbackSelector {
    pub fn new(rules: Vec<FallbackRule>, default_item: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            rules,
            default_item: default_item.into(),
            confidence,
        }
    }

    pub fn default_item(&self) -> &str {
        &self.default_item
    }

    /// Picks an item for the lower-cased conversation text.
    ///
    /// Rules whose item is not allowed are skipped. If the default is not
    /// allowed either, the first allowed name is used.
    pub fn select(&self, conversation_text: &str, allow_list: &AllowList) -> Recommendation {
        let text = conversation_text.to_lowercase();

        let name = self
            .rules
            .iter()
            .filter(|rule| allow_list.contains(&rule.item))
            .find(|rule| rule.matches(&text))
            .map(|rule| rule.item.as_str())
            .unwrap_or_else(|| {
                if allow_list.contains(&self.default_item) {
                    self.default_item.as_str()
                } else {
                    allow_list.first()
                }
            });

        Recommendation::new(name, FALLBACK_WHY, self.confidence)
    }
}

impl Default for FallbackSelector {
    fn default() -> Self {
        Self::new(default_rules(), "Latte", Confidence::clamped(5))
    }
}
