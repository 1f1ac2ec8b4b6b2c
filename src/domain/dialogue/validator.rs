//! Output validation: extract a candidate name and resolve it to the allow list.
//!
//! Resolution order, first hit wins:
//! 1. exact, case-sensitive allow list match
//! 2. alias map lookup
//! 3. case-insensitive exact match
//! 4. nearest allow list entry by edit distance, within the threshold
//!    (ties go to the earlier entry)

use serde::Serialize;

use super::grammar::{find_drink_line, rewrite_drink_line, Recommendation};
use super::levenshtein::levenshtein;
use crate::domain::catalog::{AliasMap, AllowList};

/// Which resolution step produced the canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "step")]
pub enum ResolvedBy {
    Exact,
    Alias,
    CaseInsensitive,
    Fuzzy { distance: usize },
}

/// Outcome of resolving a single candidate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved { canonical: String, via: ResolvedBy },
    Unresolved,
}

/// Generated text whose recommendation resolved to the allow list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedOutput {
    /// Text to show the user; the DRINK line carries the canonical name.
    pub text: String,
    pub recommendation: Recommendation,
    pub via: ResolvedBy,
    /// True when the DRINK line had to be rewritten.
    pub rewritten: bool,
}

/// Result of validating one piece of generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// No DRINK line: the model is still asking questions.
    NotARecommendation,
    Accepted(AcceptedOutput),
    /// A DRINK line whose name resolved to nothing.
    Rejected { candidate: String },
}

/// Resolves generated recommendations against a closed allow list.
#[derive(Debug, Clone)]
pub struct OutputValidator {
    fuzzy_threshold: usize,
}

impl OutputValidator {
    pub fn new(fuzzy_threshold: usize) -> Self {
        Self { fuzzy_threshold }
    }

    pub fn fuzzy_threshold(&self) -> usize {
        self.fuzzy_threshold
    }

    /// Resolves one candidate name. Alias targets outside `allow_list` are ignored.
    pub fn resolve(&self, candidate: &str, allow_list: &AllowList, aliases: &AliasMap) -> Resolution {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return Resolution::Unresolved;
        }

        if allow_list.contains(candidate) {
            return Resolution::Resolved {
                canonical: candidate.to_string(),
                via: ResolvedBy::Exact,
            };
        }

        if let Some(canonical) = aliases.resolve(candidate).filter(|c| allow_list.contains(c)) {
            tracing::debug!(candidate, canonical, "Resolved recommendation via alias");
            return Resolution::Resolved {
                canonical: canonical.to_string(),
                via: ResolvedBy::Alias,
            };
        }

        if let Some(canonical) = allow_list.find_ignore_case(candidate) {
            return Resolution::Resolved {
                canonical: canonical.to_string(),
                via: ResolvedBy::CaseInsensitive,
            };
        }

        self.nearest(candidate, allow_list)
    }

    fn nearest(&self, candidate: &str, allow_list: &AllowList) -> Resolution {
        let lowered = candidate.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for name in allow_list.names() {
            let distance = levenshtein(&lowered, &name.to_lowercase());
            // Strict comparison keeps the earliest entry on ties.
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((name.as_str(), distance));
            }
        }

        match best {
            Some((canonical, distance)) if distance <= self.fuzzy_threshold => {
                tracing::debug!(candidate, canonical, distance, "Resolved recommendation via fuzzy match");
                Resolution::Resolved {
                    canonical: canonical.to_string(),
                    via: ResolvedBy::Fuzzy { distance },
                }
            }
            _ => Resolution::Unresolved,
        }
    }

    /// Extracts and resolves the recommendation in `text`.
    ///
    /// On acceptance only the DRINK line is rewritten; WHY and CONFIDENCE
    /// pass through as the model wrote them.
    pub fn validate(&self, text: &str, allow_list: &AllowList, aliases: &AliasMap) -> Validation {
        let Some(line) = find_drink_line(text) else {
            return Validation::NotARecommendation;
        };

        match self.resolve(&line.candidate, allow_list, aliases) {
            Resolution::Resolved { canonical, via } => {
                let original_line = text.split('\n').nth(line.line_index).unwrap_or_default();
                let rewritten = original_line.trim() != format!("DRINK: {}", canonical);
                let text = if rewritten {
                    rewrite_drink_line(text, line.line_index, &canonical)
                } else {
                    text.to_string()
                };
                let recommendation = Recommendation::from_validated_text(canonical, &text);

                Validation::Accepted(AcceptedOutput {
                    text,
                    recommendation,
                    via,
                    rewritten,
                })
            }
            Resolution::Unresolved => Validation::Rejected {
                candidate: line.candidate,
            },
        }
    }
}
