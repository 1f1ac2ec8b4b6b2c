//! The three-line recommendation grammar.
//!
//! ```text
//! DRINK: <name>
//! WHY: <reason, under 10 words>
//! CONFIDENCE: <integer 1-10>
//! ```
//!
//! Labels are matched case-insensitively. Only the first `DRINK:` line counts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::domain::foundation::Confidence;

static DRINK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)DRINK:[ \t]*(.+)").expect("valid DRINK regex"));
static WHY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)WHY:[ \t]*(.+)").expect("valid WHY regex"));
static CONFIDENCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CONFIDENCE:[ \t]*\**[ \t]*(-?\d+)").expect("valid CONFIDENCE regex"));
static GRAMMAR_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(DRINK|WHY|CONFIDENCE):").expect("valid label regex"));

/// Decoration models wrap names in: markdown emphasis, quotes, brackets.
const NAME_DECORATION: &[char] = &['*', '_', '"', '\'', '`', '[', ']', '“', '”', '.', '!'];

/// The first `DRINK:` line found in generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkLine {
    /// Zero-based index of the line within the text.
    pub line_index: usize,
    /// The candidate name with whitespace and decoration trimmed.
    pub candidate: String,
}

fn clean_candidate(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c.is_whitespace() || NAME_DECORATION.contains(&c))
        .to_string()
}

/// Finds the first `DRINK:` line.
pub fn find_drink_line(text: &str) -> Option<DrinkLine> {
    text.split('\n').enumerate().find_map(|(line_index, line)| {
        DRINK_LINE.captures(line).map(|caps| DrinkLine {
            line_index,
            candidate: clean_candidate(&caps[1]),
        })
    })
}

/// Returns true if the text carries a `DRINK:` line.
pub fn has_drink_line(text: &str) -> bool {
    text.split('\n').any(|line| DRINK_LINE.is_match(line))
}

/// Replaces one line with `DRINK: <canonical>`, leaving every other line untouched.
pub fn rewrite_drink_line(text: &str, line_index: usize, canonical: &str) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == line_index {
                format!("DRINK: {}", canonical)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes every line carrying a grammar label, even an empty one, and
/// returns whatever prose is left.
pub fn strip_grammar_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !GRAMMAR_LABEL.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn find_why(text: &str) -> Option<String> {
    text.split('\n')
        .find_map(|line| {
            WHY_LINE.captures(line).map(|caps| {
                caps[1]
                    .trim_matches(|c: char| c == '*' || c.is_whitespace())
                    .to_string()
            })
        })
        .filter(|why| !why.is_empty())
}

fn find_confidence(text: &str) -> Option<Confidence> {
    text.split('\n').find_map(|line| {
        CONFIDENCE_LINE
            .captures(line)
            .and_then(|caps| caps[1].parse::<i64>().ok())
            .map(Confidence::clamped)
    })
}

/// A catalog-valid pick.
///
/// `why` and `confidence` come from generated text and may be missing; the
/// name never is, and always belongs to the allow list it was validated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub why: Option<String>,
    pub confidence: Option<Confidence>,
}

impl Recommendation {
    pub fn new(name: impl Into<String>, why: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            name: name.into(),
            why: Some(why.into()),
            confidence: Some(confidence),
        }
    }

    /// Reads WHY and CONFIDENCE from already-validated text.
    pub fn from_validated_text(canonical: impl Into<String>, text: &str) -> Self {
        Self {
            name: canonical.into(),
            why: find_why(text),
            confidence: find_confidence(text),
        }
    }

    /// Renders the grammar lines for the fields that are present.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("DRINK: {}", self.name)];
        if let Some(why) = &self.why {
            lines.push(format!("WHY: {}", why));
        }
        if let Some(confidence) = self.confidence {
            lines.push(format!("CONFIDENCE: {}", confidence));
        }
        lines.join("\n")
    }
}
