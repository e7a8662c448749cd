//! Heading validity and level classification.

use super::stats::FontStats;
use crate::model::HeadingLevel;

/// Lowercased prefixes that disqualify a heading.
const REJECTED_PREFIXES: [&str; 4] = ["mission", "goal", "regular", "distinction"];

/// Minimum heading length in characters.
const MIN_HEADING_CHARS: usize = 4;

/// Whether trimmed text may be used as a heading.
pub fn is_valid_heading(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() < MIN_HEADING_CHARS {
        return false;
    }
    if text.contains(':') {
        return false;
    }

    let lower = text.to_lowercase();
    !REJECTED_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Classifies spans against thresholds derived once per document.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    h1_threshold: f64,
    h2_threshold: f64,
    title: String,
}

impl HeadingClassifier {
    pub fn new(stats: FontStats, title: impl Into<String>) -> Self {
        Self {
            h1_threshold: stats.h1_threshold(),
            h2_threshold: stats.h2_threshold(),
            title: title.into(),
        }
    }

    /// Level of a span, or `None` when it is not a heading.
    pub fn classify(&self, text: &str, size: f64) -> Option<HeadingLevel> {
        let text = text.trim();
        if !is_valid_heading(text) || text == self.title {
            return None;
        }

        if size >= self.h1_threshold {
            Some(HeadingLevel::H1)
        } else if size >= self.h2_threshold {
            Some(HeadingLevel::H2)
        } else {
            None
        }
    }
}
