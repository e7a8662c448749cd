//! Outline assembly with (text, page) deduplication.

use std::collections::HashSet;

use crate::model::{Heading, HeadingLevel, Outline};

/// Collects headings in scan order; the first (text, page) pair wins.
#[derive(Debug, Default)]
pub struct OutlineAssembler {
    outline: Outline,
    seen: HashSet<(String, usize)>,
}

impl OutlineAssembler {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            outline: Outline::new(title),
            seen: HashSet::new(),
        }
    }

    /// Add a heading; returns false when the pair was already present.
    pub fn push(&mut self, level: HeadingLevel, text: &str, page: usize) -> bool {
        if !self.seen.insert((text.to_string(), page)) {
            return false;
        }
        self.outline.headings.push(Heading {
            level,
            text: text.to_string(),
            page,
        });
        true
    }

    pub fn finish(self) -> Outline {
        self.outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let mut assembler = OutlineAssembler::new("Title");
        assert!(assembler.push(HeadingLevel::H2, "Results", 1));
        assert!(!assembler.push(HeadingLevel::H1, "Results", 1));
        assert!(assembler.push(HeadingLevel::H1, "Results", 2));

        let outline = assembler.finish();
        assert_eq!(outline.title, "Title");
        assert_eq!(outline.headings.len(), 2);
        assert_eq!(outline.headings[0].level, HeadingLevel::H2);
        assert_eq!(outline.headings[1].page, 2);
    }
}
