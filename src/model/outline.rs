//! Outline types produced by heading classification.

use serde::{Deserialize, Serialize};

/// Coarse heading level derived from font-size thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
}

impl HeadingLevel {
    /// Label used in outline JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    /// Trimmed span text
    pub text: String,
    /// Page index (0-based)
    pub page: usize,
}

/// Title and headings of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Detected title, empty when no span qualified
    pub title: String,

    /// Headings in page order, then in-page encounter order
    #[serde(rename = "outline")]
    pub headings: Vec<Heading>,
}

impl Outline {
    /// Create an outline with no headings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headings: Vec::new(),
        }
    }

    /// Count headings at a level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.headings.iter().filter(|h| h.level == level).count()
    }

    /// Check if the outline has neither a title nor headings.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.headings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_json_shape() {
        let outline = Outline {
            title: "Annual Report".to_string(),
            headings: vec![Heading {
                level: HeadingLevel::H2,
                text: "Results".to_string(),
                page: 3,
            }],
        };
        let value = serde_json::to_value(&outline).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Annual Report",
                "outline": [{"level": "H2", "text": "Results", "page": 3}]
            })
        );
    }

    #[test]
    fn test_counts() {
        let mut outline = Outline::new("");
        outline.headings.push(Heading {
            level: HeadingLevel::H1,
            text: "Scope".to_string(),
            page: 0,
        });
        assert_eq!(outline.count_level(HeadingLevel::H1), 1);
        assert_eq!(outline.count_level(HeadingLevel::H2), 0);
        assert!(!outline.is_empty());
        assert!(Outline::default().is_empty());
    }
}
