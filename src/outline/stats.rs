//! Font statistics and title detection over the leading pages.

use crate::model::Span;

/// Minimum number of words a span needs to be a title candidate.
const TITLE_MIN_WORDS: usize = 4;

/// Font size extremes of a document's leading pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStats {
    pub max_size: f64,
    pub min_size: f64,
}

impl FontStats {
    /// Smallest size classified as H1.
    pub fn h1_threshold(&self) -> f64 {
        self.max_size * 0.9
    }

    /// Smallest size classified as H2.
    pub fn h2_threshold(&self) -> f64 {
        (self.max_size + self.min_size) / 2.0
    }
}

impl Default for FontStats {
    /// Stats of a document without spans: 0/1 keeps both thresholds defined.
    fn default() -> Self {
        Self {
            max_size: 0.0,
            min_size: 1.0,
        }
    }
}

/// Result of scanning the leading pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleScan {
    pub stats: FontStats,
    /// Detected title, empty when no span qualified
    pub title: String,
}

/// Streams spans in scan order, tracking size extremes and the title.
///
/// The title is the last span with more than three words whose size was at
/// least the largest size seen *up to that span*. A later, larger span
/// without enough words raises the bar for subsequent candidates but does
/// not clear an earlier pick, so the result is not necessarily the globally
/// largest multi-word span.
#[derive(Debug, Default)]
pub struct FontStatisticsCollector {
    max_size: Option<f64>,
    min_size: Option<f64>,
    title: String,
}

impl FontStatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next span in scan order.
    pub fn observe(&mut self, span: &Span) {
        let size = span.size;
        let max_size = self.max_size.map_or(size, |m| m.max(size));
        self.max_size = Some(max_size);
        self.min_size = Some(self.min_size.map_or(size, |m| m.min(size)));

        let text = span.text.trim();
        if text.split_whitespace().count() >= TITLE_MIN_WORDS && size >= max_size {
            self.title = text.to_string();
        }
    }

    pub fn finish(self) -> TitleScan {
        let defaults = FontStats::default();
        TitleScan {
            stats: FontStats {
                max_size: self.max_size.unwrap_or(defaults.max_size),
                min_size: self.min_size.unwrap_or(defaults.min_size),
            },
            title: self.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(spans: &[(&str, f64)]) -> TitleScan {
        let mut collector = FontStatisticsCollector::new();
        for (text, size) in spans {
            collector.observe(&Span::new(*text, *size));
        }
        collector.finish()
    }

    #[test]
    fn test_no_spans_uses_defaults() {
        let result = scan(&[]);
        assert_eq!(result.stats, FontStats { max_size: 0.0, min_size: 1.0 });
        assert_eq!(result.title, "");
    }

    #[test]
    fn test_extremes() {
        let result = scan(&[("a", 10.0), ("b", 24.0), ("c", 8.0)]);
        assert_eq!(result.stats.max_size, 24.0);
        assert_eq!(result.stats.min_size, 8.0);
    }

    #[test]
    fn test_title_needs_more_than_three_words() {
        let result = scan(&[("Three Word Title", 30.0), ("body text here now", 10.0)]);
        assert_eq!(result.title, "");
    }

    #[test]
    fn test_title_uses_running_maximum() {
        // The 20pt span wins although a larger 30pt span follows: the
        // 30pt span has too few words, and later candidates fall below it.
        let result = scan(&[
            ("A Guide To Rust Parsing", 20.0),
            ("BIG", 30.0),
            ("An Even Longer Heading Here", 25.0),
        ]);
        assert_eq!(result.title, "A Guide To Rust Parsing");
    }

    #[test]
    fn test_last_locally_maximal_span_wins() {
        let result = scan(&[
            ("First Candidate Title Text", 18.0),
            ("Second Candidate Title Text", 18.0),
        ]);
        assert_eq!(result.title, "Second Candidate Title Text");
    }

    #[test]
    fn test_title_is_trimmed() {
        let result = scan(&[("  Report On Annual Results  ", 16.0)]);
        assert_eq!(result.title, "Report On Annual Results");
    }

    #[test]
    fn test_thresholds() {
        let stats = FontStats { max_size: 24.0, min_size: 10.0 };
        assert_eq!(stats.h1_threshold(), 24.0 * 0.9);
        assert_eq!(stats.h2_threshold(), 17.0);
    }
}
