//! Span-level page structure shared by both pipelines.

use serde::{Deserialize, Serialize};

/// The smallest text-bearing unit on a page, with its font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Raw text as produced by the reader (untrimmed)
    pub text: String,
    /// Effective font size in points
    pub size: f64,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }
}

/// A line of spans, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Span texts joined with a single space, then trimmed.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

/// A group of lines the reader considers one block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a block from lines.
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

/// All blocks of a single page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page index (0-based)
    pub index: usize,
    /// Blocks in reading order
    pub blocks: Vec<Block>,
}

impl PageLayout {
    /// Create an empty page.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            blocks: Vec::new(),
        }
    }

    /// Create a page from blocks.
    pub fn with_blocks(index: usize, blocks: Vec<Block>) -> Self {
        Self { index, blocks }
    }

    /// Iterate lines in block order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    /// Iterate spans in block, line, span order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines().flat_map(|l| l.spans.iter())
    }

    /// Check if the page carries no spans.
    pub fn is_empty(&self) -> bool {
        self.spans().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_joins_with_single_space() {
        let line = Line::new(vec![
            Span::new(" Chapter", 14.0),
            Span::new("One ", 14.0),
        ]);
        assert_eq!(line.text(), "Chapter One");
    }

    #[test]
    fn test_line_text_whitespace_only() {
        let line = Line::new(vec![Span::new("  ", 10.0), Span::new("", 10.0)]);
        assert_eq!(line.text(), "");
    }

    #[test]
    fn test_page_span_order() {
        let page = PageLayout::with_blocks(
            0,
            vec![
                Block::new(vec![
                    Line::new(vec![Span::new("a", 1.0), Span::new("b", 2.0)]),
                    Line::new(vec![Span::new("c", 3.0)]),
                ]),
                Block::new(vec![Line::new(vec![Span::new("d", 4.0)])]),
            ],
        );
        let texts: Vec<&str> = page.spans().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
        assert_eq!(page.lines().count(), 3);
        assert!(!page.is_empty());
        assert!(PageLayout::new(4).is_empty());
    }
}
