//! Grouping of positioned spans into lines and blocks.
//!
//! Spans arrive in content-stream order. Consecutive spans sharing a
//! baseline form a line, and neighbouring runs of the same size on a line are
//! merged into one span; lines are split into blocks on large vertical gaps
//! or font size changes. Stream order is never re-sorted, so the encounter
//! order seen by the pipelines is the order the page draws its text.

use crate::model::{Block, Line, PageLayout, Span};

/// A span with the position it was drawn at.
#[derive(Debug, Clone)]
pub(crate) struct PositionedSpan {
    pub text: String,
    pub x: f32,
    /// Baseline Y in PDF user space (grows upwards)
    pub y: f32,
    pub font_size: f32,
}

/// Runs whose sizes differ by less than this share a span.
const SAME_SIZE_EPSILON: f32 = 0.01;

#[derive(Debug, Clone)]
struct PositionedLine {
    spans: Vec<PositionedSpan>,
    y: f32,
    x: f32,
    font_size: f32,
}

impl PositionedLine {
    fn from_spans(spans: Vec<PositionedSpan>) -> Self {
        let spans = merge_runs(spans);
        // Dominant font size, weighted by text length
        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let weighted: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted / total_chars as f32
        } else {
            spans.first().map(|s| s.font_size).unwrap_or(0.0)
        };
        let (x, y) = spans.first().map(|s| (s.x, s.y)).unwrap_or((0.0, 0.0));

        Self {
            spans,
            y,
            x,
            font_size,
        }
    }

    fn into_line(self) -> Line {
        Line::new(
            self.spans
                .into_iter()
                .map(|s| Span::new(s.text, f64::from(s.font_size)))
                .collect(),
        )
    }
}

/// Build a page from spans in stream order.
pub(crate) fn build_page(index: usize, spans: Vec<PositionedSpan>) -> PageLayout {
    let lines = group_spans_into_lines(spans);
    let blocks = group_lines_into_blocks(lines);
    log::debug!("page {}: {} blocks", index, blocks.len());
    PageLayout::with_blocks(index, blocks)
}

fn group_spans_into_lines(spans: Vec<PositionedSpan>) -> Vec<PositionedLine> {
    let mut lines = Vec::new();
    let mut current: Vec<PositionedSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        // Allow 30% of font size variance on the baseline
        let y_tolerance = span.font_size * 0.3;

        match current_y {
            Some(y) if (span.y - y).abs() <= y_tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(PositionedLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }

    if !current.is_empty() {
        lines.push(PositionedLine::from_spans(current));
    }

    lines
}

/// Merge consecutive same-size runs of one line into a single span.
///
/// Producers often draw one word per text operator. A run that was
/// repositioned horizontally starts a new word, so it is joined with a space;
/// a run drawn straight after the previous one continues it.
fn merge_runs(spans: Vec<PositionedSpan>) -> Vec<PositionedSpan> {
    let mut merged: Vec<PositionedSpan> = Vec::with_capacity(spans.len());
    let mut last_x = 0.0_f32;

    for span in spans {
        let x = span.x;
        match merged.last_mut() {
            Some(prev) if (prev.font_size - span.font_size).abs() < SAME_SIZE_EPSILON => {
                let moved = (x - last_x).abs() > SAME_SIZE_EPSILON;
                if moved && needs_space(&prev.text, &span.text) {
                    prev.text.push(' ');
                }
                prev.text.push_str(&span.text);
            }
            _ => merged.push(span),
        }
        last_x = x;
    }

    merged
}

fn needs_space(prev: &str, next: &str) -> bool {
    match (prev.chars().last(), next.chars().next()) {
        (Some(a), Some(b)) => {
            !a.is_whitespace()
                && !b.is_whitespace()
                && !(is_spaceless_script_char(a) && is_spaceless_script_char(b))
        }
        _ => false,
    }
}

/// Scripts that do not separate words with spaces (Chinese, Japanese).
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

fn group_lines_into_blocks(lines: Vec<PositionedLine>) -> Vec<Block> {
    let avg_spacing = average_line_spacing(&lines);
    let mut blocks = Vec::new();
    let mut current: Vec<PositionedLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, avg_spacing) {
                blocks.push(finish_block(std::mem::take(&mut current)));
            }
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(finish_block(current));
    }

    blocks
}

fn finish_block(lines: Vec<PositionedLine>) -> Block {
    Block::new(lines.into_iter().map(PositionedLine::into_line).collect())
}

fn average_line_spacing(lines: &[PositionedLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &PositionedLine, curr: &PositionedLine, avg_spacing: f32) -> bool {
    let spacing = (prev.y - curr.y).abs();
    if spacing > avg_spacing * 1.5 {
        return true;
    }

    if (prev.font_size - curr.font_size).abs() > 1.0 {
        return true;
    }

    // Jump back to the left margin region of another column
    (prev.x - curr.x).abs() > 200.0 && spacing > avg_spacing
}
