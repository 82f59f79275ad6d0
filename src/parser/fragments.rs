//! Grouping of spans into text fragments.
//!
//! Spans sharing a baseline form a line; consecutive lines form a block until
//! the spacing, font size, or left margin changes noticeably. Each block is
//! reported as one [`Fragment`].

use std::cmp::Ordering;

use super::backend::Fragment;
use super::spans::{is_spaceless_script_char, TextSpan};

/// Spans within this fraction of the font size share a baseline.
const BASELINE_TOLERANCE: f32 = 0.3;

/// A gap wider than this many average line gaps starts a new block.
const PARAGRAPH_GAP_FACTOR: f32 = 1.5;

/// A font size change larger than this (points) starts a new block.
const FONT_SIZE_BREAK: f32 = 1.0;

/// A left margin shift larger than this (points) starts a new block.
const INDENT_BREAK: f32 = 20.0;

#[derive(Debug, Clone)]
struct Line {
    spans: Vec<TextSpan>,
    x: f32,
    y: f32,
    font_size: f32,
}

impl Line {
    fn new(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        let x = spans.first().map(|s| s.x).unwrap_or(0.0);
        let y = spans.first().map(|s| s.y).unwrap_or(0.0);
        let font_size = weighted_font_size(&spans);
        Self {
            spans,
            x,
            y,
            font_size,
        }
    }

    /// Join the spans, inserting a space where the horizontal gap calls for one.
    fn text(&self) -> String {
        let mut out = String::new();
        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                let prev = &self.spans[i - 1];
                if needs_space(prev, span) {
                    out.push(' ');
                }
            }
            out.push_str(&span.text);
        }
        out
    }
}

fn needs_space(prev: &TextSpan, curr: &TextSpan) -> bool {
    let chars = curr.text.chars().count().max(1) as f32;
    let avg_char_width = if curr.width > 0.0 {
        curr.width / chars
    } else {
        curr.font_size * 0.5
    };
    if curr.x - prev.right() <= avg_char_width * 0.2 {
        return false;
    }

    let ends_blank = prev.text.ends_with([' ', '\u{00A0}']);
    let starts_blank = curr.text.starts_with([' ', '\u{00A0}']);
    let both_spaceless = prev.text.chars().last().is_some_and(is_spaceless_script_char)
        && curr.text.chars().next().is_some_and(is_spaceless_script_char);

    !ends_blank && !starts_blank && !both_spaceless
}

/// Character-weighted mean font size.
fn weighted_font_size(spans: &[TextSpan]) -> f32 {
    let chars: usize = spans.iter().map(|s| s.text.chars().count()).sum();
    if chars == 0 {
        return spans.first().map(|s| s.font_size).unwrap_or(0.0);
    }
    let weighted: f32 = spans
        .iter()
        .map(|s| s.font_size * s.text.chars().count() as f32)
        .sum();
    weighted / chars as f32
}

/// Group spans into fragments in top-to-bottom reading order.
pub fn assemble_fragments(spans: Vec<TextSpan>) -> Vec<Fragment> {
    let lines = group_lines(spans);
    let gap = average_line_gap(&lines);

    let mut fragments = Vec::new();
    let mut block: Vec<Line> = Vec::new();
    for line in lines {
        if let Some(prev) = block.last() {
            if starts_new_block(prev, &line, gap) {
                fragments.push(block_fragment(std::mem::take(&mut block)));
            }
        }
        block.push(line);
    }
    if !block.is_empty() {
        fragments.push(block_fragment(block));
    }

    fragments
}

fn group_lines(mut spans: Vec<TextSpan>) -> Vec<Line> {
    // PDF y grows upwards, so descending y is top-to-bottom
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut baseline: Option<f32> = None;

    for span in spans {
        let same_line =
            baseline.is_some_and(|y| (span.y - y).abs() <= span.font_size * BASELINE_TOLERANCE);
        if !same_line && !current.is_empty() {
            lines.push(Line::new(std::mem::take(&mut current)));
        }
        if !same_line {
            baseline = Some(span.y);
        }
        current.push(span);
    }
    if !current.is_empty() {
        lines.push(Line::new(current));
    }

    lines
}

fn average_line_gap(lines: &[Line]) -> f32 {
    let gaps: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|gap| *gap > 0.1)
        .collect();

    if gaps.is_empty() {
        12.0
    } else {
        gaps.iter().sum::<f32>() / gaps.len() as f32
    }
}

fn starts_new_block(prev: &Line, curr: &Line, avg_gap: f32) -> bool {
    (prev.y - curr.y).abs() > avg_gap * PARAGRAPH_GAP_FACTOR
        || (prev.font_size - curr.font_size).abs() > FONT_SIZE_BREAK
        || (prev.x - curr.x).abs() > INDENT_BREAK
}

fn block_fragment(lines: Vec<Line>) -> Fragment {
    let spans: Vec<&TextSpan> = lines.iter().flat_map(|l| l.spans.iter()).collect();

    let x0 = spans.iter().map(|s| s.x).fold(f32::INFINITY, f32::min);
    let x1 = spans.iter().map(|s| s.right()).fold(f32::NEG_INFINITY, f32::max);
    let y0 = spans.iter().map(|s| s.bottom()).fold(f32::INFINITY, f32::min);
    let y1 = spans.iter().map(|s| s.top()).fold(f32::NEG_INFINITY, f32::max);

    let owned: Vec<TextSpan> = spans.into_iter().cloned().collect();
    let font_size = weighted_font_size(&owned);
    let text = lines.iter().map(Line::text).collect::<Vec<_>>().join("\n");

    Fragment::new(text, Some(font_size)).with_bbox(x0, y0, x1, y1)
}
