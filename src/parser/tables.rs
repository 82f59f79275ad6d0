//! Table detection from text alignment (stream mode).
//!
//! Tables are found without ruling lines: spans are grouped into rows by
//! baseline, column edges are taken from left edges that line up across
//! rows, and runs of consecutive well-aligned rows become table regions.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

use crate::model::TableGrid;

use super::spans::TextSpan;

/// Left edges are bucketed to this many points when looking for columns.
const EDGE_BUCKET: f32 = 5.0;

/// A span within this many points of a column edge counts as aligned.
const ALIGN_TOLERANCE: f32 = 5.0;

/// Spans may start this far left of their column edge.
const COLUMN_SLACK: f32 = 10.0;

/// Table detector configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub row_tolerance: f32,
    /// Minimum share of a row's spans that must sit on column edges
    pub min_alignment_ratio: f32,
    /// Minimum gap between columns (points)
    pub min_column_gap: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            row_tolerance: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

#[derive(Debug, Clone)]
struct Row<'a> {
    spans: Vec<&'a TextSpan>,
}

/// Finds table regions in a page's spans.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables and return each as a grid of cells, top to bottom.
    pub fn detect(&self, spans: &[TextSpan]) -> Vec<TableGrid> {
        let cfg = &self.config;
        if spans.len() < cfg.min_rows * cfg.min_columns {
            return Vec::new();
        }

        let rows = self.group_rows(spans);
        let edges = self.column_edges(&rows);
        log::debug!(
            "table pass: {} spans, {} rows, column edges {:?}",
            spans.len(),
            rows.len(),
            edges
        );
        if rows.len() < cfg.min_rows || edges.len() < cfg.min_columns {
            return Vec::new();
        }

        let mut grids = Vec::new();
        for region in self.aligned_regions(&rows, &edges) {
            let region_rows = &rows[region];
            let region_edges = self.column_edges(region_rows);

            if region_edges.len() < cfg.min_columns {
                continue;
            }
            if region_edges.len() > cfg.max_columns {
                log::debug!(
                    "table pass: skipping region with {} columns",
                    region_edges.len()
                );
                continue;
            }
            if looks_like_list(region_rows, &region_edges) {
                log::debug!("table pass: skipping region that reads as a list");
                continue;
            }

            grids.push(to_grid(region_rows, &region_edges));
        }

        grids
    }

    fn group_rows<'a>(&self, spans: &'a [TextSpan]) -> Vec<Row<'a>> {
        let mut sorted: Vec<&TextSpan> = spans.iter().collect();
        sorted.sort_by(|a, b| {
            b.y.partial_cmp(&a.y)
                .unwrap_or(Ordering::Equal)
                .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
        });

        let mut rows: Vec<Row<'a>> = Vec::new();
        let mut row_y: Option<f32> = None;
        for span in sorted {
            let tolerance = span.font_size * self.config.row_tolerance;
            if row_y.is_some_and(|y| (span.y - y).abs() <= tolerance) {
                if let Some(row) = rows.last_mut() {
                    row.spans.push(span);
                    continue;
                }
            }
            row_y = Some(span.y);
            rows.push(Row { spans: vec![span] });
        }
        rows
    }

    /// Left edges shared by enough rows, merged when closer than the column gap.
    fn column_edges(&self, rows: &[Row<'_>]) -> Vec<f32> {
        // Rows with a single span carry no column information, unless that is
        // all there is.
        let multi: Vec<&Row<'_>> = rows.iter().filter(|r| r.spans.len() >= 2).collect();
        let candidates: Vec<&Row<'_>> = if multi.len() >= self.config.min_rows {
            multi
        } else {
            rows.iter().collect()
        };
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut counts: HashMap<i32, usize> = HashMap::new();
        for row in &candidates {
            let buckets: HashSet<i32> = row
                .spans
                .iter()
                .map(|s| (s.x / EDGE_BUCKET).round() as i32)
                .collect();
            for bucket in buckets {
                *counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_hits =
            ((candidates.len() as f32 * self.config.min_alignment_ratio) as usize).max(2);
        let mut edges: Vec<f32> = counts
            .into_iter()
            .filter(|(_, hits)| *hits >= min_hits)
            .map(|(bucket, _)| bucket as f32 * EDGE_BUCKET)
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mut merged: Vec<f32> = Vec::with_capacity(edges.len());
        for edge in edges {
            if merged
                .last()
                .map_or(true, |last| edge - last >= self.config.min_column_gap)
            {
                merged.push(edge);
            }
        }
        merged
    }

    /// Runs of at least `min_rows` consecutive rows that line up with the edges.
    fn aligned_regions(&self, rows: &[Row<'_>], edges: &[f32]) -> Vec<RangeInclusive<usize>> {
        let mut regions = Vec::new();
        let mut start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            if alignment(row, edges) >= self.config.min_alignment_ratio {
                start.get_or_insert(i);
                continue;
            }
            if let Some(s) = start.take() {
                if i - s >= self.config.min_rows {
                    regions.push(s..=i - 1);
                }
            }
        }
        if let Some(s) = start {
            if rows.len() - s >= self.config.min_rows {
                regions.push(s..=rows.len() - 1);
            }
        }

        regions
    }
}

/// Share of a row's spans that start on a column edge.
fn alignment(row: &Row<'_>, edges: &[f32]) -> f32 {
    if row.spans.is_empty() || edges.is_empty() {
        return 0.0;
    }
    let aligned = row
        .spans
        .iter()
        .filter(|s| edges.iter().any(|e| (s.x - e).abs() <= ALIGN_TOLERANCE))
        .count();
    aligned as f32 / row.spans.len() as f32
}

fn to_grid(rows: &[Row<'_>], edges: &[f32]) -> TableGrid {
    let right = rows
        .iter()
        .flat_map(|r| r.spans.iter())
        .map(|s| s.right())
        .fold(f32::NEG_INFINITY, f32::max);

    rows.iter()
        .map(|row| {
            let mut cells: Vec<Vec<&str>> = vec![Vec::new(); edges.len()];
            for span in &row.spans {
                cells[column_for(span.x, edges, right)].push(span.text.trim());
            }
            cells
                .into_iter()
                .map(|parts| {
                    let text = parts.join(" ");
                    if text.trim().is_empty() {
                        None
                    } else {
                        Some(text)
                    }
                })
                .collect()
        })
        .collect()
}

/// Column whose span of x positions contains `x`, else the nearest edge.
fn column_for(x: f32, edges: &[f32], right: f32) -> usize {
    for (i, &start) in edges.iter().enumerate() {
        let end = edges.get(i + 1).copied().unwrap_or(right + 100.0);
        if x >= start - COLUMN_SLACK && x < end - COLUMN_SLACK {
            return i;
        }
    }

    edges
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (x - **a)
                .abs()
                .partial_cmp(&(x - **b).abs())
                .unwrap_or(Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Numbered or bulleted lists split into marker and text spans look like
/// two-column tables.
fn looks_like_list(rows: &[Row<'_>], edges: &[f32]) -> bool {
    if edges.len() < 2 || rows.is_empty() {
        return false;
    }

    let mut bullets = 0;
    let mut numbers = 0;
    for row in rows {
        let first = row
            .spans
            .iter()
            .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        match first.map(|s| s.text.trim()) {
            Some(text) if is_bullet_marker(text) => bullets += 1,
            Some(text) if is_number_marker(text) => numbers += 1,
            _ => {}
        }
    }

    let total = rows.len() as f32;
    // Bullets are never table data; numbers only disqualify two-column regions
    bullets as f32 / total >= 0.5 || (edges.len() == 2 && (bullets + numbers) as f32 / total >= 0.5)
}

fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "▹" | "►" | "■" | "●" | "※"
            | "□" | "◆" | "◇" | "▶" | "▷" | "☞" | "➤" | "➜"
    )
}

/// "1.", "12)", "3", "a.", "B)" and the like.
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    let digits = cleaned.chars().take_while(|c| c.is_ascii_digit()).count();
    let suffix = &cleaned[digits..];
    if digits > 0 && (suffix.is_empty() || suffix == "." || suffix == ")") {
        return true;
    }

    let mut chars = cleaned.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.' | ')'), None) if letter.is_alphabetic()
    )
}
