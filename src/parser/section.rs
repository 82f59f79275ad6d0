//! Section title heuristic.
//!
//! A fragment is treated as a heading when it is set in the largest font on
//! its page and is short. Both checks work on plain values so the rule can be
//! exercised without a PDF.

/// A title must have fewer words than this.
pub const TITLE_WORD_LIMIT: usize = 10;

/// Trim a fragment and turn each embedded line break into a single space.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().lines().collect::<Vec<_>>().join(" ")
}

/// Decide whether normalized fragment text is a section title.
pub fn is_section_title(text: &str, font_size: f32, page_max_font_size: f32) -> bool {
    font_size >= page_max_font_size && text.split_whitespace().count() < TITLE_WORD_LIMIT
}

/// Largest font size among the given sizes, or 0 when there are none.
pub fn page_max_font_size<I>(sizes: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    sizes.into_iter().fold(0.0, f32::max)
}
