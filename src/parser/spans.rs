//! Positioned text spans read from a page content stream.
//!
//! Only the text-showing subset of the content stream is interpreted: text
//! objects, font selection, the text and line matrices, leading, and the four
//! show operators. Graphics state (`cm`, `q`/`Q`) is ignored, so positions are
//! in text space of the page's top-level content.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Rough glyph advance as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.5;

/// `TJ` adjustments beyond this many thousandths of an em read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A run of text drawn by one show operator.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
}

impl TextSpan {
    /// Create a span, estimating its width from the character count.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        let text = text.into();
        let width = text.chars().count() as f32 * font_size * AVG_CHAR_WIDTH;
        Self {
            text,
            x,
            y,
            width,
            font_size,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Approximate top of the glyphs (ascender).
    pub fn top(&self) -> f32 {
        self.y + self.font_size * 0.8
    }

    /// Approximate bottom of the glyphs (descender).
    pub fn bottom(&self) -> f32 {
        self.y - self.font_size * 0.2
    }
}

/// Read every text span on a page, in content stream order.
pub fn read_page_spans(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<TextSpan>> {
    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;
    let data = doc
        .get_page_content(page_id)
        .map_err(|e| Error::TextExtract(e.to_string()))?;
    let content = Content::decode(&data).map_err(|e| Error::PdfParse(e.to_string()))?;

    let mut reader = SpanReader::new(doc, &fonts);
    for op in &content.operations {
        reader.apply(op);
    }
    Ok(reader.spans)
}

struct SpanReader<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
    font: Option<&'a Dictionary>,
    font_size: f32,
    leading: Option<f32>,
    matrix: TextMatrix,
    in_text: bool,
    spans: Vec<TextSpan>,
}

impl<'a> SpanReader<'a> {
    fn new(doc: &'a LopdfDocument, fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        Self {
            doc,
            fonts,
            font: None,
            font_size: 12.0,
            leading: None,
            matrix: TextMatrix::default(),
            in_text: false,
            spans: Vec::new(),
        }
    }

    fn apply(&mut self, op: &Operation) {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            "BT" => {
                self.in_text = true;
                self.matrix = TextMatrix::default();
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let [name, size, ..] = operands {
                    if let Object::Name(name) = name {
                        self.font = self.fonts.get(name).copied();
                    }
                    self.font_size = number(size).unwrap_or(12.0);
                }
            }
            "TL" => self.leading = operands.first().and_then(number),
            "Td" | "TD" => {
                if let [tx, ty, ..] = operands {
                    let (tx, ty) = (number(tx).unwrap_or(0.0), number(ty).unwrap_or(0.0));
                    if op.operator == "TD" {
                        self.leading = Some(-ty);
                    }
                    self.matrix.move_line(tx, ty);
                }
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let mut m = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                    for (slot, operand) in m.iter_mut().zip(operands) {
                        if let Some(v) = number(operand) {
                            *slot = v;
                        }
                    }
                    self.matrix.set(m);
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.decode_array(items);
                    self.show(text);
                }
            }
            "'" | "\"" => {
                self.next_line();
                let index = if op.operator == "'" { 0 } else { 2 };
                if let Some(Object::String(bytes, _)) = operands.get(index) {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    fn next_line(&mut self) {
        let leading = self.leading.unwrap_or(self.font_size * 1.2);
        self.matrix.move_line(0.0, -leading);
    }

    fn decode(&self, bytes: &[u8]) -> String {
        if let Some(font) = self.font {
            if let Ok(encoding) = font.get_font_encoding(self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }

    /// Decode a `TJ` array, turning wide negative kerning into spaces.
    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                other => {
                    let Some(adjustment) = number(other) else {
                        continue;
                    };
                    let wants_space = -adjustment > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if wants_space {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn show(&mut self, text: String) {
        if !self.in_text {
            return;
        }

        let advance = text.chars().count() as f32 * self.font_size * AVG_CHAR_WIDTH;
        if !text.trim().is_empty() {
            let (x, y) = self.matrix.position();
            let size = self.font_size * self.matrix.vertical_scale();
            self.spans.push(TextSpan::new(text, x, y, size));
        }
        self.matrix.advance(advance);
    }
}

/// Text matrix and line matrix, as six-element affine arrays.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    line: [f32; 6],
    text: [f32; 6],
}

impl Default for TextMatrix {
    fn default() -> Self {
        let identity = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        Self {
            line: identity,
            text: identity,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: [f32; 6]) {
        self.line = m;
        self.text = m;
    }

    /// Start a new line offset from the start of the current one.
    fn move_line(&mut self, tx: f32, ty: f32) {
        let [a, b, c, d, e, f] = self.line;
        self.line = [a, b, c, d, e + tx * a + ty * c, f + tx * b + ty * d];
        self.text = self.line;
    }

    /// Move the pen along the baseline after showing text.
    fn advance(&mut self, tx: f32) {
        self.text[4] += tx * self.text[0];
        self.text[5] += tx * self.text[1];
    }

    fn position(&self) -> (f32, f32) {
        (self.text[4], self.text[5])
    }

    fn vertical_scale(&self) -> f32 {
        let scale = (self.text[2] * self.text[2] + self.text[3] * self.text[3]).sqrt();
        if scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Characters from scripts written without spaces between words.
///
/// Hangul is deliberately absent: Korean separates words with spaces.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    matches!(
        c as u32,
        0x3000..=0x303F      // CJK symbols and punctuation
        | 0x3040..=0x309F    // Hiragana
        | 0x30A0..=0x30FF    // Katakana
        | 0x3400..=0x4DBF    // CJK extension A
        | 0x4E00..=0x9FFF    // CJK unified ideographs
        | 0x20000..=0x2EBEF  // CJK extensions B-F
    )
}

/// Decode a string without font information: UTF-16BE with BOM, then UTF-8,
/// then Latin-1.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        assert_eq!(decode_text_simple(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }

    #[test]
    fn test_spaceless_scripts() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('カ'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }

    #[test]
    fn test_text_matrix_lines_and_advance() {
        let mut m = TextMatrix::default();
        m.set([1.0, 0.0, 0.0, 1.0, 72.0, 700.0]);
        m.advance(30.0);
        assert_eq!(m.position(), (102.0, 700.0));

        // Td is relative to the start of the line, not the pen
        m.move_line(0.0, -14.0);
        assert_eq!(m.position(), (72.0, 686.0));
    }

    #[test]
    fn test_vertical_scale_from_matrix() {
        let mut m = TextMatrix::default();
        m.set([2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert_eq!(m.vertical_scale(), 2.0);
    }

    #[test]
    fn test_span_geometry() {
        let span = TextSpan::new("abcd", 10.0, 100.0, 10.0);
        assert_eq!(span.width, 20.0);
        assert_eq!(span.right(), 30.0);
        assert_eq!(span.top(), 108.0);
        assert_eq!(span.bottom(), 98.0);
    }
}
