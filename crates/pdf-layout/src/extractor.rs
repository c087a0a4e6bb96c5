//! Content-stream walk producing line-level text spans.

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use shared_types::TextSpan;
use std::path::Path;

use crate::error::LayoutError;

/// Spans at or below this many characters are dropped: page numbers,
/// stray glyphs, and running headers carry no section signal.
const MIN_SPAN_CHARS: usize = 10;

/// Extract the ordered layout spans of every page in a document.
pub fn extract_document(path: &Path) -> Result<Vec<TextSpan>, LayoutError> {
    let data = std::fs::read(path).map_err(|source| LayoutError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let doc = Document::load_mem(&data).map_err(|e| LayoutError::Parse(e.to_string()))?;
    extract_spans(&doc)
}

/// Extract spans from an already-parsed document, in page order.
pub fn extract_spans(doc: &Document) -> Result<Vec<TextSpan>, LayoutError> {
    let mut spans = Vec::new();

    // get_pages returns a BTreeMap, so iteration is page-ordered
    for (&page_num, &page_id) in doc.get_pages().iter() {
        let content = doc
            .get_page_content(page_id)
            .map_err(|e| LayoutError::Content {
                page: page_num,
                message: e.to_string(),
            })?;
        let operations = Content::decode(&content).map_err(|e| LayoutError::Content {
            page: page_num,
            message: e.to_string(),
        })?;

        let mut walker = PageWalker::new(doc, page_id, page_num);
        for op in &operations.operations {
            walker.apply(op.operator.as_str(), &op.operands);
        }
        walker.flush_line();
        spans.extend(walker.spans);
    }

    tracing::debug!("extracted {} spans", spans.len());
    Ok(spans)
}

/// Tracks text state across one page's operations and assembles
/// text-showing runs into lines. A line closes whenever the vertical
/// position moves.
struct PageWalker<'a> {
    doc: &'a Document,
    page_id: ObjectId,
    page: u32,
    spans: Vec<TextSpan>,
    line: String,
    x: f32,
    y: f32,
    line_x: f32,
    line_y: f32,
    leading: f32,
    font_size: f32,
    bold: bool,
}

impl<'a> PageWalker<'a> {
    fn new(doc: &'a Document, page_id: ObjectId, page: u32) -> Self {
        Self {
            doc,
            page_id,
            page,
            spans: Vec::new(),
            line: String::new(),
            x: 0.0,
            y: 0.0,
            line_x: 0.0,
            line_y: 0.0,
            leading: 0.0,
            font_size: 0.0,
            bold: false,
        }
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            "BT" => {
                self.flush_line();
                self.x = 0.0;
                self.y = 0.0;
            }
            "ET" => self.flush_line(),
            "Tf" => {
                if let (Some(key), Some(size)) = (operands.first(), operands.get(1)) {
                    self.font_size = size.as_float().unwrap_or(0.0);
                    self.bold = match key.as_name() {
                        Ok(name) => self.is_bold_font(name),
                        Err(_) => false,
                    };
                }
            }
            "TL" => {
                if let Some(l) = operands.first() {
                    self.leading = l.as_float().unwrap_or(0.0);
                }
            }
            "Tm" => {
                // Text matrix: a b c d e f, with e/f the position
                if operands.len() >= 6 {
                    let e = operands[4].as_float().unwrap_or(0.0);
                    let f = operands[5].as_float().unwrap_or(0.0);
                    self.move_to(e, f);
                }
            }
            "Td" | "TD" => {
                if operands.len() >= 2 {
                    let tx = operands[0].as_float().unwrap_or(0.0);
                    let ty = operands[1].as_float().unwrap_or(0.0);
                    if operator == "TD" {
                        self.leading = -ty;
                    }
                    self.move_to(self.x + tx, self.y + ty);
                }
            }
            "T*" => {
                let next_y = self.y - self.leading;
                self.move_to(self.x, next_y);
            }
            "Tj" | "TJ" => {
                for operand in operands {
                    self.show(operand);
                }
            }
            "'" => {
                let next_y = self.y - self.leading;
                self.move_to(self.x, next_y);
                for operand in operands {
                    self.show(operand);
                }
            }
            "\"" => {
                // Word spacing, char spacing, then the string
                let next_y = self.y - self.leading;
                self.move_to(self.x, next_y);
                if let Some(operand) = operands.get(2) {
                    self.show(operand);
                }
            }
            _ => {}
        }
    }

    /// A vertical move closes the current line.
    fn move_to(&mut self, x: f32, y: f32) {
        if (y - self.y).abs() > f32::EPSILON {
            self.flush_line();
        }
        self.x = x;
        self.y = y;
        if self.line.is_empty() {
            self.line_x = x;
            self.line_y = y;
        }
    }

    fn show(&mut self, operand: &Object) {
        if let Some(text) = decode_text_operand(operand) {
            if self.line.is_empty() {
                self.line_x = self.x;
                self.line_y = self.y;
            }
            self.line.push_str(&text);
        }
    }

    fn flush_line(&mut self) {
        let text = self.line.trim().to_string();
        self.line.clear();
        if text.chars().count() <= MIN_SPAN_CHARS {
            return;
        }

        let size = self.font_size;
        // Rough advance-width estimate; lines only need a plausible box
        let width = text.chars().count() as f32 * size * 0.5;
        self.spans.push(TextSpan {
            text,
            page: self.page,
            font_size: (size > 0.0).then_some(size),
            bold: self.bold,
            bbox: [self.line_x, self.line_y - size, self.line_x + width, self.line_y],
        });
    }

    /// Resolve the resource key set by `Tf` to the font's BaseFont
    /// name and test it for a bold face.
    fn is_bold_font(&self, resource_key: &[u8]) -> bool {
        base_font_name(self.doc, self.page_id, resource_key)
            .map(|name| name.to_lowercase().contains("bold"))
            .unwrap_or(false)
    }
}

/// Look up /Resources -> /Font -> <key> -> /BaseFont for a page.
fn base_font_name(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<String> {
    let page = doc.get_dictionary(page_id).ok()?;
    let resources = resolve_dict(doc, page.get(b"Resources").ok()?)?;
    let fonts = resolve_dict(doc, resources.get(b"Font").ok()?)?;
    let font = resolve_dict(doc, fonts.get(key).ok()?)?;
    let base = font.get(b"BaseFont").ok()?.as_name_str().ok()?;
    Some(base.to_string())
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Dictionary(dict) => Some(dict),
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        _ => None,
    }
}

/// Decode a text-showing operand: UTF-8, then UTF-16BE with BOM,
/// then Latin-1. TJ arrays interleave strings with kerning numbers;
/// large negative kerning is rendered as a space.
fn decode_text_operand(operand: &Object) -> Option<String> {
    match operand {
        Object::String(bytes, _) => Some(decode_string_bytes(bytes)),
        Object::Array(items) => {
            let mut text = String::new();
            for item in items {
                match item {
                    Object::String(bytes, _) => text.push_str(&decode_string_bytes(bytes)),
                    Object::Integer(n) if *n < -100 => text.push(' '),
                    Object::Real(n) if *n < -100.0 => text.push(' '),
                    _ => {}
                }
            }
            Some(text)
        }
        _ => None,
    }
}

fn decode_string_bytes(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        if let Ok(s) = String::from_utf16(&units) {
            return s;
        }
    }
    // Latin-1 fallback
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_string() {
        let operand = Object::String(b"Hello world".to_vec(), lopdf::StringFormat::Literal);
        assert_eq!(decode_text_operand(&operand).unwrap(), "Hello world");
    }

    #[test]
    fn test_decode_utf16be_string() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "Report".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        let operand = Object::String(bytes, lopdf::StringFormat::Hexadecimal);
        assert_eq!(decode_text_operand(&operand).unwrap(), "Report");
    }

    #[test]
    fn test_tj_array_kerning_becomes_space() {
        let operand = Object::Array(vec![
            Object::String(b"Quarterly".to_vec(), lopdf::StringFormat::Literal),
            Object::Integer(-250),
            Object::String(b"results".to_vec(), lopdf::StringFormat::Literal),
        ]);
        assert_eq!(decode_text_operand(&operand).unwrap(), "Quarterly results");
    }

    #[test]
    fn test_small_kerning_is_ignored() {
        let operand = Object::Array(vec![
            Object::String(b"Re".to_vec(), lopdf::StringFormat::Literal),
            Object::Integer(-12),
            Object::String(b"venue".to_vec(), lopdf::StringFormat::Literal),
        ]);
        assert_eq!(decode_text_operand(&operand).unwrap(), "Revenue");
    }

    #[test]
    fn test_short_lines_are_dropped() {
        let doc = Document::with_version("1.5");
        let page_id = (1, 0);
        let mut walker = PageWalker::new(&doc, page_id, 1);
        walker.font_size = 10.0;
        walker.line = "Page 3".to_string();
        walker.flush_line();
        walker.line = "A line that is clearly long enough to keep".to_string();
        walker.flush_line();
        assert_eq!(walker.spans.len(), 1);
        assert!(walker.spans[0].text.starts_with("A line"));
    }

    #[test]
    fn test_vertical_move_closes_line() {
        let doc = Document::with_version("1.5");
        let mut walker = PageWalker::new(&doc, (1, 0), 1);
        walker.font_size = 11.0;
        walker.apply(
            "Tm",
            &[
                Object::Real(1.0),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(1.0),
                Object::Real(72.0),
                Object::Real(700.0),
            ],
        );
        walker.apply(
            "Tj",
            &[Object::String(
                b"The first line of the body text".to_vec(),
                lopdf::StringFormat::Literal,
            )],
        );
        walker.apply("Td", &[Object::Real(0.0), Object::Real(-14.0)]);
        walker.apply(
            "Tj",
            &[Object::String(
                b"The second line of the body text".to_vec(),
                lopdf::StringFormat::Literal,
            )],
        );
        walker.flush_line();

        assert_eq!(walker.spans.len(), 2);
        assert_eq!(walker.spans[0].text, "The first line of the body text");
        assert_eq!(walker.spans[1].text, "The second line of the body text");
        assert!(walker.spans[0].bbox[3] > walker.spans[1].bbox[3]);
    }
}
