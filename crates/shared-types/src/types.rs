use serde::{Deserialize, Serialize};

/// One line of text extracted from a document page, with the layout
/// metadata the heading heuristics look at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub page: u32,
    pub font_size: Option<f32>,
    pub bold: bool,
    pub bbox: [f32; 4], // x0, y0, x1, y1 in page coordinates
}

impl TextSpan {
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page,
            font_size: None,
            bold: false,
            bbox: [0.0; 4],
        }
    }

    pub fn with_font(mut self, size: f32, bold: bool) -> Self {
        self.font_size = Some(size);
        self.bold = bold;
        self
    }
}

/// A titled content block bounded by detected headings.
///
/// Built by the segmenter: the heading span becomes the title, the
/// following non-heading spans are appended to `content`
/// space-separated. The title text itself never enters `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub page: u32,
    pub content: String,
    pub title_font_size: Option<f32>,
}

impl Section {
    pub fn new(title: impl Into<String>, page: u32, title_font_size: Option<f32>) -> Self {
        Self {
            title: title.into(),
            page,
            content: String::new(),
            title_font_size,
        }
    }

    /// Append a span's text to the section body, space-separated.
    pub fn push_content(&mut self, text: &str) {
        if !self.content.is_empty() {
            self.content.push(' ');
        }
        self.content.push_str(text);
    }
}

/// A scoring candidate on its way through the ranking pipeline.
///
/// `score` holds the similarity-derived float while scoring and is
/// overwritten with the 1-based rank (as a float) by the rank
/// assigner. The two readings share the field; the float value does
/// not survive ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredItem {
    pub document: String,
    pub page: u32,
    pub text: String,
    pub score: f32,
}

/// A refined sentence window drawn from a section's content.
/// The text is cleaned and capped at 500 characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subsection {
    pub document: String,
    pub page: u32,
    pub text: String,
}
