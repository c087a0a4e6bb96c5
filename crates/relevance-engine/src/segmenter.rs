//! Heading detection and section assembly.
//!
//! Segmentation is a linear scan: a heading span closes the open
//! section and opens a new one; a non-heading span appends to the
//! open section's content. Heading detection itself sits behind
//! [`SpanClassifier`] so the rules can be swapped without touching
//! the assembly loop.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{Section, TextSpan};

/// Font size above which a short span counts as visually distinguished.
const HEADING_FONT_SIZE: f32 = 12.0;

/// Spans at or above this length are body text even when bold or large.
const MAX_HEADING_CHARS: usize = 100;

/// Title given to content that appears before any detected heading.
const ORPHAN_SECTION_TITLE: &str = "Content";

lazy_static! {
    /// Structural heading shapes: numbered outline markers, all-caps
    /// lines, title-case lines ending in a colon.
    static ref HEADING_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^\d+\.\s+").unwrap(),
        Regex::new(r"^\d+\.\d+\s+").unwrap(),
        Regex::new(r"^\d+\.\d+\.\d+\s+").unwrap(),
        Regex::new(r"^[A-Z][A-Z\s]+$").unwrap(),
        Regex::new(r"^[A-Z][a-z\s]+:").unwrap(),
    ];
}

/// Decides whether a layout span opens a new section.
pub trait SpanClassifier {
    fn is_heading(&self, span: &TextSpan) -> bool;
}

/// Default heading heuristics.
///
/// A span is a heading if its text matches a structural pattern, or
/// if it is short and visually distinguished (bold, or font size
/// above the threshold). Best effort: false positives and negatives
/// are expected. Spans without font metadata can only match through
/// the structural patterns.
#[derive(Debug, Default)]
pub struct PatternClassifier;

impl SpanClassifier for PatternClassifier {
    fn is_heading(&self, span: &TextSpan) -> bool {
        let text = span.text.trim();

        if HEADING_PATTERNS.iter().any(|re| re.is_match(text)) {
            return true;
        }

        let distinguished =
            span.bold || span.font_size.map_or(false, |size| size > HEADING_FONT_SIZE);
        distinguished && text.chars().count() < MAX_HEADING_CHARS
    }
}

/// Assembles ordered spans of one document into titled sections.
pub struct Segmenter<C: SpanClassifier = PatternClassifier> {
    classifier: C,
}

impl Segmenter<PatternClassifier> {
    pub fn new() -> Self {
        Self {
            classifier: PatternClassifier,
        }
    }
}

impl Default for Segmenter<PatternClassifier> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SpanClassifier> Segmenter<C> {
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    /// Scan spans in order and emit sections.
    ///
    /// Each span belongs to exactly one section. A heading span
    /// becomes the title of a fresh section and is never appended to
    /// content; leading content without a heading is collected under
    /// a synthesized "Content" section anchored at its page.
    pub fn segment(&self, spans: &[TextSpan]) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut open: Option<Section> = None;

        for span in spans {
            let text = span.text.trim();
            if text.is_empty() {
                continue;
            }

            if self.classifier.is_heading(span) {
                if let Some(finished) = open.take() {
                    sections.push(finished);
                }
                open = Some(Section::new(text, span.page, span.font_size));
            } else {
                let section = open.get_or_insert_with(|| {
                    Section::new(ORPHAN_SECTION_TITLE, span.page, span.font_size)
                });
                section.push_content(text);
            }
        }

        if let Some(finished) = open {
            sections.push(finished);
        }

        sections
    }
}
