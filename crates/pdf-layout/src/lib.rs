//! Layout-tagged text extraction from PDF documents.
//!
//! Walks each page's content stream with lopdf and assembles the
//! text-showing operators into line-level [`TextSpan`]s carrying the
//! font size, a bold flag, and an approximate bounding box. This is
//! the upstream collaborator of the section segmenter; everything
//! downstream treats the spans as immutable.

pub mod error;
pub mod extractor;

pub use error::LayoutError;
pub use extractor::{extract_document, extract_spans};
