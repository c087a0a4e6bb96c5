use thiserror::Error;

/// Failures while extracting layout spans from one document.
///
/// A `LayoutError` is scoped to a single document; the batch
/// orchestrator logs it and excludes the document without aborting
/// the run.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse PDF: {0}")]
    Parse(String),

    #[error("failed to decode content stream on page {page}: {message}")]
    Content { page: u32, message: String },
}
