//! Processing error types.
//!
//! Row-level anomalies (ragged rows, undecodable bytes) are tolerated by
//! the extractor and never surface here. Anything that does surface is
//! fatal to the whole batch: a partially delivered archive would be
//! misleading.

/// Failure while rendering a single confirmation page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Font error: {0}")]
    Font(String),

    #[error("Signature image error: {0}")]
    Image(String),

    #[error("PDF serialization error: {0}")]
    Pdf(String),
}

/// Failure of the whole upload-to-archive run.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    /// Rendering failed; `line` is the 1-based line of the originating
    /// CSV row (header is line 1).
    #[error("Failed to render confirmation for CSV line {line}: {source}")]
    Render {
        line: u64,
        #[source]
        source: RenderError,
    },

    #[error("Failed to assemble archive: {0}")]
    Archive(#[source] anyhow::Error),
}
