use thiserror::Error;

/// Errors a club lookup can surface to the caller.
///
/// Provider transport failures never appear here; they are absorbed by
/// the fallback chain and at most degrade the result.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("club not found")]
    NotFound,
}

/// Errors a logo ingest can surface to the caller.
#[derive(Debug, Error)]
pub enum IngestError {
    /// No rendition at all could be produced. Only the paged-document
    /// path can end here; a vector upload without a raster is partial
    /// success, not an error.
    #[error("conversion failed: {0}")]
    ConversionFailed(String),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single raster backend failing. Normal and expected; the pipeline
/// logs it and moves on to the next backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer not installed")]
    Unavailable,

    #[error("renderer exited with failure: {0}")]
    Failed(String),

    #[error("could not parse vector document: {0}")]
    Parse(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
