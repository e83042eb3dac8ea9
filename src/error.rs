//! Error types for docsift library.

use std::io;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading an extraction payload.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed extraction payload or output serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The extraction collaborator could not produce the document.
    #[error("Extraction failed for {document}: {reason}")]
    Extraction {
        /// Document identifier
        document: String,
        /// Failure description
        reason: String,
    },

    /// The requested document is unknown to the source.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// The embedding collaborator failed.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// The embedder returned a different number of vectors than inputs.
    #[error("Embedder returned {got} vectors for {expected} inputs")]
    EmbeddingCount {
        /// Number of inputs submitted
        expected: usize,
        /// Number of vectors returned
        got: usize,
    },

    /// An embedding vector does not match the query vector's length.
    #[error("Embedding has {got} dimensions, expected {expected}")]
    DimensionMismatch {
        /// Length of the query vector
        expected: usize,
        /// Length of the offending vector
        got: usize,
    },

    /// Error during rendering the analysis output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// An option value is out of range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// Build an extraction failure for a document.
    pub fn extraction(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Extraction {
            document: document.into(),
            reason: reason.into(),
        }
    }
}
