//! Error types for CRF document ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Failures recovering text from an input document.
///
/// Any of these aborts the extraction request; no partial output is built.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF could not be parsed or its text could not be recovered.
    #[error("failed to extract text from PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },

    /// Plain-text input is not valid UTF-8.
    #[error("document {path} is not valid UTF-8")]
    InvalidText { path: PathBuf },

    /// File extension is neither PDF nor plain text.
    #[error("unsupported document format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
