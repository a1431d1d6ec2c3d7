//! Raw text recovery from CRF documents.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// Placeholder path used for in-memory uploads.
pub const UPLOAD_PATH: &str = "<upload>";

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Classify a path by extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else if ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("text") {
            Some(Self::Text)
        } else {
            None
        }
    }
}

/// Read a document and return its text with `\n` line endings.
pub fn read_document_text(path: &Path) -> Result<String> {
    let kind = DocumentKind::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = match kind {
        DocumentKind::Pdf => pdf_text(&bytes, path)?,
        DocumentKind::Text => String::from_utf8(bytes).map_err(|_| IngestError::InvalidText {
            path: path.to_path_buf(),
        })?,
    };
    debug!(path = %path.display(), chars = text.len(), "document text recovered");
    Ok(normalize_line_endings(&text))
}

/// Recover text from an in-memory PDF upload.
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String> {
    let text = pdf_text(bytes, Path::new(UPLOAD_PATH))?;
    Ok(normalize_line_endings(&text))
}

fn pdf_text(bytes: &[u8], path: &Path) -> Result<String> {
    // pdf-extract panics on some malformed font and content streams.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));
    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(pdf_error(path, e.to_string())),
        Err(_) => Err(pdf_error(path, "PDF parser aborted".to_string())),
    }
}

fn pdf_error(path: &Path, message: String) -> IngestError {
    IngestError::Pdf {
        path: PathBuf::from(path),
        message,
    }
}

/// Convert `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("crf.PDF")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("crf.txt")),
            Some(DocumentKind::Text)
        );
        assert_eq!(DocumentKind::from_path(Path::new("crf.docx")), None);
        assert_eq!(DocumentKind::from_path(Path::new("crf")), None);
    }

    #[test]
    fn normalizes_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let error = extract_text_from_bytes(b"definitely not a pdf").unwrap_err();
        assert!(matches!(error, IngestError::Pdf { .. }));
    }
}
