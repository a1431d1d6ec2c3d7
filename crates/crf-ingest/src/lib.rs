pub mod discovery;
pub mod document;
pub mod error;

pub use discovery::list_documents;
pub use document::{
    DocumentKind, extract_text_from_bytes, normalize_line_endings, read_document_text,
};
pub use error::{IngestError, Result};
