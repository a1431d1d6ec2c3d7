#![deny(unsafe_code)]

//! Extraction of structured CRF records from text recovered from printed
//! Clinical Research Forms.
//!
//! The building blocks are usable on their own:
//!
//! - [`field`]: locate a labeled value in document text.
//! - [`checkbox`]: resolve which options of a checkbox group are ticked.
//! - [`clean`]: normalize extracted values and whole documents.
//! - [`assemble`]: write a value at a dotted path inside a document.
//!
//! [`CrfPipeline`] ties them together for one mapping table.

pub mod assemble;
pub mod checkbox;
pub mod clean;
pub mod field;
pub mod pipeline;

pub use assemble::assign;
pub use checkbox::resolve as resolve_checkbox;
pub use clean::{clean_document, clean_node, clean_value};
pub use field::{FieldPattern, extract_field};
pub use pipeline::{CrfPipeline, ExtractionOutcome, ExtractionReport, extract_crf};
