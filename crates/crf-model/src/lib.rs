pub mod context;
pub mod document;
pub mod error;
pub mod mapping;

pub use context::{
    ExtractionContext, FORM_VARIANT_PATH, RESERVED_PATHS, SCHEDULED_DATE_PATH, SUBJECT_ID_PATH,
};
pub use document::{CrfDocument, CrfNode, CrfValue};
pub use error::{CrfError, Result};
pub use mapping::{
    MappingEntry, MappingTable, RESERVED_LABELS, SCHEDULED_DATE_LABEL, SUBJECT_ID_LABEL,
    is_reserved_label,
};
