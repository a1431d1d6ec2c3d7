#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod registry;
pub mod table;

pub use crate::error::StandardsError;
pub use crate::paths::{STANDARDS_ENV_VAR, standards_root};
pub use crate::registry::{FormDefinition, FormRegistry, VerifySummary, load_default_registry};
pub use crate::table::{parse_mapping_csv, validate_table};
