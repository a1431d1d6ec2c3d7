//! Caller-supplied values injected at reserved document paths.

use serde::{Deserialize, Serialize};

/// Reserved path holding the subject identifier.
pub const SUBJECT_ID_PATH: &str = "patientDetails";

/// Reserved path holding the scheduled visit date.
pub const SCHEDULED_DATE_PATH: &str = "scheduledDate";

/// Reserved path holding the form-variant flag.
pub const FORM_VARIANT_PATH: &str = "crfType";

/// Paths written by the pipeline itself rather than by mapping entries.
pub const RESERVED_PATHS: &[&str] = &[SUBJECT_ID_PATH, SCHEDULED_DATE_PATH, FORM_VARIANT_PATH];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionContext {
    pub subject_id: String,
    pub scheduled_date: String,
    /// Explicit form sub-type discriminator. When unset, the flag is derived
    /// from whether the table's marker label occurs in the document.
    #[serde(default)]
    pub form_variant: Option<bool>,
}

impl ExtractionContext {
    pub fn new(subject_id: impl Into<String>, scheduled_date: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            scheduled_date: scheduled_date.into(),
            form_variant: None,
        }
    }

    #[must_use]
    pub fn with_form_variant(mut self, variant: Option<bool>) -> Self {
        self.form_variant = variant;
        self
    }
}
