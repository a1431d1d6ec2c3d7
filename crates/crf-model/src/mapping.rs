//! Label-to-path mapping tables.
//!
//! A mapping table pairs each field label printed on a CRF with the dotted
//! path where its value lands in the output document. Tables are static per
//! form variant and are handed to every extraction run explicitly.

use serde::{Deserialize, Serialize};

/// Label of the subject identifier row. Populated from call context.
pub const SUBJECT_ID_LABEL: &str = "Id";

/// Label of the scheduled visit date row. Populated from call context.
pub const SCHEDULED_DATE_LABEL: &str = "Scheduled Date";

/// Labels that keep their position in a table but are never searched for
/// in document text.
pub const RESERVED_LABELS: &[&str] = &[SUBJECT_ID_LABEL, SCHEDULED_DATE_LABEL];

/// Returns true if `label` is reserved (exact, case-sensitive match).
pub fn is_reserved_label(label: &str) -> bool {
    RESERVED_LABELS.contains(&label)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Field text as printed on the form.
    pub label: String,
    /// Dot-delimited destination, e.g. `demographics.age`.
    pub path: String,
}

impl MappingEntry {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    pub fn is_reserved(&self) -> bool {
        is_reserved_label(&self.label)
    }
}

/// An ordered, immutable mapping table for one form variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTable {
    name: String,
    entries: Vec<MappingEntry>,
    #[serde(default)]
    variant_marker: Option<String>,
}

impl MappingTable {
    pub fn new(name: impl Into<String>, entries: Vec<MappingEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
            variant_marker: None,
        }
    }

    /// Set the label whose presence in a document flags the form sub-type.
    #[must_use]
    pub fn with_variant_marker(mut self, label: impl Into<String>) -> Self {
        self.variant_marker = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn variant_marker(&self) -> Option<&str> {
        self.variant_marker.as_deref()
    }

    pub fn is_marker(&self, label: &str) -> bool {
        self.variant_marker.as_deref() == Some(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that are searched for in document text.
    pub fn extractable(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter().filter(|entry| !entry.is_reserved())
    }
}
