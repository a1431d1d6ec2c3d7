#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

pub const MANIFEST_SCHEMA: &str = "crf-extract.forms-manifest";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    #[serde(default)]
    pub forms: Vec<ManifestForm>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

/// One form variant and the CSV file holding its mapping table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestForm {
    pub name: String,
    pub title: String,
    pub path: String,
    pub sha256: String,
    #[serde(default)]
    pub variant_marker: Option<String>,
}
