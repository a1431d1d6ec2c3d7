#![deny(unsafe_code)]

//! Mapping table CSV parsing and validation.

use std::collections::BTreeSet;
use std::path::Path;

use crf_model::{MappingEntry, MappingTable, RESERVED_PATHS};

use crate::error::StandardsError;

const LABEL_HEADER: &str = "Label";
const PATH_HEADER: &str = "Path";

/// Parse a `Label,Path` CSV into mapping entries, keeping row order.
pub fn parse_mapping_csv(path: &Path) -> Result<Vec<MappingEntry>, StandardsError> {
    let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| StandardsError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_matches('\u{feff}').trim() == name)
            .ok_or_else(|| StandardsError::Csv {
                path: path.to_path_buf(),
                message: format!("missing {name} column"),
            })
    };
    let label_idx = column(LABEL_HEADER)?;
    let path_idx = column(PATH_HEADER)?;

    let mut entries = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StandardsError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let label = row.get(label_idx).unwrap_or("").trim();
        let target = row.get(path_idx).unwrap_or("").trim();
        if label.is_empty() && target.is_empty() {
            continue;
        }
        entries.push(MappingEntry::new(label, target));
    }
    Ok(entries)
}

/// Check that a table can be applied without configuration errors.
///
/// Rejects empty labels or paths, empty path segments, duplicate labels,
/// paths nested under another entry's leaf, entries writing under the
/// pipeline's own reserved paths, and a marker label missing from the table.
pub fn validate_table(table: &MappingTable) -> Result<(), StandardsError> {
    let form = table.name();
    let mut labels = BTreeSet::new();
    let mut paths = BTreeSet::new();

    for entry in table.entries() {
        if entry.label.is_empty() {
            return Err(StandardsError::table(
                form,
                format!("entry for path '{}' has an empty label", entry.path),
            ));
        }
        if entry.path.is_empty() || entry.path.split('.').any(str::is_empty) {
            return Err(StandardsError::table(
                form,
                format!("label '{}' has invalid path '{}'", entry.label, entry.path),
            ));
        }
        if !labels.insert(entry.label.as_str()) {
            return Err(StandardsError::table(
                form,
                format!("duplicate label '{}'", entry.label),
            ));
        }
        if !entry.is_reserved() {
            let root = entry.path.split('.').next().unwrap_or_default();
            if RESERVED_PATHS.contains(&root) {
                return Err(StandardsError::table(
                    form,
                    format!(
                        "label '{}' writes under reserved path '{root}'",
                        entry.label
                    ),
                ));
            }
            paths.insert(entry.path.as_str());
        }
    }

    for path in &paths {
        let nested = format!("{path}.");
        if let Some(child) = paths.iter().find(|other| other.starts_with(&nested)) {
            return Err(StandardsError::table(
                form,
                format!("path '{child}' is nested under leaf path '{path}'"),
            ));
        }
    }

    if let Some(marker) = table.variant_marker()
        && !labels.contains(marker)
    {
        return Err(StandardsError::table(
            form,
            format!("variant marker '{marker}' is not a label in the table"),
        ));
    }

    Ok(())
}
