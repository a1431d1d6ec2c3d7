#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use crf_model::MappingTable;
use tracing::debug;

use crate::error::StandardsError;
use crate::hash::sha256_hex;
use crate::manifest::{MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, ManifestForm};
use crate::paths::{manifest_path, standards_root};
use crate::table::{parse_mapping_csv, validate_table};

/// A registered form variant and its mapping table.
#[derive(Debug, Clone)]
pub struct FormDefinition {
    pub name: String,
    pub title: String,
    pub table: MappingTable,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub standards_dir: PathBuf,
    pub form_count: usize,
    pub entry_count: usize,
    pub reserved_count: usize,
}

#[derive(Debug, Clone)]
pub struct FormRegistry {
    pub manifest: Manifest,
    forms: Vec<FormDefinition>,
}

impl FormRegistry {
    pub fn verify_and_load(standards_dir: &Path) -> Result<(Self, VerifySummary), StandardsError> {
        let manifest = load_manifest(&manifest_path(standards_dir))?;

        validate_manifest(&manifest)?;

        let mut forms = Vec::with_capacity(manifest.forms.len());
        for form in &manifest.forms {
            verify_file(standards_dir, form)?;
            let entries = parse_mapping_csv(&standards_dir.join(&form.path))?;
            let mut table = MappingTable::new(&form.name, entries);
            if let Some(marker) = &form.variant_marker {
                table = table.with_variant_marker(marker);
            }
            validate_table(&table)?;
            debug!(form = %form.name, entries = table.len(), "loaded mapping table");
            forms.push(FormDefinition {
                name: form.name.clone(),
                title: form.title.clone(),
                table,
            });
        }

        let summary = VerifySummary {
            standards_dir: standards_dir.to_path_buf(),
            form_count: forms.len(),
            entry_count: forms.iter().map(|f| f.table.len()).sum(),
            reserved_count: forms
                .iter()
                .map(|f| f.table.entries().iter().filter(|e| e.is_reserved()).count())
                .sum(),
        };

        Ok((Self { manifest, forms }, summary))
    }

    pub fn forms(&self) -> &[FormDefinition] {
        &self.forms
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(|f| f.name.as_str())
    }

    /// Look up a form by name. Hyphens and underscores are interchangeable.
    pub fn get(&self, name: &str) -> Result<&FormDefinition, StandardsError> {
        let wanted = normalize_form_name(name);
        self.forms
            .iter()
            .find(|f| normalize_form_name(&f.name) == wanted)
            .ok_or_else(|| StandardsError::UnknownForm {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn table(&self, name: &str) -> Result<&MappingTable, StandardsError> {
        self.get(name).map(|f| &f.table)
    }
}

/// Load the registry from [`standards_root`].
pub fn load_default_registry() -> Result<FormRegistry, StandardsError> {
    FormRegistry::verify_and_load(&standards_root()).map(|(registry, _)| registry)
}

fn normalize_form_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

fn load_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<(), StandardsError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }
    if manifest.forms.is_empty() {
        return Err(StandardsError::InvalidManifest {
            message: "no forms listed".to_string(),
        });
    }

    let mut names: BTreeSet<String> = BTreeSet::new();
    for form in &manifest.forms {
        if !names.insert(normalize_form_name(&form.name)) {
            return Err(StandardsError::DuplicateForm {
                name: form.name.clone(),
            });
        }
        validate_sha(&form.sha256, &form.path)?;
        validate_path(&form.path)?;
    }

    Ok(())
}

fn verify_file(standards_dir: &Path, form: &ManifestForm) -> Result<(), StandardsError> {
    let full_path = standards_dir.join(&form.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StandardsError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            StandardsError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = form.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(StandardsError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    Ok(())
}

fn validate_sha(sha: &str, path: &str) -> Result<(), StandardsError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StandardsError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "expected 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), StandardsError> {
    let p = Path::new(path);
    if p.is_absolute() {
        return Err(StandardsError::InvalidPath {
            path: p.to_path_buf(),
            message: "absolute paths are not allowed".to_string(),
        });
    }
    for component in p.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(StandardsError::InvalidPath {
                    path: p.to_path_buf(),
                    message: "path must stay inside the standards directory".to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_names_ignore_separator_style() {
        assert_eq!(
            normalize_form_name("Male-Infertility"),
            normalize_form_name("male_infertility")
        );
    }

    #[test]
    fn parent_components_are_rejected() {
        assert!(validate_path("../outside.csv").is_err());
        assert!(validate_path("forms/../../x.csv").is_err());
        assert!(validate_path("forms/male_infertility.csv").is_ok());
    }

    #[test]
    fn sha_must_be_hex() {
        assert!(validate_sha("xyz", "a.csv").is_err());
        assert!(validate_sha(&"a".repeat(64), "a.csv").is_ok());
    }
}
