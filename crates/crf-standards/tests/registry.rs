use std::fs;
use std::path::{Path, PathBuf};

use crf_standards::hash::sha256_hex;
use crf_standards::{FormRegistry, StandardsError};

fn shipped_standards() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn write_manifest(dir: &Path, forms: &[(&str, &str, &[u8], Option<&str>)]) {
    let mut manifest = String::from(
        "[manifest]\nschema = \"crf-extract.forms-manifest\"\nschema_version = 1\n",
    );
    for (name, path, contents, marker) in forms {
        write(&dir.join(path), contents);
        manifest.push_str(&format!(
            "\n[[forms]]\nname = \"{name}\"\ntitle = \"{name}\"\npath = \"{path}\"\nsha256 = \"{}\"\n",
            sha256_hex(contents)
        ));
        if let Some(marker) = marker {
            manifest.push_str(&format!("variant_marker = \"{marker}\"\n"));
        }
    }
    write(&dir.join("manifest.toml"), manifest.as_bytes());
}

const SMALL_TABLE: &[u8] = b"Label,Path\nId,patientDetails\nAge,demographics.age\nSmoking Status,lifestyle.smoking\n";

#[test]
fn shipped_standards_verify() {
    let (registry, summary) = FormRegistry::verify_and_load(&shipped_standards()).unwrap();
    assert_eq!(summary.form_count, 2);
    assert_eq!(summary.reserved_count, 4);

    let infertility = registry.get("male-infertility").unwrap();
    assert_eq!(infertility.table.variant_marker(), Some("Smoking Status"));
    assert_eq!(infertility.table.entries()[0].label, "Id");
    assert!(registry.get("male_sexual_dysfunction").is_ok());
}

#[test]
fn loads_table_in_row_order() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        &[("small", "forms/small.csv", SMALL_TABLE, Some("Smoking Status"))],
    );

    let (registry, summary) = FormRegistry::verify_and_load(dir.path()).unwrap();
    let labels: Vec<&str> = registry
        .table("small")
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Id", "Age", "Smoking Status"]);
    assert_eq!(summary.entry_count, 3);
    assert_eq!(summary.reserved_count, 1);
}

#[test]
fn tampered_table_fails_checksum() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), &[("small", "forms/small.csv", SMALL_TABLE, None)]);
    write(
        &dir.path().join("forms/small.csv"),
        b"Label,Path\nAge,demographics.age\n",
    );

    let error = FormRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(error, StandardsError::Sha256Mismatch { .. }));
}

#[test]
fn missing_table_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), &[("small", "forms/small.csv", SMALL_TABLE, None)]);
    fs::remove_file(dir.path().join("forms/small.csv")).unwrap();

    let error = FormRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(error, StandardsError::MissingFile { .. }));
}

#[test]
fn colliding_paths_are_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let table: &[u8] = b"Label,Path\nSex,demographics\nAge,demographics.age\n";
    write_manifest(dir.path(), &[("bad", "forms/bad.csv", table, None)]);

    let error = FormRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(error, StandardsError::InvalidTable { .. }));
}

#[test]
fn duplicate_form_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        &[
            ("small", "forms/a.csv", SMALL_TABLE, None),
            ("Small", "forms/b.csv", SMALL_TABLE, None),
        ],
    );

    let error = FormRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(error, StandardsError::DuplicateForm { .. }));
}

#[test]
fn unsupported_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("manifest.toml"),
        b"[manifest]\nschema = \"other\"\nschema_version = 1\n",
    );

    let error = FormRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(error, StandardsError::InvalidManifest { .. }));
}

#[test]
fn unknown_form_lists_available_names() {
    let (registry, _) = FormRegistry::verify_and_load(&shipped_standards()).unwrap();
    let message = registry.get("female_infertility").unwrap_err().to_string();
    assert!(message.contains("male_infertility"));
    assert!(message.contains("male_sexual_dysfunction"));
}
