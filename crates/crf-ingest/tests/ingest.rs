//! Tests for document reading and discovery.

use std::fs;
use std::path::Path;

use crf_ingest::{IngestError, list_documents, read_document_text};

fn touch(dir: &Path, name: &str, contents: &[u8]) {
    fs::write(dir.join(name), contents).expect("write file");
}

#[test]
fn reads_plain_text_with_normalized_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "crf.txt", b"Age: 34\r\nSex: Male\r\n");

    let text = read_document_text(&dir.path().join("crf.txt")).unwrap();
    assert_eq!(text, "Age: 34\nSex: Male\n");
}

#[test]
fn corrupt_pdf_is_an_upstream_failure() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "broken.pdf", b"%PDF-1.4 truncated");

    let error = read_document_text(&dir.path().join("broken.pdf")).unwrap_err();
    assert!(matches!(error, IngestError::Pdf { .. }));
    assert!(error.to_string().contains("broken.pdf"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = read_document_text(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(error, IngestError::FileRead { .. }));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "crf.docx", b"binary");
    let error = read_document_text(&dir.path().join("crf.docx")).unwrap_err();
    assert!(matches!(error, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn invalid_utf8_text_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "crf.txt", &[0xff, 0xfe, 0x00]);
    let error = read_document_text(&dir.path().join("crf.txt")).unwrap_err();
    assert!(matches!(error, IngestError::InvalidText { .. }));
}

#[test]
fn lists_documents_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "b.pdf", b"");
    touch(dir.path(), "a.TXT", b"");
    touch(dir.path(), "notes.md", b"");
    fs::create_dir(dir.path().join("nested.pdf")).unwrap();

    let files = list_documents(dir.path()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.TXT", "b.pdf"]);
}

#[test]
fn listing_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let error = list_documents(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(error, IngestError::DirectoryNotFound { .. }));
}
