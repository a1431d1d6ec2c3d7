//! Integration tests for document extraction against the bundled standards.

use std::fs;
use std::path::PathBuf;

use crf_cli::extract::{extract_document, render_response};
use crf_extract::CrfPipeline;
use crf_model::{CrfDocument, CrfNode, ExtractionContext};
use crf_standards::FormRegistry;

const INFERTILITY_CRF: &str = "\
MALE INFERTILITY CLINICAL RESEARCH FORM
Id: 0042
Scheduled Date: 01/01/2020
Full Name: John  Doe
Age: 34
Occupation: Software engineer
Duration of Marriage: 4 years
Duration of Infertility: 3 years
Type of Infertility: ☑ Primary ☐ Secondary
Smoking Status: ☐ Never ☑ Current ☐ Former
Alcohol Consumption: ☐ None ☑ Occasional ☐ Regular
Height (cm): 176
Weight (kg): 82
Sperm Concentration (million/mL): 12.5
Total Motility (%): 38
Diagnosis: Oligoasthenozoospermia — mild
Treatment Plan: ________________
";

fn pipeline(form: &str) -> CrfPipeline {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards");
    let (registry, _) = FormRegistry::verify_and_load(&dir).unwrap();
    CrfPipeline::new(registry.table(form).unwrap()).unwrap()
}

fn context() -> ExtractionContext {
    ExtractionContext::new("P-0042", "03/27/2024")
}

#[test]
fn extracts_male_infertility_form() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("P-0042.txt");
    fs::write(&path, INFERTILITY_CRF).unwrap();

    let result = extract_document(&path, &pipeline("male_infertility"), &context()).unwrap();

    assert_eq!(result.report.found.len(), 14);
    assert_eq!(result.report.searched_count(), 38);
    assert!(result.report.form_variant);
    insta::assert_json_snapshot!(result.document, @r#"
    {
      "patientDetails": "P-0042",
      "scheduledDate": "03/27/2024",
      "demographics": {
        "fullName": "John Doe",
        "age": "34",
        "occupation": "Software engineer"
      },
      "history": {
        "marriageDuration": "4 years",
        "infertilityDuration": "3 years",
        "infertilityType": "Primary"
      },
      "lifestyle": {
        "smoking": "Current",
        "alcohol": "Occasional"
      },
      "examination": {
        "height": "176",
        "weight": "82"
      },
      "semenAnalysis": {
        "concentration": "12.5",
        "totalMotility": "38"
      },
      "assessment": {
        "diagnosis": "Oligoasthenozoospermia - mild",
        "treatmentPlan": ""
      },
      "crfType": true
    }
    "#);
}

#[test]
fn sexual_dysfunction_form_without_marker_is_not_flagged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crf.txt");
    fs::write(
        &path,
        "Chief Complaint: Weak erections\nSymptoms: ☑ Low libido ☑ Fatigue ☐ Pain\nIIEF-5 Score: 14\n",
    )
    .unwrap();

    let result =
        extract_document(&path, &pipeline("male-sexual-dysfunction"), &context()).unwrap();
    let doc = &result.document;
    assert_eq!(
        doc.text_at("presentingComplaint.symptoms"),
        Some("Low libido, Fatigue")
    );
    assert_eq!(doc.text_at("scores.iief5"), Some("14"));
    assert_eq!(doc.get("crfType").and_then(CrfNode::as_flag), Some(false));
}

#[test]
fn unreadable_document_names_the_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.pdf");
    fs::write(&path, b"not a pdf").unwrap();

    let error = extract_document(&path, &pipeline("male_infertility"), &context()).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("read input document"));
    assert!(message.contains("scan.pdf"));
}

#[test]
fn response_wraps_document_in_data() {
    let mut doc = CrfDocument::new();
    doc.insert("scheduledDate", CrfNode::text("03/27/2024"));
    doc.insert("crfType", CrfNode::flag(false));

    let json = render_response(&doc, false).unwrap();
    assert_eq!(
        json,
        r#"{"data":{"scheduledDate":"03/27/2024","crfType":false}}"#
    );
}
