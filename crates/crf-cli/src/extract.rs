//! Document-level extraction shared by the `extract` and `batch` commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use crf_extract::{CrfPipeline, ExtractionReport};
use crf_ingest::read_document_text;
use crf_model::{CrfDocument, ExtractionContext};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::logging::redact_value;

/// Default subject identifier when the caller supplies none.
pub const DEFAULT_SUBJECT_ID: &str = "patientId";

/// Date format used for the scheduled date.
pub const SCHEDULED_DATE_FORMAT: &str = "%m/%d/%Y";

/// Outcome of extracting one document.
#[derive(Debug, Clone)]
pub struct DocumentResult {
    pub source: PathBuf,
    pub document: CrfDocument,
    pub report: ExtractionReport,
}

/// Response body written for one document.
#[derive(Debug, Serialize)]
pub struct ExtractResponse<'a> {
    pub data: &'a CrfDocument,
}

/// Today's date in the scheduled-date format.
pub fn today() -> String {
    chrono::Local::now()
        .format(SCHEDULED_DATE_FORMAT)
        .to_string()
}

/// Read `path` and run `pipeline` over its text.
///
/// Ingest failures and mapping failures carry different context so the
/// caller can tell a bad input file from a bad mapping table.
pub fn extract_document(
    path: &Path,
    pipeline: &CrfPipeline,
    context: &ExtractionContext,
) -> Result<DocumentResult> {
    let span = info_span!("document", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let text = read_document_text(path)
        .with_context(|| format!("read input document {}", path.display()))?;
    let outcome = pipeline.run_with_report(&text, context).with_context(|| {
        format!(
            "apply mapping table '{}' to {}",
            pipeline.table_name(),
            path.display()
        )
    })?;

    info!(
        found = outcome.report.found.len(),
        searched = outcome.report.searched_count(),
        duration_ms = start.elapsed().as_millis(),
        "document extracted"
    );
    Ok(DocumentResult {
        source: path.to_path_buf(),
        document: outcome.document,
        report: outcome.report,
    })
}

/// Serialize the response body for `document`.
pub fn render_response(document: &CrfDocument, pretty: bool) -> Result<String> {
    let response = ExtractResponse { data: document };
    let serialized = if pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    };
    let json = serialized.context("serialize extracted document")?;
    debug!(document = %redact_value(&json), "rendered response");
    Ok(json)
}

/// Subject identifier for a batch document: its file stem.
pub fn subject_id_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_SUBJECT_ID.to_string())
}
