//! CRF extraction pipeline.
//!
//! Runs every extractable entry of a mapping table against one document's
//! text, assembles the raw values into a nested document, and cleans the
//! result. A run owns all of its state; a [`CrfPipeline`] only holds the
//! compiled label patterns and can be shared across threads.

use crf_model::{
    CrfDocument, CrfNode, ExtractionContext, FORM_VARIANT_PATH, MappingTable, Result,
    SCHEDULED_DATE_PATH, SUBJECT_ID_PATH,
};
use tracing::{debug, info, info_span, trace};

use crate::assemble::assign;
use crate::clean::clean_document;
use crate::field::FieldPattern;

/// What happened to each entry of the table during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Labels whose value was written to the document.
    pub found: Vec<String>,
    /// Labels that did not occur in the text.
    pub missing: Vec<String>,
    /// Labels that occurred with nothing after them.
    pub blank: Vec<String>,
    /// Reserved labels filled from context instead of text.
    pub reserved: Vec<String>,
    /// Final value written at the form-variant path.
    pub form_variant: bool,
}

impl ExtractionReport {
    pub fn extracted_count(&self) -> usize {
        self.found.len()
    }

    pub fn searched_count(&self) -> usize {
        self.found.len() + self.missing.len() + self.blank.len()
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub document: CrfDocument,
    pub report: ExtractionReport,
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    pattern: FieldPattern,
    path: String,
    is_marker: bool,
}

#[derive(Debug, Clone)]
pub struct CrfPipeline {
    table_name: String,
    entries: Vec<CompiledEntry>,
    reserved: Vec<String>,
}

impl CrfPipeline {
    /// Compile the label patterns of `table`.
    pub fn new(table: &MappingTable) -> Result<Self> {
        let mut entries = Vec::with_capacity(table.len());
        let mut reserved = Vec::new();
        for entry in table.entries() {
            if entry.is_reserved() {
                reserved.push(entry.label.clone());
                continue;
            }
            entries.push(CompiledEntry {
                pattern: FieldPattern::new(&entry.label)?,
                path: entry.path.clone(),
                is_marker: table.is_marker(&entry.label),
            });
        }
        Ok(Self {
            table_name: table.name().to_string(),
            entries,
            reserved,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Extract a cleaned CRF document from `text`.
    pub fn run(&self, text: &str, context: &ExtractionContext) -> Result<CrfDocument> {
        self.run_with_report(text, context)
            .map(|outcome| outcome.document)
    }

    /// Extract a cleaned CRF document and report per-label outcomes.
    pub fn run_with_report(
        &self,
        text: &str,
        context: &ExtractionContext,
    ) -> Result<ExtractionOutcome> {
        let span = info_span!("crf_extract", form = %self.table_name);
        let _guard = span.enter();

        let mut document = CrfDocument::new();
        let mut report = ExtractionReport {
            reserved: self.reserved.clone(),
            ..ExtractionReport::default()
        };

        assign(
            &mut document,
            SUBJECT_ID_PATH,
            CrfNode::text(context.subject_id.as_str()),
        )?;
        assign(
            &mut document,
            SCHEDULED_DATE_PATH,
            CrfNode::text(context.scheduled_date.as_str()),
        )?;

        let mut marker_seen = false;
        for entry in &self.entries {
            let label = entry.pattern.label();
            let Some(raw) = entry.pattern.extract(text) else {
                trace!(label, "label not found");
                report.missing.push(label.to_string());
                continue;
            };
            if entry.is_marker {
                marker_seen = true;
            }
            if raw.is_empty() {
                debug!(label, "label found with blank value");
                report.blank.push(label.to_string());
                continue;
            }
            debug!(label, path = %entry.path, value_len = raw.len(), "field extracted");
            assign(&mut document, &entry.path, CrfNode::text(raw))?;
            report.found.push(label.to_string());
        }

        let form_variant = context.form_variant.unwrap_or(marker_seen);
        assign(&mut document, FORM_VARIANT_PATH, CrfNode::flag(form_variant))?;
        report.form_variant = form_variant;

        let document = clean_document(&document);
        info!(
            found = report.found.len(),
            missing = report.missing.len(),
            blank = report.blank.len(),
            form_variant,
            "extraction complete"
        );
        Ok(ExtractionOutcome { document, report })
    }
}

/// One-shot extraction without reusing compiled patterns.
pub fn extract_crf(
    text: &str,
    table: &MappingTable,
    context: &ExtractionContext,
) -> Result<CrfDocument> {
    CrfPipeline::new(table)?.run(text, context)
}
