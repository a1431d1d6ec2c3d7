use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use crf_extract::CrfPipeline;
use crf_ingest::list_documents;
use crf_model::ExtractionContext;
use crf_standards::{FormRegistry, VerifySummary, standards_root};
use tracing::{info, info_span, warn};

use crf_cli::extract::{
    DEFAULT_SUBJECT_ID, DocumentResult, extract_document, render_response, subject_id_from_path, today,
};

use crate::cli::{BatchArgs, ExtractArgs};
use crate::summary::{apply_table_style, print_report};
use crate::types::{BatchResult, DocumentSummary};

fn load_registry(standards_dir: Option<&Path>) -> Result<(FormRegistry, VerifySummary)> {
    let dir = standards_dir.map_or_else(standards_root, Path::to_path_buf);
    FormRegistry::verify_and_load(&dir)
        .with_context(|| format!("load mapping tables from {}", dir.display()))
}

fn pipeline_for(registry: &FormRegistry, form: &str) -> Result<CrfPipeline> {
    let table = registry.table(form)?;
    CrfPipeline::new(table).with_context(|| format!("compile mapping table '{}'", table.name()))
}

pub fn run_extract(args: &ExtractArgs, standards_dir: Option<&Path>) -> Result<()> {
    let (registry, _) = load_registry(standards_dir)?;
    let pipeline = pipeline_for(&registry, &args.form)?;
    let context = ExtractionContext::new(
        args.subject_id
            .clone()
            .unwrap_or_else(|| DEFAULT_SUBJECT_ID.to_string()),
        args.scheduled_date.clone().unwrap_or_else(today),
    )
    .with_form_variant(args.variant);

    let result = extract_document(&args.input, &pipeline, &context)?;
    let json = render_response(&result.document, !args.compact)?;
    match &args.output {
        Some(path) => fs::write(path, format!("{json}\n"))
            .with_context(|| format!("write {}", path.display()))?,
        None => println!("{json}"),
    }
    if args.summary {
        print_report(&result.report, result.document.leaf_count());
    }
    Ok(())
}

pub fn run_batch(args: &BatchArgs, standards_dir: Option<&Path>) -> Result<BatchResult> {
    let span = info_span!("batch", form = %args.form, folder = %args.folder.display());
    let _guard = span.enter();

    let (registry, _) = load_registry(standards_dir)?;
    let pipeline = pipeline_for(&registry, &args.form)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.folder.join("output"));
    let scheduled_date = args.scheduled_date.clone().unwrap_or_else(today);

    let files = list_documents(&args.folder)?;
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let mut documents = Vec::new();
    let mut errors = Vec::new();
    let mut written: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in &files {
        let subject_id = subject_id_from_path(path);
        if let Some(first) = written.get(&subject_id) {
            warn!(
                path = %path.display(),
                subject_id = %subject_id,
                "document skipped: duplicate subject id"
            );
            errors.push(format!(
                "{}: subject id '{subject_id}' already written from {}",
                path.display(),
                first.display()
            ));
            continue;
        }
        let context = ExtractionContext::new(subject_id.clone(), scheduled_date.clone())
            .with_form_variant(args.variant);
        let output = output_dir.join(format!("{subject_id}.json"));
        let result = match extract_document(path, &pipeline, &context)
            .and_then(|result| write_response(&result, &output).map(|()| result))
        {
            Ok(result) => result,
            Err(error) => {
                warn!(path = %path.display(), "document skipped: {error:#}");
                errors.push(format!("{}: {error:#}", path.display()));
                continue;
            }
        };
        written.insert(subject_id.clone(), path.clone());
        documents.push(DocumentSummary {
            subject_id,
            output,
            found: result.report.found.len(),
            searched: result.report.searched_count(),
            blank: result.report.blank.len(),
            values: result.document.leaf_count(),
            form_variant: result.report.form_variant,
        });
    }

    info!(
        documents = documents.len(),
        failed = errors.len(),
        "batch complete"
    );
    let has_errors = !errors.is_empty();
    Ok(BatchResult {
        form: pipeline.table_name().to_string(),
        output_dir,
        documents,
        errors,
        has_errors,
    })
}

fn write_response(result: &DocumentResult, output: &Path) -> Result<()> {
    let json = render_response(&result.document, true)?;
    fs::write(output, format!("{json}\n")).with_context(|| format!("write {}", output.display()))
}

pub fn run_forms(standards_dir: Option<&Path>) -> Result<()> {
    let (registry, _) = load_registry(standards_dir)?;
    let mut table = Table::new();
    table.set_header(vec!["Form", "Title", "Entries", "Variant marker"]);
    apply_table_style(&mut table);
    for form in registry.forms() {
        table.add_row(vec![
            form.name.clone(),
            form.title.clone(),
            form.table.len().to_string(),
            form.table.variant_marker().unwrap_or("-").to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_verify(standards_dir: Option<&Path>) -> Result<()> {
    let (_, summary) = load_registry(standards_dir)?;
    println!("Standards: {}", summary.standards_dir.display());
    println!("Forms: {}", summary.form_count);
    println!("Entries: {}", summary.entry_count);
    println!("Reserved entries: {}", summary.reserved_count);
    println!("All checksums verified.");
    Ok(())
}
