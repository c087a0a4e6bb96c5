//! Batch orchestration: extract, segment, score, rank, emit.
//!
//! One strictly sequential pass per run. A document that fails
//! layout extraction is logged and excluded; an empty batch or a
//! batch yielding zero sections terminates the run before any
//! scoring and writes no artifact.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use embed_core::EmbeddingModel;
use relevance_engine::{rank_sections, rank_subsections, Segmenter, SourcedSection};
use shared_types::{
    ExtractedSection, InsightOutput, PersonaContext, RunMetadata, ScoredItem, SubsectionAnalysis,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::config;
use crate::Cli;

/// Output caps applied after ranking.
const TOP_SECTIONS: usize = 20;
const TOP_SUBSECTIONS: usize = 30;

pub fn run(cli: &Cli) -> Result<()> {
    let started = Instant::now();

    let ctx = config::load_persona(cli.config.as_deref())?;
    info!("persona: {}", ctx.persona.describe());
    info!("job to be done: {}", ctx.job.describe());

    let pdf_files = list_pdf_files(&cli.input)?;
    if pdf_files.is_empty() {
        bail!("no PDF documents found in {}", cli.input.display());
    }
    info!("processing {} documents", pdf_files.len());

    // One model for the whole run, shared read-only by both passes
    let model_dir = match &cli.model_dir {
        Some(dir) => dir.clone(),
        None => EmbeddingModel::download()?,
    };
    let model = Arc::new(EmbeddingModel::load(&model_dir)?);

    let (documents, sections) = segment_documents(&pdf_files);
    if sections.is_empty() {
        bail!("no sections extracted from any document");
    }
    info!("extracted {} sections", sections.len());

    let ranked_sections = rank_sections(&sections, &ctx, model.as_ref())?;
    let ranked_subsections = rank_subsections(&sections, &ctx, model.as_ref())?;

    let output = build_output(documents, &ctx, ranked_sections, ranked_subsections);
    write_artifact(&cli.output, &output)?;

    info!(
        "completed in {:.2}s, artifact at {}",
        started.elapsed().as_secs_f32(),
        cli.output.display()
    );
    Ok(())
}

/// PDF paths in the input directory, name-sorted for a stable
/// processing order.
fn list_pdf_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(input_dir)
        .with_context(|| format!("failed to read input directory {}", input_dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Extract and segment every document, isolating per-document
/// failures. Returns the successfully parsed document names and all
/// their sections.
fn segment_documents(pdf_files: &[PathBuf]) -> (Vec<String>, Vec<SourcedSection>) {
    let segmenter = Segmenter::new();
    let mut documents = Vec::new();
    let mut sections = Vec::new();

    for path in pdf_files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match pdf_layout::extract_document(path) {
            Ok(spans) => {
                let segmented = segmenter.segment(&spans);
                info!("{}: {} spans, {} sections", name, spans.len(), segmented.len());
                sections.extend(segmented.into_iter().map(|section| SourcedSection {
                    document: name.clone(),
                    section,
                }));
                documents.push(name);
            }
            Err(error) => {
                warn!("skipping {}: {}", name, error);
            }
        }
    }

    (documents, sections)
}

fn build_output(
    documents: Vec<String>,
    ctx: &PersonaContext,
    ranked_sections: Vec<ScoredItem>,
    ranked_subsections: Vec<ScoredItem>,
) -> InsightOutput {
    let extracted_sections = ranked_sections
        .into_iter()
        .take(TOP_SECTIONS)
        .map(|item| ExtractedSection {
            document: item.document,
            page_number: item.page,
            section_title: item.text,
            importance_rank: item.score as u32,
        })
        .collect();

    let subsection_analysis = ranked_subsections
        .into_iter()
        .take(TOP_SUBSECTIONS)
        .map(|item| SubsectionAnalysis {
            document: item.document,
            page_number: item.page,
            refined_text: item.text,
            importance_rank: item.score as u32,
        })
        .collect();

    InsightOutput {
        metadata: RunMetadata {
            input_documents: documents,
            persona: ctx.persona.describe(),
            job_to_be_done: ctx.job.describe().to_string(),
            processing_timestamp: Utc::now().to_rfc3339(),
        },
        extracted_sections,
        subsection_analysis,
    }
}

fn write_artifact(path: &Path, output: &InsightOutput) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(output)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write artifact {}", path.display()))?;
    Ok(())
}
