//! Persona-aware section extraction and ranking.
//!
//! The pipeline: layout spans are segmented into titled sections,
//! whole sections and refined sentence windows are scored against a
//! persona/job query (embedding similarity times heuristic boosts),
//! and each candidate list gets dense 1-based ranks.
//!
//! The embedding model is injected through
//! [`embed_core::TextEmbedder`]; everything here is deterministic
//! given the same inputs and model version.

pub mod ranking;
pub mod refiner;
pub mod scoring;
pub mod segmenter;
pub mod sentences;

pub use ranking::assign_ranks;
pub use refiner::refine_sections;
pub use scoring::RelevanceScorer;
pub use segmenter::{PatternClassifier, Segmenter, SpanClassifier};

use anyhow::Result;
use embed_core::TextEmbedder;
use shared_types::{PersonaContext, ScoredItem, Section};

/// Section candidates shorter than this are excluded before scoring.
pub const MIN_SECTION_CHARS: usize = 20;

/// Subsection candidates shorter than this are excluded before scoring.
pub const MIN_SUBSECTION_CHARS: usize = 30;

/// A section together with the document it came from.
#[derive(Debug, Clone)]
pub struct SourcedSection {
    pub document: String,
    pub section: Section,
}

/// Score every section against the persona query and assign ranks.
///
/// The returned items carry the section title in `text` and the
/// 1-based rank in `score`; the caller applies any top-K cap.
pub fn rank_sections<E: TextEmbedder>(
    sections: &[SourcedSection],
    ctx: &PersonaContext,
    embedder: &E,
) -> Result<Vec<ScoredItem>> {
    let scorer = RelevanceScorer::for_sections(embedder, ctx)?;

    let mut scored = Vec::new();
    for sourced in sections {
        let text = format!("{} {}", sourced.section.title, sourced.section.content);
        if text.trim().chars().count() < MIN_SECTION_CHARS {
            continue;
        }
        let score = scorer.score(&text, !sourced.section.title.is_empty())?;
        scored.push(ScoredItem {
            document: sourced.document.clone(),
            page: sourced.section.page,
            text: sourced.section.title.clone(),
            score,
        });
    }

    assign_ranks(&mut scored);
    Ok(scored)
}

/// Refine every section into sentence windows, score the windows
/// against the persona query, and assign ranks.
pub fn rank_subsections<E: TextEmbedder>(
    sections: &[SourcedSection],
    ctx: &PersonaContext,
    embedder: &E,
) -> Result<Vec<ScoredItem>> {
    let scorer = RelevanceScorer::for_subsections(embedder, ctx)?;

    let mut scored = Vec::new();
    for subsection in refine_sections(sections) {
        if subsection.text.trim().chars().count() < MIN_SUBSECTION_CHARS {
            continue;
        }
        let score = scorer.score(&subsection.text, false)?;
        scored.push(ScoredItem {
            document: subsection.document,
            page: subsection.page,
            text: subsection.text,
            score,
        });
    }

    assign_ranks(&mut scored);
    Ok(scored)
}
