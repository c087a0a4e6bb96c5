//! Persona-aware relevance scoring.
//!
//! One scorer per ranking pass: the persona/job query string is built
//! and embedded once at construction, then every candidate costs one
//! embedding call plus the boost rules. Score = cosine similarity in
//! [-1, 1] times the boost factor. Boosts are positive-only, so a
//! negative-similarity candidate gets amplified downward rather than
//! corrected; that asymmetry is intentional.

pub mod boosts;

use anyhow::Result;
use embed_core::{cosine_similarity, TextEmbedder};
use shared_types::PersonaContext;

/// Scores candidate texts against one persona/job query.
pub struct RelevanceScorer<'a, E: TextEmbedder> {
    embedder: &'a E,
    query_embedding: Vec<f32>,
    context_terms: Vec<String>,
    persona_lower: String,
}

impl<'a, E: TextEmbedder> RelevanceScorer<'a, E> {
    /// Scorer for the whole-section pass.
    pub fn for_sections(embedder: &'a E, ctx: &PersonaContext) -> Result<Self> {
        let query = format!("{} needs to {}", ctx.persona.describe(), ctx.job.describe());
        Self::with_query(embedder, ctx, &query)
    }

    /// Scorer for the refined-subsection pass.
    pub fn for_subsections(embedder: &'a E, ctx: &PersonaContext) -> Result<Self> {
        let query = format!(
            "{} working on {}",
            ctx.persona.describe(),
            ctx.job.describe()
        );
        Self::with_query(embedder, ctx, &query)
    }

    fn with_query(embedder: &'a E, ctx: &PersonaContext, query: &str) -> Result<Self> {
        tracing::debug!("scoring query: {}", query);
        let query_embedding = embedder.embed(query)?;
        Ok(Self {
            embedder,
            query_embedding,
            context_terms: boosts::context_terms(ctx),
            persona_lower: ctx.persona.describe().to_lowercase(),
        })
    }

    /// Score one candidate. `titled` marks candidates that carry a
    /// non-empty heading. Length filtering happens in the caller.
    pub fn score(&self, text: &str, titled: bool) -> Result<f32> {
        let candidate = self.embedder.embed(text)?;
        let similarity = cosine_similarity(&self.query_embedding, &candidate);
        let boost = boosts::boost_factor(text, titled, &self.context_terms, &self.persona_lower);
        Ok(similarity * boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in: a bag of first letters, so texts that
    /// share words share vector mass and disjoint texts stay
    /// orthogonal.
    struct LetterBagEmbedder;

    impl TextEmbedder for LetterBagEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let mut v = vec![0.0f32; 26];
            for word in text.to_lowercase().split_whitespace() {
                if let Some(c) = word.chars().find(char::is_ascii_lowercase) {
                    v[(c as u8 - b'a') as usize] += 1.0;
                }
            }
            Ok(v)
        }

        fn dimension(&self) -> usize {
            26
        }
    }

    fn investor_ctx() -> PersonaContext {
        serde_json::from_str(
            r#"{
                "persona": {"role": "Investor", "domain": "Finance"},
                "job_to_be_done": {"task_description": "assess quarterly growth"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let ctx = investor_ctx();
        let scorer = RelevanceScorer::for_sections(&LetterBagEmbedder, &ctx).unwrap();
        let a = scorer
            .score("Revenue grew 12% this quarter due to strong demand", true)
            .unwrap();
        let b = scorer
            .score("Revenue grew 12% this quarter due to strong demand", true)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_title_changes_score() {
        let ctx = investor_ctx();
        let scorer = RelevanceScorer::for_sections(&LetterBagEmbedder, &ctx).unwrap();
        let text = "quarterly growth assessment for the investor";
        let titled = scorer.score(text, true).unwrap();
        let untitled = scorer.score(text, false).unwrap();
        // Positive similarity here, so the title delta raises the score
        assert!(titled > untitled);
    }

    #[test]
    fn test_query_overlap_beats_disjoint_text() {
        let ctx = investor_ctx();
        let scorer = RelevanceScorer::for_subsections(&LetterBagEmbedder, &ctx).unwrap();
        let on_topic = scorer
            .score("assess quarterly growth of the finance business", false)
            .unwrap();
        let off_topic = scorer.score("llamas maintain herd hierarchies", false).unwrap();
        assert!(on_topic > off_topic);
    }
}
