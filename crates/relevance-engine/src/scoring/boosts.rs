//! Additive boost rules applied on top of embedding similarity.
//!
//! Each rule contributes an independent delta; [`boost_factor`] sums
//! them onto a base of 1.0 and the scorer multiplies the result with
//! the cosine similarity.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::PersonaContext;

/// Delta for a candidate that carries a non-empty title.
pub const TITLE_DELTA: f32 = 0.2;

/// Delta for a candidate containing any persona/job keyword.
pub const CONTEXT_KEYWORD_DELTA: f32 = 0.3;

/// Delta per archetype keyword found, per matched archetype.
pub const ARCHETYPE_KEYWORD_DELTA: f32 = 0.1;

/// Delta for quantitative content (percentages, currency, decimals).
pub const QUANTITATIVE_DELTA: f32 = 0.2;

/// Delta for list or ordinal markers.
pub const LIST_MARKER_DELTA: f32 = 0.15;

/// High-frequency words removed from persona/job fields before
/// keyword matching.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Keyword terms must be longer than this many characters.
const MIN_TERM_CHARS: usize = 2;

/// Per-archetype vocabularies. An archetype participates when its
/// name appears anywhere in the persona description.
const ARCHETYPE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "researcher",
        &["study", "analysis", "method", "result", "conclusion", "hypothesis"],
    ),
    (
        "analyst",
        &["data", "trend", "performance", "metric", "analysis", "insight"],
    ),
    (
        "student",
        &["concept", "definition", "example", "theory", "principle", "understand"],
    ),
    (
        "investor",
        &["revenue", "profit", "growth", "risk", "market", "financial"],
    ),
    (
        "manager",
        &["strategy", "objective", "plan", "goal", "implementation", "process"],
    ),
];

lazy_static! {
    /// Percentages ("12%", "3.5%"), currency ("$400"), decimals ("1.8").
    static ref QUANTITATIVE: Regex = Regex::new(r"\d+\.?\d*%|\$\d+|\d+\.\d+").unwrap();

    /// Bullet characters, a numbered prefix at the start of the text,
    /// or ordinal words. Matched against lowercased text.
    static ref LIST_MARKER: Regex = Regex::new(r"[•\-\*]\s|^\d+\.|first|second|third").unwrap();
}

/// Lowercased keyword terms drawn from every persona/job text field,
/// stop-word-filtered. Computed once per ranking pass.
pub fn context_terms(ctx: &PersonaContext) -> Vec<String> {
    let mut terms = Vec::new();
    for field in ctx.text_fields() {
        let lowered = field.to_lowercase();
        for word in lowered.split_whitespace() {
            if word.chars().count() > MIN_TERM_CHARS && !STOP_WORDS.contains(&word) {
                terms.push(word.to_string());
            }
        }
    }
    terms
}

/// True when the candidate contains any of the persona/job terms.
pub fn has_context_keyword(text_lower: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| text_lower.contains(term.as_str()))
}

/// Cumulative archetype delta: for each archetype named in the
/// persona, +0.1 per vocabulary keyword found in the candidate.
/// Deliberately uncapped.
pub fn archetype_boost(text_lower: &str, persona_lower: &str) -> f32 {
    let mut boost = 0.0;
    for (archetype, keywords) in ARCHETYPE_KEYWORDS {
        if persona_lower.contains(archetype) {
            let hits = keywords
                .iter()
                .filter(|keyword| text_lower.contains(*keyword))
                .count();
            boost += hits as f32 * ARCHETYPE_KEYWORD_DELTA;
        }
    }
    boost
}

pub fn has_quantitative_pattern(text: &str) -> bool {
    QUANTITATIVE.is_match(text)
}

pub fn has_list_markers(text_lower: &str) -> bool {
    LIST_MARKER.is_match(text_lower)
}

/// Combine every rule into the multiplicative boost factor.
pub fn boost_factor(text: &str, titled: bool, terms: &[String], persona_lower: &str) -> f32 {
    let text_lower = text.to_lowercase();
    let mut boost = 1.0;

    if titled {
        boost += TITLE_DELTA;
    }
    if has_context_keyword(&text_lower, terms) {
        boost += CONTEXT_KEYWORD_DELTA;
    }
    boost += archetype_boost(&text_lower, persona_lower);
    if has_quantitative_pattern(text) {
        boost += QUANTITATIVE_DELTA;
    }
    if has_list_markers(&text_lower) {
        boost += LIST_MARKER_DELTA;
    }

    boost
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: &str, domain: &str, task: &str) -> PersonaContext {
        serde_json::from_str(&format!(
            r#"{{
                "persona": {{"role": "{role}", "domain": "{domain}"}},
                "job_to_be_done": {{"task_description": "{task}"}}
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_context_terms_filter_stop_words_and_short_terms() {
        let ctx = ctx("HR of a firm", "Forms", "manage the onboarding");
        let terms = context_terms(&ctx);
        assert!(terms.contains(&"forms".to_string()));
        assert!(terms.contains(&"onboarding".to_string()));
        // "of", "a", "the" are stop words; "hr" is too short
        assert!(!terms.contains(&"the".to_string()));
        assert!(!terms.contains(&"hr".to_string()));
    }

    #[test]
    fn test_context_keyword_matches_substring() {
        let terms = vec!["growth".to_string()];
        assert!(has_context_keyword("quarterly growth was strong", &terms));
        assert!(!has_context_keyword("the weather was sunny", &terms));
    }

    #[test]
    fn test_archetype_boost_accumulates_per_keyword() {
        let boost = archetype_boost(
            "revenue and profit rose while risk fell",
            "investor in finance",
        );
        // revenue, profit, risk: three hits
        assert!((boost - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_archetype_boost_requires_archetype_in_persona() {
        let boost = archetype_boost("revenue and profit rose", "travel planner");
        assert_eq!(boost, 0.0);
    }

    #[test]
    fn test_quantitative_patterns() {
        assert!(has_quantitative_pattern("grew 12% this quarter"));
        assert!(has_quantitative_pattern("costs of $400 per unit"));
        assert!(has_quantitative_pattern("a ratio of 1.8"));
        assert!(!has_quantitative_pattern("grew strongly this quarter"));
    }

    #[test]
    fn test_list_markers() {
        assert!(has_list_markers("• keep receipts"));
        assert!(has_list_markers("first, gather the documents"));
        assert!(has_list_markers("1. preheat the oven"));
        assert!(!has_list_markers("a plain sentence without markers"));
    }

    #[test]
    fn test_boost_factor_sums_rules() {
        let ctx = ctx("Investor", "Finance", "assess quarterly growth");
        let terms = context_terms(&ctx);
        let boost = boost_factor(
            "Revenue grew 12% this quarter due to strong demand",
            true,
            &terms,
            "investor in finance",
        );
        // title 0.2 + archetype "revenue" 0.1 + quantitative 0.2
        assert!((boost - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_boost_factor_exact_sum() {
        let ctx = ctx("Investor", "Finance", "track revenue growth");
        let terms = context_terms(&ctx);
        let boost = boost_factor(
            "Revenue grew 12% this quarter",
            false,
            &terms,
            "investor in finance",
        );
        // context keyword ("revenue") 0.3, archetype hits revenue 0.1,
        // quantitative 0.2, no title, no list markers
        assert!((boost - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_neutral_text_gets_no_boost() {
        let ctx = ctx("Investor", "Finance", "assess growth");
        let terms = context_terms(&ctx);
        let boost = boost_factor("The weather was sunny that day", false, &terms, "investor");
        assert!((boost - 1.0).abs() < 1e-6);
    }
}
