//! Sentence-window refinement of section content.
//!
//! Slides a window of up to three sentences, advancing by two, over
//! each section's content; windows overlap by one sentence. Each
//! surviving window is cleaned and capped at 500 characters.

use shared_types::Subsection;

use crate::sentences::split_sentences;
use crate::SourcedSection;

/// Sections whose trimmed content is shorter than this are skipped.
pub const MIN_CONTENT_CHARS: usize = 50;

/// Raw windows shorter than this (trimmed) are discarded.
pub const MIN_WINDOW_CHARS: usize = 30;

/// Maximum sentences per window.
const WINDOW_SENTENCES: usize = 3;

/// Sentences advanced between windows.
const WINDOW_STEP: usize = 2;

/// Upper bound on refined text length, ellipsis included.
pub const MAX_REFINED_CHARS: usize = 500;

const ELLIPSIS: &str = "...";

/// Refine every section into cleaned sentence windows tagged with
/// their source document and page.
pub fn refine_sections(sections: &[SourcedSection]) -> Vec<Subsection> {
    let mut subsections = Vec::new();
    for sourced in sections {
        for text in refine_content(&sourced.section.content) {
            subsections.push(Subsection {
                document: sourced.document.clone(),
                page: sourced.section.page,
                text,
            });
        }
    }
    subsections
}

/// Refine one section's content into ordered window texts.
pub fn refine_content(content: &str) -> Vec<String> {
    if content.trim().chars().count() < MIN_CONTENT_CHARS {
        return Vec::new();
    }

    let sentences = split_sentences(content);
    let mut windows = Vec::new();
    let mut start = 0;

    while start < sentences.len() {
        let end = (start + WINDOW_SENTENCES).min(sentences.len());
        let window = sentences[start..end].join(" ");
        if window.trim().chars().count() >= MIN_WINDOW_CHARS {
            windows.push(refine_text(&window));
        }
        start += WINDOW_STEP;
    }

    windows
}

/// Clean one window: collapse whitespace runs, drop characters
/// outside the word/whitespace/punctuation allow-list, capitalize
/// the first character, truncate to the length cap with an ellipsis.
pub fn refine_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut last_was_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                cleaned.push(' ');
            }
            last_was_space = true;
        } else if is_allowed(c) {
            cleaned.push(c);
            last_was_space = false;
        }
    }

    let trimmed = cleaned.trim();
    let mut chars = trimmed.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };

    if capitalized.chars().count() > MAX_REFINED_CHARS {
        let head: String = capitalized
            .chars()
            .take(MAX_REFINED_CHARS - ELLIPSIS.len())
            .collect();
        format!("{head}{ELLIPSIS}")
    } else {
        capitalized
    }
}

/// Word characters plus the retained punctuation set.
fn is_allowed(c: char) -> bool {
    c.is_alphanumeric()
        || c == '_'
        || matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::Section;

    #[test]
    fn test_short_content_is_skipped() {
        assert!(refine_content("too short to refine").is_empty());
    }

    #[test]
    fn test_windows_advance_by_two_and_span_three() {
        let content = "One alpha sentence sits here. Two beta sentences follow on. \
                       Three gamma sentences arrive now. Four delta sentences are done. \
                       Five epsilon sentences conclude everything.";
        let windows = refine_content(content);

        // Starts at sentences 0, 2, 4
        assert_eq!(windows.len(), 3);
        assert!(windows[0].starts_with("One alpha sentence sits here."));
        assert!(windows[0].contains("Three gamma"));
        assert!(windows[1].starts_with("Three gamma"));
        assert!(windows[2].starts_with("Five epsilon"));
    }

    #[test]
    fn test_refined_text_is_capitalized() {
        assert_eq!(
            refine_text("the quick brown fox jumped over"),
            "The quick brown fox jumped over"
        );
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(
            refine_text("spread   across\t\tmany\n\nlines"),
            "Spread across many lines"
        );
    }

    #[test]
    fn test_disallowed_characters_are_stripped() {
        assert_eq!(
            refine_text("profit* rose <b>sharply</b> & fast"),
            "Profit rose bsharplyb fast"
        );
    }

    #[test]
    fn test_punctuation_allow_list_is_kept() {
        assert_eq!(
            refine_text("first, second; third: done (really) - yes!"),
            "First, second; third: done (really) - yes!"
        );
    }

    #[test]
    fn test_long_window_is_truncated_with_ellipsis() {
        let long = "word ".repeat(200);
        let refined = refine_text(&long);
        assert_eq!(refined.chars().count(), MAX_REFINED_CHARS);
        assert!(refined.ends_with("..."));
    }

    #[test]
    fn test_refined_text_never_starts_with_whitespace() {
        let refined = refine_text("   leading space then plenty of text");
        assert!(!refined.starts_with(char::is_whitespace));
    }

    #[test]
    fn test_refine_sections_tags_document_and_page() {
        let mut section = Section::new("Growth", 7, None);
        section.push_content(
            "Revenue grew strongly across the year. Costs were held flat throughout. \
             Margins therefore expanded considerably.",
        );
        let sections = vec![SourcedSection {
            document: "annual.pdf".to_string(),
            section,
        }];

        let subsections = refine_sections(&sections);
        assert!(!subsections.is_empty());
        assert!(subsections.iter().all(|s| s.document == "annual.pdf"));
        assert!(subsections.iter().all(|s| s.page == 7));
    }
}
