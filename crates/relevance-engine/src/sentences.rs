//! Sentence-boundary detection.
//!
//! UAX#29 sentence segmentation via unicode-segmentation. The
//! refiner treats the returned sequence as ordered, finite, and
//! consumed in a single pass.

use unicode_segmentation::UnicodeSegmentation;

/// Split text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminators() {
        let sentences = split_sentences("Revenue grew. Costs fell! Margins improved?");
        assert_eq!(
            sentences,
            vec!["Revenue grew.", "Costs fell!", "Margins improved?"]
        );
    }

    #[test]
    fn test_empty_text_yields_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_single_sentence_without_terminator() {
        let sentences = split_sentences("a fragment with no period");
        assert_eq!(sentences, vec!["a fragment with no period"]);
    }
}
