//! Dense rank assignment over scored candidates.

use shared_types::ScoredItem;

/// Sort descending by score and overwrite each score with its
/// 1-based position.
///
/// The sort is stable, so exact ties (common for degenerate or empty
/// candidates) keep their original relative order. NaN scores compare
/// as equal and are likewise left in place. No truncation happens
/// here; top-K caps are the caller's concern.
pub fn assign_ranks(items: &mut [ScoredItem]) {
    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (index, item) in items.iter_mut().enumerate() {
        item.score = (index + 1) as f32;
    }
}
