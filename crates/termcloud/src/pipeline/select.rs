//! Ranking and capping scored elements.

use log::debug;

use super::ScoredElement;

/// Sorts by descending score and keeps the first `max_n` elements
/// (`0` keeps all).
///
/// The sort is stable: elements with equal scores keep their input order.
pub fn select(mut elements: Vec<ScoredElement>, max_n: usize) -> Vec<ScoredElement> {
    elements.sort_by(|a, b| b.score().total_cmp(&a.score()));
    if max_n > 0 && elements.len() > max_n {
        debug!(kept = max_n, discarded = elements.len() - max_n; "Capping cloud elements");
        elements.truncate(max_n);
    }
    elements
}
