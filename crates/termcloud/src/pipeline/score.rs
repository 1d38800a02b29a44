//! Raw scoring and normalization to shares of the total.

use log::{debug, warn};

use super::{CloudElement, ScoredElement};
use crate::{error::TermCloudError, strategy::Scorer};

/// Scores every element and divides by the total, so scores sum to 1.
///
/// Negative, NaN or infinite raw scores are treated as 0. An empty input
/// yields an empty output.
///
/// # Errors
///
/// Returns [`TermCloudError::DegenerateScore`] when the total of a
/// non-empty input is zero.
pub fn score(
    elements: Vec<CloudElement>,
    scorer: &dyn Scorer,
) -> Result<Vec<ScoredElement>, TermCloudError> {
    if elements.is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<f64> = elements
        .iter()
        .map(|element| {
            let value = scorer.score(element.text(), element.records());
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                warn!(text = element.text(), score = value; "Ignoring invalid raw score");
                0.0
            }
        })
        .collect();

    let total: f64 = raw.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(TermCloudError::DegenerateScore);
    }
    debug!(elements = elements.len(), total; "Scores normalized");

    Ok(elements
        .into_iter()
        .zip(raw)
        .map(|(element, value)| ScoredElement::new(element, value / total))
        .collect())
}
