//! Font size and color assignment.

use log::trace;

use super::{ScoredElement, StyledElement};
use crate::strategy::{Colorer, ElementContext, MIN_FONT_SIZE, Sizer, max_font_size};

/// Width and height of the canvas the default font sizes are tuned for.
const REFERENCE_EXTENT: f64 = 300.0;

/// The scaling constant for a `width × height` canvas.
///
/// ```
/// # use termcloud::pipeline::scaling;
/// assert_eq!(scaling(600.0, 900.0), 2.0);
/// ```
pub fn scaling(width: f64, height: f64) -> f64 {
    width.min(height) / REFERENCE_EXTENT
}

/// Styles elements in rank order.
///
/// Sizes returned by `sizer` are clamped to `[12, max(12, 72 × scaling)]`;
/// a size that is not a finite number becomes the minimum.
pub fn map_attributes(
    elements: Vec<ScoredElement>,
    sizer: &dyn Sizer,
    colorer: &dyn Colorer,
    scaling: f64,
) -> Vec<StyledElement> {
    let upper = max_font_size(scaling);
    elements
        .into_iter()
        .enumerate()
        .map(|(rank, scored)| {
            let context = ElementContext {
                rank,
                score: scored.score(),
                scaling,
                text: scored.text(),
                records: scored.records(),
            };
            let raw = sizer.size(&context);
            let size = if raw.is_finite() {
                raw.clamp(MIN_FONT_SIZE, upper)
            } else {
                MIN_FONT_SIZE
            };
            let color = colorer.color(&context);
            trace!(text = scored.text(), rank, size; "Styled element");
            StyledElement::new(scored, size, color, rank)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use termcloud_core::color::{Color, Palette};

    use super::*;
    use crate::{
        pipeline::CloudElement,
        strategy::{LogSizer, RankColorer},
    };

    fn scored(text: &str, score: f64) -> ScoredElement {
        ScoredElement::new(CloudElement::new(text, Vec::new()), score)
    }

    #[test]
    fn test_scaling_uses_shorter_side() {
        assert_approx_eq!(f64, scaling(300.0, 300.0), 1.0);
        assert_approx_eq!(f64, scaling(1200.0, 150.0), 0.5);
    }

    #[test]
    fn test_ranks_follow_input_order() {
        let styled = map_attributes(
            vec![scored("a", 0.6), scored("b", 0.4)],
            &LogSizer,
            &RankColorer::default(),
            1.0,
        );
        assert_eq!(styled[0].rank(), 0);
        assert_eq!(styled[1].rank(), 1);
        assert_eq!(styled[0].color(), Palette::default().pick(0));
        assert!(styled[0].size() > styled[1].size());
    }

    #[test]
    fn test_sizes_are_clamped() {
        let huge = |_: &ElementContext<'_>| 1e6;
        let tiny = |_: &ElementContext<'_>| -5.0;
        let nan = |_: &ElementContext<'_>| f64::NAN;
        let colorer = |_: &ElementContext<'_>| Color::default();

        let size_with = |sizer: &dyn Sizer, scaling: f64| {
            map_attributes(vec![scored("a", 1.0)], sizer, &colorer, scaling)[0].size()
        };

        assert_approx_eq!(f64, size_with(&huge, 1.0), 72.0);
        assert_approx_eq!(f64, size_with(&huge, 0.1), MIN_FONT_SIZE);
        assert_approx_eq!(f64, size_with(&tiny, 1.0), MIN_FONT_SIZE);
        assert_approx_eq!(f64, size_with(&nan, 1.0), MIN_FONT_SIZE);
    }
}
