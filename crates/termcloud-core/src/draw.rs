//! Drawing primitives for word clouds.
//!
//! - [`Drawable`] - anything that renders itself into a [`LayeredOutput`]
//! - [`TextDefinition`] / [`Word`] - styled, optionally rotated text
//! - [`TextMeasure`] - how rendered text extents are computed

mod layer;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use text::{FixedAdvance, FontMetrics, TextDefinition, TextMeasure, Word};

use crate::geometry::Point;

/// An element that can render itself at a position.
pub trait Drawable {
    /// Renders the element centered on `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;
}
