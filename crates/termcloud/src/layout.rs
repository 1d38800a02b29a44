//! Word placement on a fixed-size canvas.
//!
//! [`SpiralEngine`] turns styled elements into a [`CloudLayout`]. Positions
//! are offsets from the canvas center; [`GridIndex`] keeps collision checks
//! local to the neighbourhood of each candidate position.

mod grid;
mod spiral;

pub use grid::GridIndex;
pub use spiral::{Spiral, SpiralEngine};

use termcloud_core::{
    annotation::AnnotationRecord,
    color::Color,
    draw::Word,
    geometry::{Footprint, Point},
};

use crate::pipeline::StyledElement;

/// Progress of a [`SpiralEngine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutState {
    /// No layout has been started
    #[default]
    Idle,
    /// Searching a position for the element at index `next`
    Placing { next: usize },
    /// Every element has been placed or dropped
    Done,
}

impl LayoutState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// A styled element with its final position.
#[derive(Debug, Clone)]
pub struct PlacedElement {
    styled: StyledElement,
    word: Word,
    footprint: Footprint,
}

impl PlacedElement {
    pub fn new(styled: StyledElement, word: Word, footprint: Footprint) -> Self {
        Self {
            styled,
            word,
            footprint,
        }
    }

    /// Offset of the element's center from the canvas center
    pub fn position(&self) -> Point {
        self.footprint.center()
    }

    pub fn x(&self) -> f32 {
        self.footprint.center().x()
    }

    pub fn y(&self) -> f32 {
        self.footprint.center().y()
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.footprint.rotation()
    }

    /// Measured, unpadded extent at the placed position
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// The drawable text for this element.
    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn text(&self) -> &str {
        self.styled.text()
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        self.styled.records()
    }

    pub fn score(&self) -> f64 {
        self.styled.score()
    }

    /// Font size in pixels
    pub fn size(&self) -> f64 {
        self.styled.size()
    }

    pub fn color(&self) -> Color {
        self.styled.color()
    }

    pub fn rank(&self) -> usize {
        self.styled.rank()
    }
}

/// Result of a layout pass.
#[derive(Debug, Clone)]
pub struct CloudLayout {
    width: f32,
    height: f32,
    scaling: f64,
    placed: Vec<PlacedElement>,
    dropped: Vec<String>,
}

impl CloudLayout {
    pub fn new(
        width: f32,
        height: f32,
        scaling: f64,
        placed: Vec<PlacedElement>,
        dropped: Vec<String>,
    ) -> Self {
        Self {
            width,
            height,
            scaling,
            placed,
            dropped,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    /// Placed elements in the order they were attempted
    pub fn placed(&self) -> &[PlacedElement] {
        &self.placed
    }

    /// Texts of the elements that did not fit
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Number of elements handed to the layout engine
    pub fn total(&self) -> usize {
        self.placed.len() + self.dropped.len()
    }

    /// The canvas center in canvas coordinates, with the origin top-left.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Index of the placed element under `point`, given in canvas
    /// coordinates with the origin top-left.
    pub fn element_at(&self, point: Point) -> Option<usize> {
        let local = point.sub_point(self.center());
        self.placed
            .iter()
            .position(|element| element.footprint().contains_point(local))
    }

    /// Returns true when no element, grown by `padding`, overlaps an
    /// element placed before it.
    pub fn is_overlap_free(&self, padding: f32) -> bool {
        self.placed.iter().enumerate().all(|(i, later)| {
            let padded = later.footprint().padded(padding);
            self.placed[..i]
                .iter()
                .all(|earlier| !padded.overlaps(earlier.footprint()))
        })
    }
}

#[cfg(test)]
mod tests {
    use termcloud_core::{draw::TextDefinition, geometry::Size};

    use super::*;
    use crate::pipeline::{CloudElement, ScoredElement};

    fn placed(text: &str, center: Point, size: Size) -> PlacedElement {
        let styled = StyledElement::new(
            ScoredElement::new(CloudElement::new(text, Vec::new()), 0.5),
            12.0,
            Color::default(),
            0,
        );
        let word = Word::new(text, TextDefinition::new());
        PlacedElement::new(styled, word, Footprint::new(center, size, 0.0))
    }

    #[test]
    fn test_element_at_uses_top_left_origin() {
        let layout = CloudLayout::new(
            200.0,
            100.0,
            1.0,
            vec![
                placed("a", Point::new(0.0, 0.0), Size::new(20.0, 10.0)),
                placed("b", Point::new(50.0, 0.0), Size::new(20.0, 10.0)),
            ],
            vec!["c".to_string()],
        );

        assert_eq!(layout.element_at(Point::new(100.0, 50.0)), Some(0));
        assert_eq!(layout.element_at(Point::new(155.0, 52.0)), Some(1));
        assert_eq!(layout.element_at(Point::new(5.0, 5.0)), None);
        assert_eq!(layout.total(), 3);
    }

    #[test]
    fn test_overlap_check_honours_padding() {
        let layout = CloudLayout::new(
            200.0,
            100.0,
            1.0,
            vec![
                placed("a", Point::new(0.0, 0.0), Size::new(20.0, 10.0)),
                placed("b", Point::new(23.0, 0.0), Size::new(20.0, 10.0)),
            ],
            Vec::new(),
        );

        assert!(layout.is_overlap_free(2.0));
        assert!(!layout.is_overlap_free(4.0));
    }

    #[test]
    fn test_layout_state_defaults_to_idle() {
        assert!(LayoutState::default().is_idle());
        assert!(LayoutState::Done.is_done());
        assert!(!LayoutState::Placing { next: 0 }.is_done());
    }
}
