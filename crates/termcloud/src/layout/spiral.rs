//! Archimedean spiral placement.

use log::{debug, info, trace};

use termcloud_core::{
    draw::{TextDefinition, TextMeasure, Word},
    geometry::{Bounds, Point, Size},
};

use super::{CloudLayout, GridIndex, LayoutState, PlacedElement};
use crate::pipeline::StyledElement;

/// Positions along an Archimedean spiral around the origin.
///
/// The `n`-th point sits at angle `t = n·dt` and radius `r = a·t`, with the
/// horizontal axis stretched by the canvas aspect ratio `e`:
/// `(e·r·cos t, r·sin t)`. The walk ends once even the nearest point of the
/// next turn would lie farther than `max_radius` from the origin.
#[derive(Debug, Clone)]
pub struct Spiral {
    step: f32,
    growth: f32,
    aspect: f32,
    max_radius: f32,
    index: usize,
}

impl Spiral {
    /// # Arguments
    ///
    /// * `step` - Angular increment `dt` in radians.
    /// * `growth` - Radius gained per radian, `a`.
    /// * `aspect` - Horizontal stretch `e`, usually `width / height`.
    /// * `max_radius` - Distance beyond which no more points are produced.
    pub fn new(step: f32, growth: f32, aspect: f32, max_radius: f32) -> Self {
        Self {
            step,
            growth,
            aspect,
            max_radius,
            index: 0,
        }
    }

    /// Upper bound on the number of points the walk yields.
    pub fn max_steps(&self) -> usize {
        let reach = self.growth * self.step * self.aspect.min(1.0);
        if reach <= 0.0 || !reach.is_finite() {
            return 1;
        }
        (self.max_radius / reach) as usize + 1
    }
}

impl Iterator for Spiral {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.index >= self.max_steps() {
            return None;
        }
        let t = self.index as f32 * self.step;
        let radius = self.growth * t;
        if radius * self.aspect.min(1.0) > self.max_radius {
            return None;
        }
        self.index += 1;
        Some(Point::new(
            self.aspect * radius * t.cos(),
            radius * t.sin(),
        ))
    }
}

/// Places styled elements on a fixed-size canvas without overlap.
///
/// Elements are attempted in input order. Each one walks the [`Spiral`]
/// outward from the canvas center and takes the first position where its
/// footprint lies inside the canvas and, grown by `padding`, touches no
/// previously placed footprint. Elements that find no such position are
/// dropped.
///
/// # Example
///
/// ```
/// # use termcloud::layout::SpiralEngine;
/// let engine = SpiralEngine::new(300.0, 200.0)
///     .with_padding(4.0)
///     .with_rotation(0.0);
/// assert!(engine.state().is_idle());
/// ```
#[derive(Debug, Clone)]
pub struct SpiralEngine {
    width: f32,
    height: f32,
    padding: f32,
    rotation: f32,
    step: f32,
    growth: f32,
    cell_size: f32,
    font_family: String,
    state: LayoutState,
}

impl SpiralEngine {
    /// Creates an engine for a `width × height` canvas with default
    /// settings: 2 px padding, no rotation, `dt = 0.1`, `a = 1`.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            padding: 2.0,
            rotation: 0.0,
            step: 0.1,
            growth: 1.0,
            cell_size: 16.0,
            font_family: TextDefinition::default().font_family().to_string(),
            state: LayoutState::Idle,
        }
    }

    /// Minimum gap kept between placed footprints
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Rotation in degrees applied to every element
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Angular increment of the spiral walk, in radians
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Radius gained per radian of the spiral walk
    pub fn with_growth(mut self, growth: f32) -> Self {
        self.growth = growth;
        self
    }

    /// Cell edge length of the broad-phase grid
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// Canvas bounds in center-relative coordinates
    fn canvas(&self) -> Bounds {
        Bounds::new_from_center(Point::default(), Size::new(self.width, self.height))
    }

    fn spiral(&self) -> Spiral {
        let aspect = if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        };
        let half_diagonal = self.width.hypot(self.height) / 2.0;
        Spiral::new(self.step, self.growth, aspect, half_diagonal)
    }

    fn word_for(&self, element: &StyledElement) -> Word {
        let mut definition = TextDefinition::new();
        definition.set_font_family(&self.font_family);
        definition.set_font_size(element.size() as f32);
        definition.set_color(Some(element.color()));
        Word::new(element.text(), definition).with_rotation(self.rotation)
    }

    /// Lays out `elements` and returns the placed and dropped elements.
    ///
    /// `scaling` is carried into the result for the renderer.
    pub fn layout(
        &mut self,
        elements: Vec<StyledElement>,
        measure: &dyn TextMeasure,
        scaling: f64,
    ) -> CloudLayout {
        let total = elements.len();
        info!(elements = total, width = self.width, height = self.height; "Placing cloud elements");

        let canvas = self.canvas();
        let mut index = GridIndex::new(canvas, self.cell_size);
        let mut placed: Vec<PlacedElement> = Vec::with_capacity(total);
        let mut dropped = Vec::new();

        for (attempt, element) in elements.into_iter().enumerate() {
            self.state = LayoutState::Placing { next: attempt };

            let word = self.word_for(&element);
            let unplaced = word.footprint(Point::default(), measure);

            let position = self.spiral().find(|offset| {
                let candidate = unplaced.with_center(*offset);
                if !canvas.contains_bounds(&candidate.bounds()) {
                    return false;
                }
                let padded = candidate.padded(self.padding);
                index
                    .candidates(padded.bounds())
                    .into_iter()
                    .all(|id| !padded.overlaps(placed[id].footprint()))
            });

            match position {
                Some(offset) => {
                    let footprint = unplaced.with_center(offset);
                    trace!(
                        text = element.text(),
                        x = offset.x(),
                        y = offset.y();
                        "Placed element"
                    );
                    index.insert(placed.len(), footprint.bounds());
                    placed.push(PlacedElement::new(element, word, footprint));
                }
                None => {
                    debug!(text = element.text(), size = element.size(); "Dropped element");
                    dropped.push(element.text().to_string());
                }
            }
        }

        self.state = LayoutState::Done;
        info!(placed = placed.len(), dropped = dropped.len(); "Layout complete");

        CloudLayout::new(self.width, self.height, scaling, placed, dropped)
    }
}
