//! The ranking pipeline: distill, normalize, score, select and style.
//!
//! Every stage consumes the previous stage's list and returns a fresh one.
//!
//! ```text
//! records --distill--> (text, record) pairs
//!         --normalize--> CloudElement
//!         --score--> ScoredElement
//!         --select--> ScoredElement (sorted, capped)
//!         --attributes--> StyledElement
//! ```

mod attributes;
mod normalize;
mod score;
mod select;

pub use attributes::{map_attributes, scaling};
pub use normalize::{distill, normalize, validate};
pub use score::score;
pub use select::select;

use termcloud_core::{annotation::AnnotationRecord, color::Color};

/// A unique display string and every record that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudElement {
    text: String,
    records: Vec<AnnotationRecord>,
}

impl CloudElement {
    pub fn new(text: impl Into<String>, records: Vec<AnnotationRecord>) -> Self {
        Self {
            text: text.into(),
            records,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Records in encounter order; never empty for elements built by
    /// [`normalize`].
    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }
}

/// A cloud element with its share of the total score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredElement {
    element: CloudElement,
    score: f64,
}

impl ScoredElement {
    pub fn new(element: CloudElement, score: f64) -> Self {
        Self { element, score }
    }

    pub fn element(&self) -> &CloudElement {
        &self.element
    }

    pub fn text(&self) -> &str {
        self.element.text()
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        self.element.records()
    }

    /// Normalized score in `[0, 1]`
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// A selected element with its visual attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledElement {
    scored: ScoredElement,
    size: f64,
    color: Color,
    rank: usize,
}

impl StyledElement {
    pub fn new(scored: ScoredElement, size: f64, color: Color, rank: usize) -> Self {
        Self {
            scored,
            size,
            color,
            rank,
        }
    }

    pub fn text(&self) -> &str {
        self.scored.text()
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        self.scored.records()
    }

    pub fn score(&self) -> f64 {
        self.scored.score()
    }

    /// Font size in pixels
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn rank(&self) -> usize {
        self.rank
    }
}
