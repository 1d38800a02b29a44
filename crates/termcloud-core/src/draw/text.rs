//! Text styling, measurement and rendering for cloud words.
//!
//! # Overview
//!
//! - [`TextDefinition`] - font family, size and fill for a word
//! - [`TextMeasure`] - computes the rendered extent of a string
//! - [`FontMetrics`] - measurement through cosmic-text font shaping
//! - [`FixedAdvance`] - deterministic per-character approximation
//! - [`Word`] - a renderable, optionally rotated text element
//!
//! # Quick Start
//!
//! ```
//! # use termcloud_core::draw::{FixedAdvance, TextDefinition, TextMeasure, Word};
//! let mut style = TextDefinition::new();
//! style.set_font_size(24.0);
//!
//! let word = Word::new("kinase", style);
//! let size = word.measure(&FixedAdvance::default());
//! assert!(size.width() > size.height());
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, warn};
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Footprint, Point, Size},
};

/// Line height as a multiple of the font size
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Visual style of a word.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Impact"` |
/// | Font size | `12` px |
/// | Color | `None` (SVG default, black) |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the font family (e.g., "Arial", "sans-serif").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the fill color. `None` leaves the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Impact".to_string(),
            font_size: 12.0,
            color: None,
        }
    }
}

/// Computes the rendered extent of a single line of text.
///
/// The layout engine receives a measure explicitly, so callers decide
/// whether they want real font shaping or a reproducible approximation.
pub trait TextMeasure {
    /// Returns the unrotated width and height `text` occupies when drawn
    /// with `definition`.
    fn measure(&self, text: &str, definition: &TextDefinition) -> Size;
}

/// Character-count based measurement.
///
/// Every character advances by `advance × font_size`; the height is one
/// line. Results only depend on the input, which makes layouts reproducible
/// across machines with different installed fonts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    advance: f32,
}

impl FixedAdvance {
    /// Creates a measure with the given per-character advance, as a
    /// fraction of the font size.
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(0.55)
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str, definition: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        let size = definition.font_size();
        Size::new(
            text.chars().count() as f32 * size * self.advance,
            size * LINE_HEIGHT_FACTOR,
        )
    }
}

/// Measurement through cosmic-text shaping against the system fonts.
///
/// The underlying `FontSystem` is expensive to create, so a single instance
/// is shared by every `FontMetrics` in the process. When no font yields
/// layout runs, measurement falls back to [`FixedAdvance`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FontMetrics;

impl FontMetrics {
    pub fn new() -> Self {
        Self
    }

    fn font_system() -> &'static Mutex<FontSystem> {
        FONT_SYSTEM.get_or_init(|| {
            info!("Initializing FontSystem");
            Mutex::new(FontSystem::new())
        })
    }
}

impl TextMeasure for FontMetrics {
    fn measure(&self, text: &str, definition: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let Ok(mut font_system) = Self::font_system().lock() else {
            warn!("FontSystem lock poisoned, approximating text size");
            return FixedAdvance::default().measure(text, definition);
        };

        let font_size = definition.font_size();
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_FACTOR);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(definition.font_family()));

        // Unbounded so the word is laid out on a single run
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width <= 0.0 || total_height <= 0.0 {
            return FixedAdvance::default().measure(text, definition);
        }

        Size::new(max_width, total_height)
    }
}

static FONT_SYSTEM: OnceLock<Mutex<FontSystem>> = OnceLock::new();

/// A single cloud word: content, style and orientation.
///
/// Extra attributes and an optional tooltip title are attached to the
/// rendered `<text>` element.
#[derive(Debug, Clone)]
pub struct Word {
    content: String,
    definition: TextDefinition,
    rotation: f32,
    title: Option<String>,
    attributes: Vec<(String, String)>,
}

impl Word {
    pub fn new(content: impl Into<String>, definition: TextDefinition) -> Self {
        Self {
            content: content.into(),
            definition,
            rotation: 0.0,
            title: None,
            attributes: Vec::new(),
        }
    }

    /// Sets the rotation in degrees (builder style).
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Attaches a tooltip, rendered as an SVG `<title>` child.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds an attribute to the rendered `<text>` element.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Unrotated extent of the word under `measure`.
    pub fn measure(&self, measure: &dyn TextMeasure) -> Size {
        measure.measure(&self.content, &self.definition)
    }

    /// The rectangle the word covers when centered on `center`.
    pub fn footprint(&self, center: Point, measure: &dyn TextMeasure) -> Footprint {
        Footprint::new(center, self.measure(measure), self.rotation)
    }
}

impl Drawable for Word {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let mut transform = format!("translate({}, {})", position.x(), position.y());
        if self.rotation != 0.0 {
            transform.push_str(&format!(" rotate({})", self.rotation));
        }

        let mut rendered = svg_element::Text::new("")
            .set("transform", transform)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if let Some(color) = self.definition.color() {
            rendered = rendered
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for (name, value) in &self.attributes {
            rendered = rendered.set(name.as_str(), value.as_str());
        }

        if let Some(title) = &self.title {
            rendered = rendered.add(svg_element::Title::new(title.as_str()));
        }
        rendered = rendered.add(SvgText::new(self.content.as_str()));

        output.add_to_layer(RenderLayer::Words, Box::new(rendered));
        output
    }
}
