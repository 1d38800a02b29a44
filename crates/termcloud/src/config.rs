//! Configuration types for termcloud rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! TOML or any other serde format. Every field is optional in the input and
//! falls back to the documented default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining cloud and style settings.
//! - [`CloudConfig`] - Canvas, pipeline and layout options.
//! - [`StyleConfig`] - Fonts, colors and the logo link.
//!
//! # Example
//!
//! ```
//! # use termcloud::config::AppConfig;
//! let config: AppConfig = toml::from_str(r##"
//!     [cloud]
//!     container = "#results"
//!     width = 600
//!     use_terms = true
//!
//!     [style]
//!     background_color = "white"
//! "##).unwrap();
//!
//! assert_eq!(config.cloud().container(), "#results");
//! assert_eq!(config.cloud().height(), 300.0);
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use termcloud_core::{
    annotation::Domain,
    color::{Color, Palette},
};

use crate::{
    stopwords::StopWords,
    strategy::{CallbackNames, DomainColorer, Mode, StrategyOptions},
};

/// Largest accepted canvas width or height, in pixels.
pub const MAX_CANVAS_EXTENT: f32 = 16_384.0;

/// Largest number of collision grid cells over the whole canvas.
const MAX_GRID_CELLS: f32 = 1_048_576.0;

/// Largest number of spiral positions tried for a single element.
const MAX_SPIRAL_STEPS: f32 = 1_000_000.0;

/// Top-level configuration combining cloud and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Cloud configuration section.
    #[serde(default)]
    cloud: CloudConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    ///
    /// # Arguments
    ///
    /// * `cloud` - Canvas, pipeline and layout options.
    /// * `style` - Visual styling options.
    pub fn new(cloud: CloudConfig, style: StyleConfig) -> Self {
        Self { cloud, style }
    }

    pub fn cloud(&self) -> &CloudConfig {
        &self.cloud
    }

    pub fn cloud_mut(&mut self) -> &mut CloudConfig {
        &mut self.cloud
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Builds the options the built-in callbacks are created from.
    ///
    /// # Errors
    ///
    /// Returns an error message if a configured color is invalid.
    pub fn strategy_options(&self) -> Result<StrategyOptions, String> {
        Ok(StrategyOptions {
            max_term_len: self.cloud.max_term_len,
            stopwords: self.cloud.stopwords(),
            word_palette: self.style.word_palette()?,
            domain_colorer: self.style.domain_colorer()?,
        })
    }
}

/// Canvas, pipeline and layout options.
///
/// # Default Values
///
/// | Option | Default |
/// |--------|---------|
/// | `container` | `"#cloud"` |
/// | `width` × `height` | `300 × 300` |
/// | `max_n` | `0` (unbounded) |
/// | `max_term_len` | `25` |
/// | `use_terms` | `false` (word mode) |
/// | `warnings` | `false` |
/// | `show_logo`, `show_info` | `true` |
/// | `rotation` | `0` degrees |
/// | `padding` | `2` px |
/// | `spiral_step` | `0.1` rad |
/// | `spiral_growth` | `1` px per rad |
/// | `grid_cell` | `16` px |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    container: String,
    width: f32,
    height: f32,
    max_n: usize,
    max_term_len: usize,
    use_terms: bool,
    warnings: bool,
    show_logo: bool,
    show_info: bool,
    rotation: f32,
    padding: f32,
    spiral_step: f32,
    spiral_growth: f32,
    grid_cell: f32,
    /// Words added to the default stopword list
    extra_stopwords: Vec<String>,
    #[serde(flatten)]
    callbacks: CallbackNames,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            container: "#cloud".to_string(),
            width: 300.0,
            height: 300.0,
            max_n: 0,
            max_term_len: 25,
            use_terms: false,
            warnings: false,
            show_logo: true,
            show_info: true,
            rotation: 0.0,
            padding: 2.0,
            spiral_step: 0.1,
            spiral_growth: 1.0,
            grid_cell: 16.0,
            extra_stopwords: Vec::new(),
            callbacks: CallbackNames::default(),
        }
    }
}

impl CloudConfig {
    /// Checks dimensions and layout parameters.
    ///
    /// Besides rejecting non-positive values, this caps the canvas at
    /// [`MAX_CANVAS_EXTENT`] and bounds the collision grid and the spiral
    /// walk so layout work stays bounded.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid option.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("spiral_step", self.spiral_step),
            ("spiral_growth", self.spiral_growth),
            ("grid_cell", self.grid_cell),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("`{name}` must be a positive number, got {value}"));
            }
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value > MAX_CANVAS_EXTENT {
                return Err(format!(
                    "`{name}` must not exceed {MAX_CANVAS_EXTENT} px, got {value}"
                ));
            }
        }
        let cells = (self.width / self.grid_cell).ceil() * (self.height / self.grid_cell).ceil();
        if cells > MAX_GRID_CELLS {
            return Err(format!(
                "`grid_cell` of {} px splits the canvas into {cells} cells, at most {MAX_GRID_CELLS} are allowed",
                self.grid_cell
            ));
        }
        let half_diagonal = self.width.hypot(self.height) / 2.0;
        let aspect = self.width / self.height;
        let steps = half_diagonal / (self.spiral_growth * self.spiral_step * aspect.min(1.0));
        if !steps.is_finite() || steps > MAX_SPIRAL_STEPS {
            return Err(format!(
                "`spiral_step` and `spiral_growth` are too small for the canvas: {steps} steps per element, at most {MAX_SPIRAL_STEPS} are allowed"
            ));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(format!(
                "`padding` must not be negative, got {}",
                self.padding
            ));
        }
        if !self.rotation.is_finite() {
            return Err("`rotation` must be a finite angle".to_string());
        }
        if self.container.trim().is_empty() {
            return Err("`container` must not be empty".to_string());
        }
        Ok(())
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn max_n(&self) -> usize {
        self.max_n
    }

    pub fn max_term_len(&self) -> usize {
        self.max_term_len
    }

    pub fn mode(&self) -> Mode {
        if self.use_terms { Mode::Term } else { Mode::Word }
    }

    pub fn warnings(&self) -> bool {
        self.warnings
    }

    pub fn show_logo(&self) -> bool {
        self.show_logo
    }

    pub fn show_info(&self) -> bool {
        self.show_info
    }

    /// Rotation of every word, in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn spiral_step(&self) -> f32 {
        self.spiral_step
    }

    pub fn spiral_growth(&self) -> f32 {
        self.spiral_growth
    }

    pub fn grid_cell(&self) -> f32 {
        self.grid_cell
    }

    pub fn callbacks(&self) -> &CallbackNames {
        &self.callbacks
    }

    /// Default stopwords plus `extra_stopwords`
    pub fn stopwords(&self) -> StopWords {
        StopWords::default().extended(&self.extra_stopwords)
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_n(mut self, max_n: usize) -> Self {
        self.max_n = max_n;
        self
    }

    pub fn with_max_term_len(mut self, max_term_len: usize) -> Self {
        self.max_term_len = max_term_len;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.use_terms = mode == Mode::Term;
        self
    }

    pub fn with_warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_show_logo(mut self, show_logo: bool) -> Self {
        self.show_logo = show_logo;
        self
    }

    pub fn with_show_info(mut self, show_info: bool) -> Self {
        self.show_info = show_info;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_callbacks(mut self, callbacks: CallbackNames) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_stopwords = words.into_iter().map(Into::into).collect();
        self
    }
}

/// Visual styling configuration.
///
/// Color options are kept as strings and parsed on access, so a bad value
/// is reported when a builder is created rather than while deserializing.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct StyleConfig {
    /// Font family for every word; `Impact` when unset.
    #[serde(default)]
    font_family: Option<String>,

    /// Canvas fill; transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Palette cycled by the `rank` colorer; d3 category10 when unset.
    #[serde(default)]
    word_palette: Option<Vec<String>>,

    /// Overrides for the `domain` colorer, keyed by domain tag.
    #[serde(default)]
    domain_colors: HashMap<String, String>,

    /// Color for elements spanning several domains.
    #[serde(default)]
    multiple_color: Option<String>,

    /// Base URL of the enrichment service's query page, used by the logo link.
    #[serde(default)]
    logo_url: Option<String>,
}

impl StyleConfig {
    /// Query page linked from the logo when `logo_url` is unset.
    pub const DEFAULT_LOGO_URL: &'static str = "https://biit.cs.ut.ee/gprofiler/gost";

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the configured word palette, or the default one.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or contains an invalid color.
    pub fn word_palette(&self) -> Result<Palette, String> {
        match &self.word_palette {
            Some(colors) => Palette::parse(colors.as_slice())
                .map_err(|err| format!("Invalid word palette in config: {err}")),
            None => Ok(Palette::default()),
        }
    }

    /// Builds the `domain` colorer with configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured color is invalid.
    pub fn domain_colorer(&self) -> Result<DomainColorer, String> {
        let mut colorer = DomainColorer::default();
        for (tag, color) in &self.domain_colors {
            let domain: Domain = tag.clone().into();
            let color = Color::new(color)
                .map_err(|err| format!("Invalid color for domain `{tag}` in config: {err}"))?;
            colorer = colorer.with_color(domain, color);
        }
        if let Some(color) = &self.multiple_color {
            let color = Color::new(color)
                .map_err(|err| format!("Invalid multiple-domain color in config: {err}"))?;
            colorer = colorer.with_multiple(color);
        }
        Ok(colorer)
    }

    pub fn logo_url(&self) -> &str {
        self.logo_url.as_deref().unwrap_or(Self::DEFAULT_LOGO_URL)
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_word_palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.word_palette = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }
}
