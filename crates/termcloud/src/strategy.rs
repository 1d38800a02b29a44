//! Pluggable callbacks for distilling, scoring, sizing and coloring.
//!
//! Each stage of the pipeline that users may customise is a trait:
//!
//! - [`Distiller`] - extracts display strings from one record
//! - [`Scorer`] - computes a raw importance score for one cloud element
//! - [`Sizer`] - maps a normalized score to a font size
//! - [`Colorer`] - picks a fill color
//!
//! Closures with the matching signature implement the traits directly.
//! Built-in implementations are selected by [`Mode`] or by name through
//! [`Strategies::resolve`]; names are checked once, when a builder is
//! created, never during a render pass.

use std::{collections::HashMap, fmt};

use serde::Deserialize;

use termcloud_core::{
    annotation::{AnnotationRecord, Domain},
    color::{Color, Palette},
};

use crate::{error::TermCloudError, stopwords::StopWords};

/// Smallest font size any word is drawn with.
pub const MIN_FONT_SIZE: f64 = 12.0;

/// Largest font size for a 300 px canvas; grows with the scaling constant.
pub const MAX_FONT_SIZE: f64 = 72.0;

/// Which family of built-in callbacks is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Individual significant words from term names
    #[default]
    Word,
    /// Whole, truncated term names
    Term,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word => f.write_str("word"),
            Self::Term => f.write_str("term"),
        }
    }
}

/// The four customisable callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    Distiller,
    Scorer,
    Sizer,
    Colorer,
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Distiller => "distiller",
            Self::Scorer => "scorer",
            Self::Sizer => "sizer",
            Self::Colorer => "colorer",
        };
        f.write_str(name)
    }
}

/// Everything a sizer or colorer may look at for one selected element.
#[derive(Debug, Clone, Copy)]
pub struct ElementContext<'a> {
    /// Position after sorting by score, starting at 0
    pub rank: usize,
    /// Normalized score in `[0, 1]`
    pub score: f64,
    /// Container scaling constant
    pub scaling: f64,
    pub text: &'a str,
    pub records: &'a [AnnotationRecord],
}

/// Extracts zero or more display strings from a record.
pub trait Distiller {
    fn distill(&self, record: &AnnotationRecord) -> Vec<String>;
}

/// Computes a raw, non-negative importance score.
pub trait Scorer {
    fn score(&self, text: &str, records: &[AnnotationRecord]) -> f64;
}

/// Maps an element to a font size in pixels.
pub trait Sizer {
    fn size(&self, element: &ElementContext<'_>) -> f64;
}

/// Maps an element to its fill color.
pub trait Colorer {
    fn color(&self, element: &ElementContext<'_>) -> Color;
}

impl<F> Distiller for F
where
    F: Fn(&AnnotationRecord) -> Vec<String>,
{
    fn distill(&self, record: &AnnotationRecord) -> Vec<String> {
        self(record)
    }
}

impl<F> Scorer for F
where
    F: Fn(&str, &[AnnotationRecord]) -> f64,
{
    fn score(&self, text: &str, records: &[AnnotationRecord]) -> f64 {
        self(text, records)
    }
}

impl<F> Sizer for F
where
    F: Fn(&ElementContext<'_>) -> f64,
{
    fn size(&self, element: &ElementContext<'_>) -> f64 {
        self(element)
    }
}

impl<F> Colorer for F
where
    F: Fn(&ElementContext<'_>) -> Color,
{
    fn color(&self, element: &ElementContext<'_>) -> Color {
        self(element)
    }
}

/// Upper font size bound for a given scaling constant.
pub fn max_font_size(scaling: f64) -> f64 {
    (MAX_FONT_SIZE * scaling).max(MIN_FONT_SIZE)
}

// =============================================================================
// Distillers
// =============================================================================

/// Splits term names into lowercase words, skipping stopwords, numbers and
/// words shorter than three characters. A word appears at most once per
/// record.
#[derive(Debug, Clone, Default)]
pub struct WordDistiller {
    stopwords: StopWords,
}

impl WordDistiller {
    pub fn new(stopwords: StopWords) -> Self {
        Self { stopwords }
    }
}

impl Distiller for WordDistiller {
    fn distill(&self, record: &AnnotationRecord) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();
        for raw in record
            .term_name()
            .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        {
            let word = raw.trim_matches('-').to_lowercase();
            if word.chars().count() < 3
                || word.chars().all(|c| c.is_ascii_digit() || c == '-')
                || self.stopwords.contains(&word)
                || words.contains(&word)
            {
                continue;
            }
            words.push(word);
        }
        words
    }
}

/// Uses the whole term name, truncated to `max_len` characters followed by
/// `...` when longer.
#[derive(Debug, Clone, Copy)]
pub struct TermDistiller {
    max_len: usize,
}

impl TermDistiller {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }
}

impl Distiller for TermDistiller {
    fn distill(&self, record: &AnnotationRecord) -> Vec<String> {
        let name = record.term_name().trim();
        if name.is_empty() {
            return Vec::new();
        }
        if name.chars().count() <= self.max_len {
            return vec![name.to_string()];
        }
        let head: String = name.chars().take(self.max_len).collect();
        vec![format!("{}...", head.trim_end())]
    }
}

// =============================================================================
// Scorers
// =============================================================================

/// Sum of `|log10(p)|` over the element's records.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsLogP;

impl Scorer for AbsLogP {
    fn score(&self, _text: &str, records: &[AnnotationRecord]) -> f64 {
        records
            .iter()
            .map(|record| record.p_value().log10().abs())
            .sum()
    }
}

/// Number of records that produced the element.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordCount;

impl Scorer for RecordCount {
    fn score(&self, _text: &str, records: &[AnnotationRecord]) -> f64 {
        records.len() as f64
    }
}

// =============================================================================
// Sizers
// =============================================================================

/// Logarithmic size: scores from 0.001 to 1 span the full size range.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSizer;

impl Sizer for LogSizer {
    fn size(&self, element: &ElementContext<'_>) -> f64 {
        let upper = max_font_size(element.scaling);
        let t = if element.score > 0.0 {
            ((element.score.log10() + 3.0) / 3.0).clamp(0.0, 1.0)
        } else {
            0.0
        };
        MIN_FONT_SIZE + t * (upper - MIN_FONT_SIZE)
    }
}

/// Linear size: a score of 0.25 already reaches the maximum size.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSizer;

impl Sizer for LinearSizer {
    fn size(&self, element: &ElementContext<'_>) -> f64 {
        let upper = max_font_size(element.scaling);
        MIN_FONT_SIZE + element.score * 4.0 * (upper - MIN_FONT_SIZE)
    }
}

// =============================================================================
// Colorers
// =============================================================================

/// Cycles through a categorical palette by rank.
#[derive(Debug, Clone, Default)]
pub struct RankColorer {
    palette: Palette,
}

impl RankColorer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl Colorer for RankColorer {
    fn color(&self, element: &ElementContext<'_>) -> Color {
        self.palette.pick(element.rank)
    }
}

/// Colors by annotation domain.
///
/// Elements whose records come from more than one domain get the
/// `multiple` color; domains without an entry get the `fallback` color.
#[derive(Debug, Clone)]
pub struct DomainColorer {
    colors: HashMap<Domain, Color>,
    multiple: Color,
    fallback: Color,
}

impl DomainColorer {
    pub const DEFAULT_COLORS: [(&'static str, &'static str); 11] = [
        ("BP", "#ff7f0e"),
        ("MF", "#1f77b4"),
        ("CC", "#2ca02c"),
        ("KEGG", "#d62728"),
        ("REAC", "#9467bd"),
        ("WP", "#8c564b"),
        ("TF", "#e377c2"),
        ("MIRNA", "#bcbd22"),
        ("HPA", "#17becf"),
        ("CORUM", "#393b79"),
        ("HP", "#637939"),
    ];
    pub const DEFAULT_MULTIPLE: &'static str = "#000000";
    pub const DEFAULT_FALLBACK: &'static str = "#7f7f7f";

    pub fn new(colors: HashMap<Domain, Color>, multiple: Color, fallback: Color) -> Self {
        Self {
            colors,
            multiple,
            fallback,
        }
    }

    /// Replaces or adds the color of one domain (builder style).
    pub fn with_color(mut self, domain: Domain, color: Color) -> Self {
        self.colors.insert(domain, color);
        self
    }

    /// Sets the color used for elements spanning several domains.
    pub fn with_multiple(mut self, color: Color) -> Self {
        self.multiple = color;
        self
    }
}

impl Default for DomainColorer {
    fn default() -> Self {
        let colors = Self::DEFAULT_COLORS
            .iter()
            .map(|(tag, color)| {
                let domain: Domain = tag.to_string().into();
                let color = Color::new(color).expect("default domain colors are valid");
                (domain, color)
            })
            .collect();
        Self::new(
            colors,
            Color::new(Self::DEFAULT_MULTIPLE).expect("default multiple color is valid"),
            Color::new(Self::DEFAULT_FALLBACK).expect("default fallback color is valid"),
        )
    }
}

impl Colorer for DomainColorer {
    fn color(&self, element: &ElementContext<'_>) -> Color {
        let Some(first) = element.records.first() else {
            return self.fallback;
        };
        if element
            .records
            .iter()
            .any(|record| record.domain() != first.domain())
        {
            return self.multiple;
        }
        self.colors
            .get(first.domain())
            .copied()
            .unwrap_or(self.fallback)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Names of built-in callbacks requested by configuration.
///
/// `None` and `"default"` both select the default for the active mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackNames {
    #[serde(default)]
    pub distiller: Option<String>,
    #[serde(default)]
    pub scorer: Option<String>,
    #[serde(default)]
    pub sizer: Option<String>,
    #[serde(default)]
    pub colorer: Option<String>,
}

/// Inputs the built-in callbacks are constructed from.
#[derive(Debug, Clone, Default)]
pub struct StrategyOptions {
    pub max_term_len: usize,
    pub stopwords: StopWords,
    pub word_palette: Palette,
    pub domain_colorer: DomainColorer,
}

/// The resolved set of callbacks for one builder.
pub struct Strategies {
    mode: Mode,
    distiller: Box<dyn Distiller>,
    scorer: Box<dyn Scorer>,
    sizer: Box<dyn Sizer>,
    colorer: Box<dyn Colorer>,
}

impl fmt::Debug for Strategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategies")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl Strategies {
    /// Resolves built-in callbacks by name for `mode`.
    ///
    /// | Kind | Names | Mode default |
    /// |------|-------|--------------|
    /// | distiller | `words` (word mode), `term` (term mode) | `words` / `term` |
    /// | scorer | `abs_log_p`, `count` | `abs_log_p` |
    /// | sizer | `log`, `linear` | `log` / `linear` |
    /// | colorer | `rank`, `domain` | `rank` / `domain` |
    ///
    /// # Errors
    ///
    /// Returns [`TermCloudError::UnknownCallback`] for a name that does not
    /// exist in the active mode.
    pub fn resolve(
        mode: Mode,
        names: &CallbackNames,
        options: StrategyOptions,
    ) -> Result<Self, TermCloudError> {
        let unknown = |kind: CallbackKind, name: &str| TermCloudError::UnknownCallback {
            kind,
            name: name.to_string(),
            mode,
        };
        let pick = |name: &Option<String>, default: &'static str| -> String {
            match name.as_deref() {
                None | Some("default") => default.to_string(),
                Some(name) => name.to_string(),
            }
        };

        let distiller_name = pick(
            &names.distiller,
            match mode {
                Mode::Word => "words",
                Mode::Term => "term",
            },
        );
        let distiller: Box<dyn Distiller> = match (mode, distiller_name.as_str()) {
            (Mode::Word, "words") => Box::new(WordDistiller::new(options.stopwords)),
            (Mode::Term, "term") => Box::new(TermDistiller::new(options.max_term_len)),
            (_, name) => return Err(unknown(CallbackKind::Distiller, name)),
        };

        let scorer: Box<dyn Scorer> = match pick(&names.scorer, "abs_log_p").as_str() {
            "abs_log_p" => Box::new(AbsLogP),
            "count" => Box::new(RecordCount),
            name => return Err(unknown(CallbackKind::Scorer, name)),
        };

        let default_sizer = match mode {
            Mode::Word => "log",
            Mode::Term => "linear",
        };
        let sizer: Box<dyn Sizer> = match pick(&names.sizer, default_sizer).as_str() {
            "log" => Box::new(LogSizer),
            "linear" => Box::new(LinearSizer),
            name => return Err(unknown(CallbackKind::Sizer, name)),
        };

        let default_colorer = match mode {
            Mode::Word => "rank",
            Mode::Term => "domain",
        };
        let colorer: Box<dyn Colorer> = match pick(&names.colorer, default_colorer).as_str() {
            "rank" => Box::new(RankColorer::new(options.word_palette)),
            "domain" => Box::new(options.domain_colorer),
            name => return Err(unknown(CallbackKind::Colorer, name)),
        };

        Ok(Self {
            mode,
            distiller,
            scorer,
            sizer,
            colorer,
        })
    }

    /// The mode defaults with default options.
    pub fn for_mode(mode: Mode) -> Self {
        let options = StrategyOptions {
            max_term_len: 25,
            ..StrategyOptions::default()
        };
        Self::resolve(mode, &CallbackNames::default(), options)
            .expect("mode defaults are always resolvable")
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn distiller(&self) -> &dyn Distiller {
        self.distiller.as_ref()
    }

    pub fn scorer(&self) -> &dyn Scorer {
        self.scorer.as_ref()
    }

    pub fn sizer(&self) -> &dyn Sizer {
        self.sizer.as_ref()
    }

    pub fn colorer(&self) -> &dyn Colorer {
        self.colorer.as_ref()
    }

    pub fn set_distiller(&mut self, distiller: Box<dyn Distiller>) {
        self.distiller = distiller;
    }

    pub fn set_scorer(&mut self, scorer: Box<dyn Scorer>) {
        self.scorer = scorer;
    }

    pub fn set_sizer(&mut self, sizer: Box<dyn Sizer>) {
        self.sizer = sizer;
    }

    pub fn set_colorer(&mut self, colorer: Box<dyn Colorer>) {
        self.colorer = colorer;
    }
}
