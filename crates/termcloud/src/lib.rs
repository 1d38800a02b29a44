//! termcloud - word clouds of functional enrichment results.
//!
//! Annotation records from an enrichment query (term id, name, p-value and
//! domain) are distilled into display strings, scored, ranked, sized,
//! placed on a fixed canvas without overlap and rendered as SVG.
//!
//! The pipeline runs in one synchronous pass:
//!
//! 1. [`pipeline::distill`] and [`pipeline::normalize`] build unique cloud elements
//! 2. [`pipeline::score`] normalizes raw scores to shares of the total
//! 3. [`pipeline::select`] ranks and caps them
//! 4. [`pipeline::map_attributes`] assigns font sizes and colors
//! 5. [`layout::SpiralEngine`] places them
//! 6. [`export::svg::Svg`] draws them into a [`surface::Surface`]

pub mod config;
pub mod diagnostics;
pub mod events;
pub mod export;
pub mod layout;
pub mod pipeline;
pub mod query;
pub mod stopwords;
pub mod strategy;
pub mod surface;

mod error;

pub use termcloud_core::{annotation, color, draw, geometry};

pub use error::TermCloudError;

use log::{debug, info, trace};

use annotation::AnnotationRecord;
use config::AppConfig;
use diagnostics::DropReport;
use draw::{FontMetrics, TextMeasure};
use events::{ClickEvent, EventBus, Interaction};
use export::Exporter;
use layout::{CloudLayout, PlacedElement, SpiralEngine};
use query::{AnnotationSource, QueryParameters};
use strategy::{Colorer, Distiller, Scorer, Sizer, Strategies};
use surface::Surfaces;

/// Builder for laying out and rendering term clouds.
///
/// Callback names in the configuration are resolved when the builder is
/// created, so an unknown name fails here rather than during a render.
///
/// # Examples
///
/// ```
/// use termcloud::{
///     CloudBuilder,
///     annotation::{AnnotationRecord, Domain},
///     config::AppConfig,
///     draw::FixedAdvance,
///     surface::{Surface, Surfaces, SvgBuffer},
/// };
///
/// let records = vec![
///     AnnotationRecord::new("GO:0000082", "G1/S transition of mitotic cell cycle", 1e-10, Domain::BP),
///     AnnotationRecord::new("GO:0033309", "SBF transcription complex", 1e-8, Domain::CC),
/// ];
///
/// let mut surfaces = Surfaces::new();
/// surfaces.register("cloud", ["results"], SvgBuffer::new());
///
/// let mut builder = CloudBuilder::new(AppConfig::default())?
///     .with_measure(FixedAdvance::default());
/// let rendered = builder.render_records(records, &mut surfaces)?;
///
/// assert!(!rendered.layout().placed().is_empty());
/// assert!(surfaces.resolve("#cloud")?.document().unwrap().contains("<svg"));
/// # Ok::<(), termcloud::TermCloudError>(())
/// ```
pub struct CloudBuilder {
    config: AppConfig,
    strategies: Strategies,
    measure: Box<dyn TextMeasure>,
    events: EventBus,
}

impl std::fmt::Debug for CloudBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudBuilder")
            .field("config", &self.config)
            .field("strategies", &self.strategies)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl CloudBuilder {
    /// Create a new cloud builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including cloud and style settings
    ///
    /// # Errors
    ///
    /// Returns [`TermCloudError::Config`] for invalid dimensions or colors and
    /// [`TermCloudError::UnknownCallback`] for callback names that do not
    /// exist in the configured mode.
    pub fn new(config: AppConfig) -> Result<Self, TermCloudError> {
        config.cloud().validate().map_err(TermCloudError::Config)?;
        config
            .style()
            .background_color()
            .map_err(TermCloudError::Config)?;
        let options = config.strategy_options().map_err(TermCloudError::Config)?;

        let mode = config.cloud().mode();
        let strategies = Strategies::resolve(mode, config.cloud().callbacks(), options)?;
        debug!(mode:% = mode; "Callbacks resolved");

        Ok(Self {
            config,
            strategies,
            measure: Box::new(FontMetrics::new()),
            events: EventBus::new(),
        })
    }

    /// Replaces the distiller (builder style).
    pub fn with_distiller(mut self, distiller: impl Distiller + 'static) -> Self {
        self.strategies.set_distiller(Box::new(distiller));
        self
    }

    /// Replaces the scorer (builder style).
    pub fn with_scorer(mut self, scorer: impl Scorer + 'static) -> Self {
        self.strategies.set_scorer(Box::new(scorer));
        self
    }

    /// Replaces the sizer (builder style).
    pub fn with_sizer(mut self, sizer: impl Sizer + 'static) -> Self {
        self.strategies.set_sizer(Box::new(sizer));
        self
    }

    /// Replaces the colorer (builder style).
    pub fn with_colorer(mut self, colorer: impl Colorer + 'static) -> Self {
        self.strategies.set_colorer(Box::new(colorer));
        self
    }

    /// Replaces the text measurement, [`FontMetrics`] by default.
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handlers for render and click events.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Runs the pipeline and layout without drawing anything.
    ///
    /// # Errors
    ///
    /// Returns [`TermCloudError::InvalidRecord`] for records without a
    /// positive p-value and [`TermCloudError::DegenerateScore`] when all
    /// elements score zero.
    pub fn layout(&self, records: Vec<AnnotationRecord>) -> Result<CloudLayout, TermCloudError> {
        let cloud = self.config.cloud();
        info!(records = records.len(), mode:% = cloud.mode(); "Building cloud");
        pipeline::validate(&records)?;

        let pairs = pipeline::distill(records, self.strategies.distiller());
        let elements = pipeline::normalize(pairs);
        debug!(elements = elements.len(); "Elements normalized");

        let scored = pipeline::score(elements, self.strategies.scorer())?;
        let selected = pipeline::select(scored, cloud.max_n());
        debug!(selected = selected.len(); "Elements selected");

        let scaling = pipeline::scaling(f64::from(cloud.width()), f64::from(cloud.height()));
        let styled = pipeline::map_attributes(
            selected,
            self.strategies.sizer(),
            self.strategies.colorer(),
            scaling,
        );
        trace!(scaling; "Attributes mapped");

        let mut engine = SpiralEngine::new(cloud.width(), cloud.height())
            .with_padding(cloud.padding())
            .with_rotation(cloud.rotation())
            .with_step(cloud.spiral_step())
            .with_growth(cloud.spiral_growth())
            .with_cell_size(cloud.grid_cell());
        if let Some(family) = self.config.style().font_family() {
            engine = engine.with_font_family(family);
        }

        Ok(engine.layout(styled, self.measure.as_ref(), scaling))
    }

    /// Renders a layout to an SVG string.
    ///
    /// `query` is used for the logo link; without it the link points at the
    /// service's query page.
    ///
    /// # Errors
    ///
    /// Returns [`TermCloudError::Export`] if rendering fails.
    pub fn render_svg(
        &self,
        layout: &CloudLayout,
        query: Option<&QueryParameters>,
    ) -> Result<String, TermCloudError> {
        let cloud = self.config.cloud();
        let logo_url = self.config.style().logo_url();
        let logo_href = cloud.show_logo().then(|| match query {
            Some(params) => params.query_url(logo_url),
            None => logo_url.to_string(),
        });

        let svg = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .with_show_info(cloud.show_info())
            .with_logo_href(logo_href)
            .build()?;

        Ok(svg.export_layout(layout)?)
    }

    /// Renders already fetched records into the configured container.
    ///
    /// The container is resolved before any other work.
    ///
    /// # Errors
    ///
    /// Returns [`TermCloudError::Container`] if the container selector does
    /// not match exactly one surface, plus any error of
    /// [`CloudBuilder::layout`] and [`CloudBuilder::render_svg`].
    pub fn render_records(
        &mut self,
        records: Vec<AnnotationRecord>,
        surfaces: &mut Surfaces,
    ) -> Result<RenderedCloud, TermCloudError> {
        self.render(records, None, surfaces)
    }

    /// Queries `source` and renders the result into the configured container.
    ///
    /// The container is resolved before the query is issued; query errors
    /// are returned unchanged and never retried.
    ///
    /// # Errors
    ///
    /// Returns [`TermCloudError::Container`] before querying if the container
    /// selector does not match exactly one surface, [`TermCloudError::Query`]
    /// if the source fails, plus any error of [`CloudBuilder::render_records`].
    pub fn render_query(
        &mut self,
        params: &QueryParameters,
        source: &dyn AnnotationSource,
        surfaces: &mut Surfaces,
    ) -> Result<RenderedCloud, TermCloudError> {
        surfaces.resolve(self.config.cloud().container())?;

        info!(genes = params.genes().len(), organism = params.organism(); "Querying annotations");
        let records = source.query(params)?;
        debug!(records = records.len(); "Query answered");

        self.render(records, Some(params), surfaces)
    }

    fn render(
        &mut self,
        records: Vec<AnnotationRecord>,
        query: Option<&QueryParameters>,
        surfaces: &mut Surfaces,
    ) -> Result<RenderedCloud, TermCloudError> {
        let container = self.config.cloud().container().to_string();
        surfaces.resolve(&container)?;

        let layout = self.layout(records)?;

        let report = self.config.cloud().warnings().then(|| {
            let report = DropReport::from_layout(&layout);
            report.log();
            report
        });

        let document = self.render_svg(&layout, query)?;
        surfaces.resolve_mut(&container)?.draw(&document)?;
        info!(container, placed = layout.placed().len(); "Cloud rendered");

        self.events.emit_render();

        Ok(RenderedCloud {
            layout,
            document,
            report,
            events: self.events.clone(),
        })
    }
}

/// The outcome of a completed render pass.
///
/// Clicks are routed through [`RenderedCloud::click`] to the handlers that
/// were registered when the pass ran.
#[derive(Debug)]
pub struct RenderedCloud {
    layout: CloudLayout,
    document: String,
    report: Option<DropReport>,
    events: EventBus,
}

impl RenderedCloud {
    pub fn layout(&self) -> &CloudLayout {
        &self.layout
    }

    /// The SVG document drawn into the container
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Dropped elements, when `warnings` is enabled
    pub fn drop_report(&self) -> Option<&DropReport> {
        self.report.as_ref()
    }

    /// Hit-tests an interaction and emits a click event for the word under it.
    ///
    /// Returns the clicked element, or `None` when the position hits no word.
    pub fn click(&mut self, interaction: Interaction) -> Option<&PlacedElement> {
        let index = self.layout.element_at(interaction.position())?;
        let element = &self.layout.placed()[index];
        let event = ClickEvent::new(element.text(), element.records().to_vec(), interaction);
        self.events.emit_click(event);
        self.layout.placed().get(index)
    }
}
