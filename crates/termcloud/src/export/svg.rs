//! SVG rendering of cloud layouts.

use log::{debug, info};
use svg::{
    Document,
    node::{
        Text as SvgText,
        element::{Anchor, Rectangle, Text},
    },
};

use termcloud_core::{
    annotation::AnnotationRecord,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
};

use crate::{config::StyleConfig, export, layout::CloudLayout};

/// Text of the logo link in the bottom-right corner.
const LOGO_LABEL: &str = "g:Profiler";
const LOGO_FONT_SIZE: f32 = 10.0;
const LOGO_MARGIN: f32 = 4.0;

/// Builder for [`Svg`] exporters.
///
/// # Example
///
/// ```
/// # use termcloud::{config::StyleConfig, export::svg::SvgBuilder};
/// let svg = SvgBuilder::new()
///     .with_style(&StyleConfig::default().with_background_color("white"))
///     .with_show_info(true)
///     .with_logo_href(Some("https://example.org/gost".to_string()))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SvgBuilder {
    style: StyleConfig,
    show_info: bool,
    logo_href: Option<String>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Attach a `<title>` tooltip listing the records of every word
    pub fn with_show_info(mut self, show_info: bool) -> Self {
        self.show_info = show_info;
        self
    }

    /// Link target of the logo; `None` hides the logo
    pub fn with_logo_href(mut self, href: Option<String>) -> Self {
        self.logo_href = href;
        self
    }

    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the configured background color
    /// is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let background = self
            .style
            .background_color()
            .map_err(export::Error::Render)?;
        Ok(Svg {
            background,
            show_info: self.show_info,
            logo_href: self.logo_href,
        })
    }
}

/// Exporter producing standalone SVG documents.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    show_info: bool,
    logo_href: Option<String>,
}

impl Svg {
    /// Builds the SVG document for `layout`.
    pub fn render(&self, layout: &CloudLayout) -> Document {
        let width = layout.width();
        let height = layout.height();
        let mut output = LayeredOutput::new();

        if let Some(background) = &self.background {
            let rect = Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", background)
                .set("fill-opacity", background.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        let center = layout.center();
        for (index, element) in layout.placed().iter().enumerate() {
            let mut word = element
                .word()
                .clone()
                .with_attribute("data-index", index.to_string())
                .with_attribute("data-term-ids", term_ids(element.records()));
            if self.show_info {
                word = word.with_title(tooltip(element.records()));
            }
            output.merge(word.render_to_layers(center.add_point(element.position())));
        }

        if let Some(href) = &self.logo_href {
            let label = Text::new("")
                .set("x", width - LOGO_MARGIN)
                .set("y", height - LOGO_MARGIN)
                .set("text-anchor", "end")
                .set("font-family", "sans-serif")
                .set("font-size", LOGO_FONT_SIZE)
                .set("fill", "#999999")
                .add(SvgText::new(LOGO_LABEL));
            let link = Anchor::new()
                .set("href", href.as_str())
                .set("target", "_blank")
                .add(label);
            output.add_to_layer(RenderLayer::Chrome, Box::new(link));
        }

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);
        for node in output.render() {
            doc = doc.add(node);
        }
        doc
    }
}

impl export::Exporter for Svg {
    fn export_layout(&self, layout: &CloudLayout) -> Result<String, export::Error> {
        info!(
            words = layout.placed().len(),
            width = layout.width(),
            height = layout.height();
            "Rendering SVG"
        );
        let doc = self.render(layout);
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }
}

fn term_ids(records: &[AnnotationRecord]) -> String {
    records
        .iter()
        .map(AnnotationRecord::term_id)
        .collect::<Vec<_>>()
        .join(",")
}

/// One line per record: id, name and p-value.
fn tooltip(records: &[AnnotationRecord]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "{} {} (p = {:.2e})",
                record.term_id(),
                record.term_name(),
                record.p_value()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
