//! termcloud CLI library
//!
//! This module contains the core CLI logic for rendering enrichment word
//! clouds from saved query results.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use termcloud::{
    CloudBuilder, TermCloudError,
    query::{self, JsonFileSource, QueryParameters},
    surface::{SvgFile, Surfaces},
};

/// Run the termcloud CLI application
///
/// This function reads enrichment results from the input file, runs them
/// through the termcloud pipeline and writes the resulting SVG to the
/// output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TermCloudError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or invalid input records
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), TermCloudError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing enrichment results"
    );

    let app_config = config::load_config(args.config.as_ref(), &args.input)?;
    let app_config = config::apply_overrides(app_config, args);

    // The output file is the only surface; register it under the configured
    // container so the selector resolves.
    let name = surface_name(app_config.cloud().container());
    let mut surfaces = Surfaces::new();
    surfaces.register(name, [name], SvgFile::new(&args.output));

    let mut builder = CloudBuilder::new(app_config)?;
    let rendered = if args.genes.is_empty() {
        let source = fs::read_to_string(&args.input)?;
        let records = query::parse_records(&source)?;
        builder.render_records(records, &mut surfaces)?
    } else {
        let params = QueryParameters::new(args.genes.iter().cloned(), args.organism.as_str());
        let source = JsonFileSource::new(&args.input);
        builder.render_query(&params, &source, &mut surfaces)?
    };

    info!(
        output_file = args.output,
        placed = rendered.layout().placed().len(),
        dropped = rendered.layout().dropped().len();
        "SVG exported successfully"
    );

    Ok(())
}

fn surface_name(container: &str) -> &str {
    let name = container
        .trim()
        .trim_start_matches(['#', '.'])
        .trim_start_matches('*');
    if name.is_empty() { "cloud" } else { name }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_name() {
        assert_eq!(surface_name("#cloud"), "cloud");
        assert_eq!(surface_name(".results"), "results");
        assert_eq!(surface_name("panel"), "panel");
        assert_eq!(surface_name("*"), "cloud");
    }
}
