//! CLI logic for the stripmap line diagram tool.
//!
//! Reads a route JSON file, lays it out and writes either an SVG preview or
//! the JSON render payload.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::{fs, path::Path};

use log::{info, warn};

use stripmap::{
    DiagramBuilder, Session, StripmapError,
    export::{Exporter, json::Json, svg::SvgBuilder},
};

/// Run the stripmap CLI application
///
/// # Errors
///
/// Returns `StripmapError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed route input
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), StripmapError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format:? = args.format;
        "Processing route"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let mut session = Session::new();
    session.accept(&source)?;

    if !args.trips.is_empty() {
        session.set_visible(&args.trips);
        if session.visible_trip_ids().len() < args.trips.len() {
            warn!(
                requested:? = args.trips,
                visible:? = session.visible_trip_ids();
                "Some requested trips are not part of the route"
            );
        }
    }

    let builder = DiagramBuilder::new(app_config);
    let output = session.render(&builder);

    let output_path = Path::new(&args.output);
    match args.format {
        Format::Svg => SvgBuilder::new()
            .with_style(builder.config().style())
            .build()?
            .export_to_file(&output, output_path)?,
        Format::Json => Json.export_to_file(&output, output_path)?,
    }

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}
