//! Stripmap - deterministic schematic layout for transit line diagrams.
//!
//! Turns a route (trips with inbound and outbound stop sequences, plus the
//! stops they reference) into stop coordinates and octilinear trip paths
//! ready for a renderer. Branches are separated into lanes, the outbound
//! direction is mirrored below the inbound one, and inconsistent inputs
//! degrade to a partial layout instead of failing.

pub mod config;
pub mod export;
pub mod input;
pub mod layout;
pub mod path;

mod error;
mod output;
mod session;

pub use stripmap_core::{color, geometry, route};

pub use error::StripmapError;
pub use output::{DiagramOutput, StopLabel, StopMarker};
pub use session::Session;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use layout::RouteLayout;
use path::TripPath;
use route::RouteData;

/// Builder for laying out and rendering line diagrams.
///
/// # Examples
///
/// ```rust
/// use stripmap::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "trips": [{"id": "t1", "name": "Line 1", "color": [220, 38, 38],
///                "inbound": ["A", "B"], "outbound": ["B", "A"]}],
///     "stops": [{"id": "A", "name": "Alpha"}, {"id": "B", "name": "Bravo"}]
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let route = builder.parse(source).expect("valid route");
/// let output = builder.build(&route);
///
/// let svg = builder.render_svg(&output).expect("Failed to render");
/// assert!(svg.contains("Alpha - A"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and validate route JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StripmapError::Input`] for malformed JSON, missing `trips`
    /// or `stops` collections, or invalid values.
    pub fn parse(&self, source: &str) -> Result<RouteData, StripmapError> {
        info!("Parsing route");
        let route = input::parse_route(source)?;
        trace!(route:?; "Parsed route");
        Ok(route)
    }

    /// Lay out both directions of `route`.
    pub fn layout(&self, route: &RouteData) -> RouteLayout {
        layout::layout_route(route, self.config.layout())
    }

    /// Generate every trip's paths, normalized as configured.
    pub fn trip_paths(&self, route: &RouteData, layout: &RouteLayout) -> Vec<TripPath> {
        path::trip_paths(route, layout, self.config.layout())
    }

    /// Run the full pipeline and assemble the render payload.
    pub fn build(&self, route: &RouteData) -> DiagramOutput {
        let layout = self.layout(route);
        let paths = self.trip_paths(route, &layout);
        let output = DiagramOutput::new(route, &layout, paths, self.config.style().label_offset());
        debug!(
            stops = output.stop_positions().len(),
            markers = output.markers().len(),
            trips = output.trip_paths().len();
            "Diagram built"
        );
        output
    }

    /// Render the payload as an SVG preview.
    ///
    /// # Errors
    ///
    /// Returns [`StripmapError::Export`] if a configured style color is invalid.
    pub fn render_svg(&self, output: &DiagramOutput) -> Result<String, StripmapError> {
        let svg = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let rendered = svg.render(output)?;
        info!("SVG rendered successfully");
        Ok(rendered)
    }

    /// Render the payload as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StripmapError::Export`] if serialization fails.
    pub fn render_json(&self, output: &DiagramOutput) -> Result<String, StripmapError> {
        Ok(export::json::Json.render(output)?)
    }
}
