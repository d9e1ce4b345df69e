//! SVG preview of a line diagram.
//!
//! Draws one polyline per trip (inbound then outbound, joined), a marker per
//! positioned stop in each direction band and a label above each merged stop. The view box covers all
//! geometry plus a fixed margin.

use log::debug;
use svg::{Document, node::element as svg_element};

use stripmap_core::{
    color::Color,
    geometry::Bounds,
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    output::{DiagramOutput, StopMarker},
    path::TripPath,
};

const MARGIN: f64 = 50.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const MARKER_STROKE: &str = "#1f2937";

/// Builder for [`Svg`] that resolves the configured style up front.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Parses the style colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color is not valid CSS.
    pub fn build(self) -> Result<Svg, Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        Ok(Svg {
            background: style.background_color().map_err(Error::Render)?,
            stop_color: style.stop_color().map_err(Error::Render)?,
            shared_stop_color: style.shared_stop_color().map_err(Error::Render)?,
            line_width: style.line_width(),
            stop_radius: style.stop_radius(),
        })
    }
}

/// SVG exporter with a resolved style.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    stop_color: Color,
    shared_stop_color: Color,
    line_width: f64,
    stop_radius: f64,
}

impl Svg {
    /// Builds the SVG document for `output`.
    pub fn render_document(&self, output: &DiagramOutput) -> Document {
        let bounds = self.calculate_bounds(output);

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", background),
            );
        }

        let trips = output
            .trip_paths()
            .iter()
            .filter_map(|path| self.render_trip(path))
            .fold(svg_element::Group::new().set("id", "trips"), |group, line| {
                group.add(line)
            });

        let stops = output
            .markers()
            .iter()
            .fold(svg_element::Group::new().set("id", "stops"), |group, marker| {
                group.add(self.render_stop(marker))
            });

        let labels = output.labels().iter().fold(
            svg_element::Group::new()
                .set("id", "labels")
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", LABEL_FONT_SIZE),
            |group, label| {
                let anchor = label.position();
                group.add(
                    svg_element::Text::new(label.text())
                        .set("x", anchor.x())
                        .set("y", anchor.y()),
                )
            },
        );

        doc.add(trips).add(stops).add(labels)
    }

    fn render_trip(&self, path: &TripPath) -> Option<svg_element::Path> {
        let mut points = path.combined_path();
        let first = points.next()?;

        let mut data = format!("M {} {}", first.x(), first.y());
        let mut segments = 0;
        for point in points {
            data.push_str(&format!(" L {} {}", point.x(), point.y()));
            segments += 1;
        }
        if segments == 0 {
            return None;
        }

        Some(
            svg_element::Path::new()
                .set("d", data)
                .set("data-trip", path.id())
                .set("fill", "none")
                .set("stroke", path.trip().color().to_css())
                .set("stroke-width", self.line_width)
                .set("stroke-linejoin", "round")
                .set("stroke-linecap", "round"),
        )
    }

    fn render_stop(&self, marker: &StopMarker) -> svg_element::Circle {
        let fill = if marker.is_shared() {
            &self.shared_stop_color
        } else {
            &self.stop_color
        };
        let position = marker.position();
        svg_element::Circle::new()
            .set("data-stop", marker.stop_id())
            .set("data-direction", marker.direction().as_str())
            .set("cx", position.x())
            .set("cy", position.y())
            .set("r", self.stop_radius)
            .set("fill", fill)
            .set("stroke", MARKER_STROKE)
            .set("stroke-width", 2)
    }

    fn calculate_bounds(&self, output: &DiagramOutput) -> Bounds {
        let bounds = Bounds::from_points(output.points()).unwrap_or_default();
        debug!(
            width = bounds.width(),
            height = bounds.height();
            "Diagram content bounds"
        );
        bounds.inflate(MARGIN + self.stop_radius.max(self.line_width))
    }
}

impl Exporter for Svg {
    fn render(&self, output: &DiagramOutput) -> Result<String, Error> {
        let doc = self.render_document(output);
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use stripmap_core::route::{RouteData, Stop, Trip, TripColor};

    use super::*;
    use crate::{config::LayoutConfig, layout::layout_route, path::trip_paths};

    fn output() -> DiagramOutput {
        let route = RouteData::new(
            vec![
                Trip::new("red", "Red", TripColor::new(255, 0, 0))
                    .with_inbound(["A", "B", "C"])
                    .with_outbound(["C", "B", "A"]),
                Trip::new("blue", "Blue", TripColor::new(0, 0, 255)).with_inbound(["A", "B"]),
            ],
            vec![
                Stop::new("A", "Alpha"),
                Stop::new("B", "Bravo"),
                Stop::new("C", "Charlie"),
            ],
        );
        let config = LayoutConfig::default();
        let layout = layout_route(&route, &config);
        let paths = trip_paths(&route, &layout, &config);
        DiagramOutput::new(&route, &layout, paths, 25.0)
    }

    #[test]
    fn test_renders_lines_stops_and_labels() {
        let svg = SvgBuilder::new().build().unwrap();
        let doc = svg.render(&output()).unwrap();

        assert!(doc.starts_with("<svg"));
        assert!(doc.contains("stroke=\"rgb(255, 0, 0)\""));
        assert!(doc.contains("stroke=\"rgb(0, 0, 255)\""));
        // Markers in both bands: A, B, C inbound and C, B, A outbound.
        assert_eq!(doc.matches("<circle").count(), 6);
        assert_eq!(doc.matches("data-direction=\"outbound\"").count(), 3);
        assert!(doc.contains("Alpha - A"));
        assert!(doc.contains("Charlie - C"));
    }

    #[test]
    fn test_background_is_optional() {
        let plain = SvgBuilder::new().build().unwrap().render(&output()).unwrap();
        assert!(!plain.contains("<rect"));

        let style = StyleConfig::default().with_background_color("#fafafa");
        let filled = SvgBuilder::new()
            .with_style(&style)
            .build()
            .unwrap()
            .render(&output())
            .unwrap();
        assert!(filled.contains("<rect"));
    }

    #[test]
    fn test_invalid_style_color_fails() {
        let style = StyleConfig::default().with_background_color("not-a-color");
        let result = SvgBuilder::new().with_style(&style).build();
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_single_point_paths_are_skipped() {
        let route = RouteData::new(
            vec![Trip::new("solo", "Solo", TripColor::new(9, 9, 9)).with_inbound(["A"])],
            vec![Stop::new("A", "Alpha")],
        );
        let config = LayoutConfig::default();
        let layout = layout_route(&route, &config);
        let paths = trip_paths(&route, &layout, &config);
        let output = DiagramOutput::new(&route, &layout, paths, 25.0);

        let doc = SvgBuilder::new().build().unwrap().render(&output).unwrap();
        assert!(!doc.contains("<path"));
        assert_eq!(doc.matches("<circle").count(), 1);
    }
}
