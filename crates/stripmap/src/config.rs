//! Configuration types for stripmap layout and rendering.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! configuration file only needs to mention the values it overrides.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Spacing, direction bands and path post-processing.
//! - [`StyleConfig`] - Colors and sizes used by the SVG preview exporter.
//!
//! # Coordinate convention
//!
//! Y grows downward. The inbound band is drawn at [`LayoutConfig::inbound_base_y`]
//! with its lanes stacking upward, the outbound band at
//! [`LayoutConfig::outbound_base_y`] with its lanes stacking downward. With the
//! default values the outbound band sits below the inbound band and the two
//! can never overlap.
//!
//! # Example
//!
//! ```
//! # use stripmap::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().stop_spacing(), 100.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use stripmap_core::color::Color;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Layout parameters for mapping layers and lanes to coordinates and for
/// post-processing trip paths.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between consecutive layers.
    stop_spacing: f64,

    /// Vertical distance between consecutive lanes.
    lane_height: f64,

    /// Y coordinate of lane 0 in the inbound direction.
    inbound_base_y: f64,

    /// Y coordinate of lane 0 in the outbound direction.
    outbound_base_y: f64,

    /// Step used when interpolating diagonal moves between stops.
    grid_unit: f64,

    /// Tolerance below which inbound and outbound lengths count as equal.
    length_epsilon: f64,

    /// Extend the shorter of each trip's two paths to match the longer one.
    equalize_lengths: bool,

    /// Replace every diagonal move with two axis-aligned moves.
    straighten: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            stop_spacing: 100.0,
            lane_height: 60.0,
            inbound_base_y: 0.0,
            outbound_base_y: 200.0,
            grid_unit: 100.0,
            length_epsilon: 0.001,
            equalize_lengths: true,
            straighten: false,
        }
    }
}

impl LayoutConfig {
    pub fn stop_spacing(&self) -> f64 {
        self.stop_spacing
    }

    pub fn lane_height(&self) -> f64 {
        self.lane_height
    }

    pub fn inbound_base_y(&self) -> f64 {
        self.inbound_base_y
    }

    pub fn outbound_base_y(&self) -> f64 {
        self.outbound_base_y
    }

    pub fn grid_unit(&self) -> f64 {
        self.grid_unit
    }

    pub fn length_epsilon(&self) -> f64 {
        self.length_epsilon
    }

    pub fn equalize_lengths(&self) -> bool {
        self.equalize_lengths
    }

    pub fn straighten(&self) -> bool {
        self.straighten
    }

    /// Checks that the values describe a drawable layout.
    ///
    /// Spacing, lane height and grid unit must be finite and positive, the
    /// length tolerance finite and non-negative, and the outbound base line
    /// must lie below the inbound one so the two bands stay apart.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("stop_spacing", self.stop_spacing),
            ("lane_height", self.lane_height),
            ("grid_unit", self.grid_unit),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }
        if !self.length_epsilon.is_finite() || self.length_epsilon < 0.0 {
            return Err(format!(
                "length_epsilon must be a non-negative number, got {}",
                self.length_epsilon
            ));
        }
        if !self.inbound_base_y.is_finite() || !self.outbound_base_y.is_finite() {
            return Err("base_y values must be finite".to_string());
        }
        if self.outbound_base_y <= self.inbound_base_y {
            return Err(format!(
                "outbound_base_y ({}) must be greater than inbound_base_y ({})",
                self.outbound_base_y, self.inbound_base_y
            ));
        }
        Ok(())
    }

    pub fn with_stop_spacing(mut self, spacing: f64) -> Self {
        self.stop_spacing = spacing;
        self
    }

    pub fn with_lane_height(mut self, height: f64) -> Self {
        self.lane_height = height;
        self
    }

    /// Sets the base Y of both direction bands.
    pub fn with_base_y(mut self, inbound: f64, outbound: f64) -> Self {
        self.inbound_base_y = inbound;
        self.outbound_base_y = outbound;
        self
    }

    pub fn with_grid_unit(mut self, unit: f64) -> Self {
        self.grid_unit = unit;
        self
    }

    pub fn with_length_epsilon(mut self, epsilon: f64) -> Self {
        self.length_epsilon = epsilon;
        self
    }

    pub fn with_equalize_lengths(mut self, enabled: bool) -> Self {
        self.equalize_lengths = enabled;
        self
    }

    pub fn with_straighten(mut self, enabled: bool) -> Self {
        self.straighten = enabled;
        self
    }
}

/// Visual styling configuration for the SVG preview.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background [`Color`] as a CSS color string; transparent when unset.
    background_color: Option<String>,

    /// Fill for stops served by a single trip.
    stop_color: String,

    /// Fill for stops served by more than one trip.
    shared_stop_color: String,

    /// Stroke width of trip polylines.
    line_width: f64,

    /// Radius of stop markers.
    stop_radius: f64,

    /// Distance between a stop marker and its label.
    label_offset: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            stop_color: "white".to_string(),
            shared_stop_color: "rgb(234, 179, 8)".to_string(),
            line_width: 8.0,
            stop_radius: 8.0,
            label_offset: 25.0,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed fill color for single-trip stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stop_color(&self) -> Result<Color, String> {
        Color::new(&self.stop_color).map_err(|err| format!("Invalid stop color in config: {err}"))
    }

    /// Returns the parsed fill color for stops shared by several trips.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn shared_stop_color(&self) -> Result<Color, String> {
        Color::new(&self.shared_stop_color)
            .map_err(|err| format!("Invalid shared stop color in config: {err}"))
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn stop_radius(&self) -> f64 {
        self.stop_radius
    }

    pub fn label_offset(&self) -> f64 {
        self.label_offset
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}
