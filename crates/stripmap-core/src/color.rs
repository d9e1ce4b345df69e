//! Color handling for stripmap diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Style colors are given as CSS strings in the
//! configuration file and validated here.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;
use thiserror::Error;

/// Error returned when a CSS color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripmap_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let amber = Color::new("rgb(234, 179, 8)").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| ColorError {
                input: color_str.to_string(),
                reason: err.to_string(),
            })
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
