//! Boundary validation of raw route input.
//!
//! Route data arrives as JSON text. [`parse_route`] checks its shape once and
//! turns it into a well-formed [`RouteData`] value; the layout stages assume
//! validity from then on and never re-validate.
//!
//! Input is rejected (MalformedInput) when:
//! - the text is not valid JSON ([`InputErrorKind::Syntax`]),
//! - the top level is not an object holding `trips` and `stops` arrays
//!   ([`InputErrorKind::MissingCollection`]),
//! - a trip or stop does not match the model, e.g. a color that is not three
//!   integers in 0-255 ([`InputErrorKind::InvalidValue`]).
//!
//! Stop ids referenced by trips but missing from `stops` are *not* an input
//! error; they are tolerated downstream.

use std::{fmt, ops::Range};

use log::{debug, warn};
use serde_json::Value;
use thiserror::Error;

use stripmap_core::route::RouteData;

use crate::error::StripmapError;

/// Category of a rejected route input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    /// The text is not valid JSON.
    Syntax,
    /// The `trips` or `stops` collection is missing or not an array.
    MissingCollection,
    /// A value does not match the route model.
    InvalidValue,
}

impl InputErrorKind {
    /// Stable diagnostic code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            InputErrorKind::Syntax => "stripmap::input::syntax",
            InputErrorKind::MissingCollection => "stripmap::input::missing_collection",
            InputErrorKind::InvalidValue => "stripmap::input::invalid_value",
        }
    }
}

impl fmt::Display for InputErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A structured description of why route input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InputError {
    kind: InputErrorKind,
    message: String,
    span: Option<Range<usize>>,
    help: Option<String>,
}

impl InputError {
    pub fn new(kind: InputErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            help: None,
        }
    }

    /// Attaches the byte range of the offending text.
    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn kind(&self) -> InputErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

/// Parses and validates route JSON into a [`RouteData`].
///
/// # Errors
///
/// Returns [`StripmapError::Input`] describing the first problem found. The
/// error carries the full source so diagnostics can show a snippet.
///
/// # Examples
///
/// ```
/// # use stripmap::input::parse_route;
/// let route = parse_route(r#"{"trips": [], "stops": []}"#).unwrap();
/// assert!(route.is_empty());
///
/// assert!(parse_route(r#"{"trips": []}"#).is_err());
/// ```
pub fn parse_route(src: &str) -> Result<RouteData, StripmapError> {
    validate(src).map_err(|err| {
        warn!(kind:% = err.kind(); "Rejected route input: {err}");
        StripmapError::new_input_error(err, src)
    })
}

fn validate(src: &str) -> Result<RouteData, InputError> {
    let value: Value = serde_json::from_str(src).map_err(|err| {
        let error = InputError::new(InputErrorKind::Syntax, format!("invalid JSON: {err}"));
        attach_span(error, src, &err)
    })?;

    let Some(object) = value.as_object() else {
        return Err(InputError::new(
            InputErrorKind::MissingCollection,
            "route input must be a JSON object",
        )
        .with_help("expected an object with `trips` and `stops` arrays"));
    };

    for collection in ["trips", "stops"] {
        if !object.get(collection).is_some_and(Value::is_array) {
            return Err(InputError::new(
                InputErrorKind::MissingCollection,
                format!("route input has no `{collection}` array"),
            )
            .with_help("expected an object with `trips` and `stops` arrays"));
        }
    }

    let route: RouteData = serde_json::from_str(src).map_err(|err| {
        let error = InputError::new(InputErrorKind::InvalidValue, err.to_string())
            .with_help("trips need `id`, `name` and a `color` of three integers in 0-255; stops need `id` and `name`");
        attach_span(error, src, &err)
    })?;

    debug!(
        trips = route.trips().len(),
        stops = route.stops().len();
        "Route input accepted"
    );

    Ok(route)
}

fn attach_span(error: InputError, src: &str, err: &serde_json::Error) -> InputError {
    match byte_offset(src, err.line(), err.column()) {
        Some(offset) => {
            let end = (offset + 1).min(src.len());
            error.with_span(offset..end)
        }
        None => error,
    }
}

/// Converts a 1-based line/column pair, as reported by serde_json, into a
/// byte offset clamped to the source length.
fn byte_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}
