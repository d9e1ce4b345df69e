//! Error adapter for converting StripmapError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Rejected route
//! input is rendered with a snippet of the offending JSON.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use stripmap::{StripmapError, input::InputError};

/// Adapter for a rejected route input.
///
/// Wraps an [`InputError`] together with the rejected source text and
/// implements [`MietteDiagnostic`] to point at the problem location.
pub struct InputAdapter<'a> {
    err: &'a InputError,
    src: &'a str,
}

impl<'a> InputAdapter<'a> {
    pub fn new(err: &'a InputError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message())
    }
}

impl std::error::Error for InputAdapter<'_> {}

impl MietteDiagnostic for InputAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.err.kind().code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.err
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(self.err.kind().to_string()),
            span,
        ))))
    }
}

/// Adapter for non-input [`StripmapError`] variants.
///
/// Handles errors without source locations, such as I/O, configuration and
/// export errors.
pub struct ErrorAdapter<'a>(pub &'a StripmapError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StripmapError::Io(_) => "stripmap::io",
            StripmapError::Input { err, .. } => err.kind().code(),
            StripmapError::Config(_) => "stripmap::config",
            StripmapError::Export(_) => "stripmap::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rejected input with source location information.
    Input(InputAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Input(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Input(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Input(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Input(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`StripmapError`] into a reportable error.
pub fn to_reportable(err: &StripmapError) -> Reportable<'_> {
    match err {
        StripmapError::Input { err: input_err, src } => {
            Reportable::Input(InputAdapter::new(input_err, src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use stripmap::input::{InputErrorKind, parse_route};

    use super::*;

    #[test]
    fn test_input_error_has_label_and_code() {
        let err = parse_route("{\n  \"trips\": [,]\n}").unwrap_err();

        let reportable = to_reportable(&err);
        let Reportable::Input(adapter) = &reportable else {
            panic!("Expected input diagnostic");
        };

        assert_eq!(
            adapter.code().unwrap().to_string(),
            InputErrorKind::Syntax.code()
        );
        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert!(reportable.source_code().is_some());
    }

    #[test]
    fn test_missing_collection_has_help() {
        let err = parse_route(r#"{"trips": []}"#).unwrap_err();
        let reportable = to_reportable(&err);

        assert!(reportable.help().is_some());
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "stripmap::input::missing_collection"
        );
    }

    #[test]
    fn test_non_input_error() {
        let err = StripmapError::Config("bad value".to_string());

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad value");
                assert_eq!(e.code().unwrap().to_string(), "stripmap::config");
            }
            Reportable::Input(_) => panic!("Expected Error"),
        }
        assert!(reportable.labels().is_none());
    }
}
