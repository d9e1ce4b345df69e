//! Export backends for laid-out line diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! Route JSON
//!     ↓ input::parse_route
//! RouteData
//!     ↓ layout + path
//! DiagramOutput
//!     ↓ export (this module)
//! SVG preview / JSON payload
//! ```
//!
//! Export operations return [`Error`], which converts into
//! [`StripmapError::Export`] at the crate boundary.
//!
//! [`StripmapError::Export`]: crate::StripmapError::Export

pub mod json;
pub mod svg;

use std::{fs, path::Path};

use log::{error, info};

use crate::output::DiagramOutput;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders `output` to the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the output cannot be converted.
    fn render(&self, output: &DiagramOutput) -> Result<String, Error>;

    /// Renders `output` and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] on conversion failure and [`Error::Io`] if
    /// the file cannot be written.
    fn export_to_file(&self, output: &DiagramOutput, path: &Path) -> Result<(), Error> {
        let content = self.render(output)?;
        info!(path:? = path; "Writing diagram");
        fs::write(path, content).map_err(|err| {
            error!(path:? = path, err:err; "Failed to write diagram");
            Error::Io(err)
        })
    }
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
