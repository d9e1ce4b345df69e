//! Error types for stripmap operations.
//!
//! The layout core itself never fails: unresolved stops and cyclic
//! precedence degrade to omission. Errors only arise at the boundary
//! (malformed route input, I/O, configuration) and during export.

use std::io;

use thiserror::Error;

use crate::input::InputError;

/// The main error type for stripmap operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant keeps the rejected source text next to the structured
/// [`InputError`], so callers can point at the offending location.
#[derive(Debug, Error)]
pub enum StripmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Input { err: InputError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for StripmapError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl StripmapError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: InputError, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
