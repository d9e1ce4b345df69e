//! JSON export of the render payload.

use log::debug;

use super::{Error, Exporter};
use crate::output::DiagramOutput;

/// Pretty-printed JSON of a [`DiagramOutput`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Json;

impl Exporter for Json {
    fn render(&self, output: &DiagramOutput) -> Result<String, Error> {
        let json = serde_json::to_string_pretty(output)
            .map_err(|err| Error::Render(format!("failed to serialize diagram: {err}")))?;
        debug!(bytes = json.len(); "JSON document rendered");
        Ok(json)
    }
}
