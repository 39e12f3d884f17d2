//! Pipeline options from a JSON configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use sheetjoin_model::PipelineOptions;

/// Loads pipeline options, falling back to defaults when no file is given.
///
/// Fields missing from the file keep their defaults.
pub fn load_options(path: Option<&Path>) -> Result<PipelineOptions> {
    let Some(path) = path else {
        return Ok(PipelineOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    Ok(options)
}
