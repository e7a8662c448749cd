//! JSON rendering for outlines and analyses.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{AnalysisResult, Outline};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any model value.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert an outline to `{"title": ..., "outline": [...]}`.
pub fn outline_to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    to_json(outline, format)
}

/// Convert an analysis to its JSON document.
pub fn analysis_to_json(result: &AnalysisResult, format: JsonFormat) -> Result<String> {
    to_json(result, format)
}

/// Render and write a value, creating parent directories as needed.
///
/// The file is only touched once rendering succeeded.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(
    value: &T,
    path: P,
    format: JsonFormat,
) -> Result<()> {
    let json = to_json(value, format)?;
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}
