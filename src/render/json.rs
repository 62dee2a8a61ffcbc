//! JSON rendering for paginations.

use crate::error::{Error, Result};
use crate::layout::Pagination;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a pagination (pages and diagnostics) to JSON.
pub fn to_json(pagination: &Pagination, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(pagination),
        JsonFormat::Compact => serde_json::to_string(pagination),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
