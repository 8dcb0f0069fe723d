//! JSON output.

use crate::query::QueryResult;

/// JSON renderer.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render a result as pretty-printed JSON.
    ///
    /// Rows: `{"kind": "rows", "columns": [...], "rows": [[...]]}`;
    /// counts: `{"kind": "count", "label": "COUNT(*)", "value": 3}`.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails
    pub fn render(result: &QueryResult) -> serde_json::Result<String> {
        serde_json::to_string_pretty(result)
    }
}
