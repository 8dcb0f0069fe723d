//! Tracing instrumentation for query processing.
//!
//! Spans follow the OpenTelemetry database conventions:
//!
//! **Span naming**: `{db.operation.name} {target}`
//! - Example: `query people`, `load people`
//!
//! **Attributes**:
//! - `db.system.name`: Always `"csvql"`
//! - `db.operation.name`: `parse`, `query` or `load`
//! - `db.collection.name`: Table name
//! - `db.query.text`: Query text (for `parse` and `query`)
//! - `db.response.returned_rows`: Recorded after execution
//!
//! # Example
//!
//! ```rust,ignore
//! use csvql::otel::{query_span, record_returned_rows};
//!
//! let span = query_span("SELECT * FROM people", "people");
//! let _guard = span.enter();
//! let result = executor.execute(&query, &table)?;
//! record_returned_rows(result.row_count());
//! ```

use tracing::{field, span, Level, Span};

/// Operation types (maps to `db.operation.name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Parse,
    Query,
    Load,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Query => "query",
            Self::Load => "load",
        }
    }
}

/// Span around parsing one query.
pub fn parse_span(query_text: &str) -> Span {
    span!(
        Level::DEBUG,
        "db.parse",
        otel.name = Operation::Parse.as_str(),
        db.system.name = "csvql",
        db.operation.name = Operation::Parse.as_str(),
        db.query.text = query_text,
    )
}

/// Span around executing one query against a table.
///
/// # Arguments
///
/// * `query_text` - Normalized query text
/// * `collection` - Table name
pub fn query_span(query_text: &str, collection: &str) -> Span {
    span!(
        Level::INFO,
        "db.query",
        otel.name = %format!("{} {}", Operation::Query.as_str(), collection),
        db.system.name = "csvql",
        db.operation.name = Operation::Query.as_str(),
        db.collection.name = collection,
        db.query.text = query_text,
        db.response.returned_rows = field::Empty,
    )
}

/// Span around loading a table from a file.
pub fn load_span(collection: &str, path: &str) -> Span {
    span!(
        Level::INFO,
        "db.load",
        otel.name = %format!("{} {}", Operation::Load.as_str(), collection),
        db.system.name = "csvql",
        db.operation.name = Operation::Load.as_str(),
        db.collection.name = collection,
        server.address = path,
        db.response.returned_rows = field::Empty,
    )
}

/// Record the number of rows produced in the current span.
pub fn record_returned_rows(rows: usize) {
    Span::current().record("db.response.returned_rows", rows);
}
