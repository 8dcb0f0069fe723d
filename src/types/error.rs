//! Error types for query parsing, execution and table loading.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` implementations.

use std::path::PathBuf;
use thiserror::Error;

/// Grammar shown alongside every syntax error.
pub const GRAMMAR_HINT: &str =
    "SELECT <* | COUNT(*) | COUNT(column) | col1, col2, ...> FROM <table> [WHERE <column> <op> <value>] [;]";

/// The query text does not match the supported grammar.
///
/// Produced only by the parser. Messages never reference table data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// Nothing but whitespace (or a lone `;`)
    #[error("empty query. Expected: {}", GRAMMAR_HINT)]
    Empty,

    /// The lexer rejected the input (unterminated string literal, stray character)
    #[error("could not tokenize query: {0}. Expected: {}", GRAMMAR_HINT)]
    Tokenize(String),

    /// A required keyword or token is missing
    #[error("expected {expected}, found {found}. Expected: {}", GRAMMAR_HINT)]
    Expected { expected: String, found: String },

    /// The segment between SELECT and FROM is malformed
    #[error("invalid select list: {0}. Expected: {}", GRAMMAR_HINT)]
    SelectList(String),

    /// The WHERE condition is malformed
    #[error(
        "invalid WHERE clause: {0}. Expected: column OP value with OP in (=, !=, >, <, >=, <=)"
    )]
    Condition(String),

    /// The literal on the right side of the WHERE condition is neither quoted nor numeric
    #[error("invalid literal value {0} in WHERE clause. Strings must be quoted; numbers unquoted")]
    Literal(String),

    /// Tokens remain after a complete statement
    #[error("unexpected trailing input starting at {0}. Expected: {}", GRAMMAR_HINT)]
    Trailing(String),
}

impl SyntaxError {
    /// Create an "expected X, found Y" error.
    pub fn expected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Expected {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a select-list error with context.
    pub fn select_list(msg: impl Into<String>) -> Self {
        Self::SelectList(msg.into())
    }

    /// Create a WHERE-clause error with context.
    pub fn condition(msg: impl Into<String>) -> Self {
        Self::Condition(msg.into())
    }
}

/// Clause a column reference appeared in, used to label unknown-column errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Select,
    Where,
    Count,
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Select => "SELECT",
            Self::Where => "WHERE clause",
            Self::Count => "COUNT",
        })
    }
}

/// The query is well-formed but cannot run against the loaded table.
///
/// Produced only by the executor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    /// FROM names a table other than the loaded one
    #[error("Table '{name}' not found. Loaded tables: {loaded}.")]
    TableNotFound { name: String, loaded: String },

    /// A referenced column is not part of the table schema
    #[error("Column '{column}' in {clause} does not exist. Available columns: {available}.")]
    UnknownColumn {
        column: String,
        clause: Clause,
        available: String,
    },

    /// Numeric literal compared against a cell that is not a number (strict policy only)
    #[error(
        "Type mismatch: cannot compare non-numeric value '{value}' in column '{column}' with numeric literal {literal}."
    )]
    TypeMismatch {
        column: String,
        value: String,
        literal: String,
    },
}

impl ExecutionError {
    /// Name of the table or column the error is about.
    pub fn identifier(&self) -> &str {
        match self {
            Self::TableNotFound { name, .. } => name,
            Self::UnknownColumn { column, .. } | Self::TypeMismatch { column, .. } => column,
        }
    }
}

/// Any failure of a single query.
///
/// Display carries the user-facing prefix, so callers can print it as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("[Syntax error] {0}")]
    Syntax(#[from] SyntaxError),

    #[error("[Execution error] {0}")]
    Execution(#[from] ExecutionError),
}

impl QueryError {
    /// `true` for errors raised by the parser.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }
}

/// Failure to build a table, from CSV or from raw columns.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Source file does not exist
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV (including records whose length differs from the header)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header contains a blank column name
    #[error("Column {0} has an empty name")]
    EmptyHeader(usize),

    /// Two columns share a name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Column lengths differ
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Table name could not be derived from the source path
    #[error("Cannot derive a table name from {}", .0.display())]
    InvalidName(PathBuf),
}

/// Result alias for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
