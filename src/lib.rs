//! csvql - minimal SQL over a single in-memory table
//!
//! Parses a narrow SELECT dialect and evaluates it against a table loaded
//! from CSV:
//! - Projection: `*` or an explicit column list
//! - One WHERE predicate: `column OP value`
//! - `COUNT(*)` and `COUNT(column)`
//!
//! ```rust,ignore
//! use csvql::{config::EngineSettings, Session};
//!
//! let session = Session::open("data/people.csv", &Default::default(), EngineSettings::default())?;
//! let result = session.run("SELECT name FROM people WHERE department = 'HR'")?;
//! ```

pub mod config;
pub mod export;
pub mod ingest;
pub mod otel;
pub mod query;
pub mod session;
pub mod types;

pub use query::{parse, ParsedQuery, QueryExecutor, QueryResult};
pub use session::Session;
pub use types::{Column, ExecutionError, LoadError, QueryError, Result, SyntaxError, Table};
