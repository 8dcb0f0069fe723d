//! SQL query parsing and execution.
//!
//! Supports a single-table SELECT with projection, one WHERE predicate and COUNT.

pub mod ast;
pub mod executor;
pub mod parser;
pub mod predicates;
pub mod result;

pub use ast::{CountTarget, FilterCondition, ParsedQuery, Projection};
pub use executor::QueryExecutor;
pub use parser::{parse, QueryParser};
pub use result::QueryResult;
