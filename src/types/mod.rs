//! Core types: table model, literal values, errors.

pub mod error;
pub mod table;
pub mod value;

pub use error::{Clause, ExecutionError, LoadError, QueryError, Result, SyntaxError};
pub use table::{Column, Table};
pub use value::{Literal, Operator};
