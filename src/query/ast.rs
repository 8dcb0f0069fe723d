//! Structured form of a parsed SELECT statement.

use crate::types::{Literal, Operator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parsed SQL query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub table_name: String,
    pub projection: Projection,
    pub filter: Option<FilterCondition>,
}

/// What the query returns. Plain columns and COUNT cannot be mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// `*`: every column, in table order
    Wildcard,
    /// Explicit list, order kept, duplicates allowed, never empty
    Columns(Vec<String>),
    /// `COUNT(*)` or `COUNT(column)`
    Count(CountTarget),
}

/// Argument of COUNT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountTarget {
    Star,
    Column(String),
}

impl CountTarget {
    /// Result label, e.g. `COUNT(*)` or `COUNT(email)`.
    pub fn label(&self) -> String {
        match self {
            Self::Star => "COUNT(*)".to_string(),
            Self::Column(column) => format!("COUNT({})", column),
        }
    }
}

/// WHERE predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub column: String,
    pub operator: Operator,
    pub operand: Literal,
}

impl ParsedQuery {
    /// Every column the query references, paired with the clause it appears in.
    pub fn referenced_columns(&self) -> Vec<(&str, crate::types::Clause)> {
        use crate::types::Clause;

        let mut refs = Vec::new();
        match &self.projection {
            Projection::Wildcard | Projection::Count(CountTarget::Star) => {}
            Projection::Columns(columns) => {
                refs.extend(columns.iter().map(|c| (c.as_str(), Clause::Select)));
            }
            Projection::Count(CountTarget::Column(column)) => {
                refs.push((column.as_str(), Clause::Count));
            }
        }
        if let Some(filter) = &self.filter {
            refs.push((filter.column.as_str(), Clause::Where));
        }
        refs
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self.projection, Projection::Count(_))
    }
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let select = match &self.projection {
            Projection::Wildcard => "*".to_string(),
            Projection::Columns(columns) => columns.join(", "),
            Projection::Count(target) => target.label(),
        };
        write!(f, "SELECT {} FROM {}", select, self.table_name)?;
        if let Some(filter) = &self.filter {
            write!(
                f,
                " WHERE {} {} {}",
                filter.column, filter.operator, filter.operand
            )?;
        }
        Ok(())
    }
}
