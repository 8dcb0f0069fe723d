//! Predicate evaluation for WHERE conditions.
//!
//! Cells are text. A text literal compares as a string; a numeric literal
//! coerces the (trimmed) cell to `f64` first. What happens when that coercion
//! fails is decided by the `TypeMismatchPolicy`.

use crate::config::TypeMismatchPolicy;
use crate::query::ast::FilterCondition;
use crate::types::{ExecutionError, Literal, Operator};
use std::cmp::Ordering;

/// A filter condition bound to a mismatch policy, ready to test cells.
#[derive(Debug, Clone, Copy)]
pub struct Predicate<'a> {
    condition: &'a FilterCondition,
    policy: TypeMismatchPolicy,
}

impl<'a> Predicate<'a> {
    pub fn new(condition: &'a FilterCondition, policy: TypeMismatchPolicy) -> Self {
        Self { condition, policy }
    }

    /// Evaluate the predicate against one cell of the condition's column.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::TypeMismatch` only under the strict policy,
    /// when a numeric literal meets a cell that is not a number.
    pub fn evaluate(&self, cell: &str) -> Result<bool, ExecutionError> {
        let operator = self.condition.operator;
        match compare_cell(cell, &self.condition.operand) {
            Some(ordering) => Ok(operator.holds(ordering)),
            None => match self.policy {
                // Non-numeric cell: unequal to everything, ordered against nothing
                TypeMismatchPolicy::Permissive => Ok(operator == Operator::NotEq),
                TypeMismatchPolicy::Strict => Err(ExecutionError::TypeMismatch {
                    column: self.condition.column.clone(),
                    value: cell.to_string(),
                    literal: self.condition.operand.to_string(),
                }),
            },
        }
    }
}

/// Order a cell relative to a literal.
///
/// Returns `None` when the literal is numeric and the cell does not parse as
/// a finite number.
pub fn compare_cell(cell: &str, literal: &Literal) -> Option<Ordering> {
    match literal {
        Literal::Text(text) => Some(cell.cmp(text.as_str())),
        Literal::Number(number) => parse_numeric(cell).and_then(|n| n.partial_cmp(number)),
    }
}

/// Best-effort numeric reading of a cell.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Null convention for `COUNT(column)`: only the empty string is absent.
pub fn is_present(cell: &str) -> bool {
    !cell.is_empty()
}
