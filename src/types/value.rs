//! Literal values and comparison operators.
//!
//! Table cells are stored as text; a `Literal` is the typed right-hand side of
//! a WHERE condition. Cells are coerced to the literal's type at comparison time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal operand of a filter condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Literal {
    /// Quoted string, quotes stripped
    Text(String),
    /// Unquoted integer or decimal
    Number(f64),
}

impl Literal {
    /// Parse an unquoted numeric literal, sign included.
    ///
    /// Returns `None` for anything `f64` cannot represent as a finite number.
    pub fn parse_number(raw: &str) -> Option<Self> {
        raw.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Literal::Number)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
}

impl Operator {
    /// Operator symbol as written in SQL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
        }
    }

    /// Apply the operator to an already computed ordering.
    pub fn holds(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering;

        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::NotEq => ordering != Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Lt => ordering == Ordering::Less,
            Self::GtEq => ordering != Ordering::Less,
            Self::LtEq => ordering != Ordering::Greater,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_parse_number() {
        assert_eq!(Literal::parse_number("42"), Some(Literal::Number(42.0)));
        assert_eq!(Literal::parse_number("-3.5"), Some(Literal::Number(-3.5)));
        assert_eq!(Literal::parse_number("abc"), None);
        assert_eq!(Literal::parse_number("inf"), None);
    }

    #[test]
    fn test_operator_holds() {
        assert!(Operator::GtEq.holds(Ordering::Equal));
        assert!(Operator::GtEq.holds(Ordering::Greater));
        assert!(!Operator::GtEq.holds(Ordering::Less));
        assert!(Operator::NotEq.holds(Ordering::Less));
        assert!(!Operator::Lt.holds(Ordering::Equal));
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Text("HR".into()).to_string(), "'HR'");
        assert_eq!(Literal::Number(30.0).to_string(), "30");
        assert_eq!(Literal::Number(2.5).to_string(), "2.5");
    }
}
