//! Query results.

use serde::{Deserialize, Serialize};

/// Output of a successful query. Owns its data; nothing borrows the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QueryResult {
    /// Projection result, rows in table order
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// COUNT result
    Count { label: String, value: usize },
}

impl QueryResult {
    /// Number of result rows (1 for a count).
    pub fn row_count(&self) -> usize {
        match self {
            Self::Rows { rows, .. } => rows.len(),
            Self::Count { .. } => 1,
        }
    }

    /// Column headers (the label for a count).
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::Rows { columns, .. } => columns.iter().map(String::as_str).collect(),
            Self::Count { label, .. } => vec![label.as_str()],
        }
    }

    /// The scalar of a COUNT query.
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Count { value, .. } => Some(*value),
            Self::Rows { .. } => None,
        }
    }

    /// Values of one result column, by position.
    pub fn column_values(&self, index: usize) -> Vec<&str> {
        match self {
            Self::Rows { rows, .. } => rows
                .iter()
                .filter_map(|row| row.get(index).map(String::as_str))
                .collect(),
            Self::Count { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let result = QueryResult::Count {
            label: "COUNT(*)".into(),
            value: 3,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"kind": "count", "label": "COUNT(*)", "value": 3})
        );

        let result = QueryResult::Rows {
            columns: vec!["name".into()],
            rows: vec![vec!["Ann".into()]],
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"kind": "rows", "columns": ["name"], "rows": [["Ann"]]})
        );
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.count(), None);
        assert_eq!(result.column_values(0), vec!["Ann"]);
    }
}
