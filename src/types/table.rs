//! In-memory table model.
//!
//! A table is a named set of equal-length text columns. Rows are never
//! materialized; a row is an index into every column.

use crate::types::error::LoadError;
use serde::Serialize;
use std::collections::HashSet;

/// A named column of text cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Immutable table loaded once per session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from columns.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::DuplicateColumn` if two columns share a name, or
    /// `LoadError::ColumnLengthMismatch` if column lengths differ.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(LoadError::DuplicateColumn(column.name.clone()));
            }
        }

        let row_count = columns.first().map(|c| c.values.len()).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.values.len() != row_count) {
            return Err(LoadError::ColumnLengthMismatch {
                column: bad.name.clone(),
                expected: row_count,
                actual: bad.values.len(),
            });
        }

        Ok(Self {
            name: name.into(),
            columns,
            row_count,
        })
    }

    /// Build a table from a header and row-major records.
    ///
    /// Every record must have exactly one value per header column.
    pub fn from_rows(
        name: impl Into<String>,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, LoadError> {
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            if row.len() != columns.len() {
                let column = columns
                    .get(row.len())
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                return Err(LoadError::ColumnLengthMismatch {
                    column,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value);
            }
        }

        Self::new(name, columns)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_table_new() {
        let table = Table::new(
            "people",
            vec![
                Column::new("id", strings(&["1", "2"])),
                Column::new("name", strings(&["Ann", "Bob"])),
            ],
        )
        .unwrap();

        assert_eq!(table.name(), "people");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert!(table.has_column("name"));
        assert!(!table.has_column("Name"));
    }

    #[test]
    fn test_table_rejects_duplicate_columns() {
        let err = Table::new(
            "t",
            vec![Column::new("a", vec![]), Column::new("a", vec![])],
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let err = Table::new(
            "t",
            vec![
                Column::new("a", strings(&["1", "2"])),
                Column::new("b", strings(&["1"])),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::ColumnLengthMismatch { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn test_table_from_rows() {
        let table = Table::from_rows(
            "t",
            strings(&["a", "b"]),
            vec![strings(&["1", "x"]), strings(&["2", "y"])],
        )
        .unwrap();
        assert_eq!(table.column("b").unwrap().values, strings(&["x", "y"]));

        let err = Table::from_rows("t", strings(&["a", "b"]), vec![strings(&["1"])]);
        assert!(err.is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new("empty", vec![]).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.columns().len(), 0);
    }
}
