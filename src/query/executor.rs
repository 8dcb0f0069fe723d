//! Query execution engine.
//!
//! Execution runs in four steps: validate the query against the table
//! schema, filter rows, then project or count. The table is only read.

use crate::config::EngineSettings;
use crate::otel;
use crate::query::ast::{CountTarget, FilterCondition, ParsedQuery, Projection};
use crate::query::predicates::{is_present, Predicate};
use crate::query::result::QueryResult;
use crate::types::{Clause, Column, ExecutionError, Table};
use tracing::debug;

/// Query executor for parsed SELECT statements.
#[derive(Debug, Clone, Default)]
pub struct QueryExecutor {
    settings: EngineSettings,
}

impl QueryExecutor {
    /// Create new query executor.
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Execute a parsed query against a table.
    ///
    /// # Arguments
    ///
    /// * `query` - Parsed SELECT statement
    /// * `table` - Loaded table (read only)
    ///
    /// # Returns
    ///
    /// `QueryResult::Rows` for projections, `QueryResult::Count` for COUNT
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::TableNotFound` or `ExecutionError::UnknownColumn`
    /// before touching any row, and `ExecutionError::TypeMismatch` under the
    /// strict type policy
    pub fn execute(
        &self,
        query: &ParsedQuery,
        table: &Table,
    ) -> Result<QueryResult, ExecutionError> {
        let span = otel::query_span(&query.to_string(), table.name());
        let _guard = span.enter();

        self.validate(query, table)?;

        let selected = match &query.filter {
            Some(condition) => self.filter_rows(condition, table)?,
            None => (0..table.row_count()).collect(),
        };
        debug!(
            matched = selected.len(),
            total = table.row_count(),
            "filter applied"
        );

        let result = match &query.projection {
            Projection::Wildcard => project(table.columns().iter().collect(), &selected),
            Projection::Columns(names) => {
                let columns = names
                    .iter()
                    .map(|name| lookup(table, name, Clause::Select))
                    .collect::<Result<Vec<_>, _>>()?;
                project(columns, &selected)
            }
            Projection::Count(target) => {
                let value = match target {
                    CountTarget::Star => selected.len(),
                    CountTarget::Column(name) => {
                        let column = lookup(table, name, Clause::Count)?;
                        selected
                            .iter()
                            .filter(|&&row| is_present(&column.values[row]))
                            .count()
                    }
                };
                QueryResult::Count {
                    label: target.label(),
                    value,
                }
            }
        };

        otel::record_returned_rows(result.row_count());
        Ok(result)
    }

    /// Check table name and every referenced column.
    ///
    /// # Errors
    ///
    /// Returns the first `TableNotFound` or `UnknownColumn` found, checking
    /// the SELECT list, then COUNT, then WHERE
    pub fn validate(&self, query: &ParsedQuery, table: &Table) -> Result<(), ExecutionError> {
        if query.table_name != table.name() {
            return Err(ExecutionError::TableNotFound {
                name: query.table_name.clone(),
                loaded: table.name().to_string(),
            });
        }

        for (column, clause) in query.referenced_columns() {
            lookup(table, column, clause)?;
        }
        Ok(())
    }

    /// Row indices satisfying the condition, in table order.
    fn filter_rows(
        &self,
        condition: &FilterCondition,
        table: &Table,
    ) -> Result<Vec<usize>, ExecutionError> {
        let column = lookup(table, &condition.column, Clause::Where)?;
        let predicate = Predicate::new(condition, self.settings.type_mismatch);

        let mut selected = Vec::new();
        for (row, cell) in column.values.iter().enumerate() {
            if predicate.evaluate(cell)? {
                selected.push(row);
            }
        }
        Ok(selected)
    }
}

fn lookup<'t>(table: &'t Table, name: &str, clause: Clause) -> Result<&'t Column, ExecutionError> {
    table
        .column(name)
        .ok_or_else(|| ExecutionError::UnknownColumn {
            column: name.to_string(),
            clause,
            available: table.column_names().collect::<Vec<_>>().join(", "),
        })
}

/// Copy the selected cells of the given columns into a fresh result.
fn project(columns: Vec<&Column>, selected: &[usize]) -> QueryResult {
    let rows = selected
        .iter()
        .map(|&row| {
            columns
                .iter()
                .map(|column| column.values[row].clone())
                .collect()
        })
        .collect();

    QueryResult::Rows {
        columns: columns.iter().map(|c| c.name.clone()).collect(),
        rows,
    }
}
