//! Query session: the loaded table plus engine settings.
//!
//! A session is the explicit context a caller (the REPL, a test) owns.
//! There is no process-wide current table; independent sessions can coexist.

use crate::config::{EngineSettings, LoadOptions};
use crate::ingest::CsvLoader;
use crate::otel;
use crate::query::{parse, ParsedQuery, QueryExecutor, QueryResult};
use crate::types::{LoadError, Result, Table};
use std::path::Path;
use tracing::debug;

/// Session over a single table.
#[derive(Debug, Clone)]
pub struct Session {
    table: Table,
    executor: QueryExecutor,
}

impl Session {
    /// Create a session over an already built table.
    pub fn new(table: Table, settings: EngineSettings) -> Self {
        Self {
            table,
            executor: QueryExecutor::new(settings),
        }
    }

    /// Load a CSV file and open a session over it.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file cannot be read as a table
    pub fn open<P: AsRef<Path>>(
        path: P,
        options: &LoadOptions,
        settings: EngineSettings,
    ) -> std::result::Result<Self, LoadError> {
        let table = CsvLoader::load_with_options(path, options)?;
        Ok(Self::new(table, settings))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Replace the loaded table. Needs `&mut self`, so no query can run meanwhile.
    pub fn reload(&mut self, table: Table) {
        debug!(old = self.table.name(), new = table.name(), "table replaced");
        self.table = table;
    }

    /// Parse and execute one query.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Syntax` from the parser or `QueryError::Execution`
    /// from the executor
    pub fn run(&self, sql: &str) -> Result<QueryResult> {
        let query = {
            let span = otel::parse_span(sql);
            let _guard = span.enter();
            parse(sql)?
        };
        self.execute(&query)
    }

    /// Execute an already parsed query.
    pub fn execute(&self, query: &ParsedQuery) -> Result<QueryResult> {
        Ok(self.executor.execute(query, &self.table)?)
    }
}
