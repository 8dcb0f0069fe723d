//! CSV ingestion into an in-memory table.

use crate::config::LoadOptions;
use crate::otel;
use crate::types::{LoadError, Table};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// CSV loader.
pub struct CsvLoader;

impl CsvLoader {
    /// Load a CSV file into a table named after the file stem.
    ///
    /// # Arguments
    ///
    /// * `path` - CSV file path (`data/people.csv` becomes table `people`)
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` if the file is missing, `LoadError::Csv`
    /// for malformed or ragged records, and header errors for blank or
    /// duplicate column names
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Table, LoadError> {
        Self::load_with_options(path, &LoadOptions::default())
    }

    /// Load with custom options.
    pub fn load_with_options<P: AsRef<Path>>(
        path: P,
        options: &LoadOptions,
    ) -> Result<Table, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LoadError::InvalidName(path.to_path_buf()))?;

        let span = otel::load_span(name, &path.display().to_string());
        let _guard = span.enter();

        let file = std::fs::File::open(path)?;
        let table = Self::load_from_reader(name, file, options)?;

        otel::record_returned_rows(table.row_count());
        info!(
            table = table.name(),
            rows = table.row_count(),
            columns = table.columns().len(),
            "loaded table"
        );
        Ok(table)
    }

    /// Read CSV from any reader. The first record is the header.
    pub fn load_from_reader<R: Read>(
        name: &str,
        reader: R,
        options: &LoadOptions,
    ) -> Result<Table, LoadError> {
        let mut reader = ::csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let header: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if let Some(index) = header.iter().position(|h| h.is_empty()) {
            return Err(LoadError::EmptyHeader(index + 1));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Table::from_rows(name, header, rows)
    }
}
