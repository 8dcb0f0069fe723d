//! Loading tabular data into memory.

pub mod csv;

pub use self::csv::CsvLoader;
