//! Error types for table construction and CSV export

use std::io;

use thiserror::Error;

/// Crate-wide `Result` type using [`ExportError`] as the error.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors surfaced by a CSV export call.
///
/// All variants are terminal for the call that produced them: there are no
/// retries, and the first error encountered is returned to the caller
/// unmodified.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output sink failed while the writer was flushing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The delimited writer failed to encode or emit a record.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// The requested row range is inconsistent with the table's row count.
    #[error("invalid row range [{start}, {end}] for table with {rows} rows")]
    InvalidRange {
        start: usize,
        end: usize,
        rows: usize,
    },

    /// A row range was resolved against a table with no rows.
    #[error("cannot resolve a row range against an empty table")]
    EmptyRange,

    /// The caller's cancellation signal fired before row processing completed.
    #[error("export cancelled")]
    Cancelled,
}

/// Errors surfaced while building or mutating an in-memory table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A column's length disagrees with the table's row count.
    #[error("column {name:?} has {len} rows, expected {expected}")]
    ColumnLength {
        name: String,
        len: usize,
        expected: usize,
    },

    /// An appended row's width disagrees with the number of columns.
    #[error("row has {len} cells, expected {expected}")]
    RowWidth { len: usize, expected: usize },
}
