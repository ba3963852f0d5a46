// Implementations
pub mod arrow_table;
pub mod cell;
pub mod csv_export;
pub mod error;
pub mod export_stats;
pub mod range;
pub mod table;

// Export the main types
pub use arrow_table::ArrowTable;
pub use cell::Cell;
pub use csv_export::{export_to_csv, CsvExportOptions, DEFAULT_NULL_STRING, FLUSH_INTERVAL};
pub use error::{ExportError, Result, TableError};
pub use export_stats::{ExportStats, ExportStatsTracker};
pub use range::RowRange;
pub use table::{Column, MemTable, Table, TableAccess};

// Cancellation signal consumed by `export_to_csv`.
pub use tokio_util::sync::CancellationToken;
