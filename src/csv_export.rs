//! Streaming CSV export for columnar tables

use std::io;

use csv::{Terminator, WriterBuilder};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::{ExportError, Result};
use crate::export_stats::ExportStatsTracker;
use crate::range::RowRange;
use crate::table::Table;

/// Rows written between periodic writer flushes.
pub const FLUSH_INTERVAL: usize = 100;

/// Default replacement emitted for absent values.
pub const DEFAULT_NULL_STRING: &str = "NaN";

/// Options for a single CSV export call.
///
/// The value is snapshotted when the export starts and never mutated
/// afterwards. `None` passed to [`export_to_csv`] means all defaults.
#[derive(Debug, Clone)]
pub struct CsvExportOptions {
    /// Replacement emitted for absent values (default: `"NaN"`).
    pub null_string: String,
    /// Rows to export (default: all rows).
    pub range: RowRange,
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Terminate records with `\r\n` instead of `\n` (default: `false`).
    pub use_crlf: bool,
    /// Optional progress counters, bumped while the export runs.
    pub stats: Option<ExportStatsTracker>,
}

impl Default for CsvExportOptions {
    fn default() -> Self {
        Self {
            null_string: DEFAULT_NULL_STRING.to_string(),
            range: RowRange::default(),
            delimiter: b',',
            use_crlf: false,
            stats: None,
        }
    }
}

impl CsvExportOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement string for absent values (default: `"NaN"`).
    pub fn null_string(mut self, null_string: impl Into<String>) -> Self {
        self.null_string = null_string.into();
        self
    }

    /// Restrict the export to an inclusive row range (default: all rows).
    pub fn range(mut self, range: RowRange) -> Self {
        self.range = range;
        self
    }

    /// Set the field delimiter (default: `,`).
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Terminate records with `\r\n` (default: `\n`).
    pub fn use_crlf(mut self, use_crlf: bool) -> Self {
        self.use_crlf = use_crlf;
        self
    }

    /// Attach progress counters.
    pub fn stats(mut self, stats: ExportStatsTracker) -> Self {
        self.stats = Some(stats);
        self
    }
}

/// True when a cell must be replaced by the configured null string: the raw
/// value is the null marker, or the rendering spells `nan` in any case, or is
/// the literal `null` (lowercase only).
fn is_absent(raw_is_null: bool, rendered: &str) -> bool {
    raw_is_null || rendered.eq_ignore_ascii_case("nan") || rendered == "null"
}

/// Export a table as delimited text.
///
/// Writes one header record with the column names in declared order, followed
/// by one record per selected row, substituting the configured null string for
/// absent values and flushing the writer every [`FLUSH_INTERVAL`] rows. The
/// table's lock is held for the whole call, so the row count and contents
/// cannot change underneath the export; the lock is released on every exit
/// path.
///
/// Cancellation is cooperative: the token is polled once per row, before the
/// row is processed, so no partial row is ever produced.
///
/// # Arguments
/// * `cancel` - Cancellation signal polled at row boundaries
/// * `output` - Sink receiving the delimited text
/// * `table` - Table to export
/// * `options` - Optional configuration; `None` uses the defaults
///
/// # Returns
/// `Ok(())` once the header, every selected row, and the final flush have
/// completed, or the first error encountered. On error the sink may hold a
/// partially written prefix; callers needing atomicity should export to a
/// temporary sink and commit on success.
pub fn export_to_csv<W: io::Write>(
    cancel: &CancellationToken,
    output: W,
    table: &dyn Table,
    options: Option<CsvExportOptions>,
) -> Result<()> {
    let options = options.unwrap_or_default();

    let terminator = if options.use_crlf {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    };
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(terminator)
        .from_writer(output);

    // Held until return; drop releases it on every path.
    let access = table.lock();

    let header = access.column_names();
    let n_rows = access.num_rows();
    let n_cols = access.num_columns();
    debug!("starting CSV export: {} columns, {} rows", n_cols, n_rows);

    writer.write_record(&header)?;

    if n_rows > 0 {
        let (start, end) = options.range.limits(n_rows)?;

        let mut rows_since_flush = 0usize;
        let mut fields: Vec<String> = Vec::with_capacity(n_cols);

        for row in start..=end {
            if cancel.is_cancelled() {
                return Err(ExportError::Cancelled);
            }

            rows_since_flush += 1;
            if rows_since_flush > FLUSH_INTERVAL {
                writer.flush()?;
                trace!("periodic flush at row {}", row);
                if let Some(ref stats) = options.stats {
                    stats.add_flush();
                }
                // The row that tripped the flush opens the next batch.
                rows_since_flush = 1;
            }

            fields.clear();
            for col in 0..n_cols {
                let raw = access.cell(col, row);
                let rendered = access.cell_string(col, row);
                if is_absent(raw.is_null(), &rendered) {
                    fields.push(options.null_string.clone());
                } else {
                    fields.push(rendered);
                }
            }

            writer.write_record(&fields)?;
            if let Some(ref stats) = options.stats {
                stats.add_rows(1);
            }
        }
    }

    writer.flush()?;
    if let Some(ref stats) = options.stats {
        stats.add_flush();
    }
    debug!("CSV export complete");

    Ok(())
}
