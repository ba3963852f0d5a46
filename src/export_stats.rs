//! Export statistics tracking module

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Tracks export progress counters for debugging and monitoring.
///
/// Clones share the same counters, so a caller can keep one handle while the
/// exporter bumps the other. Purely observational; never affects control
/// flow.
#[derive(Debug, Clone)]
pub struct ExportStatsTracker {
    rows_written: Arc<AtomicU64>,
    flushes: Arc<AtomicU64>,
}

impl Default for ExportStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportStatsTracker {
    pub fn new() -> Self {
        Self {
            rows_written: Arc::new(AtomicU64::new(0)),
            flushes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record written rows.
    pub fn add_rows(&self, rows: u64) {
        self.rows_written.fetch_add(rows, Ordering::Relaxed);
    }

    /// Record one writer flush.
    pub fn add_flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    /// Rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows_written.load(Ordering::Relaxed)
    }

    /// Flushes performed so far.
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    /// Point-in-time view of the counters.
    pub fn snapshot(&self) -> ExportStats {
        ExportStats {
            rows_written: self.rows_written.load(Ordering::Relaxed),
            flushes: self.flushes.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time export statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    pub rows_written: u64,
    pub flushes: u64,
}
