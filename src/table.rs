//! Table capability traits and an in-memory columnar implementation

use std::sync::{RwLock, RwLockWriteGuard};

use crate::cell::Cell;
use crate::error::TableError;

/// A columnar table that can hand out exclusive access for an export.
pub trait Table {
    /// Block until exclusive access is available.
    ///
    /// The returned guard keeps the row count and cell contents stable until
    /// it is dropped; release happens on drop, on every exit path.
    fn lock(&self) -> Box<dyn TableAccess + '_>;
}

/// Access to a locked table.
///
/// Every method is valid for the lifetime of the guard; the lock the guard
/// holds is what makes the answers consistent with each other.
pub trait TableAccess {
    /// Column names in declared order.
    fn column_names(&self) -> Vec<String>;

    /// Number of rows, shared by every column.
    fn num_rows(&self) -> usize;

    /// Number of columns.
    fn num_columns(&self) -> usize;

    /// Raw value of the cell at (`col`, `row`).
    fn cell(&self, col: usize, row: usize) -> Cell;

    /// String rendering of the cell at (`col`, `row`).
    fn cell_string(&self, col: usize, row: usize) -> String;
}

/// A named column of cells.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// In-memory columnar table.
///
/// All columns share one row count; the invariant is validated on
/// construction and on every appended row. Mutation takes the write lock, so
/// it serializes against exports, and two concurrent exports of the same
/// table block each other for their full duration.
#[derive(Debug)]
pub struct MemTable {
    columns: RwLock<Vec<Column>>,
}

impl MemTable {
    /// Build a table from columns, validating that every column has the same
    /// row count.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        if let Some(first) = columns.first() {
            let expected = first.cells.len();
            for col in &columns {
                if col.cells.len() != expected {
                    return Err(TableError::ColumnLength {
                        name: col.name.clone(),
                        len: col.cells.len(),
                        expected,
                    });
                }
            }
        }
        Ok(Self {
            columns: RwLock::new(columns),
        })
    }

    /// Append one row; `cells` must carry one entry per column.
    ///
    /// Blocks while an export holds the table's lock.
    pub fn push_row(&self, cells: Vec<Cell>) -> Result<(), TableError> {
        let mut columns = self.columns.write().unwrap_or_else(|e| e.into_inner());
        if cells.len() != columns.len() {
            return Err(TableError::RowWidth {
                len: cells.len(),
                expected: columns.len(),
            });
        }
        for (col, cell) in columns.iter_mut().zip(cells) {
            col.cells.push(cell);
        }
        Ok(())
    }

    /// Current row count. Takes the lock; during an export use the guard's
    /// [`TableAccess::num_rows`] instead.
    pub fn num_rows(&self) -> usize {
        let columns = self.columns.read().unwrap_or_else(|e| e.into_inner());
        columns.first().map_or(0, |c| c.cells.len())
    }

    /// Current column count.
    pub fn num_columns(&self) -> usize {
        let columns = self.columns.read().unwrap_or_else(|e| e.into_inner());
        columns.len()
    }
}

impl Table for MemTable {
    fn lock(&self) -> Box<dyn TableAccess + '_> {
        Box::new(MemTableAccess {
            columns: self.columns.write().unwrap_or_else(|e| e.into_inner()),
        })
    }
}

struct MemTableAccess<'a> {
    columns: RwLockWriteGuard<'a, Vec<Column>>,
}

impl TableAccess for MemTableAccess<'_> {
    fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    fn num_columns(&self) -> usize {
        self.columns.len()
    }

    fn cell(&self, col: usize, row: usize) -> Cell {
        self.columns[col].cells[row].clone()
    }

    fn cell_string(&self, col: usize, row: usize) -> String {
        self.columns[col].cells[row].render()
    }
}
