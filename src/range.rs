//! Row-range selection for partial exports

use crate::error::{ExportError, Result};

/// An inclusive range of row indices to export.
///
/// Unset bounds default to the first and last row respectively, so the
/// default value selects every row. The bounds are only checked against a
/// concrete row count when [`RowRange::limits`] resolves them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowRange {
    /// First row to export; `None` means row 0.
    pub start: Option<usize>,
    /// Last row to export (inclusive); `None` means the last row.
    pub end: Option<usize>,
}

impl RowRange {
    /// Select every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Select rows `start..=end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Resolve the range into concrete inclusive bounds for a table with
    /// `n_rows` rows.
    ///
    /// Fails with [`ExportError::EmptyRange`] when the table has no rows, and
    /// with [`ExportError::InvalidRange`] when the start is past the end or
    /// the end is past the last row.
    pub fn limits(&self, n_rows: usize) -> Result<(usize, usize)> {
        if n_rows == 0 {
            return Err(ExportError::EmptyRange);
        }

        let start = self.start.unwrap_or(0);
        let end = self.end.unwrap_or(n_rows - 1);

        if start > end || end >= n_rows {
            return Err(ExportError::InvalidRange {
                start,
                end,
                rows: n_rows,
            });
        }

        Ok((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_all_rows() {
        assert_eq!(RowRange::all().limits(10).unwrap(), (0, 9));
        assert_eq!(RowRange::default().limits(1).unwrap(), (0, 0));
    }

    #[test]
    fn test_explicit_bounds() {
        assert_eq!(RowRange::new(2, 5).limits(10).unwrap(), (2, 5));
        assert_eq!(RowRange::new(0, 9).limits(10).unwrap(), (0, 9));
        assert_eq!(RowRange::new(9, 9).limits(10).unwrap(), (9, 9));
    }

    #[test]
    fn test_half_open_bounds() {
        let from_three = RowRange {
            start: Some(3),
            end: None,
        };
        assert_eq!(from_three.limits(10).unwrap(), (3, 9));

        let up_to_three = RowRange {
            start: None,
            end: Some(3),
        };
        assert_eq!(up_to_three.limits(10).unwrap(), (0, 3));
    }

    #[test]
    fn test_start_past_end_fails() {
        let err = RowRange::new(5, 2).limits(10).unwrap_err();
        assert!(matches!(
            err,
            ExportError::InvalidRange {
                start: 5,
                end: 2,
                rows: 10
            }
        ));
    }

    #[test]
    fn test_end_past_last_row_fails() {
        let err = RowRange::new(0, 10).limits(10).unwrap_err();
        assert!(matches!(err, ExportError::InvalidRange { .. }));
    }

    #[test]
    fn test_empty_table_fails() {
        assert!(matches!(
            RowRange::all().limits(0).unwrap_err(),
            ExportError::EmptyRange
        ));
    }
}
