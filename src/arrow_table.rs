//! Arrow adapter exposing a `RecordBatch` through the table capability

use std::sync::{RwLock, RwLockWriteGuard};

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;

use crate::cell::Cell;
use crate::table::{Table, TableAccess};

/// Adapter that lets an Arrow `RecordBatch` be exported like any other table.
///
/// The batch itself is immutable; the lock exists only to serialize
/// concurrent exports of the same table, per the table capability contract.
pub struct ArrowTable {
    batch: RecordBatch,
    lock: RwLock<()>,
}

impl ArrowTable {
    pub fn new(batch: RecordBatch) -> Self {
        Self {
            batch,
            lock: RwLock::new(()),
        }
    }

    /// Number of rows in the wrapped batch.
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }
}

impl Table for ArrowTable {
    fn lock(&self) -> Box<dyn TableAccess + '_> {
        Box::new(ArrowTableAccess {
            _guard: self.lock.write().unwrap_or_else(|e| e.into_inner()),
            batch: &self.batch,
        })
    }
}

struct ArrowTableAccess<'a> {
    _guard: RwLockWriteGuard<'a, ()>,
    batch: &'a RecordBatch,
}

impl TableAccess for ArrowTableAccess<'_> {
    fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().to_string())
            .collect()
    }

    fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    fn cell(&self, col: usize, row: usize) -> Cell {
        array_cell(self.batch.column(col), row)
    }

    fn cell_string(&self, col: usize, row: usize) -> String {
        array_cell(self.batch.column(col), row).render()
    }
}

/// Convert one slot of an Arrow array to a `Cell`
fn array_cell(array: &ArrayRef, row: usize) -> Cell {
    if array.is_null(row) {
        return Cell::Null;
    }

    match array.data_type() {
        DataType::Boolean => {
            let arr = array.as_any().downcast_ref::<arrow::array::BooleanArray>().unwrap();
            Cell::Bool(arr.value(row))
        }
        DataType::Int8 => {
            let arr = array.as_any().downcast_ref::<arrow::array::Int8Array>().unwrap();
            Cell::Int(arr.value(row) as i64)
        }
        DataType::Int16 => {
            let arr = array.as_any().downcast_ref::<arrow::array::Int16Array>().unwrap();
            Cell::Int(arr.value(row) as i64)
        }
        DataType::Int32 => {
            let arr = array.as_any().downcast_ref::<arrow::array::Int32Array>().unwrap();
            Cell::Int(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = array.as_any().downcast_ref::<arrow::array::Int64Array>().unwrap();
            Cell::Int(arr.value(row))
        }
        DataType::UInt8 => {
            let arr = array.as_any().downcast_ref::<arrow::array::UInt8Array>().unwrap();
            Cell::UInt(arr.value(row) as u64)
        }
        DataType::UInt16 => {
            let arr = array.as_any().downcast_ref::<arrow::array::UInt16Array>().unwrap();
            Cell::UInt(arr.value(row) as u64)
        }
        DataType::UInt32 => {
            let arr = array.as_any().downcast_ref::<arrow::array::UInt32Array>().unwrap();
            Cell::UInt(arr.value(row) as u64)
        }
        DataType::UInt64 => {
            let arr = array.as_any().downcast_ref::<arrow::array::UInt64Array>().unwrap();
            Cell::UInt(arr.value(row))
        }
        DataType::Float32 => {
            let arr = array.as_any().downcast_ref::<arrow::array::Float32Array>().unwrap();
            Cell::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = array.as_any().downcast_ref::<arrow::array::Float64Array>().unwrap();
            Cell::Float(arr.value(row))
        }
        DataType::Utf8 => {
            let arr = array.as_any().downcast_ref::<arrow::array::StringArray>().unwrap();
            Cell::Str(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = array.as_any().downcast_ref::<arrow::array::LargeStringArray>().unwrap();
            Cell::Str(arr.value(row).to_string())
        }
        DataType::Binary => {
            let arr = array.as_any().downcast_ref::<arrow::array::BinaryArray>().unwrap();
            Cell::Binary(arr.value(row).to_vec())
        }
        DataType::LargeBinary => {
            let arr = array.as_any().downcast_ref::<arrow::array::LargeBinaryArray>().unwrap();
            Cell::Binary(arr.value(row).to_vec())
        }
        DataType::Date32 => {
            let arr = array.as_any().downcast_ref::<arrow::array::Date32Array>().unwrap();
            let days = arr.value(row);
            let date = chrono::NaiveDate::from_num_days_from_ce_opt(days + 719_163)
                .unwrap_or_else(|| chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
            Cell::Date(date)
        }
        DataType::Date64 => {
            let arr = array.as_any().downcast_ref::<arrow::array::Date64Array>().unwrap();
            let millis = arr.value(row);
            let datetime = chrono::DateTime::from_timestamp_millis(millis)
                .unwrap_or_else(|| chrono::DateTime::from_timestamp_millis(0).unwrap());
            Cell::Date(datetime.date_naive())
        }
        DataType::Timestamp(unit, _tz) => {
            let datetime = match unit {
                TimeUnit::Second => {
                    let arr = array.as_any().downcast_ref::<arrow::array::TimestampSecondArray>().unwrap();
                    chrono::DateTime::from_timestamp(arr.value(row), 0)
                }
                TimeUnit::Millisecond => {
                    let arr = array.as_any().downcast_ref::<arrow::array::TimestampMillisecondArray>().unwrap();
                    chrono::DateTime::from_timestamp_millis(arr.value(row))
                }
                TimeUnit::Microsecond => {
                    let arr = array.as_any().downcast_ref::<arrow::array::TimestampMicrosecondArray>().unwrap();
                    chrono::DateTime::from_timestamp_micros(arr.value(row))
                }
                TimeUnit::Nanosecond => {
                    let arr = array.as_any().downcast_ref::<arrow::array::TimestampNanosecondArray>().unwrap();
                    let ts = arr.value(row);
                    let secs = ts / 1_000_000_000;
                    let nanos = (ts % 1_000_000_000) as u32;
                    chrono::DateTime::from_timestamp(secs, nanos)
                }
            };
            let datetime = datetime
                .unwrap_or_else(|| chrono::DateTime::from_timestamp(0, 0).unwrap());
            Cell::Timestamp(datetime)
        }
        DataType::Decimal128(_, scale) => {
            let arr = array.as_any().downcast_ref::<arrow::array::Decimal128Array>().unwrap();
            Cell::Str(format_decimal128(arr.value(row), *scale as i32))
        }
        _ => {
            // For unsupported types, return a string representation
            Cell::Str(format!("<{:?}>", array.data_type()))
        }
    }
}

/// Format a decimal128 value with the given scale
fn format_decimal128(value: i128, scale: i32) -> String {
    if scale == 0 {
        return value.to_string();
    }

    let divisor = 10i128.pow(scale as u32);
    let int_part = value / divisor;
    let frac_part = (value % divisor).abs();

    if frac_part == 0 {
        int_part.to_string()
    } else {
        format!("{}.{:0width$}", int_part, frac_part, width = scale as usize)
            .trim_end_matches('0')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int32Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    fn sample_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, true),
            Field::new("score", DataType::Float64, true),
            Field::new("name", DataType::Utf8, true),
        ]));

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![Some(1), None, Some(3)])),
                Arc::new(Float64Array::from(vec![Some(1.5), Some(f64::NAN), None])),
                Arc::new(StringArray::from(vec![Some("Alice"), Some("Bob"), None])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_column_names_and_shape() {
        let table = ArrowTable::new(sample_batch());
        let access = table.lock();
        assert_eq!(access.column_names(), vec!["id", "score", "name"]);
        assert_eq!(access.num_rows(), 3);
        assert_eq!(access.num_columns(), 3);
    }

    #[test]
    fn test_null_slots_map_to_null_cells() {
        let table = ArrowTable::new(sample_batch());
        let access = table.lock();
        assert!(access.cell(0, 1).is_null());
        assert!(access.cell(2, 2).is_null());
        assert_eq!(access.cell(0, 0), Cell::Int(1));
        assert_eq!(access.cell(2, 1), Cell::Str("Bob".to_string()));
    }

    #[test]
    fn test_nan_slot_renders_as_nan() {
        let table = ArrowTable::new(sample_batch());
        let access = table.lock();
        assert_eq!(access.cell_string(1, 1), "NaN");
        assert!(!access.cell(1, 1).is_null());
    }

    #[test]
    fn test_date32_conversion() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "day",
            DataType::Date32,
            false,
        )]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(arrow::array::Date32Array::from(vec![0, 19723]))],
        )
        .unwrap();

        let table = ArrowTable::new(batch);
        let access = table.lock();
        assert_eq!(access.cell_string(0, 0), "1970-01-01");
        assert_eq!(access.cell_string(0, 1), "2024-01-01");
    }

    #[test]
    fn test_format_decimal128() {
        assert_eq!(format_decimal128(12345, 0), "12345");
        assert_eq!(format_decimal128(12345, 2), "123.45");
        assert_eq!(format_decimal128(12300, 2), "123");
        assert_eq!(format_decimal128(-12345, 2), "-123.45");
        assert_eq!(format_decimal128(12340, 2), "123.4");
    }
}
