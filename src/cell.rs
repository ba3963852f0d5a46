//! Cell values and their string rendering

use chrono::{DateTime, NaiveDate, Utc};

/// A single table cell: a typed scalar or the explicit null marker.
///
/// Float cells may carry NaN as their not-a-number marker; it renders as
/// `"NaN"` and is treated as absent by the exporter.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Binary(Vec<u8>),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl Cell {
    /// True only for the explicit null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Render the cell as a field string.
    ///
    /// Quoting and escaping are the delimited writer's job; this produces the
    /// raw field content. `Null` renders as the empty string.
    pub fn render(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(v) => v.to_string(),
            Cell::Int(v) => v.to_string(),
            Cell::UInt(v) => v.to_string(),
            Cell::Float(v) => v.to_string(),
            Cell::Str(v) => v.clone(),
            Cell::Binary(v) => hex::encode(v),
            Cell::Date(v) => v.format("%Y-%m-%d").to_string(),
            Cell::Timestamp(v) => v.format("%Y-%m-%d %H:%M:%S.%3f").to_string(),
        }
    }
}
