//! Value representations for generated rows.
//!
//! Rows are never stored. They are produced on demand by the generator,
//! inspected by the filter evaluator and sort comparator, and serialized
//! into the response for the requested page only.

use crate::types::ColumnType;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Render a timestamp the way clients expect it: `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn serialize_timestamp<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(dt))
}

/// A single generated scalar.
///
/// Serialized untagged, so a row becomes a plain JSON object of strings,
/// numbers, booleans and nulls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing value
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    Text(String),

    /// UTC timestamp, serialized as an ISO 8601 string with milliseconds
    #[serde(serialize_with = "serialize_timestamp")]
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of integer and float cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The column type implied by the runtime shape of this value.
    ///
    /// Only consulted when a column has no declared type.
    pub fn shape(&self) -> Option<ColumnType> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ColumnType::Boolean),
            Self::Int(_) | Self::Float(_) => Some(ColumnType::Number),
            Self::Text(_) => Some(ColumnType::String),
            Self::Timestamp(_) => Some(ColumnType::Date),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Timestamp(dt) => f.write_str(&format_timestamp(dt)),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// One generated row.
///
/// Fields are kept in schema order so the serialized object lists columns
/// the same way the column descriptors do. Keys borrow from the static
/// derivation tables, so building a row only allocates the values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Absolute row index within the dataset
    index: u64,
    /// (column key, value) pairs in schema order
    fields: Vec<(&'static str, CellValue)>,
}

impl Row {
    /// Create an empty row for the given index.
    pub fn new(index: u64) -> Self {
        Self {
            index,
            fields: Vec::new(),
        }
    }

    /// Create an empty row with room for `capacity` fields.
    pub fn with_capacity(index: u64, capacity: usize) -> Self {
        Self {
            index,
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field.
    pub fn push(&mut self, key: &'static str, value: CellValue) {
        self.fields.push((key, value));
    }

    /// Absolute index this row was generated from.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Get a field value by key. Absent keys read as `None` (null).
    pub fn get_field(&self, key: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Iterate over fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    /// Number of fields in this row.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
