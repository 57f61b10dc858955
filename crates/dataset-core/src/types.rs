//! Semantic column types.
//!
//! `ColumnType` is deliberately small: it describes how a column's values are
//! compared and sorted, not how they are stored. Values themselves are
//! [`CellValue`](crate::values::CellValue)s.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a column.
///
/// Serialized in lowercase (`"string"`, `"number"`, `"boolean"`, `"date"`),
/// matching the column descriptors returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text
    String,

    /// Integer or floating point number
    Number,

    /// true / false
    Boolean,

    /// Calendar timestamp (UTC)
    Date,
}

impl ColumnType {
    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
