//! Column and dataset schema definitions.
//!
//! A [`DatasetSchema`] is the read-only description of one dataset: its
//! ordered columns, its logical size (number of addressable rows) and its
//! period (the index span after which generated values repeat).

use crate::dataset::Dataset;
use crate::types::ColumnType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Dataset name not recognized
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// Two columns share a key
    #[error("Duplicate column '{column}' in dataset '{dataset}'")]
    DuplicateColumn { dataset: Dataset, column: String },

    /// Size or period is unusable
    #[error("Invalid geometry for dataset '{dataset}': size={size}, period={period}")]
    InvalidGeometry {
        dataset: Dataset,
        size: u64,
        period: u64,
    },
}

// ============================================================================
// Column
// ============================================================================

/// Column descriptor returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique key within the dataset
    pub key: String,

    /// Display label
    pub name: String,

    /// Semantic type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Presentation hint: the column holds a currency amount
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_amount: bool,
}

impl Column {
    /// Create a new column.
    pub fn new(key: impl Into<String>, name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            column_type,
            is_amount: false,
        }
    }

    /// Mark the column as a currency amount.
    pub fn amount(mut self) -> Self {
        self.is_amount = true;
        self
    }
}

/// Find the declared type of `key` in a column list.
pub fn declared_type(columns: &[Column], key: &str) -> Option<ColumnType> {
    columns
        .iter()
        .find(|c| c.key == key)
        .map(|c| c.column_type)
}

// ============================================================================
// Dataset Schema
// ============================================================================

/// Read-only description of a dataset.
#[derive(Debug, Clone)]
pub struct DatasetSchema {
    /// Which dataset this describes
    pub dataset: Dataset,

    /// Total addressable row count
    pub size: u64,

    /// Index span after which generated values repeat
    pub period: u64,

    /// Columns in display order
    pub columns: Vec<Column>,

    /// Cached column lookup
    column_map: HashMap<String, usize>,
}

impl DatasetSchema {
    /// Build a schema, validating keys and geometry.
    pub fn new(
        dataset: Dataset,
        size: u64,
        period: u64,
        columns: Vec<Column>,
    ) -> Result<Self, SchemaError> {
        if size == 0 || period == 0 {
            return Err(SchemaError::InvalidGeometry {
                dataset,
                size,
                period,
            });
        }

        let mut column_map = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if column_map.insert(column.key.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateColumn {
                    dataset,
                    column: column.key.clone(),
                });
            }
        }

        Ok(Self {
            dataset,
            size,
            period,
            columns,
            column_map,
        })
    }

    /// Get a column by key.
    pub fn get_column(&self, key: &str) -> Option<&Column> {
        self.column_map
            .get(key)
            .and_then(|&idx| self.columns.get(idx))
    }

    /// Declared type of a column, or `None` when the key is not in the schema.
    pub fn column_type(&self, key: &str) -> Option<ColumnType> {
        self.get_column(key).map(|c| c.column_type)
    }
}
