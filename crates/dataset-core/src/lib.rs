//! Core types for the vquery virtual dataset engine.
//!
//! This crate provides the foundational types shared by the generator and
//! the query engine:
//!
//! - [`ColumnType`] - Semantic column type (`string`, `number`, `boolean`, `date`)
//! - [`CellValue`] - A single generated scalar
//! - [`Row`] - One generated row, keyed by column in schema order
//! - [`Column`] / [`DatasetSchema`] - Column definitions and dataset metadata
//! - [`Dataset`] - The fixed set of synthetic datasets
//!
//! # Architecture
//!
//! ```text
//! dataset-core (this crate)
//!    │
//!    ├─── dataset-generator  (field derivation tables, RowGenerator, SchemaRegistry)
//!    │
//!    └─── query-engine       (filters, sorting, periodic pagination, dispatch)
//! ```
//!
//! # Example
//!
//! ```rust
//! use dataset_core::{CellValue, Row};
//!
//! let mut row = Row::new(7);
//! row.push("salary", CellValue::Int(60_500));
//!
//! assert_eq!(row.get_field("salary"), Some(&CellValue::Int(60_500)));
//! assert_eq!(row.get_field("bonus"), None);
//! ```

pub mod dataset;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use dataset::Dataset;
pub use schema::{declared_type, Column, DatasetSchema, SchemaError};
pub use types::ColumnType;
pub use values::{format_timestamp, CellValue, Row};
