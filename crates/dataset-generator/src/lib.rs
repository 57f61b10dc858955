//! Deterministic row generator for the vquery virtual datasets.
//!
//! Each dataset is a pure function from row index to row. No row is ever
//! stored: the [`RowGenerator`] derives every field from `index mod size`
//! using the static tables in [`datasets`], and the [`SchemaRegistry`] exposes
//! the matching column descriptors, sizes, periods and per-column cycles.
//!
//! # Architecture
//!
//! ```text
//! DatasetModel (static table)
//!        │
//!        ├──────────────────────────┐
//!        ▼                          ▼
//! ┌─────────────────┐      ┌─────────────────┐
//! │  RowGenerator   │      │ SchemaRegistry  │
//! │                 │      │                 │
//! │  - model        │      │  - schemas      │
//! └────────┬────────┘      └────────┬────────┘
//!          │                        │
//!          ▼                        ▼
//!    Row { index, fields }    columns, size, period, effective_period
//! ```
//!
//! # Example
//!
//! ```rust
//! use dataset_core::{CellValue, Dataset};
//! use dataset_generator::{RowGenerator, SchemaRegistry};
//!
//! let generator = RowGenerator::new(Dataset::Employees);
//! let row = generator.generate(0);
//! assert_eq!(row.get_field("employee_id"), Some(&CellValue::text("E00000000")));
//!
//! let registry = SchemaRegistry::build().unwrap();
//! assert_eq!(registry.size_of(Dataset::Employees), 1_000_000);
//! ```
//!
//! # Formulas
//!
//! - `Identifier` - Prefix plus zero-padded row number
//! - `Label` - Prefix plus plain row number
//! - `OneOf` - Cyclic pick from a value pool
//! - `Computed` - Arbitrary index arithmetic with a declared repeat cycle

pub mod datasets;
pub mod derivation;
pub mod generator;
pub mod generators;
pub mod registry;

// Re-exports for convenience
pub use derivation::{DatasetModel, FieldDerivation, Formula};
pub use generator::{generate, Projection, RowGenerator, RowIterator};
pub use registry::SchemaRegistry;
