//! vquery library
//!
//! Paginated, filtered, sorted queries over large synthetic datasets that are
//! never materialized.
//!
//! # Crates
//!
//! - `dataset_core` - Column types, cell values, rows and schemas
//! - `dataset_generator` - Deterministic row generation and the schema registry
//! - `query_engine` - Filtering, sorting, periodic pagination and dispatch
//!
//! This crate adds the settings file and the command-line front end.
//!
//! # CLI Usage
//!
//! ```bash
//! # First page of employees
//! vquery run --sql "select * from employees" --page-size 50
//!
//! # Filtered and sorted, with the mock backend's latency
//! vquery run --sql "select * from products" \
//!   --filter "category eq Electronics" --sort price:desc --simulate
//!
//! # Dataset metadata and canned queries
//! vquery schema employees
//! vquery templates
//! ```

pub mod cli;
pub mod config;

pub use cli::RunArgs;
pub use config::{ConfigError, EngineSettings, SimulationSettings};

// Re-export the workspace crates for convenience
pub use dataset_core;
pub use dataset_generator;
pub use query_engine;
