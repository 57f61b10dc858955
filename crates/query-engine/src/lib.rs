//! Query engine for the vquery virtual datasets.
//!
//! Answers paginated, filtered, sorted queries against tables of up to two
//! million rows without materializing them. Only the rows of the requested
//! page are fully generated; match counts come from scanning one period of
//! the dataset and scaling.
//!
//! # Architecture
//!
//! ```text
//! QueryRequest
//!      │
//!      ▼
//! ┌──────────────────┐   latency / failure   ┌───────────────────┐
//! │   QueryEngine    │ ────────────────────▶ │ BackendSimulation │
//! │                  │                       └───────────────────┘
//! │  resolve dataset │
//! │  compile filters │
//! └────────┬─────────┘
//!          │ effective period
//!          ▼
//! ┌──────────────────┐      ┌──────────────┐
//! │    Paginator     │ ───▶ │ RowGenerator │
//! │  count + select  │      └──────────────┘
//! └────────┬─────────┘
//!          │ page indices
//!          ▼
//!   generate rows, sort page
//!          │
//!          ▼
//!   QueryResponse { columns, rows, page, pageSize, totalRowCount, elapsedMs }
//! ```
//!
//! # Example
//!
//! ```rust
//! use query_engine::{Filter, FilterOp, QueryEngine, QueryRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! let engine = QueryEngine::new().unwrap();
//! let request = QueryRequest::new("select * from products")
//!     .with_page(1, 10)
//!     .with_filter(Filter::new("category", FilterOp::Eq, "Electronics"));
//!
//! let response = engine.execute(&request, &CancellationToken::new()).unwrap();
//! assert_eq!(response.total_row_count, 200_000);
//! assert_eq!(response.rows.len(), 10);
//! ```

pub mod coerce;
pub mod dispatcher;
pub mod error;
pub mod filter;
pub mod paginate;
pub mod request;
pub mod simulation;
pub mod sort;

// Re-exports for convenience
pub use dispatcher::{DatasetDetector, QueryEngine};
pub use error::{QueryError, Result};
pub use filter::{matches, FilterSet};
pub use paginate::{PageSelection, Paginator};
pub use request::{
    Filter, FilterOp, PageWindow, QueryRequest, QueryResponse, QueryTemplate, SortSpec,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, QUERY_TEMPLATES,
};
pub use simulation::{BackendSimulation, MockBackend, NoSimulation};
pub use sort::{compare, sort_rows};
