//! Request and response types.
//!
//! Field names follow the JSON shape clients send (`pageSize`,
//! `totalRowCount`, ...). Filters also accept `operator` for `op`, and sort keys
//! accept `descending` for `desc`.

use crate::error::QueryError;
use dataset_core::{Column, Dataset, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page size used when a request does not carry one.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Upper bound for the page size.
pub const MAX_PAGE_SIZE: u64 = 2_000;

// ============================================================================
// Filters
// ============================================================================

/// Filter operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOp {
    Contains,
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    StartsWith,
    EndsWith,
}

impl FilterOp {
    pub const ALL: [FilterOp; 9] = [
        FilterOp::Contains,
        FilterOp::Eq,
        FilterOp::Neq,
        FilterOp::Gt,
        FilterOp::Gte,
        FilterOp::Lt,
        FilterOp::Lte,
        FilterOp::StartsWith,
        FilterOp::EndsWith,
    ];

    /// Wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOp {
    type Err = QueryError;

    /// Accepts wire names (case-insensitive) and the usual comparison symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.to_ascii_lowercase().as_str() {
            "contains" | "~" => Self::Contains,
            "eq" | "=" | "==" => Self::Eq,
            "neq" | "!=" | "<>" => Self::Neq,
            "gt" | ">" => Self::Gt,
            "gte" | ">=" => Self::Gte,
            "lt" | "<" => Self::Lt,
            "lte" | "<=" => Self::Lte,
            "startswith" | "^=" => Self::StartsWith,
            "endswith" | "$=" => Self::EndsWith,
            _ => {
                return Err(QueryError::InvalidInput(format!(
                    "unknown filter operator '{s}'"
                )))
            }
        };
        Ok(op)
    }
}

/// A single predicate on one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub key: String,
    #[serde(alias = "operator")]
    pub op: FilterOp,
    #[serde(default)]
    pub value: String,
}

impl Filter {
    pub fn new(key: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op,
            value: value.into(),
        }
    }
}

impl FromStr for Filter {
    type Err = QueryError;

    /// Parses `"key op value"`. The value is everything after the operator
    /// and may be empty or contain spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (key, rest) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| QueryError::InvalidInput(format!("expected 'key op value', got '{s}'")))?;
        let rest = rest.trim_start();
        let (op, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        Ok(Self::new(key, op.parse()?, value.trim()))
    }
}

// ============================================================================
// Sort
// ============================================================================

/// Single-key sort specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    #[serde(default, alias = "descending")]
    pub desc: bool,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            desc: false,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            desc: true,
        }
    }
}

impl FromStr for SortSpec {
    type Err = QueryError;

    /// Parses `key`, `key:asc` or `key:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.rsplit_once(':') {
            Some((key, dir)) => (key, Some(dir)),
            None => (s, None),
        };
        if key.trim().is_empty() {
            return Err(QueryError::InvalidInput("sort key is empty".to_string()));
        }
        let desc = match direction.map(|d| d.to_ascii_lowercase()) {
            None => false,
            Some(d) if d == "asc" => false,
            Some(d) if d == "desc" => true,
            Some(d) => {
                return Err(QueryError::InvalidInput(format!(
                    "unknown sort direction '{d}'"
                )))
            }
        };
        Ok(Self {
            key: key.trim().to_string(),
            desc,
        })
    }
}

// ============================================================================
// Request
// ============================================================================

/// A query against one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Query text. Only used to pick the dataset and by the backend simulation.
    #[serde(default)]
    pub sql: String,

    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,

    /// Conjunctive filter list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,

    /// Explicit dataset, overriding detection from `sql`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<Dataset>,
}

impl QueryRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: i64, page_size: i64) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Reject requests that carry no query text.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.sql.trim().is_empty() {
            return Err(QueryError::InvalidInput("sql is required".to_string()));
        }
        Ok(())
    }

    /// The clamped page window, using `default_page_size` when the request
    /// does not set one.
    pub fn window(&self, default_page_size: u64) -> PageWindow {
        let page_size = self
            .page_size
            .map(|s| s.clamp(1, MAX_PAGE_SIZE as i64) as u64)
            .unwrap_or_else(|| default_page_size.clamp(1, MAX_PAGE_SIZE));
        let page = self.page.map(|p| p.max(1) as u64).unwrap_or(1);
        PageWindow { page, page_size }
    }
}

/// Clamped page number and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub page_size: u64,
}

impl PageWindow {
    /// Offset of the first row of the page in the filtered sequence.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

// ============================================================================
// Response
// ============================================================================

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub page: u64,
    pub page_size: u64,
    /// Matching rows across the whole dataset
    pub total_row_count: u64,
    pub elapsed_ms: u64,
}

/// A canned query offered to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryTemplate {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Canned queries, one per dataset.
pub const QUERY_TEMPLATES: &[QueryTemplate] = &[
    QueryTemplate {
        name: "Companies",
        sql: "select * from company_current_financials;",
    },
    QueryTemplate {
        name: "Employees",
        sql: "select * from employees;",
    },
    QueryTemplate {
        name: "Products",
        sql: "select * from products;",
    },
];
