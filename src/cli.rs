//! Command-line options shared by the `vquery` subcommands.

use anyhow::Context;
use clap::Parser;
use dataset_core::Dataset;
use query_engine::{Filter, QueryRequest, SortSpec};
use std::path::PathBuf;

/// Options for `vquery run`.
#[derive(Parser, Debug, Clone, Default)]
pub struct RunArgs {
    /// Query text; the dataset is taken from its `from <table>` clause
    #[arg(long, conflicts_with = "request")]
    pub sql: Option<String>,

    /// Read the whole request from a JSON file instead of flags
    #[arg(long, value_name = "PATH")]
    pub request: Option<PathBuf>,

    /// 1-based page number
    #[arg(long)]
    pub page: Option<i64>,

    /// Rows per page (clamped to 1..=2000)
    #[arg(long)]
    pub page_size: Option<i64>,

    /// Sort key with optional direction, e.g. `salary:desc`
    #[arg(long, value_name = "KEY[:asc|:desc]")]
    pub sort: Option<String>,

    /// Filter as "key op value", e.g. "category eq Electronics"; repeatable
    #[arg(long = "filter", value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Dataset override (company, employees, products)
    #[arg(long)]
    pub dataset: Option<String>,

    /// Enable the mock backend (latency and failure injection)
    #[arg(long, env = "VQUERY_SIMULATE")]
    pub simulate: bool,

    /// Engine settings file (YAML)
    #[arg(long, value_name = "PATH", env = "VQUERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON response
    #[arg(long)]
    pub pretty: bool,
}

impl RunArgs {
    /// Build the query request from a request file or from flags. Flags
    /// other than `--sql` also override fields of a request file.
    pub fn to_request(&self) -> anyhow::Result<QueryRequest> {
        let mut request = match &self.request {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read request file {path:?}"))?;
                serde_json::from_str::<QueryRequest>(&content)
                    .with_context(|| format!("Failed to parse request file {path:?}"))?
            }
            None => QueryRequest::new(self.sql.clone().unwrap_or_default()),
        };

        if let Some(page) = self.page {
            request.page = Some(page);
        }
        if let Some(page_size) = self.page_size {
            request.page_size = Some(page_size);
        }
        if let Some(sort) = &self.sort {
            request.sort = Some(
                sort.parse::<SortSpec>()
                    .with_context(|| format!("Invalid sort '{sort}'"))?,
            );
        }
        for filter in &self.filters {
            request.filters.push(
                filter
                    .parse::<Filter>()
                    .with_context(|| format!("Invalid filter '{filter}'"))?,
            );
        }
        if let Some(dataset) = &self.dataset {
            request.dataset = Some(
                dataset
                    .parse::<Dataset>()
                    .with_context(|| format!("Invalid dataset '{dataset}'"))?,
            );
        }

        Ok(request)
    }
}
