//! Query dispatch: dataset resolution, simulation, counting, paging, sorting.

use crate::error::{QueryError, Result};
use crate::filter::FilterSet;
use crate::paginate::Paginator;
use crate::request::{QueryRequest, QueryResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::simulation::{BackendSimulation, NoSimulation};
use crate::sort::sort_rows;
use dataset_core::{Dataset, Row};
use dataset_generator::{RowGenerator, SchemaRegistry};
use regex::Regex;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Resolves the dataset a query text refers to.
#[derive(Debug, Clone)]
pub struct DatasetDetector {
    /// `from <table>` patterns in priority order
    patterns: Vec<(Dataset, Regex)>,
}

impl DatasetDetector {
    pub fn new() -> Result<Self> {
        let patterns = Dataset::ALL
            .iter()
            .map(|&dataset| {
                let pattern = format!(r"(?i)\bfrom\s+{}\b", regex::escape(dataset.table_name()));
                Regex::new(&pattern)
                    .map(|regex| (dataset, regex))
                    .map_err(|e| QueryError::Internal(format!("invalid table pattern: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The first dataset whose `from <table>` clause appears in `sql`,
    /// or [`Dataset::Company`] when none does.
    pub fn detect(&self, sql: &str) -> Dataset {
        self.patterns
            .iter()
            .find(|(_, pattern)| pattern.is_match(sql))
            .map(|(dataset, _)| *dataset)
            .unwrap_or_default()
    }
}

/// Answers queries against the virtual datasets.
///
/// Cheap to clone; clones share the schema registry and simulation policy.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    registry: Arc<SchemaRegistry>,
    detector: Arc<DatasetDetector>,
    simulation: Arc<dyn BackendSimulation>,
    default_page_size: u64,
}

impl QueryEngine {
    /// Engine without backend simulation.
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: Arc::new(SchemaRegistry::build()?),
            detector: Arc::new(DatasetDetector::new()?),
            simulation: Arc::new(NoSimulation),
            default_page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn with_simulation(mut self, simulation: impl BackendSimulation + 'static) -> Self {
        self.simulation = Arc::new(simulation);
        self
    }

    /// Page size for requests that do not set one, clamped like request sizes.
    pub fn with_default_page_size(mut self, page_size: u64) -> Self {
        self.default_page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Dataset a request targets: the explicit override, else detection on
    /// the sql text.
    pub fn resolve_dataset(&self, request: &QueryRequest) -> Dataset {
        request
            .dataset
            .unwrap_or_else(|| self.detector.detect(&request.sql))
    }

    /// Run a query with the configured backend simulation.
    ///
    /// Order of work: validation, simulated latency, simulated failure, then
    /// counting and paging on the blocking pool. The reported elapsed time
    /// covers all of it. Once `cancel` fires the call returns
    /// [`QueryError::Cancelled`] and no response.
    pub async fn run(
        &self,
        request: QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<QueryResponse> {
        let started = Instant::now();
        request.validate()?;

        self.simulation.delay(cancel).await?;
        if let Some(err) = self.simulation.failure_for(&request.sql) {
            warn!("Injected backend failure for query: {}", request.sql);
            return Err(err);
        }

        let engine = self.clone();
        let token = cancel.clone();
        let mut response = tokio::task::spawn_blocking(move || engine.compute(&request, &token))
            .await
            .map_err(|e| QueryError::Internal(format!("query task failed: {e}")))??;
        // the last cancellation poll may predate the join
        if cancel.is_cancelled() {
            return Err(QueryError::Cancelled);
        }

        response.elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            "Query returned {} of {} rows in {}ms",
            response.rows.len(),
            response.total_row_count,
            response.elapsed_ms
        );
        Ok(response)
    }

    /// Run a query on the current thread, skipping the simulated latency.
    /// Simulated failures still apply.
    pub fn execute(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<QueryResponse> {
        let started = Instant::now();
        request.validate()?;
        if let Some(err) = self.simulation.failure_for(&request.sql) {
            warn!("Injected backend failure for query: {}", request.sql);
            return Err(err);
        }
        let mut response = self.compute(request, cancel)?;
        if cancel.is_cancelled() {
            return Err(QueryError::Cancelled);
        }
        response.elapsed_ms = started.elapsed().as_millis() as u64;
        Ok(response)
    }

    fn compute(&self, request: &QueryRequest, cancel: &CancellationToken) -> Result<QueryResponse> {
        let dataset = self.resolve_dataset(request);
        let schema = self.registry.schema(dataset);
        let window = request.window(self.default_page_size);
        info!(
            "Querying {dataset}: page={}, page_size={}, filters={}, sort={:?}",
            window.page,
            window.page_size,
            request.filters.len(),
            request.sort
        );

        let generator = RowGenerator::new(dataset);
        let filters = FilterSet::compile(&request.filters, &schema.columns);
        let period = self.registry.effective_period(dataset, filters.keys());
        if !filters.is_empty() {
            debug!(
                "Effective period for {dataset} is {period} (configured {})",
                schema.period
            );
        }

        let paginator = Paginator::new(generator, &filters, period, cancel);
        if paginator.is_full_scan() {
            warn!(
                "Filters on {dataset} do not repeat within {} rows, scanning every row",
                schema.size
            );
        }
        let selection = paginator.select(window.offset(), window.page_size)?;

        let mut rows: Vec<Row> = selection
            .indices
            .iter()
            .map(|&index| generator.generate(index))
            .collect();
        if let Some(sort) = &request.sort {
            sort_rows(&mut rows, sort, &schema.columns);
        }

        Ok(QueryResponse {
            columns: schema.columns.clone(),
            rows,
            page: window.page,
            page_size: window.page_size,
            total_row_count: selection.total,
            elapsed_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Filter, FilterOp, SortSpec};
    use crate::simulation::MockBackend;
    use dataset_core::CellValue;
    use std::time::Duration;

    fn engine() -> QueryEngine {
        QueryEngine::new().unwrap()
    }

    #[test]
    fn test_detect_dataset() {
        let detector = DatasetDetector::new().unwrap();
        assert_eq!(detector.detect("select * from employees;"), Dataset::Employees);
        assert_eq!(detector.detect("SELECT * FROM   Products"), Dataset::Products);
        assert_eq!(
            detector.detect("select * from company_current_financials"),
            Dataset::Company
        );
        assert_eq!(detector.detect("select 1"), Dataset::Company);
        assert_eq!(detector.detect("select * from employees_archive"), Dataset::Company);
        // company wins when several tables appear
        assert_eq!(
            detector.detect("select * from products join x from company_current_financials"),
            Dataset::Company
        );
    }

    #[test]
    fn test_explicit_dataset_overrides_sql() {
        let request = QueryRequest::new("select * from employees").with_dataset(Dataset::Products);
        assert_eq!(engine().resolve_dataset(&request), Dataset::Products);
    }

    #[test]
    fn test_execute_first_page() {
        let request = QueryRequest::new("select * from employees").with_page(1, 3);
        let response = engine().execute(&request, &CancellationToken::new()).unwrap();

        assert_eq!(response.total_row_count, 1_000_000);
        assert_eq!(response.columns.len(), 12);
        let ids: Vec<_> = response
            .rows
            .iter()
            .map(|r| r.get_field("employee_id").cloned())
            .collect();
        assert_eq!(
            ids,
            vec![
                Some(CellValue::text("E00000000")),
                Some(CellValue::text("E00000001")),
                Some(CellValue::text("E00000002")),
            ]
        );
    }

    #[test]
    fn test_execute_sorts_page() {
        let request = QueryRequest::new("select * from products")
            .with_page(1, 20)
            .with_sort(SortSpec::descending("price"));
        let response = engine().execute(&request, &CancellationToken::new()).unwrap();

        let prices: Vec<i64> = response
            .rows
            .iter()
            .filter_map(|r| r.get_field("price").and_then(CellValue::as_i64))
            .collect();
        assert_eq!(prices.len(), 20);
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_execute_rejects_blank_sql() {
        let err = engine()
            .execute(&QueryRequest::new(" "), &CancellationToken::new())
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_default_page_size() {
        let engine = engine().with_default_page_size(25);
        let response = engine
            .execute(&QueryRequest::new("select * from products"), &CancellationToken::new())
            .unwrap();
        assert_eq!(response.page_size, 25);
        assert_eq!(response.rows.len(), 25);
    }

    #[test]
    fn test_execute_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let request = QueryRequest::new("select * from employees")
            .with_filter(Filter::new("city", FilterOp::Eq, "Tokyo"));
        let err = engine().execute(&request, &cancel).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_execute_cancelled_without_filters() {
        // unfiltered pages never poll the token while scanning
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = engine()
            .execute(&QueryRequest::new("select * from products"), &cancel)
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    /// Lets the delay pass, then cancels the query before it is computed.
    #[derive(Debug)]
    struct CancelAfterDelay;

    #[async_trait::async_trait]
    impl BackendSimulation for CancelAfterDelay {
        async fn delay(&self, cancel: &CancellationToken) -> Result<()> {
            cancel.cancel();
            Ok(())
        }

        fn failure_for(&self, _sql: &str) -> Option<QueryError> {
            None
        }
    }

    #[tokio::test]
    async fn test_run_cancelled_during_compute_returns_no_response() {
        let engine = engine().with_simulation(CancelAfterDelay);
        let err = engine
            .run(
                QueryRequest::new("select * from employees").with_page(1, 5),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_run_injects_failure_after_latency() {
        let engine = engine().with_simulation(
            MockBackend::new().with_latency(Duration::from_millis(20), Duration::ZERO),
        );
        let started = Instant::now();
        let err = engine
            .run(
                QueryRequest::new("select * from employees where 1=error"),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, QueryError::Backend(_)));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_run_reports_elapsed_including_latency() {
        let engine = engine().with_simulation(
            MockBackend::new().with_latency(Duration::from_millis(30), Duration::ZERO),
        );
        let response = engine
            .run(
                QueryRequest::new("select * from products").with_page(1, 5),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(response.rows.len(), 5);
        assert!(response.elapsed_ms >= 30);
    }
}
