//! Backend simulation policies.
//!
//! The engine can pretend to sit behind a slow, occasionally failing backend.
//! This is a test and demo affordance: [`NoSimulation`] turns it off, and
//! [`MockBackend`] adds latency plus a keyword-triggered failure so callers
//! can exercise their loading and error paths.

use crate::error::{QueryError, Result};
use async_trait::async_trait;
use rand::Rng;
use regex::Regex;
use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Message of the failure raised by [`MockBackend`].
pub const SIMULATED_FAILURE_MESSAGE: &str = "Simulated query error from mock backend";

/// Default fixed part of the mock latency.
pub const DEFAULT_BASE_LATENCY: Duration = Duration::from_millis(250);

/// Default upper bound of the random part of the mock latency.
pub const DEFAULT_JITTER: Duration = Duration::from_millis(450);

/// Default word that makes [`MockBackend`] fail a query.
pub const DEFAULT_FAILURE_KEYWORD: &str = "error";

/// Latency and failure injection applied around every query.
#[async_trait]
pub trait BackendSimulation: Send + Sync + fmt::Debug {
    /// Wait as long as the simulated backend would. Must return
    /// [`QueryError::Cancelled`] promptly once `cancel` fires.
    async fn delay(&self, cancel: &CancellationToken) -> Result<()>;

    /// The failure the simulated backend raises for `sql`, if any.
    fn failure_for(&self, sql: &str) -> Option<QueryError>;
}

/// No latency, no failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSimulation;

#[async_trait]
impl BackendSimulation for NoSimulation {
    async fn delay(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(QueryError::Cancelled);
        }
        Ok(())
    }

    fn failure_for(&self, _sql: &str) -> Option<QueryError> {
        None
    }
}

/// Latency of `base + uniform(0..=jitter)` and a failure for any query that
/// contains the failure keyword as a whole word, ignoring case.
#[derive(Debug, Clone)]
pub struct MockBackend {
    base_latency: Duration,
    jitter: Duration,
    failure_pattern: Option<Regex>,
}

impl MockBackend {
    /// Mock with the default latency and failure keyword.
    pub fn new() -> Self {
        Self {
            base_latency: DEFAULT_BASE_LATENCY,
            jitter: DEFAULT_JITTER,
            failure_pattern: keyword_pattern(DEFAULT_FAILURE_KEYWORD),
        }
    }

    pub fn with_latency(mut self, base_latency: Duration, jitter: Duration) -> Self {
        self.base_latency = base_latency;
        self.jitter = jitter;
        self
    }

    /// Replace the failure keyword. `None` or a blank keyword disables
    /// failure injection.
    pub fn with_failure_keyword(mut self, keyword: Option<&str>) -> Self {
        self.failure_pattern = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .and_then(keyword_pattern);
        self
    }

    fn sample_latency(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base_latency;
        }
        let extra = rand::rng().random_range(0..=jitter_ms);
        self.base_latency + Duration::from_millis(extra)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn keyword_pattern(keyword: &str) -> Option<Regex> {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
    Regex::new(&pattern).ok()
}

#[async_trait]
impl BackendSimulation for MockBackend {
    async fn delay(&self, cancel: &CancellationToken) -> Result<()> {
        let latency = self.sample_latency();
        debug!("Simulating backend latency of {latency:?}");
        tokio::select! {
            _ = cancel.cancelled() => Err(QueryError::Cancelled),
            _ = tokio::time::sleep(latency) => Ok(()),
        }
    }

    fn failure_for(&self, sql: &str) -> Option<QueryError> {
        let pattern = self.failure_pattern.as_ref()?;
        pattern
            .is_match(sql)
            .then(|| QueryError::Backend(SIMULATED_FAILURE_MESSAGE.to_string()))
    }
}
