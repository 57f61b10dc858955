//! Periodic counting and page selection.
//!
//! Rows are periodic in their index: once the values of every filtered column
//! repeat every `P` rows, the number of matches in any whole period is the
//! same. Counting `L` rows therefore only needs one scan of `[0, P)` plus one
//! scan of the `L mod P` tail, and a page deep into the filtered sequence can
//! be located by skipping whole periods at once.
//!
//! ```text
//!  0        P        2P       3P   L
//!  |--m-----|--m-----|--m-----|-t--|
//!  total = floor(L / P) * m + t
//! ```

use crate::error::{QueryError, Result};
use crate::filter::FilterSet;
use dataset_generator::{Projection, RowGenerator};
use std::ops::Range;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Rows scanned between two cancellation checks.
const CANCEL_POLL_INTERVAL: u64 = 4_096;

/// Total match count and the absolute indices of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pub total: u64,
    pub indices: Vec<u64>,
}

impl PageSelection {
    fn empty(total: u64) -> Self {
        Self {
            total,
            indices: Vec::new(),
        }
    }
}

/// Counts matches and selects pages for one dataset and filter set.
pub struct Paginator<'a> {
    generator: RowGenerator,
    projection: Projection,
    filters: &'a FilterSet,
    size: u64,
    period: u64,
    cancel: &'a CancellationToken,
}

impl<'a> Paginator<'a> {
    /// `period` must be a span after which every filtered column repeats;
    /// values at or beyond the dataset size mean a plain full scan.
    pub fn new(
        generator: RowGenerator,
        filters: &'a FilterSet,
        period: u64,
        cancel: &'a CancellationToken,
    ) -> Self {
        let size = generator.size();
        Self {
            projection: generator.projection(filters.keys()),
            generator,
            filters,
            size,
            period: period.clamp(1, size.max(1)),
            cancel,
        }
    }

    /// Whether counting has to scan every row: some filtered column never
    /// repeats within the dataset.
    pub fn is_full_scan(&self) -> bool {
        !self.filters.is_empty() && self.period >= self.size
    }

    fn matches_at(&self, index: u64) -> bool {
        let row = self.generator.generate_projected(index, &self.projection);
        self.filters.matches(&row)
    }

    fn poll(&self, scanned: u64) -> Result<()> {
        if scanned % CANCEL_POLL_INTERVAL == 0 && self.cancel.is_cancelled() {
            return Err(QueryError::Cancelled);
        }
        Ok(())
    }

    /// Number of matching rows in `range`.
    pub fn count(&self, range: Range<u64>) -> Result<u64> {
        let mut count = 0;
        for index in range {
            self.poll(index)?;
            if self.matches_at(index) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Number of matching rows in the whole dataset.
    pub fn total(&self) -> Result<u64> {
        if self.filters.is_empty() {
            return Ok(self.size);
        }
        let per_period = self.count(0..self.period)?;
        self.total_from(per_period)
    }

    fn total_from(&self, per_period: u64) -> Result<u64> {
        // the tail lies inside the first period, so it cannot match when no
        // row of a full period does
        if per_period == 0 {
            return Ok(0);
        }
        let full_periods = self.size / self.period;
        let tail = self.count(0..self.size % self.period)?;
        Ok(full_periods * per_period + tail)
    }

    /// Select the rows `[offset, offset + page_size)` of the filtered
    /// sequence, together with the filtered total.
    pub fn select(&self, offset: u64, page_size: u64) -> Result<PageSelection> {
        if self.filters.is_empty() {
            let start = offset.min(self.size);
            let end = offset.saturating_add(page_size).min(self.size);
            return Ok(PageSelection {
                total: self.size,
                indices: (start..end).collect(),
            });
        }

        let per_period = self.count(0..self.period)?;
        let total = self.total_from(per_period)?;
        debug!(
            "Counted {per_period} matches per period of {} rows, {total} in total",
            self.period
        );

        if offset >= total {
            return Ok(PageSelection::empty(total));
        }

        // per_period > 0 here since total > offset
        let skipped_periods = (offset / per_period).min(self.size / self.period);
        let mut index = skipped_periods * self.period;
        let mut skipped = skipped_periods * per_period;
        debug!("Skipping {skipped_periods} whole periods to index {index}");

        while skipped < offset && index < self.size {
            self.poll(index)?;
            if self.matches_at(index) {
                skipped += 1;
            }
            index += 1;
        }

        let mut indices = Vec::with_capacity(page_size.min(total - offset) as usize);
        while (indices.len() as u64) < page_size && index < self.size {
            self.poll(index)?;
            if self.matches_at(index) {
                indices.push(index);
            }
            index += 1;
        }

        Ok(PageSelection { total, indices })
    }
}
