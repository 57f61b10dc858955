//! Row generator for the virtual datasets.

use crate::datasets;
use crate::derivation::{DatasetModel, FieldDerivation};
use crate::generators::derive_value;
use dataset_core::{Dataset, Row};
use std::ops::Range;

/// A pre-resolved subset of a dataset's fields.
///
/// Built once per query so that the per-row work during counting is a plain
/// walk over field positions. Keys that are not part of the dataset are
/// dropped and are absent from projected rows.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    positions: Vec<usize>,
}

impl Projection {
    /// Number of fields this projection produces.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the projection produces no fields at all.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Deterministic row generator.
///
/// The generator holds no state besides a reference to its dataset's static
/// model: generating row `i` twice yields identical rows, and rows can be
/// produced in any order.
#[derive(Debug, Clone, Copy)]
pub struct RowGenerator {
    model: &'static DatasetModel,
}

impl RowGenerator {
    /// Create a generator for the given dataset.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            model: datasets::model(dataset),
        }
    }

    /// The dataset this generator produces.
    pub fn dataset(&self) -> Dataset {
        self.model.dataset
    }

    /// Logical size of the dataset.
    pub fn size(&self) -> u64 {
        self.model.size
    }

    /// The field-derivation table backing this generator.
    pub fn fields(&self) -> &'static [FieldDerivation] {
        self.model.fields
    }

    /// Generate the full row at `index`.
    pub fn generate(&self, index: u64) -> Row {
        let n = index % self.model.size;
        let mut row = Row::with_capacity(index, self.model.fields.len());
        for field in self.model.fields {
            row.push(field.key, derive_value(&field.formula, n));
        }
        row
    }

    /// Resolve a set of column keys into a projection.
    pub fn projection<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Projection {
        let mut positions: Vec<usize> = keys
            .into_iter()
            .filter_map(|key| self.model.position(key))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        Projection { positions }
    }

    /// Generate only the fields in `projection` for the row at `index`.
    pub fn generate_projected(&self, index: u64, projection: &Projection) -> Row {
        let n = index % self.model.size;
        let mut row = Row::with_capacity(index, projection.len());
        for &pos in &projection.positions {
            if let Some(field) = self.model.fields.get(pos) {
                row.push(field.key, derive_value(&field.formula, n));
            }
        }
        row
    }

    /// Lazily generate full rows for an index range, clamped to the dataset.
    pub fn rows(&self, range: Range<u64>) -> RowIterator {
        let end = range.end.min(self.model.size);
        RowIterator {
            generator: *self,
            next: range.start.min(end),
            end,
        }
    }
}

/// Generate the full row at `index` of `dataset`.
pub fn generate(dataset: Dataset, index: u64) -> Row {
    RowGenerator::new(dataset).generate(index)
}

/// Iterator that lazily generates rows.
pub struct RowIterator {
    generator: RowGenerator,
    next: u64,
    end: u64,
}

impl Iterator for RowIterator {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let row = self.generator.generate(self.next);
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowIterator {}
