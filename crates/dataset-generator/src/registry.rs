//! Schema registry for the fixed dataset catalog.

use crate::datasets;
use crate::derivation::DatasetModel;
use crate::generators::numeric;
use dataset_core::{Column, Dataset, DatasetSchema, SchemaError};

/// Read-only lookup of schemas, sizes, periods and column cycles.
///
/// Built once from the static derivation tables and shared by every query.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Vec<DatasetSchema>,
}

impl SchemaRegistry {
    /// Build and validate the schemas of every dataset.
    pub fn build() -> Result<Self, SchemaError> {
        let schemas = Dataset::ALL
            .iter()
            .map(|&dataset| {
                let model = datasets::model(dataset);
                DatasetSchema::new(dataset, model.size, model.period, model.columns())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { schemas })
    }

    /// Schema of a dataset.
    pub fn schema(&self, dataset: Dataset) -> &DatasetSchema {
        // `build` stores one schema per entry of `Dataset::ALL`, in order
        &self.schemas[dataset_slot(dataset)]
    }

    /// Column descriptors of a dataset in display order.
    pub fn columns_for(&self, dataset: Dataset) -> &[Column] {
        &self.schema(dataset).columns
    }

    pub fn size_of(&self, dataset: Dataset) -> u64 {
        self.schema(dataset).size
    }

    pub fn period_of(&self, dataset: Dataset) -> u64 {
        self.schema(dataset).period
    }

    /// Repeat cycle of a single column. `None` for unknown keys.
    pub fn cycle_of(&self, dataset: Dataset, key: &str) -> Option<u64> {
        datasets::model(dataset).cycle_of(key)
    }

    /// Index span after which the values of every listed column repeat
    /// together with the dataset's configured period.
    ///
    /// This is the lcm of the period and the listed columns' cycles, capped
    /// at the dataset size. Unknown keys are ignored since every row reads
    /// them as null. When the result equals the size the caller has to scan
    /// the whole dataset.
    pub fn effective_period<'a>(
        &self,
        dataset: Dataset,
        keys: impl IntoIterator<Item = &'a str>,
    ) -> u64 {
        let model: &DatasetModel = datasets::model(dataset);
        let mut period = model.period.min(model.size);
        for key in keys {
            if let Some(cycle) = model.cycle_of(key) {
                period = numeric::lcm(period, cycle);
                if period >= model.size {
                    return model.size;
                }
            }
        }
        period
    }
}

fn dataset_slot(dataset: Dataset) -> usize {
    match dataset {
        Dataset::Company => 0,
        Dataset::Employees => 1,
        Dataset::Products => 2,
    }
}
