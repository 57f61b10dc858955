//! Per-dataset derivation tables.

pub mod company;
pub mod employees;
pub mod products;

use crate::derivation::DatasetModel;
use dataset_core::Dataset;

/// The static model for a dataset.
pub fn model(dataset: Dataset) -> &'static DatasetModel {
    match dataset {
        Dataset::Company => &company::MODEL,
        Dataset::Employees => &employees::MODEL,
        Dataset::Products => &products::MODEL,
    }
}
