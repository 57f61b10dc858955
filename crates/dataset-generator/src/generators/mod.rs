//! Formula evaluation helpers.
//!
//! This module turns a [`Formula`] into a [`CellValue`] for a row number, and
//! hosts the arithmetic shared by the per-dataset tables.

pub mod numeric;
pub mod one_of;
pub mod pattern;
pub mod timestamp;

use crate::derivation::Formula;
use dataset_core::CellValue;

/// Evaluate a formula for row number `n`.
pub fn derive_value(formula: &Formula, n: u64) -> CellValue {
    match formula {
        Formula::Identifier { prefix, width } => {
            CellValue::Text(pattern::padded(prefix, n, *width))
        }

        Formula::Label { prefix } => CellValue::Text(pattern::labeled(prefix, n)),

        Formula::OneOf { values, divisor } => match one_of::pick(values, n, *divisor) {
            Some(value) => CellValue::text(value),
            None => CellValue::Null,
        },

        Formula::Computed { derive, .. } => derive(n),
    }
}
