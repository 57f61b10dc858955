//! Field-derivation tables.
//!
//! Every dataset is described by one [`DatasetModel`]: its size, period and
//! an ordered table of [`FieldDerivation`]s. The same table yields the
//! column descriptors and drives row generation, so the schema and the
//! generator cannot drift apart.

use dataset_core::{CellValue, Column, ColumnType, Dataset};

/// How a field's value is derived from the row number.
///
/// The row number is `index mod size`; every formula is a pure function of it.
#[derive(Debug, Clone, Copy)]
pub enum Formula {
    /// `prefix` followed by the row number, zero-padded to `width` digits
    Identifier {
        /// Literal prefix
        prefix: &'static str,
        /// Minimum digit count
        width: usize,
    },

    /// `prefix` followed by the unpadded row number
    Label {
        /// Literal prefix
        prefix: &'static str,
    },

    /// `values[(n / divisor) mod values.len()]`
    OneOf {
        /// Pool of values to cycle through
        values: &'static [&'static str],
        /// Number of consecutive rows sharing one value
        divisor: u64,
    },

    /// Arbitrary index arithmetic
    Computed {
        /// Value for a row number
        derive: fn(u64) -> CellValue,
        /// Smallest span after which `derive` repeats
        cycle: u64,
    },
}

impl Formula {
    /// Smallest index span after which this formula's values repeat.
    ///
    /// Identifiers and labels never repeat inside a dataset, so their cycle is
    /// the dataset size.
    pub fn cycle(&self, size: u64) -> u64 {
        match self {
            Self::Identifier { .. } | Self::Label { .. } => size,
            Self::OneOf { values, divisor } => (*divisor).max(1) * (values.len() as u64).max(1),
            Self::Computed { cycle, .. } => (*cycle).max(1),
        }
    }
}

/// One column together with the formula that produces it.
#[derive(Debug, Clone, Copy)]
pub struct FieldDerivation {
    /// Column key
    pub key: &'static str,
    /// Display label
    pub name: &'static str,
    /// Semantic type
    pub column_type: ColumnType,
    /// Currency presentation hint
    pub is_amount: bool,
    /// Value formula
    pub formula: Formula,
}

impl FieldDerivation {
    pub const fn new(
        key: &'static str,
        name: &'static str,
        column_type: ColumnType,
        formula: Formula,
    ) -> Self {
        Self {
            key,
            name,
            column_type,
            is_amount: false,
            formula,
        }
    }

    pub const fn amount(mut self) -> Self {
        self.is_amount = true;
        self
    }

    /// Column descriptor for this field.
    pub fn to_column(&self) -> Column {
        let column = Column::new(self.key, self.name, self.column_type);
        if self.is_amount {
            column.amount()
        } else {
            column
        }
    }
}

/// Static description of one dataset.
#[derive(Debug)]
pub struct DatasetModel {
    /// Which dataset this is
    pub dataset: Dataset,
    /// Total addressable rows
    pub size: u64,
    /// Configured period used by the counter
    pub period: u64,
    /// Field derivations in column order
    pub fields: &'static [FieldDerivation],
}

impl DatasetModel {
    /// Column descriptors in display order.
    pub fn columns(&self) -> Vec<Column> {
        self.fields.iter().map(FieldDerivation::to_column).collect()
    }

    /// Position of a field in the table.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    /// Cycle of a field, or `None` when the key is not part of the dataset.
    pub fn cycle_of(&self, key: &str) -> Option<u64> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.formula.cycle(self.size))
    }
}
