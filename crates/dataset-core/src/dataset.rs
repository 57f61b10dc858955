//! The fixed set of synthetic datasets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::schema::SchemaError;

/// A named synthetic table.
///
/// The wire name (`company`, `employees`, `products`) is what clients send as
/// a dataset override; [`Dataset::table_name`] is what appears after `from`
/// in query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// Quarterly company financials
    #[default]
    Company,

    /// Employee directory
    Employees,

    /// Product catalog
    Products,
}

impl Dataset {
    /// Every dataset, in lookup priority order.
    pub const ALL: [Dataset; 3] = [Dataset::Company, Dataset::Employees, Dataset::Products];

    /// Wire name of the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Employees => "employees",
            Self::Products => "products",
        }
    }

    /// Table name recognized in query text.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Company => "company_current_financials",
            Self::Employees => "employees",
            Self::Products => "products",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = SchemaError;

    /// Accepts either the wire name or the table name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == lowered || d.table_name() == lowered)
            .ok_or_else(|| SchemaError::UnknownDataset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_from_str() {
        assert_eq!("company".parse::<Dataset>().unwrap(), Dataset::Company);
        assert_eq!(
            "COMPANY_CURRENT_FINANCIALS".parse::<Dataset>().unwrap(),
            Dataset::Company
        );
        assert_eq!(" Products ".parse::<Dataset>().unwrap(), Dataset::Products);
        assert!(matches!(
            "orders".parse::<Dataset>(),
            Err(SchemaError::UnknownDataset(name)) if name == "orders"
        ));
    }

    #[test]
    fn test_dataset_serde_uses_wire_name() {
        assert_eq!(
            serde_json::to_string(&Dataset::Employees).unwrap(),
            "\"employees\""
        );
        let parsed: Dataset = serde_json::from_str("\"products\"").unwrap();
        assert_eq!(parsed, Dataset::Products);
    }

    #[test]
    fn test_default_dataset_is_company() {
        assert_eq!(Dataset::default(), Dataset::Company);
    }
}
