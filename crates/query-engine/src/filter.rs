//! Filter evaluation.
//!
//! A [`FilterSet`] is a request's filter list resolved against the dataset's
//! columns once, so that the per-row check does no string parsing on the
//! filter side. Semantics are conjunctive: a row matches only if every filter
//! accepts it.

use crate::coerce::{self, Strength};
use crate::request::{Filter, FilterOp};
use chrono::{DateTime, Utc};
use dataset_core::{declared_type, CellValue, Column, ColumnType, Row};
use std::cmp::Ordering;

/// One filter with its value pre-parsed for every comparison kind.
#[derive(Debug, Clone)]
struct CompiledFilter {
    key: String,
    op: FilterOp,
    declared: Option<ColumnType>,
    /// Trimmed filter value
    value: String,
    lowered: String,
    number: Option<f64>,
    timestamp: Option<DateTime<Utc>>,
    truthy: bool,
}

impl CompiledFilter {
    fn new(filter: &Filter, columns: &[Column]) -> Self {
        let value = filter.value.trim().to_string();
        Self {
            key: filter.key.clone(),
            op: filter.op,
            declared: declared_type(columns, &filter.key),
            lowered: value.to_lowercase(),
            number: coerce::parse_number(&value),
            timestamp: coerce::parse_timestamp(&value),
            truthy: coerce::parse_bool(&value),
            value,
        }
    }

    fn accepts(&self, cell: Option<&CellValue>) -> bool {
        let cell = match cell {
            Some(cell) if !cell.is_null() => cell,
            // "not equal to X" holds for missing data only when X is non-empty
            _ => return self.op == FilterOp::Neq && !self.value.is_empty(),
        };

        match self.op {
            FilterOp::Contains => cell_text(cell).contains(&self.lowered),
            FilterOp::StartsWith => cell_text(cell).starts_with(&self.lowered),
            FilterOp::EndsWith => cell_text(cell).ends_with(&self.lowered),
            op => holds(op, self.compare(cell)),
        }
    }

    /// Type-directed comparison of `cell` against the filter value. The
    /// declared type wins; the cell's shape is only used for undeclared
    /// columns.
    fn compare(&self, cell: &CellValue) -> Ordering {
        let kind = self.declared.or_else(|| cell.shape());
        let typed = match kind {
            Some(ColumnType::Number) => coerce::cell_number(cell)
                .zip(self.number)
                .and_then(|(a, b)| a.partial_cmp(&b)),
            Some(ColumnType::Date) => coerce::cell_timestamp(cell)
                .zip(self.timestamp)
                .map(|(a, b)| a.cmp(&b)),
            Some(ColumnType::Boolean) => Some(coerce::cell_bool(cell).cmp(&self.truthy)),
            Some(ColumnType::String) | None => None,
        };
        typed.unwrap_or_else(|| {
            let strength = match self.op {
                FilterOp::Eq | FilterOp::Neq => Strength::Accent,
                _ => Strength::Base,
            };
            coerce::collate(cell.to_string().trim(), &self.value, strength)
        })
    }
}

fn cell_text(cell: &CellValue) -> String {
    cell.to_string().to_lowercase()
}

/// Whether `ord` (cell compared to filter value) satisfies a relational operator.
fn holds(op: FilterOp, ord: Ordering) -> bool {
    match op {
        FilterOp::Eq => ord == Ordering::Equal,
        FilterOp::Neq => ord != Ordering::Equal,
        FilterOp::Gt => ord == Ordering::Greater,
        FilterOp::Gte => ord != Ordering::Less,
        FilterOp::Lt => ord == Ordering::Less,
        FilterOp::Lte => ord != Ordering::Greater,
        FilterOp::Contains | FilterOp::StartsWith | FilterOp::EndsWith => false,
    }
}

/// A compiled, conjunctive filter list.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<CompiledFilter>,
}

impl FilterSet {
    /// Resolve `filters` against the dataset's columns.
    pub fn compile(filters: &[Filter], columns: &[Column]) -> Self {
        Self {
            filters: filters
                .iter()
                .map(|f| CompiledFilter::new(f, columns))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Column keys referenced by the filters, in filter order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|f| f.key.as_str())
    }

    /// Whether `row` satisfies every filter.
    pub fn matches(&self, row: &Row) -> bool {
        self.filters.iter().all(|f| f.accepts(row.get_field(&f.key)))
    }
}

/// Whether `row` satisfies every filter in `filters`.
///
/// Convenience for one-off checks; hot loops should compile a [`FilterSet`]
/// once instead.
pub fn matches(row: &Row, filters: &[Filter], columns: &[Column]) -> bool {
    FilterSet::compile(filters, columns).matches(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name", ColumnType::String),
            Column::new("salary", "Salary", ColumnType::Number),
            Column::new("hired", "Hired", ColumnType::Date),
            Column::new("active", "Active", ColumnType::Boolean),
            Column::new("code", "Code", ColumnType::String),
        ]
    }

    fn row() -> Row {
        let mut row = Row::new(0);
        row.push("name", CellValue::text("Zoë Patel"));
        row.push("salary", CellValue::Int(60_500));
        row.push(
            "hired",
            CellValue::Timestamp(Utc.with_ymd_and_hms(2018, 2, 14, 0, 0, 0).unwrap()),
        );
        row.push("active", CellValue::text("yes"));
        row.push("code", CellValue::text("10"));
        row.push("missing", CellValue::Null);
        row.push("loose", CellValue::Int(42));
        row
    }

    fn check(key: &str, op: FilterOp, value: &str) -> bool {
        matches(&row(), &[Filter::new(key, op, value)], &columns())
    }

    #[test]
    fn test_empty_filter_list_matches() {
        assert!(matches(&row(), &[], &columns()));
    }

    #[test]
    fn test_text_operators_ignore_case() {
        assert!(check("name", FilterOp::Contains, "PATEL"));
        assert!(check("name", FilterOp::StartsWith, "zoë"));
        assert!(check("name", FilterOp::EndsWith, "tel "));
        assert!(!check("name", FilterOp::StartsWith, "patel"));
        // textual operators stringify non-text cells
        assert!(check("salary", FilterOp::Contains, "605"));
        assert!(check("hired", FilterOp::StartsWith, "2018-02"));
    }

    #[test]
    fn test_null_cells() {
        for op in FilterOp::ALL {
            let expected = op == FilterOp::Neq;
            assert_eq!(check("missing", op, "x"), expected, "{op}");
        }
        assert!(!check("missing", FilterOp::Neq, ""));
        assert!(!check("missing", FilterOp::Neq, "   "));
        // unknown keys read as null
        assert!(check("nope", FilterOp::Neq, "x"));
        assert!(!check("nope", FilterOp::Eq, "x"));
    }

    #[test]
    fn test_number_comparisons() {
        assert!(check("salary", FilterOp::Eq, "60,500"));
        assert!(check("salary", FilterOp::Gt, "60000"));
        assert!(check("salary", FilterOp::Gte, "60 500"));
        assert!(check("salary", FilterOp::Lte, "60500"));
        assert!(!check("salary", FilterOp::Lt, "60500"));
        assert!(check("salary", FilterOp::Neq, "1"));
    }

    #[test]
    fn test_number_falls_back_to_collation() {
        // "abc" is not a number, so "60500" vs "abc" compares as strings
        assert!(check("salary", FilterOp::Lt, "abc"));
        assert!(!check("salary", FilterOp::Eq, "abc"));
    }

    #[test]
    fn test_date_comparisons() {
        assert!(check("hired", FilterOp::Eq, "2018-02-14"));
        assert!(check("hired", FilterOp::Gt, "2018-01"));
        assert!(check("hired", FilterOp::Lt, "2019"));
        assert!(check("hired", FilterOp::Gte, "2018-02-14T00:00:00.000Z"));
        assert!(!check("hired", FilterOp::Gt, "2018-02-14"));
    }

    #[test]
    fn test_boolean_comparisons() {
        assert!(check("active", FilterOp::Eq, "true"));
        assert!(check("active", FilterOp::Eq, "Y"));
        assert!(check("active", FilterOp::Neq, "no"));
        assert!(check("active", FilterOp::Gt, "false"));
        assert!(!check("active", FilterOp::Lt, "0"));
    }

    #[test]
    fn test_declared_string_type_wins() {
        // numeric-looking text in a string column uses collation, which is
        // still numeric-aware
        assert!(check("code", FilterOp::Gt, "9"));
        assert!(check("code", FilterOp::Eq, "010"));
        assert!(check("code", FilterOp::Lt, "10a"));
    }

    #[test]
    fn test_string_collation_strength() {
        assert!(check("name", FilterOp::Eq, "zoë patel"));
        assert!(!check("name", FilterOp::Eq, "zoe patel"));
        assert!(check("name", FilterOp::Neq, "zoe patel"));
        // ordering ignores accents, so gte/lte include the base-equal value
        assert!(check("name", FilterOp::Gte, "zoe patel"));
        assert!(check("name", FilterOp::Lte, "ZOE PATEL"));
        assert!(!check("name", FilterOp::Gt, "zoe patel"));
    }

    #[test]
    fn test_undeclared_column_uses_cell_shape() {
        assert!(check("loose", FilterOp::Gt, "9"));
        assert!(check("loose", FilterOp::Eq, "42.0"));
    }

    #[test]
    fn test_conjunction() {
        let filters = vec![
            Filter::new("salary", FilterOp::Gte, "60000"),
            Filter::new("name", FilterOp::Contains, "patel"),
        ];
        assert!(matches(&row(), &filters, &columns()));

        let filters = vec![
            Filter::new("salary", FilterOp::Gte, "60000"),
            Filter::new("name", FilterOp::Contains, "smith"),
        ];
        assert!(!matches(&row(), &filters, &columns()));
    }

    #[test]
    fn test_filter_set_keys() {
        let set = FilterSet::compile(
            &[
                Filter::new("salary", FilterOp::Gt, "1"),
                Filter::new("name", FilterOp::Eq, "x"),
            ],
            &columns(),
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["salary", "name"]);
    }
}
