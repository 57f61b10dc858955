//! Row ordering.

use crate::coerce::{self, Strength};
use crate::request::SortSpec;
use dataset_core::{declared_type, CellValue, Column, ColumnType, Row};
use std::cmp::Ordering;

/// Ascending comparison of two rows on `key`, with nulls last.
pub fn compare(a: &Row, b: &Row, key: &str, columns: &[Column]) -> Ordering {
    compare_directed(a, b, key, false, columns)
}

/// Comparison of two rows on `key`. Missing and null values sort after every
/// other value in both directions; `descending` only flips the order of
/// non-null values.
pub fn compare_directed(
    a: &Row,
    b: &Row,
    key: &str,
    descending: bool,
    columns: &[Column],
) -> Ordering {
    let left = a.get_field(key).filter(|v| !v.is_null());
    let right = b.get_field(key).filter(|v| !v.is_null());

    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(l), Some(r)) => {
            let kind = declared_type(columns, key).or_else(|| l.shape());
            let ord = compare_values(l, r, kind);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

fn compare_values(a: &CellValue, b: &CellValue, kind: Option<ColumnType>) -> Ordering {
    let typed = match kind {
        Some(ColumnType::Number) => coerce::cell_number(a)
            .zip(coerce::cell_number(b))
            .and_then(|(x, y)| x.partial_cmp(&y)),
        Some(ColumnType::Date) => coerce::cell_timestamp(a)
            .zip(coerce::cell_timestamp(b))
            .map(|(x, y)| x.cmp(&y)),
        Some(ColumnType::Boolean) => Some(coerce::cell_bool(a).cmp(&coerce::cell_bool(b))),
        Some(ColumnType::String) | None => None,
    };
    typed.unwrap_or_else(|| coerce::collate(&a.to_string(), &b.to_string(), Strength::Base))
}

/// Stable in-place sort of `rows` by `sort`.
pub fn sort_rows(rows: &mut [Row], sort: &SortSpec, columns: &[Column]) {
    rows.sort_by(|a, b| compare_directed(a, b, &sort.key, sort.desc, columns));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", "ID", ColumnType::Number),
            Column::new("score", "Score", ColumnType::Number),
            Column::new("name", "Name", ColumnType::String),
            Column::new("flag", "Flag", ColumnType::Boolean),
            Column::new("day", "Day", ColumnType::Date),
        ]
    }

    fn row(id: i64, score: Option<i64>, name: &str, flag: bool, day: &str) -> Row {
        let mut row = Row::new(id as u64);
        row.push("id", CellValue::Int(id));
        row.push("score", score.map(CellValue::Int).unwrap_or(CellValue::Null));
        row.push("name", CellValue::text(name));
        row.push("flag", CellValue::Bool(flag));
        row.push("day", CellValue::text(day));
        row
    }

    fn sample() -> Vec<Row> {
        vec![
            row(0, Some(30), "Product 10", true, "2020-05-01"),
            row(1, None, "product 9", false, "2019-01-01"),
            row(2, Some(10), "Apple", true, "not a date"),
            row(3, Some(30), "banana", false, "2021-01-01"),
            row(4, None, "Éclair", true, "2018-07-04"),
        ]
    }

    fn ids(rows: &[Row]) -> Vec<u64> {
        rows.iter().map(Row::index).collect()
    }

    #[test]
    fn test_numeric_sort_nulls_last() {
        let mut rows = sample();
        sort_rows(&mut rows, &SortSpec::ascending("score"), &columns());
        assert_eq!(ids(&rows), vec![2, 0, 3, 1, 4]);

        let mut rows = sample();
        sort_rows(&mut rows, &SortSpec::descending("score"), &columns());
        // ties keep input order, nulls stay last
        assert_eq!(ids(&rows), vec![0, 3, 2, 1, 4]);
    }

    #[test]
    fn test_string_sort_is_natural_and_case_insensitive() {
        let mut rows = sample();
        sort_rows(&mut rows, &SortSpec::ascending("name"), &columns());
        assert_eq!(ids(&rows), vec![2, 3, 4, 1, 0]);
    }

    #[test]
    fn test_boolean_sort() {
        let mut rows = sample();
        sort_rows(&mut rows, &SortSpec::ascending("flag"), &columns());
        assert_eq!(ids(&rows), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_date_sort_falls_back_for_unparsable() {
        let mut rows = sample();
        sort_rows(&mut rows, &SortSpec::ascending("day"), &columns());
        let days: Vec<String> = rows
            .iter()
            .map(|r| r.get_field("day").unwrap().to_string())
            .collect();
        // "not a date" compares as text against every other value
        assert_eq!(
            days,
            vec!["2018-07-04", "2019-01-01", "2020-05-01", "2021-01-01", "not a date"]
        );
    }

    #[test]
    fn test_missing_key_keeps_order() {
        let mut rows = sample();
        sort_rows(&mut rows, &SortSpec::descending("nope"), &columns());
        assert_eq!(ids(&rows), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_compare_ascending() {
        let rows = sample();
        assert_eq!(compare(&rows[2], &rows[0], "score", &columns()), Ordering::Less);
        assert_eq!(compare(&rows[1], &rows[0], "score", &columns()), Ordering::Greater);
        assert_eq!(compare(&rows[1], &rows[4], "score", &columns()), Ordering::Equal);
        assert_eq!(compare(&rows[0], &rows[3], "score", &columns()), Ordering::Equal);
    }
}
