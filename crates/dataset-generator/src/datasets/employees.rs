//! `employees`: a one-million-person directory.

use crate::derivation::{DatasetModel, FieldDerivation, Formula};
use crate::generators::{numeric, one_of, timestamp};
use dataset_core::{CellValue, ColumnType, Dataset};

pub const SIZE: u64 = 1_000_000;
pub const PERIOD: u64 = 10_000;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Sam", "Jordan", "Taylor", "Casey", "Riley", "Morgan", "Jamie",
];
const LAST_NAMES: &[&str] = &[
    "Lee", "Patel", "Garcia", "Smith", "Chen", "Johnson", "Khan", "Davis",
];
const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Sales",
    "Marketing",
    "Finance",
    "HR",
    "Operations",
    "Support",
];
const TITLES: &[&str] = &[
    "Engineer",
    "Manager",
    "Analyst",
    "Director",
    "Specialist",
    "Associate",
];
const CITIES: &[&str] = &[
    "New York",
    "London",
    "Bangalore",
    "Singapore",
    "Toronto",
    "Berlin",
    "Tokyo",
];
const COUNTRIES: &[&str] = &["USA", "UK", "India", "Singapore", "Canada", "Germany", "Japan"];

fn salary(n: u64) -> i64 {
    50_000 + (n % 200) as i64 * 1_500
}

fn salary_cell(n: u64) -> CellValue {
    CellValue::Int(salary(n))
}

fn bonus_cell(n: u64) -> CellValue {
    CellValue::Int(numeric::scale(
        salary(n),
        numeric::stepped_ratio(0.05, 0.01, n % 10),
    ))
}

// lcm(20, 12, 27) = 540
fn hire_date_cell(n: u64) -> CellValue {
    timestamp::utc_date(
        2005 + (n % 20) as i32,
        (n % 12) as u32 + 1,
        (n % 27) as u32 + 1,
    )
}

fn email_cell(n: u64) -> CellValue {
    let first = one_of::pick(FIRST_NAMES, n, 1).unwrap_or("alex");
    let last = one_of::pick(LAST_NAMES, n, 1).unwrap_or("lee");
    CellValue::Text(format!(
        "{}.{}{}@example.com",
        first.to_lowercase(),
        last.to_lowercase(),
        n % 1000
    ))
}

fn phone_cell(n: u64) -> CellValue {
    CellValue::Text(format!(
        "+1-555-{:03}-{:04}",
        n % 1000,
        n.wrapping_mul(7) % 10_000
    ))
}

const FIELDS: &[FieldDerivation] = &[
    FieldDerivation::new(
        "employee_id",
        "Employee ID",
        ColumnType::String,
        Formula::Identifier {
            prefix: "E",
            width: 8,
        },
    ),
    FieldDerivation::new(
        "first_name",
        "First Name",
        ColumnType::String,
        Formula::OneOf {
            values: FIRST_NAMES,
            divisor: 1,
        },
    ),
    FieldDerivation::new(
        "last_name",
        "Last Name",
        ColumnType::String,
        Formula::OneOf {
            values: LAST_NAMES,
            divisor: 1,
        },
    ),
    FieldDerivation::new(
        "email",
        "Email",
        ColumnType::String,
        Formula::Computed {
            derive: email_cell,
            cycle: 1_000,
        },
    ),
    FieldDerivation::new(
        "phone",
        "Phone",
        ColumnType::String,
        Formula::Computed {
            derive: phone_cell,
            cycle: 10_000,
        },
    ),
    FieldDerivation::new(
        "department",
        "Department",
        ColumnType::String,
        Formula::OneOf {
            values: DEPARTMENTS,
            divisor: 1,
        },
    ),
    FieldDerivation::new(
        "title",
        "Title",
        ColumnType::String,
        Formula::OneOf {
            values: TITLES,
            divisor: 1,
        },
    ),
    FieldDerivation::new(
        "hire_date",
        "Hire Date",
        ColumnType::Date,
        Formula::Computed {
            derive: hire_date_cell,
            cycle: 540,
        },
    ),
    FieldDerivation::new(
        "city",
        "City",
        ColumnType::String,
        Formula::OneOf {
            values: CITIES,
            divisor: 1,
        },
    ),
    FieldDerivation::new(
        "country",
        "Country",
        ColumnType::String,
        Formula::OneOf {
            values: COUNTRIES,
            divisor: 1,
        },
    ),
    FieldDerivation::new(
        "salary",
        "Salary",
        ColumnType::Number,
        Formula::Computed {
            derive: salary_cell,
            cycle: 200,
        },
    )
    .amount(),
    FieldDerivation::new(
        "bonus",
        "Bonus",
        ColumnType::Number,
        Formula::Computed {
            derive: bonus_cell,
            cycle: 200,
        },
    )
    .amount(),
];

pub static MODEL: DatasetModel = DatasetModel {
    dataset: Dataset::Employees,
    size: SIZE,
    period: PERIOD,
    fields: FIELDS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_and_phone() {
        assert_eq!(email_cell(0), CellValue::text("alex.lee0@example.com"));
        assert_eq!(email_cell(1003), CellValue::text("taylor.smith3@example.com"));
        assert_eq!(phone_cell(0), CellValue::text("+1-555-000-0000"));
        assert_eq!(phone_cell(1_234), CellValue::text("+1-555-234-8638"));
    }

    #[test]
    fn test_salary_and_bonus() {
        assert_eq!(salary_cell(0), CellValue::Int(50_000));
        assert_eq!(salary_cell(199), CellValue::Int(348_500));
        assert_eq!(bonus_cell(0), CellValue::Int(2_500));
        assert_eq!(bonus_cell(3), CellValue::Int(4_360));
    }

    #[test]
    fn test_hire_date() {
        assert_eq!(hire_date_cell(0).to_string(), "2005-01-01T00:00:00.000Z");
        assert_eq!(hire_date_cell(13).to_string(), "2018-02-14T00:00:00.000Z");
    }

    #[test]
    fn test_declared_cycles_hold() {
        for n in [0_u64, 11, 539, 4_321] {
            assert_eq!(hire_date_cell(n), hire_date_cell(n + 540));
            assert_eq!(email_cell(n), email_cell(n + 1_000));
            assert_eq!(phone_cell(n), phone_cell(n + 10_000));
            assert_eq!(bonus_cell(n), bonus_cell(n + 200));
        }
    }
}
