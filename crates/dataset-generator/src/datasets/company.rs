//! `company_current_financials`: quarterly financials for two million companies.
//!
//! Row `n` reports quarter `n mod 4 + 1` of fiscal year `2010 + (n / 4) mod 15`.

use crate::derivation::{DatasetModel, FieldDerivation, Formula};
use crate::generators::{numeric, timestamp};
use dataset_core::{CellValue, ColumnType, Dataset};

pub const SIZE: u64 = 2_000_000;
pub const PERIOD: u64 = 15_000;

const SECTORS: &[&str] = &[
    "Technology",
    "Healthcare",
    "Finance",
    "Energy",
    "Consumer Goods",
    "Utilities",
    "Industrial",
    "Telecom",
];

const QUARTERS: &[&str] = &["Q1", "Q2", "Q3", "Q4"];

/// Year and quarter repeat every 60 rows; the `n mod 1000` and `n mod 20`
/// terms bring amounts to 3000.
const YEAR_CYCLE: u64 = 60;
const AMOUNT_CYCLE: u64 = 3_000;

fn quarter(n: u64) -> u64 {
    n % 4 + 1
}

fn year(n: u64) -> i64 {
    2010 + ((n / 4) % 15) as i64
}

fn revenue(n: u64) -> i64 {
    100_000_000 + (n % 1000) as i64 * 1_000_000 + (year(n) - 2010) * 5_000_000
        + quarter(n) as i64 * 750_000
}

fn cogs(n: u64) -> i64 {
    numeric::scale(revenue(n), numeric::stepped_ratio(0.45, 0.01, n % 20))
}

fn gross_profit(n: u64) -> i64 {
    revenue(n) - cogs(n)
}

fn operating_expenses(n: u64) -> i64 {
    numeric::scale(revenue(n), numeric::stepped_ratio(0.15, 0.02, quarter(n) - 1))
}

fn fiscal_year_cell(n: u64) -> CellValue {
    CellValue::Int(year(n))
}

fn report_date_cell(n: u64) -> CellValue {
    timestamp::utc_date(year(n) as i32, quarter(n) as u32 * 3, 1)
}

fn revenue_cell(n: u64) -> CellValue {
    CellValue::Int(revenue(n))
}

fn cogs_cell(n: u64) -> CellValue {
    CellValue::Int(cogs(n))
}

fn gross_profit_cell(n: u64) -> CellValue {
    CellValue::Int(gross_profit(n))
}

fn operating_expenses_cell(n: u64) -> CellValue {
    CellValue::Int(operating_expenses(n))
}

fn net_income_cell(n: u64) -> CellValue {
    CellValue::Int((gross_profit(n) - operating_expenses(n)).max(0))
}

const FIELDS: &[FieldDerivation] = &[
    FieldDerivation::new(
        "company_id",
        "Company ID",
        ColumnType::String,
        Formula::Identifier {
            prefix: "C",
            width: 8,
        },
    ),
    FieldDerivation::new(
        "company_name",
        "Company Name",
        ColumnType::String,
        Formula::Label {
            prefix: "Company ",
        },
    ),
    FieldDerivation::new(
        "ticker",
        "Ticker",
        ColumnType::String,
        Formula::Identifier {
            prefix: "CMP",
            width: 8,
        },
    ),
    FieldDerivation::new(
        "sector",
        "Sector",
        ColumnType::String,
        Formula::OneOf {
            values: SECTORS,
            divisor: 1,
        },
    ),
    FieldDerivation::new(
        "fiscal_year",
        "Fiscal Year",
        ColumnType::Number,
        Formula::Computed {
            derive: fiscal_year_cell,
            cycle: YEAR_CYCLE,
        },
    ),
    FieldDerivation::new(
        "fiscal_quarter",
        "Fiscal Quarter",
        ColumnType::String,
        Formula::OneOf {
            values: QUARTERS,
            divisor: 1,
        },
    ),
    FieldDerivation::new(
        "report_date",
        "Report Date",
        ColumnType::Date,
        Formula::Computed {
            derive: report_date_cell,
            cycle: YEAR_CYCLE,
        },
    ),
    FieldDerivation::new(
        "revenue",
        "Revenue",
        ColumnType::Number,
        Formula::Computed {
            derive: revenue_cell,
            cycle: AMOUNT_CYCLE,
        },
    )
    .amount(),
    FieldDerivation::new(
        "cogs",
        "Cost of Goods Sold",
        ColumnType::Number,
        Formula::Computed {
            derive: cogs_cell,
            cycle: AMOUNT_CYCLE,
        },
    )
    .amount(),
    FieldDerivation::new(
        "gross_profit",
        "Gross Profit",
        ColumnType::Number,
        Formula::Computed {
            derive: gross_profit_cell,
            cycle: AMOUNT_CYCLE,
        },
    )
    .amount(),
    FieldDerivation::new(
        "operating_expenses",
        "Operating Expenses",
        ColumnType::Number,
        Formula::Computed {
            derive: operating_expenses_cell,
            cycle: AMOUNT_CYCLE,
        },
    )
    .amount(),
    FieldDerivation::new(
        "net_income",
        "Net Income",
        ColumnType::Number,
        Formula::Computed {
            derive: net_income_cell,
            cycle: AMOUNT_CYCLE,
        },
    )
    .amount(),
];

pub static MODEL: DatasetModel = DatasetModel {
    dataset: Dataset::Company,
    size: SIZE,
    period: PERIOD,
    fields: FIELDS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row_amounts() {
        // n = 0: Q1 of 2010, ratios 0.45 and 0.15
        assert_eq!(revenue(0), 100_750_000);
        assert_eq!(cogs(0), 45_337_500);
        assert_eq!(gross_profit(0), 55_412_500);
        assert_eq!(operating_expenses(0), 15_112_500);
        assert_eq!(net_income_cell(0), CellValue::Int(40_300_000));
    }

    #[test]
    fn test_year_and_quarter_progression() {
        assert_eq!((quarter(0), year(0)), (1, 2010));
        assert_eq!((quarter(3), year(3)), (4, 2010));
        assert_eq!((quarter(4), year(4)), (1, 2011));
        assert_eq!(year(59), 2024);
        assert_eq!(year(60), 2010);
    }

    #[test]
    fn test_report_date_is_first_of_quarter_end_month() {
        assert_eq!(report_date_cell(0).to_string(), "2010-03-01T00:00:00.000Z");
        assert_eq!(report_date_cell(7).to_string(), "2011-12-01T00:00:00.000Z");
    }

    #[test]
    fn test_amount_cycle_divides_period() {
        assert_eq!(PERIOD % AMOUNT_CYCLE, 0);
        assert_eq!(PERIOD % YEAR_CYCLE, 0);
        for n in [0, 17, 999, 2_999] {
            assert_eq!(revenue_cell(n), revenue_cell(n + AMOUNT_CYCLE));
            assert_eq!(net_income_cell(n), net_income_cell(n + AMOUNT_CYCLE));
        }
    }
}
