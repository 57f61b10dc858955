//! `products`: a one-million-item catalog.

use crate::derivation::{DatasetModel, FieldDerivation, Formula};
use crate::generators::{numeric, one_of, timestamp};
use dataset_core::{CellValue, ColumnType, Dataset};

pub const SIZE: u64 = 1_000_000;
pub const PERIOD: u64 = 12_000;

const CATEGORIES: &[&str] = &["Electronics", "Apparel", "Home", "Sports", "Toys"];

/// Subcategory pools, indexed like `CATEGORIES`.
const SUBCATEGORIES: &[&[&str]] = &[
    &["Phones", "Laptops", "Audio", "Accessories"],
    &["Men", "Women", "Kids"],
    &["Kitchen", "Furniture", "Decor"],
    &["Outdoor", "Fitness", "Team Sports"],
    &["Educational", "Action Figures", "Puzzles"],
];

fn base_price(n: u64) -> f64 {
    10.0 + (n % 500) as f64 * 3.25
}

fn price(n: u64) -> i64 {
    numeric::round(base_price(n))
}

fn cost(n: u64) -> i64 {
    numeric::round(base_price(n) * numeric::stepped_ratio(0.5, 0.01, n % 30))
}

// category cycles by 5, pools have 3 or 4 entries: lcm(5, 4, 3) = 60
fn subcategory_cell(n: u64) -> CellValue {
    let pool = SUBCATEGORIES[(n % CATEGORIES.len() as u64) as usize];
    CellValue::text(one_of::pick(pool, n, 1).unwrap_or("General"))
}

fn release_date_cell(n: u64) -> CellValue {
    timestamp::utc_date(
        2015 + (n % 10) as i32,
        (n % 12) as u32 + 1,
        (n % 27) as u32 + 1,
    )
}

fn price_cell(n: u64) -> CellValue {
    CellValue::Int(price(n))
}

fn cost_cell(n: u64) -> CellValue {
    CellValue::Int(cost(n))
}

fn margin_cell(n: u64) -> CellValue {
    CellValue::Int(price(n) - cost(n))
}

fn units_in_stock_cell(n: u64) -> CellValue {
    CellValue::Int((n.wrapping_mul(13) % 10_000) as i64)
}

fn units_sold_cell(n: u64) -> CellValue {
    CellValue::Int((n.wrapping_mul(17) % 200_000) as i64)
}

fn rating_cell(n: u64) -> CellValue {
    let raw = (n % 50) as f64 / 10.0 + 2.5;
    CellValue::Float((raw * 10.0).round() / 10.0)
}

const FIELDS: &[FieldDerivation] = &[
    FieldDerivation::new(
        "product_id",
        "Product ID",
        ColumnType::String,
        Formula::Identifier {
            prefix: "P",
            width: 8,
        },
    ),
    FieldDerivation::new(
        "name",
        "Name",
        ColumnType::String,
        Formula::Label {
            prefix: "Product ",
        },
    ),
    FieldDerivation::new(
        "category",
        "Category",
        ColumnType::String,
        Formula::OneOf {
            values: CATEGORIES,
            divisor: 1,
        },
    ),
    FieldDerivation::new(
        "subcategory",
        "Subcategory",
        ColumnType::String,
        Formula::Computed {
            derive: subcategory_cell,
            cycle: 60,
        },
    ),
    FieldDerivation::new(
        "sku",
        "SKU",
        ColumnType::String,
        Formula::Identifier {
            prefix: "SKU-",
            width: 8,
        },
    ),
    FieldDerivation::new(
        "release_date",
        "Release Date",
        ColumnType::Date,
        Formula::Computed {
            derive: release_date_cell,
            cycle: 540,
        },
    ),
    FieldDerivation::new(
        "price",
        "Price",
        ColumnType::Number,
        Formula::Computed {
            derive: price_cell,
            cycle: 500,
        },
    )
    .amount(),
    FieldDerivation::new(
        "cost",
        "Cost",
        ColumnType::Number,
        Formula::Computed {
            derive: cost_cell,
            cycle: 1_500,
        },
    )
    .amount(),
    FieldDerivation::new(
        "margin",
        "Margin",
        ColumnType::Number,
        Formula::Computed {
            derive: margin_cell,
            cycle: 1_500,
        },
    )
    .amount(),
    FieldDerivation::new(
        "units_in_stock",
        "Units In Stock",
        ColumnType::Number,
        Formula::Computed {
            derive: units_in_stock_cell,
            cycle: 10_000,
        },
    ),
    FieldDerivation::new(
        "units_sold",
        "Units Sold",
        ColumnType::Number,
        Formula::Computed {
            derive: units_sold_cell,
            cycle: 200_000,
        },
    ),
    FieldDerivation::new(
        "rating",
        "Rating",
        ColumnType::Number,
        Formula::Computed {
            derive: rating_cell,
            cycle: 50,
        },
    ),
];

pub static MODEL: DatasetModel = DatasetModel {
    dataset: Dataset::Products,
    size: SIZE,
    period: PERIOD,
    fields: FIELDS,
};
