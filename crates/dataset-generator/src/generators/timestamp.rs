//! Calendar timestamp helpers.

use chrono::{NaiveDate, TimeZone, Utc};
use dataset_core::CellValue;

/// Midnight UTC on the given calendar day (month is 1-based).
///
/// Out-of-range components yield a null cell rather than a panic.
pub fn utc_date(year: i32, month: u32, day: u32) -> CellValue {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| CellValue::Timestamp(Utc.from_utc_datetime(&naive)))
        .unwrap_or(CellValue::Null)
}
