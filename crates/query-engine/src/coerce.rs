//! Value coercion and string collation shared by filtering and sorting.
//!
//! Filter values always arrive as strings while cells are typed, so every
//! comparison first brings both sides into the column's semantic type. When
//! that fails the comparison falls back to [`collate`], a numeric-aware,
//! case-insensitive string ordering.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use dataset_core::CellValue;
use std::cmp::Ordering;

/// Strings that count as `true`; everything else is `false`.
const TRUTHY: &[&str] = &["true", "1", "yes", "y"];

/// Parse a number, ignoring thousands separators (`,` `_`) and whitespace.
///
/// Returns `None` for empty input and for anything that does not parse to a
/// finite value.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric view of a cell.
pub fn cell_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Int(i) => Some(*i as f64),
        CellValue::Float(f) if f.is_finite() => Some(*f),
        CellValue::Float(_) | CellValue::Null => None,
        other => parse_number(&other.to_string()),
    }
}

/// Parse a calendar timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` and `YYYY-MM-DD HH:MM:SS`
/// (read as UTC), `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM` and a bare `YYYY`.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return midnight(date);
        }
    }

    // year-month and bare year
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d") {
        return midnight(date);
    }
    if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
        let year = text.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).and_then(midnight);
    }

    None
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Timestamp view of a cell.
pub fn cell_timestamp(cell: &CellValue) -> Option<DateTime<Utc>> {
    match cell {
        CellValue::Timestamp(dt) => Some(*dt),
        CellValue::Text(text) => parse_timestamp(text),
        _ => None,
    }
}

/// Canonical boolean of a string: one of `true`, `1`, `yes`, `y`
/// (case-insensitive) is `true`, anything else `false`.
pub fn parse_bool(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    TRUTHY.contains(&lowered.as_str())
}

/// Boolean view of a cell.
pub fn cell_bool(cell: &CellValue) -> bool {
    match cell {
        CellValue::Bool(b) => *b,
        other => parse_bool(&other.to_string()),
    }
}

// ============================================================================
// Collation
// ============================================================================

/// How finely [`collate`] distinguishes characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// Letters compare by their base form: `a`, `A` and `á` are equal
    Base,
    /// Base form first, then accents: `a` and `A` are equal, `á` is not
    Accent,
}

/// Numeric-aware, case-insensitive string ordering.
///
/// Runs of ASCII digits compare by numeric value, so `"Item 9" < "Item 10"`.
pub fn collate(a: &str, b: &str, strength: Strength) -> Ordering {
    let primary = compare_keys(a, b, true);
    match (primary, strength) {
        (Ordering::Equal, Strength::Accent) => compare_keys(a, b, false),
        _ => primary,
    }
}

fn compare_keys(a: &str, b: &str, fold_accents: bool) -> Ordering {
    let mut left = sort_key(a, fold_accents).into_iter().peekable();
    let mut right = sort_key(b, fold_accents).into_iter().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_digits = take_digits(&mut left);
                let r_digits = take_digits(&mut right);
                let ord = compare_digit_runs(&l_digits, &r_digits);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn sort_key(text: &str, fold_accents: bool) -> Vec<char> {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if fold_accents { fold_accent(c) } else { c })
        .collect()
}

fn take_digits(chars: &mut std::iter::Peekable<std::vec::IntoIter<char>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    digits
}

// leading zeros do not change the value
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,234.5"), Some(1234.5));
        assert_eq!(parse_number(" 60_000 "), Some(60000.0));
        assert_eq!(parse_number("-7"), Some(-7.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("  "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_cell_number() {
        assert_eq!(cell_number(&CellValue::Int(5)), Some(5.0));
        assert_eq!(cell_number(&CellValue::Float(2.5)), Some(2.5));
        assert_eq!(cell_number(&CellValue::text("3,000")), Some(3000.0));
        assert_eq!(cell_number(&CellValue::Null), None);
        assert_eq!(cell_number(&CellValue::Float(f64::NAN)), None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2020-03-01"), Some(expected));
        assert_eq!(parse_timestamp("2020/03/01"), Some(expected));
        assert_eq!(parse_timestamp("2020-03"), Some(expected));
        assert_eq!(parse_timestamp("2020-03-01T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2020-03-01T00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2020-03-01 00:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2020"),
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2020-03-01T02:00:00+02:00"),
            Some(expected)
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2020-13-01"), None);
        assert_eq!(parse_timestamp("12345"), None);
    }

    #[test]
    fn test_parse_bool() {
        for truthy in ["true", "TRUE", "1", "yes", "Y", " y "] {
            assert!(parse_bool(truthy), "{truthy}");
        }
        for falsy in ["false", "0", "no", "", "maybe"] {
            assert!(!parse_bool(falsy), "{falsy}");
        }
        assert!(cell_bool(&CellValue::Bool(true)));
        assert!(cell_bool(&CellValue::Int(1)));
        assert!(!cell_bool(&CellValue::Int(2)));
    }

    #[test]
    fn test_collate_is_case_insensitive() {
        assert_eq!(collate("Apple", "apple", Strength::Base), Ordering::Equal);
        assert_eq!(collate("Apple", "apple", Strength::Accent), Ordering::Equal);
        assert_eq!(collate("apple", "Banana", Strength::Base), Ordering::Less);
    }

    #[test]
    fn test_collate_accents() {
        assert_eq!(collate("café", "CAFE", Strength::Base), Ordering::Equal);
        assert_ne!(collate("café", "cafe", Strength::Accent), Ordering::Equal);
        // accents only break ties
        assert_eq!(collate("cafés", "cafe", Strength::Accent), Ordering::Greater);
        assert_eq!(collate("càfe", "cafz", Strength::Accent), Ordering::Less);
    }

    #[test]
    fn test_collate_numeric_runs() {
        assert_eq!(collate("Item 9", "Item 10", Strength::Base), Ordering::Less);
        assert_eq!(collate("Product 100", "Product 20", Strength::Base), Ordering::Greater);
        assert_eq!(collate("E007", "E7", Strength::Base), Ordering::Equal);
        assert_eq!(collate("2", "10", Strength::Accent), Ordering::Less);
        assert_eq!(collate("a2b", "a2c", Strength::Base), Ordering::Less);
    }

    #[test]
    fn test_collate_prefix_orders_first() {
        assert_eq!(collate("", "a", Strength::Base), Ordering::Less);
        assert_eq!(collate("abc", "ab", Strength::Base), Ordering::Greater);
    }
}
