//! Cyclic selection from a fixed pool.

/// `values[(n / divisor) mod len]`, or `None` for an empty pool.
pub fn pick<'a>(values: &[&'a str], n: u64, divisor: u64) -> Option<&'a str> {
    if values.is_empty() {
        return None;
    }
    let slot = (n / divisor.max(1)) % values.len() as u64;
    values.get(slot as usize).copied()
}
