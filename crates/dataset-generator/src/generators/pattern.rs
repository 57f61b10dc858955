//! Identifier and label strings.

/// `prefix` followed by `n` zero-padded to at least `width` digits.
pub fn padded(prefix: &str, n: u64, width: usize) -> String {
    format!("{prefix}{n:0width$}")
}

/// `prefix` followed by `n`.
pub fn labeled(prefix: &str, n: u64) -> String {
    format!("{prefix}{n}")
}
