//! Numeric helpers shared by the dataset tables.

/// Round half away from zero, matching how amounts are rounded everywhere in
/// the generated data (all inputs are non-negative).
pub fn round(value: f64) -> i64 {
    value.round() as i64
}

/// `round(amount * ratio)`.
pub fn scale(amount: i64, ratio: f64) -> i64 {
    round(amount as f64 * ratio)
}

/// `base + step * k` as a floating point ratio.
pub fn stepped_ratio(base: f64, step: f64, k: u64) -> f64 {
    base + k as f64 * step
}

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Least common multiple, saturating at `u64::MAX`.
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return a.max(b);
    }
    (a / gcd(a, b)).saturating_mul(b)
}
