pub mod error;
pub mod growth;
pub mod ratios;

/// Divides and rounds to 3 decimals. Zero denominators and non-finite
/// results yield `None`.
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    if !value.is_finite() {
        return None;
    }
    Some(round3(value))
}

/// Rounds to 3 decimals. Magnitudes past 1e15 carry no fractional digits in
/// an f64 and are returned as is, which also keeps `value * 1000` finite.
pub fn round3(value: f64) -> f64 {
    if value.abs() >= 1e15 {
        return value;
    }
    (value * 1000.0).round() / 1000.0
}
