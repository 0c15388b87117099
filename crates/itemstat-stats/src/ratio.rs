/// Divides `num` by `den`, returning `0.0` when the denominator is zero.
///
/// # Examples
///
/// ```
/// use itemstat_stats::ratio::safe_div;
///
/// assert_eq!(safe_div(3.0, 4.0), 0.75);
/// assert_eq!(safe_div(3.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

/// Fraction `count / total` for counts, `0.0` when `total` is zero.
///
/// # Examples
///
/// ```
/// use itemstat_stats::ratio::rate;
///
/// assert_eq!(rate(1, 4), 0.25);
/// assert_eq!(rate(0, 0), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn rate(count: usize, total: usize) -> f64 {
    safe_div(count as f64, total as f64)
}
