//! Review score arithmetic.

/// Rounds to two decimal places.
///
/// Works on the exact binary value: a true tie such as `90.625` goes to the
/// even neighbour (`90.62`), while `2.675`, stored just below the tie, goes
/// down to `2.67`.
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Percentage of positive reviews, rounded to two decimals.
///
/// | positive | negative | result |
/// |----------|----------|--------|
/// | 0        | 0        | 0      |
/// | > 0      | 0        | 100    |
/// | any      | > 0      | `100 - negative / (positive + negative) * 100` |
///
/// # Examples
///
/// ```
/// use steamscore_core::reviews::review_score_percent;
///
/// assert_eq!(review_score_percent(0, 0), 0.0);
/// assert_eq!(review_score_percent(12, 0), 100.0);
/// assert_eq!(review_score_percent(8, 2), 80.0);
/// assert_eq!(review_score_percent(2, 1), 66.67);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn review_score_percent(positive: u64, negative: u64) -> f64 {
    if negative == 0 {
        return if positive == 0 { 0.0 } else { 100.0 };
    }
    let total = positive as f64 + negative as f64;
    let percent = round_to_hundredths(100.0 - (negative as f64 / total) * 100.0);
    percent.clamp(0.0, 100.0)
}
