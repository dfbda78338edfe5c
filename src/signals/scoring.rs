//! Actual-vs-forecast comparison.

/// Score a release: +1 when the actual beat the forecast, -1 when it
/// missed, 0 on equality or when either side is missing/unparseable.
///
/// Deliberately magnitude-blind: a miss by 0.01 and a miss by 50 score
/// identically.
pub fn score(actual: Option<f64>, forecast: Option<f64>) -> i32 {
    match (actual, forecast) {
        (Some(a), Some(f)) => {
            if a > f {
                1
            } else if a < f {
                -1
            } else {
                0
            }
        }
        _ => 0,
    }
}
