//! Quantile breakpoints for continuous legends.

/// Breakpoints used when there is nothing to classify.
pub const FALLBACK_CLASSES: [f64; 6] = [0.0, 100.0, 500.0, 1000.0, 2000.0, 5000.0];

/// Quantile levels of the six breakpoints.
pub const QUANTILE_LEVELS: [f64; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

/// Quantile of sorted data with linear interpolation between order
/// statistics.
///
/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// Round a breakpoint for display: integers above 100, one decimal above 10.
/// Ties go to the even neighbor.
pub fn round_class(value: f64) -> f64 {
    if value > 100.0 {
        value.round_ties_even()
    } else if value > 10.0 {
        (value * 10.0).round_ties_even() / 10.0
    } else {
        value
    }
}

/// Six breakpoints at the quintiles of the positive values.
///
/// When every positive value is the same `v` the breakpoints are
/// `[0, v/2, v, 1.5v, 2v, 2.5v]`. Without positive values the
/// [`FALLBACK_CLASSES`] are returned.
pub fn quantile_classes<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut positive: Vec<f64> = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();

    if positive.is_empty() {
        return FALLBACK_CLASSES.to_vec();
    }

    positive.sort_by(f64::total_cmp);
    let min = positive[0];
    let max = positive[positive.len() - 1];

    if min == max {
        return [0.0, 0.5, 1.0, 1.5, 2.0, 2.5]
            .iter()
            .map(|m| m * min)
            .collect();
    }

    QUANTILE_LEVELS
        .iter()
        .map(|&q| round_class(quantile(&positive, q)))
        .collect()
}
