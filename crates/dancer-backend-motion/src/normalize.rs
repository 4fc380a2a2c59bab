//! Min/max rescaling of feature sequences into [0, 1].

/// Value every element takes when the input has zero variance.
pub const DEGENERATE_FALLBACK: f64 = 0.5;

/// Rescales `values` to [0, 1] using the observed min and max.
///
/// A constant sequence (max == min) maps to [`DEGENERATE_FALLBACK`] for every
/// element. An empty slice maps to an empty vector. The input is not touched.
///
/// # Example
/// ```
/// use dancer_backend_motion::normalize::normalize;
///
/// assert_eq!(normalize(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
/// assert_eq!(normalize(&[7.0, 7.0]), vec![0.5, 0.5]);
/// ```
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = min_max(values) else {
        return Vec::new();
    };

    let span = max - min;
    if span == 0.0 {
        return vec![DEGENERATE_FALLBACK; values.len()];
    }

    values.iter().map(|v| (v - min) / span).collect()
}

/// Whether [`normalize`] would fall back to the constant sequence.
pub fn is_degenerate(values: &[f64]) -> bool {
    matches!(min_max(values), Some((min, max)) if min == max)
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
