use argminmax::ArgMinMax;

/// Panics on an empty slice; callers check emptiness first.
/// NaNs are skipped by argminmax, so a stray missing value never wins.
pub fn get_min_max(vec: &[f64]) -> (f64, f64) {
    let (min_index, max_index) = vec.argminmax();
    (vec[min_index], vec[max_index])
}

/// Scale `value` onto `0..=width` relative to `max_value` (for text bar charts).
pub fn scale_to_width(value: usize, max_value: usize, width: usize) -> usize {
    if max_value == 0 {
        return 0;
    }
    // Round half up, and never draw an empty bar for a non-zero value
    let scaled = (value * width + max_value / 2) / max_value;
    if value > 0 { scaled.max(1) } else { 0 }
}
