use ndarray::{Array2, Zip};

use crate::core::params::NormalizeParams;

/// Logistic contrast curve for a single sample.
///
/// The sample is first rescaled linearly against `[min_val, max]`, then passed
/// through `1 / (1 + exp(steepness * (threshold - linear)))` and multiplied by 255.
/// With the default parameters the curve crosses 127.5 at 11% of `max`.
///
/// `max == min_val` is not special-cased: the division yields `inf` or `NaN`
/// and those propagate to the caller.
#[inline]
pub fn normalize_value(v: f64, max: f64, params: &NormalizeParams) -> f64 {
    let range = max - params.min_val;
    let linear = (v - params.min_val) / range;
    let compressed = 1.0 / (1.0 + (params.steepness * (params.threshold - linear)).exp());
    compressed * 255.0
}

/// Applies [`normalize_value`] to every sample of `agg`. The result is not clamped or rounded.
pub fn normalize(agg: &Array2<f64>, max: f64, params: &NormalizeParams) -> Array2<f64> {
    Zip::from(agg).par_map_collect(|&v| normalize_value(v, max, params))
}

/// Casts normalized values to bytes with Rust `as` semantics: truncation toward
/// zero, saturation at 0 and 255, and NaN mapped to 0.
pub fn quantize_u8(norm: &Array2<f64>) -> Array2<u8> {
    norm.mapv(|v| v as u8)
}

/// Maximum over the non-NaN samples, or NaN when every sample is missing.
pub fn nan_max(data: &Array2<f64>) -> f64 {
    data.iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(f64::NAN)
}
