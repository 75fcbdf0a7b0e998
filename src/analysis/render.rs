//! Values an external renderer needs to draw contour and quiver plots.

use super::Extrema;

/// Kilometres to parsecs.
pub const KM_TO_PARSEC: f64 = 3.2407792700054e-14;

/// `n` evenly spaced contour levels from `extrema.min` to `extrema.max`,
/// both ends included.
///
/// ```
/// use nebula_fields::analysis::{contour_levels, Extrema};
///
/// let levels = contour_levels(Extrema { max: 4.0, min: 0.0 }, 5);
/// assert_eq!(levels, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn contour_levels(extrema: Extrema, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![extrema.min],
        _ => {
            let step = extrema.span() / (n - 1) as f64;
            let mut levels: Vec<f64> = (0..n).map(|i| extrema.min + i as f64 * step).collect();
            levels[n - 1] = extrema.max;
            levels
        }
    }
}

/// Arrow scale for a quiver plot of a field whose largest value is `max`
/// (in km-based units): `10^(floor(log10(max * KM_TO_PARSEC)) + 2)`.
///
/// `None` for a non-positive or non-finite `max`.
pub fn quiver_scale(max: f64) -> Option<f64> {
    let scaled = max * KM_TO_PARSEC;
    if !(scaled.is_finite() && scaled > 0.0) {
        return None;
    }
    Some(10f64.powf(scaled.log10().floor() + 2.0))
}
