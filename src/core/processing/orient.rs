use ndarray::{Array2, Axis as NdAxis};

/// True when the ticks run from high to low. Axes with fewer than two ticks
/// have no direction and are never considered descending.
pub fn is_descending(ticks: &[f64]) -> bool {
    match (ticks.first(), ticks.last()) {
        (Some(first), Some(last)) if ticks.len() > 1 => last < first,
        _ => false,
    }
}

/// Reorients band storage so that both axes run from the lowest to the highest
/// coordinate: columns are mirrored when `x` descends, rows when `y` descends.
/// Values are not touched, only their layout.
pub fn orient_array(data: &Array2<f64>, x: &[f64], y: &[f64]) -> Array2<f64> {
    let mut view = data.view();
    if is_descending(x) {
        view.invert_axis(NdAxis(1));
    }
    if is_descending(y) {
        view.invert_axis(NdAxis(0));
    }
    view.to_owned()
}
