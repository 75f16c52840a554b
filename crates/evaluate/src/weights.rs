//! Latitude area weights.

/// Per-latitude area weights `cos(lat)`, normalized to a mean of 1.
///
/// Normalizing by the mean rather than the sum keeps a weighted RMSE on the
/// same scale as an unweighted one. Cosines that round below zero at the
/// poles are clamped to zero; a grid whose weights all vanish falls back to
/// uniform weights. A NaN latitude yields NaN weights rather than a zero
/// weight, so it cannot vanish from a weighted mean.
pub fn latitude_weights(lats: &[f64]) -> Vec<f64> {
    let raw: Vec<f64> = lats
        .iter()
        .map(|lat| {
            let w = lat.to_radians().cos();
            if w < 0.0 { 0.0 } else { w }
        })
        .collect();
    let mean = isobar_stats::mean(&raw);
    if mean == 0.0 {
        vec![1.0; lats.len()]
    } else {
        raw.iter().map(|w| w / mean).collect()
    }
}
