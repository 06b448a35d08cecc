//! Output formatting

use itertools::Itertools;
use ndarray::ArrayViewD;
use numeric::common::Float;
use volume::Radiance;

/// Formats the composited result with one line per ray.
///
/// * `radiance`     - Result for a `[rays, N]` batch.
/// * `precision`    - Number of decimal places.
/// * `with_weights` - Whether to append the per-sample weights.
pub fn format_rays(radiance: &Radiance<Float>, precision: usize, with_weights: bool) -> Vec<String> {
    let fmt = |values: ArrayViewD<Float>| values.iter().map(|v| format!("{v:.precision$}")).join(" ");

    let color = radiance.color.outer_iter();
    let opacity = radiance.opacity.iter();
    let weights = radiance.weights.outer_iter();

    color
        .zip(opacity)
        .zip(weights)
        .enumerate()
        .map(|(i, ((rgb, alpha), weights))| {
            let mut line = format!("ray {i}: color [{}] opacity {alpha:.precision$}", fmt(rgb));
            if with_weights {
                line += &format!(" weights [{}]", fmt(weights));
            }
            line
        })
        .collect()
}
