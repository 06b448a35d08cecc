//! Radiance-based ray rendering

use ndarray::{Axis, Slice};
use num_traits::Float;
use numeric::error::*;
use numeric::tensor::*;

/// Stabilizing term added to every factor of the transmittance product. It
/// keeps a fully opaque sample (alpha exactly 1) from forcing every later
/// transmittance to an exact zero. It is not part of the absorption model.
pub const TRANSMITTANCE_EPSILON: f64 = 1e-10;

/// Number of color channels in a sample.
pub const COLOR_CHANNELS: usize = 3;

/// Number of channels in a sample: color followed by density.
pub const SAMPLE_CHANNELS: usize = COLOR_CHANNELS + 1;

/// Composited result for a batch of rays.
#[derive(Clone, Debug, PartialEq)]
pub struct Radiance<T> {
    /// Accumulated color `[A1, ..., An, 3]`.
    pub color: Tensor<T>,

    /// Accumulated opacity `[A1, ..., An, 1]`.
    pub opacity: Tensor<T>,

    /// Per-sample contribution weights `[A1, ..., An, N]`.
    pub weights: Tensor<T>,
}

impl<T> From<Radiance<T>> for (Tensor<T>, Tensor<T>, Tensor<T>) {
    /// Returns `(color, opacity, weights)`.
    fn from(radiance: Radiance<T>) -> Self {
        (radiance.color, radiance.opacity, radiance.weights)
    }
}

/// Composites colored, semi-transparent samples along rays using the
/// discretized volume rendering integral.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RadianceCompositor {
    /// Stabilizing term for the transmittance product.
    epsilon: f64,
}

impl Default for RadianceCompositor {
    fn default() -> Self {
        Self::new(TRANSMITTANCE_EPSILON)
    }
}

impl RadianceCompositor {
    /// Returns a new `RadianceCompositor`.
    ///
    /// * `epsilon` - Stabilizing term added to each transmittance factor.
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Returns the stabilizing term.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Renders the rgba values of points along rays.
    ///
    /// Shapes are validated before any work is done; densities and
    /// distances are used as given, so `inf` and `nan` propagate into the
    /// outputs.
    ///
    /// * `samples`   - Tensor `[A1, ..., An, N, 4]` holding rgb and density
    ///                 of the `N` samples on each ray, in ray order.
    /// * `distances` - Tensor `[A1, ..., An, N]` holding the spacing of each
    ///                 sample. Batch dimensions may broadcast against those
    ///                 of `samples`.
    pub fn compute<T: Float>(&self, samples: &Tensor<T>, distances: &Tensor<T>) -> Result<Radiance<T>> {
        let mut distances_shape = distances.shape().to_vec();
        distances_shape.push(1);

        check_dim_equals("samples", samples.shape(), -1, SAMPLE_CHANNELS)?;
        check_rank_greater_than("samples", samples.shape(), 1)?;
        check_rank_greater_than("distances", &distances_shape, 1)?;
        compare_batch_dimensions(
            &["samples", "distances"],
            &[samples.shape(), &distances_shape],
            -3,
            true,
        )?;
        compare_dimensions(&["samples", "distances"], &[samples.shape(), &distances_shape], -2)?;

        debug!(
            "Compositing samples {:?} with distances {:?}",
            samples.shape(),
            distances.shape()
        );

        let channels = Axis(samples.ndim() - 1);
        let rgb = samples.slice_axis(channels, Slice::from(..COLOR_CHANNELS));
        let sigma = samples.index_axis(channels, COLOR_CHANNELS);
        if sigma.iter().any(|s| *s < T::zero()) {
            warn!("Negative density in samples {:?}", samples.shape());
        }

        // Absorption over each sample interval.
        let alpha = broadcast_zip(sigma, distances.view(), |s, d| T::one() - (-s * d).exp())?;

        // Light surviving all earlier samples.
        let epsilon = T::from(self.epsilon).unwrap_or_else(T::zero);
        let transmittance = cumprod(alpha.mapv(|a| T::one() - a + epsilon).view(), -1, true)?;

        let weights = &alpha * &transmittance;
        let ray_axis = Axis(weights.ndim() - 1);
        let color = broadcast_zip(weights.view().insert_axis(Axis(weights.ndim())), rgb, |w, c| w * c)?
            .sum_axis(ray_axis);
        let opacity = weights.sum_axis(ray_axis).insert_axis(ray_axis);

        trace!(
            "Composited color {:?}, opacity {:?}, weights {:?}",
            color.shape(),
            opacity.shape(),
            weights.shape()
        );

        Ok(Radiance {
            color,
            opacity,
            weights,
        })
    }
}

/// Renders the rgba values of points along rays, as described in "NeRF:
/// Representing Scenes as Neural Radiance Fields for View Synthesis".
///
/// Returns `(color, opacity, weights)` with shapes `[A1, ..., An, 3]`,
/// `[A1, ..., An, 1]` and `[A1, ..., An, N]`.
///
/// * `samples`   - Tensor `[A1, ..., An, N, 4]` of rgb and density values.
/// * `distances` - Tensor `[A1, ..., An, N]` of distances between samples.
pub fn compute_radiance<T: Float>(
    samples: &Tensor<T>,
    distances: &Tensor<T>,
) -> Result<(Tensor<T>, Tensor<T>, Tensor<T>)> {
    RadianceCompositor::default()
        .compute(samples, distances)
        .map(Into::into)
}
