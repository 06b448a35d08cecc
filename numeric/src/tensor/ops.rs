//! Tensor construction, broadcasting and axis scans

use crate::common::normalize_axis;
use crate::error::*;
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Zip};
use num_traits::One;
use std::ops::Mul;

/// Dynamic rank, row-major array used throughout the workspace.
pub type Tensor<T> = ArrayD<T>;

/// Builds a tensor from row-major `data`.
///
/// * `shape` - Dimensions of the tensor.
/// * `data`  - Elements in row-major order; must hold exactly the product of
///             `shape` elements.
pub fn tensor<T>(shape: &[usize], data: Vec<T>) -> Result<Tensor<T>> {
    let expected: usize = shape.iter().product();
    let actual = data.len();
    ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|_| ShapeError::ElementCount {
        shape: shape.to_vec(),
        expected,
        actual,
    })
}

/// Returns the shape two shapes broadcast to, or `None` when they are not
/// compatible. Shapes are aligned from the right; missing leading axes count
/// as size 1 and a size of 1 stretches to match the other side.
///
/// * `lhs` - First shape.
/// * `rhs` - Second shape.
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Option<Vec<usize>> {
    let rank = lhs.len().max(rhs.len());
    let dim = |s: &[usize], i: usize| {
        let offset = rank - s.len();
        if i < offset {
            1
        } else {
            s[i - offset]
        }
    };

    (0..rank)
        .map(|i| match (dim(lhs, i), dim(rhs, i)) {
            (a, b) if a == b => Some(a),
            (1, b) => Some(b),
            (a, 1) => Some(a),
            _ => None,
        })
        .collect()
}

/// Applies a binary function elementwise after broadcasting both operands to
/// their common shape.
///
/// * `lhs` - First operand.
/// * `rhs` - Second operand.
/// * `f`   - Function applied to each pair of elements.
pub fn broadcast_zip<A, B, C, F>(lhs: ArrayViewD<'_, A>, rhs: ArrayViewD<'_, B>, f: F) -> Result<Tensor<C>>
where
    A: Copy,
    B: Copy,
    F: Fn(A, B) -> C,
{
    let incompatible = || ShapeError::Incompatible {
        lhs: lhs.shape().to_vec(),
        rhs: rhs.shape().to_vec(),
    };
    let shape = broadcast_shape(lhs.shape(), rhs.shape()).ok_or_else(incompatible)?;
    let lhs = lhs.broadcast(IxDyn(&shape)).ok_or_else(incompatible)?;
    let rhs = rhs.broadcast(IxDyn(&shape)).ok_or_else(incompatible)?;
    Ok(Zip::from(lhs).and(rhs).map_collect(|&a, &b| f(a, b)))
}

/// Runs a left-to-right prefix scan along an axis. Each lane is scanned
/// independently in index order.
///
/// * `tensor`    - Input tensor.
/// * `axis`      - The axis; negative values count from the end.
/// * `init`      - Value the running accumulator starts with.
/// * `op`        - Combines the accumulator with the next element.
/// * `exclusive` - When set, element `i` holds the scan of elements before
///                 `i`, so the first element of every lane is `init`.
pub fn scan<T, F>(tensor: ArrayViewD<'_, T>, axis: isize, init: T, op: F, exclusive: bool) -> Result<Tensor<T>>
where
    T: Copy,
    F: Fn(T, T) -> T,
{
    let axis = Axis(normalize_axis(axis, tensor.ndim())?);
    let mut out = tensor.to_owned();
    for mut lane in out.lanes_mut(axis) {
        let mut acc = init;
        for v in lane.iter_mut() {
            let next = op(acc, *v);
            *v = if exclusive { acc } else { next };
            acc = next;
        }
    }
    Ok(out)
}

/// Cumulative product along an axis. The exclusive variant starts every lane
/// at 1.
///
/// * `tensor`    - Input tensor.
/// * `axis`      - The axis; negative values count from the end.
/// * `exclusive` - Whether element `i` excludes itself from the product.
pub fn cumprod<T>(tensor: ArrayViewD<'_, T>, axis: isize, exclusive: bool) -> Result<Tensor<T>>
where
    T: Copy + One + Mul<Output = T>,
{
    scan(tensor, axis, T::one(), |acc, x| acc * x, exclusive)
}
