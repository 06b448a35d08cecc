//! Static shape checks

use super::ops::broadcast_shape;
use crate::common::normalize_axis;
use crate::error::*;
use itertools::Itertools;

/// Checks that an axis has a given size.
///
/// * `name`     - Tensor name used in error messages.
/// * `shape`    - Shape of the tensor.
/// * `axis`     - The axis; negative values count from the end.
/// * `expected` - Required size.
pub fn check_dim_equals(name: &str, shape: &[usize], axis: isize, expected: usize) -> Result<()> {
    match normalize_axis(axis, shape.len()) {
        Ok(i) if shape[i] == expected => Ok(()),
        _ => Err(ShapeError::DimMismatch {
            name: name.to_string(),
            axis,
            expected,
            shape: shape.to_vec(),
        }),
    }
}

/// Checks that a tensor has rank strictly greater than `rank`.
///
/// * `name`  - Tensor name used in error messages.
/// * `shape` - Shape of the tensor.
/// * `rank`  - Exclusive lower bound for the rank.
pub fn check_rank_greater_than(name: &str, shape: &[usize], rank: usize) -> Result<()> {
    if shape.len() > rank {
        Ok(())
    } else {
        Err(ShapeError::RankTooSmall {
            name: name.to_string(),
            rank: shape.len(),
            min_exclusive: rank,
        })
    }
}

/// Compares the batch dimensions of several tensors. The batch of a shape is
/// every axis up to and including `last_axis`; batches are aligned from the
/// right. With `broadcast_compatible` a size of 1 matches any size and
/// missing leading axes count as 1, otherwise batches must be identical.
///
/// * `names`                - Tensor names used in error messages.
/// * `shapes`               - Shapes of the tensors.
/// * `last_axis`            - Last batch axis, usually negative.
/// * `broadcast_compatible` - Whether broadcasting is allowed.
pub fn compare_batch_dimensions(
    names: &[&str],
    shapes: &[&[usize]],
    last_axis: isize,
    broadcast_compatible: bool,
) -> Result<()> {
    let batches: Vec<&[usize]> = shapes.iter().map(|s| batch_shape(s, last_axis)).collect();
    trace!("Batch shapes of {:?}: {:?}", names, batches);

    let compatible = if broadcast_compatible {
        batches
            .iter()
            .try_fold(vec![], |acc, b| broadcast_shape(&acc, b))
            .is_some()
    } else {
        batches.iter().all_equal()
    };

    if compatible {
        Ok(())
    } else {
        Err(ShapeError::BatchMismatch {
            names: names.iter().map(|n| n.to_string()).collect(),
            shapes: shapes.iter().map(|s| s.to_vec()).collect(),
        })
    }
}

/// Checks that an axis has exactly the same size in every shape.
///
/// * `names`  - Tensor names used in error messages.
/// * `shapes` - Shapes of the tensors.
/// * `axis`   - The axis; negative values count from the end.
pub fn compare_dimensions(names: &[&str], shapes: &[&[usize]], axis: isize) -> Result<()> {
    let dims = shapes
        .iter()
        .map(|s| normalize_axis(axis, s.len()).map(|i| s[i]))
        .collect::<Result<Vec<_>>>()?;
    if dims.iter().all_equal() {
        Ok(())
    } else {
        Err(ShapeError::DimensionMismatch {
            names: names.iter().map(|n| n.to_string()).collect(),
            axis,
            shapes: shapes.iter().map(|s| s.to_vec()).collect(),
        })
    }
}

/// Returns the leading axes of `shape` up to and including `last_axis`.
/// Shapes too small to reach `last_axis` have an empty batch.
fn batch_shape(shape: &[usize], last_axis: isize) -> &[usize] {
    let end = if last_axis < 0 {
        (shape.len() as isize + last_axis + 1).max(0) as usize
    } else {
        (last_axis as usize + 1).min(shape.len())
    };
    &shape[..end]
}
