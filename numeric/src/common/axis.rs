//! Axis

use crate::error::*;

/// Resolves a possibly negative axis index against a tensor rank. Negative
/// values count from the end so `-1` is the last axis.
///
/// * `axis` - The axis index.
/// * `rank` - Number of axes the index may address.
pub fn normalize_axis(axis: isize, rank: usize) -> Result<usize> {
    let resolved = if axis < 0 { rank as isize + axis } else { axis };
    if resolved < 0 || resolved >= rank as isize {
        Err(ShapeError::InvalidAxis { axis, rank })
    } else {
        Ok(resolved as usize)
    }
}
