//! Host-side mirror of the line shader's vertex transform.
//!
//! `line.wgsl` computes clip-space positions on the GPU; these functions
//! compute the same values on the CPU so the mapping can be checked without
//! a device.

use crate::series::ValueRange;
use glam::Vec2;

/// Clamped linear remap of `x` from `[edge0, edge1]` to `[0, 1]`.
#[inline]
pub fn linearstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    ((x - edge0) / (edge1 - edge0)).min(1.0).max(0.0)
}

/// Clip-space x of sample `index` out of `len`. Index 0 lands on -1 and the
/// last sample stops one step short of +1.
#[inline]
pub fn vertex_x(index: usize, len: usize) -> f32 {
    (index as f32 / len as f32) * 2.0 - 1.0
}

/// Clip-space y of `value`; values outside `range` are pinned to the edge.
#[inline]
pub fn vertex_y(value: f32, range: ValueRange) -> f32 {
    linearstep(range.min(), range.max(), value) * 2.0 - 1.0
}

#[inline]
pub fn vertex_position(index: usize, len: usize, value: f32, range: ValueRange) -> Vec2 {
    Vec2::new(vertex_x(index, len), vertex_y(value, range))
}

/// Positions for a whole series, in draw order.
pub fn line_strip(samples: &[f32], range: ValueRange) -> Vec<Vec2> {
    let len = samples.len();
    samples
        .iter()
        .enumerate()
        .map(|(i, &v)| vertex_position(i, len, v, range))
        .collect()
}
