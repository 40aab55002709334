use crate::constants::MIN_SURFACE_PX;

/// Canvas backing size for a window of `inner_width` x `inner_height` CSS
/// pixels, clamped to `[MIN_SURFACE_PX, max_dim]` on each axis.
pub fn surface_size(inner_width: f64, inner_height: f64, max_dim: u32) -> (u32, u32) {
    (to_px(inner_width, max_dim), to_px(inner_height, max_dim))
}

#[inline]
fn to_px(css: f64, max_dim: u32) -> u32 {
    if !css.is_finite() || css < MIN_SURFACE_PX as f64 {
        return MIN_SURFACE_PX;
    }
    (css.floor() as u32).clamp(MIN_SURFACE_PX, max_dim.max(MIN_SURFACE_PX))
}

/// Clamp an existing backing size to the device's largest texture edge.
pub fn clamp_to_limit((width, height): (u32, u32), max_dim: u32) -> (u32, u32) {
    let limit = max_dim.max(MIN_SURFACE_PX);
    (
        width.clamp(MIN_SURFACE_PX, limit),
        height.clamp(MIN_SURFACE_PX, limit),
    )
}
