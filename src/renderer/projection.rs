//! Perspective projection shared by every drawn entity

use glam::{Vec2, Vec3};

use crate::consts::MIN_DEPTH;

/// A projected point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen position in pixels
    pub pos: Vec2,
    /// Size multiplier at this depth (1.0 at the camera plane)
    pub scale: f32,
}

/// Project a camera-relative point onto a `viewport`-sized surface.
///
/// Depth is clamped to `MIN_DEPTH`, so points on or behind the camera plane
/// collapse onto it instead of blowing up or flipping.
#[inline]
pub fn project(point: Vec3, viewport: Vec2, fov: f32) -> Projected {
    let safe_z = point.z.max(MIN_DEPTH);
    let scale = fov / (fov + safe_z);
    Projected {
        pos: Vec2::new(
            point.x * scale + viewport.x / 2.0,
            point.y * scale + viewport.y / 2.0,
        ),
        scale,
    }
}
