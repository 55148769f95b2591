//! Shared vector geometry for steering math.
//!
//! Every direction a strategy derives from `target − self` passes through
//! these guards before normalization. On a near-zero vector they fall back to
//! an explicit direction (usually the actor's facing) instead of producing
//! NaN components that would poison downstream integration.

use glam::Vec2;

/// Magnitude below which a vector is treated as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1e-5;

/// Fixed axis used when no better fallback direction is available.
pub const FALLBACK_AXIS: Vec2 = Vec2::X;

/// Normalizes `v`, or returns `fallback` when `v` is degenerate.
///
/// The fallback is returned as-is; pass a unit vector.
#[must_use]
pub fn direction_or(v: Vec2, fallback: Vec2) -> Vec2 {
    if v.length_squared() <= DEGENERATE_EPSILON * DEGENERATE_EPSILON {
        fallback
    } else {
        v.normalize()
    }
}

/// Unit direction from `from` toward `to`, or `fallback` when the two points
/// coincide (within [`DEGENERATE_EPSILON`]).
#[must_use]
pub fn direction_to(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    direction_or(to - from, fallback)
}

/// Unit direction from `from` toward `to`, or `None` on degeneracy.
#[must_use]
pub fn try_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    if delta.length_squared() <= DEGENERATE_EPSILON * DEGENERATE_EPSILON {
        None
    } else {
        Some(delta.normalize())
    }
}

/// Rotates `v` counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Unit tangent of a unit radial vector.
///
/// `clockwise` selects the winding as seen in the standard y-up plane.
/// The input must already be normalized; the output then is too.
#[must_use]
pub fn tangent(radial: Vec2, clockwise: bool) -> Vec2 {
    if clockwise {
        Vec2::new(radial.y, -radial.x)
    } else {
        radial.perp()
    }
}

// =============================================================================
// Tests
// =============================================================================
