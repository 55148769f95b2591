//! Orbit movement: circle the player at a fixed radius.
//!
//! Stateless. The velocity is a full-speed tangential component (winding
//! chosen by config) plus a radial correction clamped to ±1 unit/sec, which
//! converges the orbit onto the configured radius without ever dominating the
//! tangential motion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};

/// Tuning for [`Orbit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Radius the orbit converges on.
    pub orbit_radius: f32,
    /// Winding direction of the orbit.
    pub clockwise: bool,
}

impl OrbitConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            orbit_radius: if self.orbit_radius.is_finite() {
                self.orbit_radius.max(0.1)
            } else {
                Self::default().orbit_radius
            },
            clockwise: self.clockwise,
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 5.0,
            clockwise: false,
        }
    }
}

/// Maximum magnitude of the radial correction, in units per second.
const MAX_RADIAL_CORRECTION: f32 = 1.0;

/// Stateless orbiter around the player.
pub struct Orbit {
    config: OrbitConfig,
}

impl Orbit {
    /// Creates the strategy with the given tuning.
    #[must_use]
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(OrbitConfig::default())
    }
}

impl MovementStrategy for Orbit {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(player) = ctx.player else {
            return Vec2::ZERO;
        };

        let radial = ctx.origin - player;
        let distance = radial.length();
        let radial_unit = geom::direction_or(radial, ctx.facing);
        let tangent_unit = geom::tangent(radial_unit, self.config.clockwise);

        let correction = (distance - self.config.orbit_radius)
            .clamp(-MAX_RADIAL_CORRECTION, MAX_RADIAL_CORRECTION);

        tangent_unit * ctx.stats.move_speed - radial_unit * correction
    }
}

// =============================================================================
// Tests
// =============================================================================
