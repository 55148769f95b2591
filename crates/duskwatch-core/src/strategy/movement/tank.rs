//! Tank movement: hold the preferred engagement band.
//!
//! Stateless; all tuning comes from the actor's stats. Farther than
//! `preferred + buffer` it closes in at full speed, closer than
//! `preferred − buffer` it backs off at half speed, and inside the band it
//! holds still.

use glam::Vec2;

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};

/// Fraction of move speed used when backing away.
const BACKPEDAL_FACTOR: f32 = 0.5;

/// Stateless band-holding movement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tank;

impl Tank {
    /// Creates the strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MovementStrategy for Tank {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(offset) = ctx.player_offset() else {
            return Vec2::ZERO;
        };

        let distance = offset.length();
        let preferred = ctx.stats.preferred_shoot_distance;
        let buffer = ctx.stats.distance_buffer;
        let toward = geom::direction_or(offset, ctx.facing);

        if distance > preferred + buffer {
            toward * ctx.stats.move_speed
        } else if distance < preferred - buffer {
            -toward * ctx.stats.move_speed * BACKPEDAL_FACTOR
        } else {
            Vec2::ZERO
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
