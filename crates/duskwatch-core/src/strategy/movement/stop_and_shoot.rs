//! Stop-and-shoot movement: advance in bursts, stand still to fire.
//!
//! A plain two-state toggle on duration timers. The optional hard minimum
//! distance forces zero velocity even mid-"moving", so a ranged actor never
//! walks into melee range just because its movement window is open.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};
use crate::timing::{clamp_duration, Countdown};

/// Tuning for [`StopAndShoot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopAndShootConfig {
    /// Seconds of each movement burst.
    pub move_duration: f32,
    /// Seconds of each firing halt.
    pub hold_duration: f32,
    /// Optional hard floor on player distance; inside it the actor never
    /// advances.
    pub min_distance: Option<f32>,
}

impl StopAndShootConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            move_duration: clamp_duration(self.move_duration),
            hold_duration: clamp_duration(self.hold_duration),
            min_distance: self
                .min_distance
                .filter(|distance| distance.is_finite())
                .map(|distance| distance.max(0.0)),
        }
    }
}

impl Default for StopAndShootConfig {
    fn default() -> Self {
        Self {
            move_duration: 1.2,
            hold_duration: 0.9,
            min_distance: None,
        }
    }
}

/// Movement strategy that alternates advancing and standing to fire.
pub struct StopAndShoot {
    config: StopAndShootConfig,
    moving: bool,
    timer: Countdown,
}

impl StopAndShoot {
    /// Creates the strategy with the given tuning.
    #[must_use]
    pub fn new(config: StopAndShootConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            moving: true,
            timer: Countdown::new(config.move_duration),
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(StopAndShootConfig::default())
    }

    /// Whether the movement window is currently open.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }
}

impl MovementStrategy for StopAndShoot {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(offset) = ctx.player_offset() else {
            return Vec2::ZERO;
        };
        if ctx.dt <= 0.0 {
            return Vec2::ZERO;
        }

        if self.timer.tick(ctx.dt) {
            self.moving = !self.moving;
            self.timer.reset_to(if self.moving {
                self.config.move_duration
            } else {
                self.config.hold_duration
            });
        }

        let distance = offset.length();
        let inside_floor = self
            .config
            .min_distance
            .map_or(false, |floor| distance <= floor);
        if !self.moving || inside_floor {
            return Vec2::ZERO;
        }

        geom::direction_or(offset, ctx.facing) * ctx.stats.move_speed
    }
}

// =============================================================================
// Tests
// =============================================================================
