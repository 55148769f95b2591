//! Bush-ambush movement: lie in wait, then sneak up on the player.
//!
//! The actor waits in place until either the wait timer fills or the player
//! pulls beyond the resume distance, then sneaks toward the player at reduced
//! speed and drops back into waiting once inside the stop distance. The
//! thresholds are asymmetric — resume is kept above stop by a margin at
//! config-load time — so the actor cannot oscillate on a boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};
use crate::timing::{clamp_duration, Countdown};

/// Minimum gap kept between the stop and resume distances.
pub const MIN_BAND_MARGIN: f32 = 0.5;

/// Tuning for [`BushAmbush`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BushAmbushConfig {
    /// Seconds of waiting before sneaking resumes on its own.
    pub wait_duration: f32,
    /// Distance at which sneaking stops and waiting re-starts.
    pub stop_distance: f32,
    /// Distance beyond which waiting is abandoned immediately.
    pub resume_distance: f32,
    /// Fraction of move speed used while sneaking.
    pub sneak_speed_factor: f32,
}

impl BushAmbushConfig {
    /// Clamps invalid tunables and enforces `resume > stop + margin`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let stop_distance = if self.stop_distance.is_finite() {
            self.stop_distance.max(0.0)
        } else {
            defaults.stop_distance
        };
        let resume_raw = if self.resume_distance.is_finite() {
            self.resume_distance
        } else {
            defaults.resume_distance
        };
        Self {
            wait_duration: clamp_duration(self.wait_duration),
            stop_distance,
            resume_distance: resume_raw.max(stop_distance + MIN_BAND_MARGIN),
            sneak_speed_factor: if self.sneak_speed_factor.is_finite() {
                self.sneak_speed_factor.clamp(0.05, 1.0)
            } else {
                defaults.sneak_speed_factor
            },
        }
    }
}

impl Default for BushAmbushConfig {
    fn default() -> Self {
        Self {
            wait_duration: 1.8,
            stop_distance: 9.0,
            resume_distance: 12.0,
            sneak_speed_factor: 0.55,
        }
    }
}

/// Movement strategy that alternates lying in wait and sneaking closer.
pub struct BushAmbush {
    config: BushAmbushConfig,
    sneaking: bool,
    wait: Countdown,
}

impl BushAmbush {
    /// Creates the strategy with the given tuning.
    #[must_use]
    pub fn new(config: BushAmbushConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            sneaking: false,
            wait: Countdown::new(config.wait_duration),
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(BushAmbushConfig::default())
    }

    /// Whether the actor is currently sneaking (vs. waiting).
    #[must_use]
    pub const fn is_sneaking(&self) -> bool {
        self.sneaking
    }
}

impl MovementStrategy for BushAmbush {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(player) = ctx.player else {
            return Vec2::ZERO;
        };
        if ctx.dt <= 0.0 {
            return Vec2::ZERO;
        }

        let offset = player - ctx.origin;
        let distance = offset.length();
        let sneak_velocity = || {
            geom::direction_or(offset, ctx.facing)
                * ctx.stats.move_speed
                * self.config.sneak_speed_factor
        };

        if self.sneaking {
            if distance <= self.config.stop_distance {
                self.sneaking = false;
                self.wait.reset();
                return Vec2::ZERO;
            }
            return sneak_velocity();
        }

        let waited_out = self.wait.tick(ctx.dt);
        if (waited_out || distance >= self.config.resume_distance)
            && distance > self.config.stop_distance
        {
            self.sneaking = true;
            self.wait.reset();
            return sneak_velocity();
        }
        if waited_out {
            // Still on top of the player; keep waiting another round.
            self.wait.reset();
        }
        Vec2::ZERO
    }
}

// =============================================================================
// Tests
// =============================================================================
