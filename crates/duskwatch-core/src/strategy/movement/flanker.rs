//! Flanker movement: approach the player from a random side angle.
//!
//! Once per cycle the strategy picks a left or right flank angle. Each tick
//! it rotates the to-player vector by that angle and steers along the result,
//! which bends the approach path around the player's side. Inside the flank
//! tolerance it switches to a direct approach, and on contact the cycle
//! resets so the next pass may swing the other way. The chosen angle persists
//! across ticks until that reset.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};

/// Tuning for [`Flanker`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlankerConfig {
    /// Magnitude of the flank angle in radians; the sign is chosen randomly.
    pub flank_angle: f32,
    /// Distance at which the sweep gives way to a direct approach.
    pub flank_tolerance: f32,
    /// Contact distance that resets the cycle.
    pub contact_tolerance: f32,
}

impl FlankerConfig {
    /// Clamps invalid tunables and keeps the tolerances ordered.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let contact_tolerance = if self.contact_tolerance.is_finite() {
            self.contact_tolerance.max(0.1)
        } else {
            defaults.contact_tolerance
        };
        let flank_tolerance = if self.flank_tolerance.is_finite() {
            self.flank_tolerance.max(contact_tolerance + 0.1)
        } else {
            defaults.flank_tolerance.max(contact_tolerance + 0.1)
        };
        Self {
            flank_angle: if self.flank_angle.is_finite() {
                self.flank_angle.abs().clamp(0.05, std::f32::consts::FRAC_PI_2)
            } else {
                defaults.flank_angle
            },
            flank_tolerance,
            contact_tolerance,
        }
    }
}

impl Default for FlankerConfig {
    fn default() -> Self {
        Self {
            flank_angle: 0.9,
            flank_tolerance: 3.0,
            contact_tolerance: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FlankPhase {
    /// No angle chosen yet this cycle.
    Unchosen,
    /// Sweeping in along the rotated approach.
    Sweeping { angle: f32 },
    /// Close enough; heading straight for the player.
    Direct,
}

/// Movement strategy that swings around the player's side before closing.
pub struct Flanker {
    config: FlankerConfig,
    rng: ChaCha8Rng,
    phase: FlankPhase,
}

impl Flanker {
    /// Creates the strategy with the given tuning and RNG seed.
    #[must_use]
    pub fn new(config: FlankerConfig, seed: u64) -> Self {
        Self {
            config: config.normalized(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            phase: FlankPhase::Unchosen,
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(FlankerConfig::default(), seed)
    }

    /// The flank angle for the current cycle, if one has been chosen.
    #[must_use]
    pub fn chosen_angle(&self) -> Option<f32> {
        match self.phase {
            FlankPhase::Sweeping { angle } => Some(angle),
            FlankPhase::Unchosen | FlankPhase::Direct => None,
        }
    }
}

impl MovementStrategy for Flanker {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(player) = ctx.player else {
            return Vec2::ZERO;
        };
        if ctx.dt <= 0.0 {
            return Vec2::ZERO;
        }

        let offset = player - ctx.origin;
        let distance = offset.length();

        if distance <= self.config.contact_tolerance {
            // Contact: the next pass chooses a fresh side.
            self.phase = FlankPhase::Unchosen;
            return Vec2::ZERO;
        }

        if self.phase == FlankPhase::Unchosen {
            let sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let angle = sign * self.config.flank_angle;
            trace!(actor = %ctx.actor, angle, "flank side chosen");
            self.phase = FlankPhase::Sweeping { angle };
        }

        if let FlankPhase::Sweeping { .. } = self.phase {
            if distance <= self.config.flank_tolerance {
                self.phase = FlankPhase::Direct;
            }
        }

        let direction = match self.phase {
            FlankPhase::Sweeping { angle } => {
                geom::direction_or(geom::rotate(offset, angle), ctx.facing)
            }
            // Unchosen cannot persist past the selection above.
            FlankPhase::Direct | FlankPhase::Unchosen => geom::direction_or(offset, ctx.facing),
        };

        direction * ctx.stats.move_speed
    }
}

// =============================================================================
// Tests
// =============================================================================
