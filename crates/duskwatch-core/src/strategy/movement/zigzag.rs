//! Zig-zag movement: weave toward the player on a sine wave.
//!
//! The approach direction gets a sinusoidal lateral component at a fixed
//! frequency and amplitude, then the sum is renormalized and scaled to move
//! speed — so the actor weaves without ever losing ground speed. Each
//! instance draws a random phase offset at construction so a pack of weavers
//! doesn't swing in lockstep.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};

/// Tuning for [`ZigZag`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigZagConfig {
    /// Weave frequency in full cycles per second.
    pub frequency: f32,
    /// Lateral amplitude relative to the forward component.
    pub amplitude: f32,
}

impl ZigZagConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            frequency: if self.frequency.is_finite() {
                self.frequency.max(0.01)
            } else {
                defaults.frequency
            },
            amplitude: if self.amplitude.is_finite() {
                self.amplitude.max(0.0)
            } else {
                defaults.amplitude
            },
        }
    }
}

impl Default for ZigZagConfig {
    fn default() -> Self {
        Self {
            frequency: 1.6,
            amplitude: 0.8,
        }
    }
}

/// Movement strategy that weaves while approaching.
pub struct ZigZag {
    config: ZigZagConfig,
    phase_offset: f32,
    elapsed: f32,
}

impl ZigZag {
    /// Creates the strategy with the given tuning and RNG seed.
    #[must_use]
    pub fn new(config: ZigZagConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            config: config.normalized(),
            phase_offset: rng.gen_range(0.0..std::f32::consts::TAU),
            elapsed: 0.0,
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(ZigZagConfig::default(), seed)
    }

    /// The per-instance phase offset in radians.
    #[must_use]
    pub const fn phase_offset(&self) -> f32 {
        self.phase_offset
    }
}

impl MovementStrategy for ZigZag {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(player) = ctx.player else {
            return Vec2::ZERO;
        };

        if ctx.dt > 0.0 {
            self.elapsed += ctx.dt;
        }

        let forward = geom::direction_to(ctx.origin, player, ctx.facing);
        let sway = (std::f32::consts::TAU * self.config.frequency * self.elapsed
            + self.phase_offset)
            .sin()
            * self.config.amplitude;
        let weave = forward + forward.perp() * sway;

        geom::direction_or(weave, forward) * ctx.stats.move_speed
    }
}

// =============================================================================
// Tests
// =============================================================================
