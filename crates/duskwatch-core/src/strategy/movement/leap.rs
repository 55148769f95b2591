//! Leap-vault movement: gather, spring, recover.
//!
//! Same timing discipline as the charger family — `Pausing → Leaping →
//! Recovering` on fixed timers with the leap direction locked at the
//! pause→leap transition — but tuned for short explosive hops rather than
//! long rushes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};
use crate::timing::{clamp_duration, Countdown};

/// Tuning for [`LeapVault`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeapVaultConfig {
    /// Seconds of stillness before each leap.
    pub pause_duration: f32,
    /// Seconds the leap lasts.
    pub leap_duration: f32,
    /// Seconds of recovery after landing.
    pub recover_duration: f32,
    /// Speed multiplier during the leap.
    pub leap_speed_factor: f32,
}

impl LeapVaultConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            pause_duration: clamp_duration(self.pause_duration),
            leap_duration: clamp_duration(self.leap_duration),
            recover_duration: clamp_duration(self.recover_duration),
            leap_speed_factor: if self.leap_speed_factor.is_finite() {
                self.leap_speed_factor.max(0.0)
            } else {
                Self::default().leap_speed_factor
            },
        }
    }
}

impl Default for LeapVaultConfig {
    fn default() -> Self {
        Self {
            pause_duration: 0.9,
            leap_duration: 0.5,
            recover_duration: 1.1,
            leap_speed_factor: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VaultPhase {
    Pausing,
    Leaping,
    Recovering,
}

impl VaultPhase {
    const fn next(self) -> Self {
        match self {
            Self::Pausing => Self::Leaping,
            Self::Leaping => Self::Recovering,
            Self::Recovering => Self::Pausing,
        }
    }
}

/// Movement strategy that closes distance in short locked-direction hops.
pub struct LeapVault {
    config: LeapVaultConfig,
    phase: VaultPhase,
    timer: Countdown,
    leap_direction: Vec2,
}

impl LeapVault {
    /// Creates the strategy with the given tuning.
    #[must_use]
    pub fn new(config: LeapVaultConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            phase: VaultPhase::Pausing,
            timer: Countdown::new(config.pause_duration),
            leap_direction: Vec2::X,
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LeapVaultConfig::default())
    }

    /// Whether the actor is mid-leap.
    #[must_use]
    pub fn is_leaping(&self) -> bool {
        self.phase == VaultPhase::Leaping
    }

    const fn phase_duration(&self, phase: VaultPhase) -> f32 {
        match phase {
            VaultPhase::Pausing => self.config.pause_duration,
            VaultPhase::Leaping => self.config.leap_duration,
            VaultPhase::Recovering => self.config.recover_duration,
        }
    }
}

impl MovementStrategy for LeapVault {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(player) = ctx.player else {
            return Vec2::ZERO;
        };
        if ctx.dt <= 0.0 {
            return Vec2::ZERO;
        }

        if self.timer.tick(ctx.dt) {
            let next = self.phase.next();
            if next == VaultPhase::Leaping {
                // Direction locks for the whole hop.
                self.leap_direction = geom::direction_to(ctx.origin, player, ctx.facing);
            }
            self.phase = next;
            self.timer.reset_to(self.phase_duration(next));
        }

        if self.phase == VaultPhase::Leaping {
            self.leap_direction * ctx.stats.move_speed * self.config.leap_speed_factor
        } else {
            Vec2::ZERO
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
