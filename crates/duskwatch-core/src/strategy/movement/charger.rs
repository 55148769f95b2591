//! Charger movement: telegraphed straight-line rushes.
//!
//! `Windup → Charging → Cooldown` on fixed timers. The charge direction is
//! locked at the windup→charging transition and never re-aimed mid-charge;
//! if the player direction is degenerate at lock time (standing on the
//! actor), the actor charges along its current facing instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};
use crate::timing::{clamp_duration, Countdown};

/// Tuning for [`Charger`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargerConfig {
    /// Seconds of stationary wind-up before each charge.
    pub windup_duration: f32,
    /// Seconds the charge lasts.
    pub charge_duration: f32,
    /// Seconds of recovery after a charge.
    pub cooldown_duration: f32,
    /// Speed multiplier while charging.
    pub charge_speed_factor: f32,
}

impl ChargerConfig {
    /// Clamps invalid tunables to safe minimums.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            windup_duration: clamp_duration(self.windup_duration),
            charge_duration: clamp_duration(self.charge_duration),
            cooldown_duration: clamp_duration(self.cooldown_duration),
            charge_speed_factor: if self.charge_speed_factor.is_finite() {
                self.charge_speed_factor.max(0.0)
            } else {
                Self::default().charge_speed_factor
            },
        }
    }
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self {
            windup_duration: 0.6,
            charge_duration: 0.8,
            cooldown_duration: 1.2,
            charge_speed_factor: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChargePhase {
    Windup,
    Charging,
    Cooldown,
}

/// Movement strategy that rushes the player in telegraphed bursts.
pub struct Charger {
    config: ChargerConfig,
    phase: ChargePhase,
    timer: Countdown,
    charge_direction: Vec2,
}

impl Charger {
    /// Creates the strategy with the given tuning.
    #[must_use]
    pub fn new(config: ChargerConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            phase: ChargePhase::Windup,
            timer: Countdown::new(config.windup_duration),
            charge_direction: Vec2::X,
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ChargerConfig::default())
    }

    /// Whether the actor is mid-charge.
    #[must_use]
    pub fn is_charging(&self) -> bool {
        self.phase == ChargePhase::Charging
    }
}

impl MovementStrategy for Charger {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(player) = ctx.player else {
            return Vec2::ZERO;
        };
        if ctx.dt <= 0.0 {
            return Vec2::ZERO;
        }

        if self.timer.tick(ctx.dt) {
            match self.phase {
                ChargePhase::Windup => {
                    // Direction locks here and stays fixed for the whole charge.
                    self.charge_direction =
                        geom::direction_to(ctx.origin, player, ctx.facing);
                    self.phase = ChargePhase::Charging;
                    self.timer.reset_to(self.config.charge_duration);
                    trace!(actor = %ctx.actor, "charge begins");
                }
                ChargePhase::Charging => {
                    self.phase = ChargePhase::Cooldown;
                    self.timer.reset_to(self.config.cooldown_duration);
                }
                ChargePhase::Cooldown => {
                    self.phase = ChargePhase::Windup;
                    self.timer.reset_to(self.config.windup_duration);
                }
            }
        }

        match self.phase {
            ChargePhase::Charging => {
                self.charge_direction * ctx.stats.move_speed * self.config.charge_speed_factor
            }
            ChargePhase::Windup | ChargePhase::Cooldown => Vec2::ZERO,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
