//! Fake-retreat movement: bait the player, then turn and charge.
//!
//! The timer cycle is `Advancing → Retreating → Charging → Advancing`. On top
//! of that, a low-health check runs every tick independent of the timer:
//! whenever the actor's health ratio drops to the threshold it jumps straight
//! into retreating, whatever the current phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};
use crate::timing::{clamp_duration, Countdown};

/// Tuning for [`FakeRetreat`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeRetreatConfig {
    /// Seconds spent advancing each cycle.
    pub advance_duration: f32,
    /// Seconds spent retreating each cycle.
    pub retreat_duration: f32,
    /// Seconds spent charging each cycle.
    pub charge_duration: f32,
    /// Health ratio at or below which the actor breaks off and retreats.
    pub low_health_threshold: f32,
    /// Speed multiplier while charging.
    pub charge_speed_factor: f32,
}

impl FakeRetreatConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            advance_duration: clamp_duration(self.advance_duration),
            retreat_duration: clamp_duration(self.retreat_duration),
            charge_duration: clamp_duration(self.charge_duration),
            low_health_threshold: if self.low_health_threshold.is_finite() {
                self.low_health_threshold.clamp(0.0, 1.0)
            } else {
                defaults.low_health_threshold
            },
            charge_speed_factor: if self.charge_speed_factor.is_finite() {
                self.charge_speed_factor.max(0.0)
            } else {
                defaults.charge_speed_factor
            },
        }
    }
}

impl Default for FakeRetreatConfig {
    fn default() -> Self {
        Self {
            advance_duration: 1.5,
            retreat_duration: 1.0,
            charge_duration: 0.8,
            low_health_threshold: 0.35,
            charge_speed_factor: 1.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeintPhase {
    Advancing,
    Retreating,
    Charging,
}

/// Movement strategy that advances, feints a retreat, then charges.
pub struct FakeRetreat {
    config: FakeRetreatConfig,
    phase: FeintPhase,
    timer: Countdown,
}

impl FakeRetreat {
    /// Creates the strategy with the given tuning.
    #[must_use]
    pub fn new(config: FakeRetreatConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            phase: FeintPhase::Advancing,
            timer: Countdown::new(config.advance_duration),
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FakeRetreatConfig::default())
    }

    /// Whether the actor is currently retreating.
    #[must_use]
    pub fn is_retreating(&self) -> bool {
        self.phase == FeintPhase::Retreating
    }

    fn advance_cycle(&mut self) {
        let (next, duration) = match self.phase {
            FeintPhase::Advancing => (FeintPhase::Retreating, self.config.retreat_duration),
            FeintPhase::Retreating => (FeintPhase::Charging, self.config.charge_duration),
            FeintPhase::Charging => (FeintPhase::Advancing, self.config.advance_duration),
        };
        self.phase = next;
        self.timer.reset_to(duration);
    }
}

impl MovementStrategy for FakeRetreat {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(player) = ctx.player else {
            return Vec2::ZERO;
        };
        if ctx.dt <= 0.0 {
            return Vec2::ZERO;
        }

        // The low-health check outranks the timer, from any phase. While the
        // ratio stays low the cycle is parked in Retreating.
        if ctx.health_ratio <= self.config.low_health_threshold {
            if self.phase != FeintPhase::Retreating {
                trace!(actor = %ctx.actor, ratio = ctx.health_ratio, "low health, breaking off");
                self.phase = FeintPhase::Retreating;
                self.timer.reset_to(self.config.retreat_duration);
            }
        } else if self.timer.tick(ctx.dt) {
            self.advance_cycle();
        }

        let toward = geom::direction_to(ctx.origin, player, ctx.facing);
        let speed = ctx.stats.move_speed;
        match self.phase {
            FeintPhase::Advancing => toward * speed,
            FeintPhase::Retreating => -toward * speed * ctx.stats.retreat_multiplier,
            FeintPhase::Charging => toward * speed * self.config.charge_speed_factor,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::Bed;

    fn config() -> FakeRetreatConfig {
        FakeRetreatConfig {
            advance_duration: 0.5,
            retreat_duration: 0.5,
            charge_duration: 0.5,
            low_health_threshold: 0.35,
            charge_speed_factor: 2.0,
        }
    }

    #[test]
    fn absent_player_is_idle() {
        let bed = Bed::no_player();
        let mut feint = FakeRetreat::with_defaults();
        assert_eq!(bed.steer(&mut feint, Vec2::ZERO, 0.1), Vec2::ZERO);
    }

    #[test]
    fn zero_dt_freezes_the_cycle() {
        let bed = Bed::with_player(Vec2::new(10.0, 0.0));
        let mut feint = FakeRetreat::new(config());
        for _ in 0..50 {
            assert_eq!(bed.steer(&mut feint, Vec2::ZERO, 0.0), Vec2::ZERO);
        }
        assert!(!feint.is_retreating());
    }

    #[test]
    fn cycle_advances_through_phases() {
        let bed = Bed::with_player(Vec2::new(10.0, 0.0));
        let mut feint = FakeRetreat::new(config());
        let speed = bed.stats.move_speed;

        // Advancing.
        let advancing = bed.steer(&mut feint, Vec2::ZERO, 0.25);
        assert!((advancing - Vec2::X * speed).length() < 1e-4);

        // Second tick expires the advance timer → Retreating.
        let retreating = bed.steer(&mut feint, Vec2::ZERO, 0.25);
        assert!(retreating.x < 0.0);
        assert!(
            (retreating.length() - speed * bed.stats.retreat_multiplier).abs() < 1e-4
        );

        // Two more ticks → Charging.
        bed.steer(&mut feint, Vec2::ZERO, 0.25);
        let charging = bed.steer(&mut feint, Vec2::ZERO, 0.25);
        assert!(charging.x > 0.0);
        assert!((charging.length() - speed * 2.0).abs() < 1e-4);
    }

    #[test]
    fn low_health_forces_retreat_from_any_phase() {
        let mut bed = Bed::with_player(Vec2::new(10.0, 0.0));
        let mut feint = FakeRetreat::new(config());

        // Reach the charging phase at full health (advance → retreat → charge).
        for _ in 0..3 {
            bed.steer(&mut feint, Vec2::ZERO, 0.25);
        }
        let charging = bed.steer(&mut feint, Vec2::ZERO, 0.25);
        assert!(charging.x > 0.0);

        // Health drops below the threshold mid-charge.
        bed.health_ratio = 0.3;
        let velocity = bed.steer(&mut feint, Vec2::ZERO, 0.25);

        assert!(feint.is_retreating());
        assert!(velocity.x < 0.0, "velocity must point away from the player");
    }

    #[test]
    fn low_health_retreat_ignores_timer_state() {
        let mut bed = Bed::with_player(Vec2::new(10.0, 0.0));
        bed.health_ratio = 0.3;
        let mut feint = FakeRetreat::new(config());

        // First tick ever: the emergency check fires before the timer.
        let velocity = bed.steer(&mut feint, Vec2::ZERO, 0.25);
        assert!(velocity.x < 0.0);
    }

    #[test]
    fn recovered_health_resumes_cycle_after_retreat() {
        let mut bed = Bed::with_player(Vec2::new(10.0, 0.0));
        bed.health_ratio = 0.3;
        let mut feint = FakeRetreat::new(config());
        bed.steer(&mut feint, Vec2::ZERO, 0.25);
        assert!(feint.is_retreating());

        // Health restored: the retreat runs out its timer, then charges.
        bed.health_ratio = 1.0;
        bed.steer(&mut feint, Vec2::ZERO, 0.25);
        let velocity = bed.steer(&mut feint, Vec2::ZERO, 0.25);
        assert!(velocity.x > 0.0);
    }
}
