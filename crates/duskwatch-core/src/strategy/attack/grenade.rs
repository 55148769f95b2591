//! Grenade attack: lobbed one-shot launches on a cooldown.
//!
//! On cooldown elapse the strategy aims at the player and asks the weapon
//! controller for a one-shot launch. A missing player or a refused launch
//! (nothing loaded) leaves the cooldown elapsed, so the throw happens the
//! moment the blocker clears instead of being silently swallowed.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::contracts::{LaunchRequest, WeaponControl};
use crate::geom;
use crate::strategy::{AttackStrategy, CombatContext, CombatEffect};
use crate::timing::{clamp_duration, Countdown};

/// Tuning for [`GrenadeThrow`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrenadeConfig {
    /// Seconds between throws.
    pub cooldown: f32,
    /// Initial projectile speed in world units per second.
    pub launch_speed: f32,
    /// Slow-down factor applied to targets caught in the burst.
    pub slow_factor: f32,
}

impl GrenadeConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            cooldown: clamp_duration(self.cooldown),
            launch_speed: if self.launch_speed.is_finite() {
                self.launch_speed.max(0.0)
            } else {
                defaults.launch_speed
            },
            slow_factor: if self.slow_factor.is_finite() {
                self.slow_factor.clamp(0.0, 1.0)
            } else {
                defaults.slow_factor
            },
        }
    }
}

impl Default for GrenadeConfig {
    fn default() -> Self {
        Self {
            cooldown: 3.5,
            launch_speed: 9.0,
            slow_factor: 0.35,
        }
    }
}

/// Attack strategy that lobs projectiles at the player.
pub struct GrenadeThrow {
    config: GrenadeConfig,
    cooldown: Countdown,
}

impl GrenadeThrow {
    /// Creates the strategy with the given tuning.
    ///
    /// The first throw is available immediately.
    #[must_use]
    pub fn new(config: GrenadeConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            cooldown: Countdown::ready(config.cooldown),
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(GrenadeConfig::default())
    }
}

impl AttackStrategy for GrenadeThrow {
    fn strike(
        &mut self,
        ctx: &CombatContext<'_>,
        weapon: &mut dyn WeaponControl,
    ) -> Vec<CombatEffect> {
        if ctx.dt <= 0.0 {
            return Vec::new();
        }

        self.cooldown.tick(ctx.dt);
        if !self.cooldown.is_ready() {
            return Vec::new();
        }

        // Cooldown stays elapsed when nothing can be thrown.
        let Some(player) = ctx.player else {
            return Vec::new();
        };

        let direction = geom::direction_to(ctx.origin, player, ctx.facing);
        let accepted = weapon.launch(LaunchRequest {
            direction,
            damage_multiplier: ctx.stats.damage_multiplier.max(0.0),
            launch_speed: self.config.launch_speed,
            slow_factor: self.config.slow_factor,
        });

        if accepted {
            trace!(actor = %ctx.actor, "grenade away");
            self.cooldown.reset();
        }

        Vec::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
