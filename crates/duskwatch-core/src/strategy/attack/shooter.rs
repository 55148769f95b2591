//! Shooter attack: hold the trigger while the range is right.
//!
//! The strategy owns no cooldown — the weapon controller owns the firing
//! cadence. Every tick it recomputes "should fire" from whether the player
//! sits inside `preferred_shoot_distance ± distance_buffer` (optionally also
//! anywhere closer than preferred) and re-asserts the held trigger.

use serde::{Deserialize, Serialize};

use crate::contracts::WeaponControl;
use crate::strategy::{AttackStrategy, CombatContext, CombatEffect};

/// Tuning for [`Shooter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    /// Also fire when the player is closer than the preferred distance,
    /// not just inside the band.
    pub fire_when_closer: bool,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            fire_when_closer: true,
        }
    }
}

/// Attack strategy that drives a held-trigger weapon by range.
pub struct Shooter {
    config: ShooterConfig,
}

impl Shooter {
    /// Creates the strategy with the given tuning.
    #[must_use]
    pub fn new(config: ShooterConfig) -> Self {
        Self { config }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ShooterConfig::default())
    }
}

impl AttackStrategy for Shooter {
    fn strike(
        &mut self,
        ctx: &CombatContext<'_>,
        weapon: &mut dyn WeaponControl,
    ) -> Vec<CombatEffect> {
        let Some(distance) = ctx.player_distance() else {
            // No target: release the trigger rather than leave it latched.
            weapon.set_trigger(false);
            return Vec::new();
        };

        let preferred = ctx.stats.preferred_shoot_distance;
        let buffer = ctx.stats.distance_buffer;
        let in_band = distance >= preferred - buffer && distance <= preferred + buffer;
        let should_fire = in_band || (self.config.fire_when_closer && distance < preferred);

        weapon.set_trigger(should_fire);
        Vec::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
