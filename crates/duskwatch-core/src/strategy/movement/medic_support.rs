//! Medic support movement: shadow the wounded, stay out of reach.
//!
//! Stateless per tick, but the result depends on the peer heal strategy's
//! polled channeling flag: a medic mid-heal plants its feet. Otherwise it
//! follows the best-scored ally in range, keeps its distance from the player,
//! and drifts toward the player only when it has nobody to tend.
//!
//! Ally selection shares the [`targeting`](crate::targeting) scoring with the
//! heal strategy: normalized proximity plus the wounded ratio times a
//! configurable priority weight.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};
use crate::targeting::{self, ScanParams, SCAN_CAPACITY};

/// Tuning for [`MedicSupport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicSupportConfig {
    /// Radius of the ally scan.
    pub search_radius: f32,
    /// Distance held from the followed ally.
    pub follow_distance: f32,
    /// Player distance inside which the medic backs away.
    pub retreat_distance: f32,
    /// Weight of the wounded ratio when scoring allies.
    pub wounded_weight: f32,
    /// Fraction of move speed used while drifting in search of allies.
    pub drift_speed_factor: f32,
}

impl MedicSupportConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32, min: f32| {
            if value.is_finite() {
                value.max(min)
            } else {
                fallback
            }
        };
        Self {
            search_radius: pick(self.search_radius, defaults.search_radius, 0.1),
            follow_distance: pick(self.follow_distance, defaults.follow_distance, 0.0),
            retreat_distance: pick(self.retreat_distance, defaults.retreat_distance, 0.0),
            wounded_weight: pick(self.wounded_weight, defaults.wounded_weight, 0.0),
            drift_speed_factor: if self.drift_speed_factor.is_finite() {
                self.drift_speed_factor.clamp(0.05, 1.0)
            } else {
                defaults.drift_speed_factor
            },
        }
    }
}

impl Default for MedicSupportConfig {
    fn default() -> Self {
        Self {
            search_radius: 10.0,
            follow_distance: 2.5,
            retreat_distance: 7.0,
            wounded_weight: 1.5,
            drift_speed_factor: 0.6,
        }
    }
}

/// Movement strategy for healers: follow allies, avoid the player.
pub struct MedicSupport {
    config: MedicSupportConfig,
    scratch: [ActorId; SCAN_CAPACITY],
}

impl MedicSupport {
    /// Creates the strategy with the given tuning.
    #[must_use]
    pub fn new(config: MedicSupportConfig) -> Self {
        Self {
            config: config.normalized(),
            scratch: [ActorId::new(0); SCAN_CAPACITY],
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(MedicSupportConfig::default())
    }
}

impl MovementStrategy for MedicSupport {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(player) = ctx.player else {
            return Vec2::ZERO;
        };
        if ctx.channeling {
            // Don't walk out of range of a heal in progress.
            return Vec2::ZERO;
        }

        let params = ScanParams {
            radius: self.config.search_radius,
            wounded_weight: self.config.wounded_weight,
        };
        let best = targeting::best_ally(
            ctx.view,
            ctx.actor,
            ctx.faction,
            ctx.origin,
            params,
            &mut self.scratch,
        );

        if let Some(ally) = best {
            let offset = ally.position - ctx.origin;
            if offset.length() > self.config.follow_distance {
                return geom::direction_or(offset, ctx.facing) * ctx.stats.move_speed;
            }
            return Vec2::ZERO;
        }

        // Nobody to tend: keep clear of the player, or drift closer to find
        // the rest of the pack.
        let offset = player - ctx.origin;
        let toward = geom::direction_or(offset, ctx.facing);
        if offset.length() <= self.config.retreat_distance {
            -toward * ctx.stats.move_speed * ctx.stats.retreat_multiplier
        } else {
            toward * ctx.stats.move_speed * self.config.drift_speed_factor
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
