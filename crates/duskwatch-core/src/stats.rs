//! Per-actor tunables read by strategies every tick.
//!
//! Stats are created at spawn, mutated only by external upgrade effects
//! between ticks, and read-only from a strategy's point of view. Every field
//! has a fixed default so a missing or partial stats record degrades to sane
//! behavior instead of a special case inside the strategies.

use serde::{Deserialize, Serialize};

/// Default movement speed in world units per second.
pub const DEFAULT_MOVE_SPEED: f32 = 3.5;
/// Default preferred shooting distance in world units.
pub const DEFAULT_PREFERRED_SHOOT_DISTANCE: f32 = 6.0;
/// Default tolerance band around the preferred shooting distance.
pub const DEFAULT_DISTANCE_BUFFER: f32 = 0.75;
/// Default multiplier applied to retreat speed.
pub const DEFAULT_RETREAT_MULTIPLIER: f32 = 1.25;
/// Default multiplier applied to outgoing damage.
pub const DEFAULT_DAMAGE_MULTIPLIER: f32 = 1.0;

/// Read-only numeric bag of per-actor tunables.
///
/// # Example
///
/// ```
/// use duskwatch_core::stats::Stats;
///
/// let stats = Stats {
///     move_speed: 5.0,
///     ..Stats::default()
/// };
/// assert!((stats.damage_multiplier - 1.0).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Distance at which ranged attackers prefer to sit.
    pub preferred_shoot_distance: f32,
    /// Half-width of the dead band around the preferred distance.
    pub distance_buffer: f32,
    /// Speed multiplier while retreating.
    pub retreat_multiplier: f32,
    /// Multiplier applied to outgoing damage.
    pub damage_multiplier: f32,
}

impl Stats {
    /// Returns a copy with every non-finite field replaced by its default.
    ///
    /// Applied at configuration-load time so the tick path never has to
    /// re-validate.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };
        Self {
            move_speed: pick(self.move_speed, defaults.move_speed),
            preferred_shoot_distance: pick(
                self.preferred_shoot_distance,
                defaults.preferred_shoot_distance,
            ),
            distance_buffer: pick(self.distance_buffer, defaults.distance_buffer),
            retreat_multiplier: pick(self.retreat_multiplier, defaults.retreat_multiplier),
            damage_multiplier: pick(self.damage_multiplier, defaults.damage_multiplier),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            preferred_shoot_distance: DEFAULT_PREFERRED_SHOOT_DISTANCE,
            distance_buffer: DEFAULT_DISTANCE_BUFFER,
            retreat_multiplier: DEFAULT_RETREAT_MULTIPLIER,
            damage_multiplier: DEFAULT_DAMAGE_MULTIPLIER,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let stats = Stats::default();
        assert!((stats.move_speed - DEFAULT_MOVE_SPEED).abs() < f32::EPSILON);
        assert!(
            (stats.preferred_shoot_distance - DEFAULT_PREFERRED_SHOOT_DISTANCE).abs()
                < f32::EPSILON
        );
        assert!((stats.distance_buffer - DEFAULT_DISTANCE_BUFFER).abs() < f32::EPSILON);
        assert!((stats.retreat_multiplier - DEFAULT_RETREAT_MULTIPLIER).abs() < f32::EPSILON);
        assert!((stats.damage_multiplier - DEFAULT_DAMAGE_MULTIPLIER).abs() < f32::EPSILON);
    }

    #[test]
    fn sanitized_keeps_finite_values() {
        let stats = Stats {
            move_speed: 9.0,
            ..Stats::default()
        };
        assert!((stats.sanitized().move_speed - 9.0).abs() < f32::EPSILON);
    }

    #[test]
    fn sanitized_replaces_non_finite() {
        let stats = Stats {
            move_speed: f32::NAN,
            damage_multiplier: f32::INFINITY,
            ..Stats::default()
        };
        let clean = stats.sanitized();
        assert!((clean.move_speed - DEFAULT_MOVE_SPEED).abs() < f32::EPSILON);
        assert!((clean.damage_multiplier - DEFAULT_DAMAGE_MULTIPLIER).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_record_fills_defaults() {
        // A roster entry that only overrides speed.
        let stats: Stats = serde_json::from_str(r#"{"move_speed": 7.5}"#).unwrap();
        assert!((stats.move_speed - 7.5).abs() < f32::EPSILON);
        assert!((stats.distance_buffer - DEFAULT_DISTANCE_BUFFER).abs() < f32::EPSILON);
    }

    #[test]
    fn serialization_roundtrip() {
        let stats = Stats {
            move_speed: 4.25,
            retreat_multiplier: 2.0,
            ..Stats::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        let restored: Stats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, restored);
    }
}
