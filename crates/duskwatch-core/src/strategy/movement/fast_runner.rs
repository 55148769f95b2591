//! Fast-runner movement: straight chase with a close-range deadzone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};

/// Tuning for [`FastRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastRunnerConfig {
    /// Distance inside which the chase stops.
    pub min_chase_distance: f32,
}

impl FastRunnerConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            min_chase_distance: if self.min_chase_distance.is_finite() {
                self.min_chase_distance.max(0.0)
            } else {
                Self::default().min_chase_distance
            },
        }
    }
}

impl Default for FastRunnerConfig {
    fn default() -> Self {
        Self {
            min_chase_distance: 1.0,
        }
    }
}

/// Stateless chaser: full speed toward the player until the deadzone.
pub struct FastRunner {
    config: FastRunnerConfig,
}

impl FastRunner {
    /// Creates the strategy with the given tuning.
    #[must_use]
    pub fn new(config: FastRunnerConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FastRunnerConfig::default())
    }
}

impl MovementStrategy for FastRunner {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(offset) = ctx.player_offset() else {
            return Vec2::ZERO;
        };
        if offset.length() <= self.config.min_chase_distance {
            return Vec2::ZERO;
        }
        geom::direction_or(offset, ctx.facing) * ctx.stats.move_speed
    }
}

// =============================================================================
// Tests
// =============================================================================
