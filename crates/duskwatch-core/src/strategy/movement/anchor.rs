//! Anchor movement: hold a point near the player, relocate on a timer.
//!
//! The automaton cycles `MovingToAnchor → Anchored → WaitingToRelocate` and
//! back. A fresh anchor is a random point on a circle of fixed radius around
//! the player, chosen at relocation time — so the actor keeps repositioning
//! around the player without ever closing in.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geom;
use crate::strategy::{MovementStrategy, SteeringContext};
use crate::timing::{clamp_duration, Countdown};

/// Tuning for [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Radius of the circle around the player that anchors are picked on.
    pub ring_radius: f32,
    /// Seconds to hold position once the anchor is reached.
    pub hold_duration: f32,
    /// Seconds to linger after the hold before picking a new anchor.
    pub relocate_delay: f32,
    /// Squared-distance threshold that counts as "anchor reached".
    pub arrive_epsilon: f32,
}

impl AnchorConfig {
    /// Clamps invalid tunables to safe minimums.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            ring_radius: if self.ring_radius.is_finite() {
                self.ring_radius.max(0.1)
            } else {
                Self::default().ring_radius
            },
            hold_duration: clamp_duration(self.hold_duration),
            relocate_delay: clamp_duration(self.relocate_delay),
            arrive_epsilon: if self.arrive_epsilon.is_finite() {
                self.arrive_epsilon.max(1e-4)
            } else {
                Self::default().arrive_epsilon
            },
        }
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            ring_radius: 6.0,
            hold_duration: 2.0,
            relocate_delay: 1.5,
            arrive_epsilon: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorPhase {
    /// Steering toward the current anchor point.
    Seeking,
    /// Holding at the anchor.
    Holding,
    /// Hold finished; waiting out the relocate delay.
    Lingering,
}

/// Movement strategy that anchors near the player and periodically relocates.
pub struct Anchor {
    config: AnchorConfig,
    rng: ChaCha8Rng,
    phase: AnchorPhase,
    anchor: Option<Vec2>,
    timer: Countdown,
}

impl Anchor {
    /// Creates the strategy with the given tuning and RNG seed.
    #[must_use]
    pub fn new(config: AnchorConfig, seed: u64) -> Self {
        let config = config.normalized();
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            phase: AnchorPhase::Seeking,
            anchor: None,
            timer: Countdown::new(config.hold_duration),
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(AnchorConfig::default(), seed)
    }

    /// The current anchor point, once one has been chosen.
    #[must_use]
    pub const fn anchor_point(&self) -> Option<Vec2> {
        self.anchor
    }

    fn pick_anchor(&mut self, player: Vec2) -> Vec2 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        player + geom::rotate(Vec2::X * self.config.ring_radius, angle)
    }
}

impl MovementStrategy for Anchor {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let Some(player) = ctx.player else {
            return Vec2::ZERO;
        };
        if ctx.dt <= 0.0 {
            return Vec2::ZERO;
        }

        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => {
                let anchor = self.pick_anchor(player);
                self.anchor = Some(anchor);
                self.phase = AnchorPhase::Seeking;
                anchor
            }
        };

        match self.phase {
            AnchorPhase::Seeking => {
                if ctx.origin.distance_squared(anchor) < self.config.arrive_epsilon {
                    trace!(actor = %ctx.actor, "anchor reached");
                    self.phase = AnchorPhase::Holding;
                    self.timer.reset_to(self.config.hold_duration);
                    Vec2::ZERO
                } else {
                    geom::direction_to(ctx.origin, anchor, ctx.facing) * ctx.stats.move_speed
                }
            }
            AnchorPhase::Holding => {
                if self.timer.tick(ctx.dt) {
                    self.phase = AnchorPhase::Lingering;
                    self.timer.reset_to(self.config.relocate_delay);
                }
                Vec2::ZERO
            }
            AnchorPhase::Lingering => {
                if self.timer.tick(ctx.dt) {
                    let next = self.pick_anchor(player);
                    trace!(actor = %ctx.actor, ?next, "relocating anchor");
                    self.anchor = Some(next);
                    self.phase = AnchorPhase::Seeking;
                    return geom::direction_to(ctx.origin, next, ctx.facing)
                        * ctx.stats.move_speed;
                }
                Vec2::ZERO
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
