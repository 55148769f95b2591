//! Strategy contracts: the pluggable behavior layer.
//!
//! Each actor owns one [`MovementStrategy`] and zero-or-one
//! [`AttackStrategy`], both selected at spawn time and driven once per tick
//! by the host. Strategies are pure with respect to the outside world except
//! for their own private state: movement proposes a velocity that the host
//! applies, attack drives the weapon collaborator and returns
//! [`CombatEffect`]s that the runtime resolves against health pools.
//!
//! # Discipline
//!
//! - A strategy mutates only its own state, and only inside its own tick
//!   call.
//! - Invalid or degenerate input (absent player, zero-length directions)
//!   yields a neutral result — zero velocity, no effects — never a panic and
//!   never a NaN.
//! - A non-positive delta time advances no timer and disturbs no cached
//!   direction.
//!
//! # Example
//!
//! ```
//! use duskwatch_core::strategy::{MovementStrategy, SteeringContext};
//! use glam::Vec2;
//!
//! struct Idle;
//!
//! impl MovementStrategy for Idle {
//!     fn steer(&mut self, _ctx: &SteeringContext<'_>) -> Vec2 {
//!         Vec2::ZERO
//!     }
//! }
//! ```

pub mod attack;
pub mod movement;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, Faction};
use crate::contracts::WeaponControl;
use crate::stats::Stats;
use crate::view::BattlefieldView;

// =============================================================================
// Contexts
// =============================================================================

/// Per-tick input to a movement strategy.
///
/// Everything here is frozen for the duration of the tick; `player` is
/// already `None` when the player is absent or destroyed.
#[derive(Debug, Clone, Copy)]
pub struct SteeringContext<'a> {
    /// The actor being steered.
    pub actor: ActorId,
    /// The actor's faction, for ally filtering.
    pub faction: Faction,
    /// The actor's position at the time of the call.
    pub origin: Vec2,
    /// The actor's unit heading; the standard degenerate-geometry fallback.
    pub facing: Vec2,
    /// The player's position, or `None` when absent/destroyed.
    pub player: Option<Vec2>,
    /// The actor's tunables.
    pub stats: &'a Stats,
    /// The actor's own health ratio in `[0, 1]`; 1.0 when unavailable.
    pub health_ratio: f32,
    /// Whether the actor's attack strategy is mid-channel this tick.
    pub channeling: bool,
    /// Seconds elapsed since the previous tick.
    pub dt: f32,
    /// Read-only view of the frozen battlefield.
    pub view: &'a BattlefieldView<'a>,
}

impl SteeringContext<'_> {
    /// Vector from the actor to the player, if the player is present.
    #[must_use]
    pub fn player_offset(&self) -> Option<Vec2> {
        self.player.map(|player| player - self.origin)
    }

    /// Distance to the player, if the player is present.
    #[must_use]
    pub fn player_distance(&self) -> Option<f32> {
        self.player_offset().map(Vec2::length)
    }
}

/// Per-tick input to an attack strategy.
#[derive(Debug, Clone, Copy)]
pub struct CombatContext<'a> {
    /// The attacking actor.
    pub actor: ActorId,
    /// The actor's faction, for ally filtering.
    pub faction: Faction,
    /// The actor's position at the time of the call (post-movement).
    pub origin: Vec2,
    /// The actor's unit heading.
    pub facing: Vec2,
    /// The player's position, or `None` when absent/destroyed.
    pub player: Option<Vec2>,
    /// The actor's tunables.
    pub stats: &'a Stats,
    /// Seconds elapsed since the previous tick.
    pub dt: f32,
    /// Read-only view of the frozen battlefield.
    pub view: &'a BattlefieldView<'a>,
}

impl CombatContext<'_> {
    /// Vector from the actor to the player, if the player is present.
    #[must_use]
    pub fn player_offset(&self) -> Option<Vec2> {
        self.player.map(|player| player - self.origin)
    }

    /// Distance to the player, if the player is present.
    #[must_use]
    pub fn player_distance(&self) -> Option<f32> {
        self.player_offset().map(Vec2::length)
    }
}

// =============================================================================
// Effects
// =============================================================================

/// Health mutation proposed by an attack strategy.
///
/// Effects are collected during the decide phase and resolved by the runtime
/// after every actor has acted, so all strategies within one tick observe the
/// same health snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEffect {
    /// Deal damage to the player.
    StrikePlayer {
        /// Final damage after multipliers, rounded.
        damage: u32,
    },
    /// Heal an allied actor.
    HealAlly {
        /// The ally to heal.
        target: ActorId,
        /// Whole points of healing.
        amount: u32,
    },
}

// =============================================================================
// Strategy Traits
// =============================================================================

/// Computes a desired velocity for one actor each tick.
///
/// Implementations must never move the actor directly — they only propose a
/// velocity the host applies through the physical mover. They must return the
/// zero vector (not panic) when the player is absent or a derived direction
/// would be degenerate.
pub trait MovementStrategy: Send + Sync {
    /// Produces this tick's desired velocity in world units per second.
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2;
}

/// Decides whether and how to attack each tick.
///
/// Side effects flow through the injected weapon controller (held trigger,
/// one-shot launches) and through returned [`CombatEffect`]s. Implementations
/// must be idempotent-safe under repeated zero-effect calls.
pub trait AttackStrategy: Send + Sync {
    /// Runs one attack tick.
    fn strike(&mut self, ctx: &CombatContext<'_>, weapon: &mut dyn WeaponControl)
        -> Vec<CombatEffect>;

    /// Whether a multi-tick channel (e.g. healing) is in progress.
    ///
    /// Polled by peer behaviors such as support movement; never pushed.
    fn is_channeling(&self) -> bool {
        false
    }
}

// =============================================================================
// Tests
// =============================================================================
