//! Actors: the behavior hosts driven by the tick loop.
//!
//! An [`Actor`] owns exactly one movement strategy and zero-or-one attack
//! strategy, plus the collaborators both need (physical mover, weapon
//! controller). Strategies are stored as trait objects so new behaviors never
//! touch the host; they live and die with the actor.

use std::fmt;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::contracts::{DirectMover, Mover, NullWeapon, WeaponControl};
use crate::health::HealthPool;
use crate::stats::Stats;
use crate::strategy::{AttackStrategy, MovementStrategy};

/// Unique identifier for an actor.
///
/// A newtype over `u64`, ordered by its numeric value; the battlefield
/// assigns ids monotonically so iteration order is deterministic.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Creates an `ActorId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<ActorId> for u64 {
    fn from(id: ActorId) -> Self {
        id.0
    }
}

/// Faction marker used for ally filtering.
///
/// Support behaviors (medics) only consider candidates of their own faction;
/// everything else on the battlefield is invisible to them.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// The main hostile force. Most spawns belong here.
    #[default]
    Hostile,
    /// Independent packs that do not coordinate with the hostile force.
    Feral,
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hostile => write!(f, "Hostile"),
            Self::Feral => write!(f, "Feral"),
        }
    }
}

bitflags! {
    /// Per-actor marker flags.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ActorFlags: u8 {
        /// Boss-tier actor (bigger, louder, usually unique per encounter).
        const BOSS = 1 << 0;
    }
}

/// Position and facing of an actor.
///
/// Facing is always a unit vector; movers keep it aligned with the last
/// non-degenerate velocity, and strategies use it as the fallback direction
/// when geometry degenerates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position.
    pub position: Vec2,
    /// Unit heading.
    pub facing: Vec2,
}

impl Transform {
    /// Creates a transform at `position`, facing `+X`.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            facing: Vec2::X,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

/// A behavior host: one actor in the simulation.
///
/// Invariant: exactly one movement strategy and zero-or-one attack strategy
/// at any time. Both are exclusively owned and destroyed with the actor.
pub struct Actor {
    id: ActorId,
    faction: Faction,
    flags: ActorFlags,
    /// Position and facing, integrated by the mover each tick.
    pub transform: Transform,
    /// Read-only tunables; mutated only by external upgrade effects.
    pub stats: Stats,
    /// The actor's own health.
    pub health: HealthPool,
    pub(crate) movement: Box<dyn MovementStrategy>,
    pub(crate) attack: Option<Box<dyn AttackStrategy>>,
    pub(crate) mover: Box<dyn Mover>,
    pub(crate) weapon: Box<dyn WeaponControl>,
}

impl Actor {
    /// The actor's unique identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// The actor's faction marker.
    #[must_use]
    pub const fn faction(&self) -> Faction {
        self.faction
    }

    /// The actor's marker flags.
    #[must_use]
    pub const fn flags(&self) -> ActorFlags {
        self.flags
    }

    /// Returns `true` for boss-tier actors.
    #[must_use]
    pub const fn is_boss(&self) -> bool {
        self.flags.contains(ActorFlags::BOSS)
    }

    /// Returns `true` if the actor carries an attack strategy.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.attack.is_some()
    }

    /// Whether the actor's attack strategy is mid-channel (e.g. healing).
    ///
    /// Polled by peer behaviors; never pushed.
    #[must_use]
    pub fn is_channeling(&self) -> bool {
        self.attack.as_ref().is_some_and(|attack| attack.is_channeling())
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("faction", &self.faction)
            .field("flags", &self.flags)
            .field("transform", &self.transform)
            .field("health", &self.health)
            .field("armed", &self.attack.is_some())
            .finish_non_exhaustive()
    }
}

/// Everything needed to spawn an actor.
///
/// The blueprint owns the strategy and collaborator instances; spawning moves
/// them into the actor. Collaborators default to the reference
/// implementations ([`DirectMover`], [`NullWeapon`]).
///
/// # Example
///
/// ```
/// use duskwatch_core::actor::{ActorBlueprint, ActorFlags};
/// use duskwatch_core::strategy::movement::Tank;
/// use glam::Vec2;
///
/// let blueprint = ActorBlueprint::new(Vec2::new(8.0, 0.0), Box::new(Tank::new()))
///     .with_max_health(40)
///     .boss();
/// assert!(blueprint.flags.contains(ActorFlags::BOSS));
/// ```
pub struct ActorBlueprint {
    /// Spawn position.
    pub position: Vec2,
    /// Initial unit heading.
    pub facing: Vec2,
    /// Faction marker.
    pub faction: Faction,
    /// Marker flags.
    pub flags: ActorFlags,
    /// Per-actor tunables.
    pub stats: Stats,
    /// Maximum (and initial) health.
    pub max_health: u32,
    /// The movement strategy, mandatory.
    pub movement: Box<dyn MovementStrategy>,
    /// The attack strategy, optional.
    pub attack: Option<Box<dyn AttackStrategy>>,
    /// Physical mover collaborator.
    pub mover: Box<dyn Mover>,
    /// Weapon controller collaborator.
    pub weapon: Box<dyn WeaponControl>,
}

impl ActorBlueprint {
    /// Default maximum health for a spawned actor.
    pub const DEFAULT_MAX_HEALTH: u32 = 20;

    /// Creates a blueprint with default stats, health, and collaborators.
    #[must_use]
    pub fn new(position: Vec2, movement: Box<dyn MovementStrategy>) -> Self {
        Self {
            position,
            facing: Vec2::X,
            faction: Faction::default(),
            flags: ActorFlags::empty(),
            stats: Stats::default(),
            max_health: Self::DEFAULT_MAX_HEALTH,
            movement,
            attack: None,
            mover: Box::new(DirectMover),
            weapon: Box::new(NullWeapon),
        }
    }

    /// Sets the attack strategy.
    #[must_use]
    pub fn with_attack(mut self, attack: Box<dyn AttackStrategy>) -> Self {
        self.attack = Some(attack);
        self
    }

    /// Sets the stats record.
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    /// Sets the maximum health.
    #[must_use]
    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }

    /// Sets the faction marker.
    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    /// Replaces the physical mover collaborator.
    #[must_use]
    pub fn with_mover(mut self, mover: Box<dyn Mover>) -> Self {
        self.mover = mover;
        self
    }

    /// Replaces the weapon controller collaborator.
    #[must_use]
    pub fn with_weapon(mut self, weapon: Box<dyn WeaponControl>) -> Self {
        self.weapon = weapon;
        self
    }

    /// Marks the actor as boss-tier.
    #[must_use]
    pub fn boss(mut self) -> Self {
        self.flags |= ActorFlags::BOSS;
        self
    }

    /// Finalizes the blueprint into an actor with the given id.
    pub(crate) fn build(self, id: ActorId) -> Actor {
        Actor {
            id,
            faction: self.faction,
            flags: self.flags,
            transform: Transform {
                position: self.position,
                facing: self.facing,
            },
            stats: self.stats.sanitized(),
            health: HealthPool::new(self.max_health),
            movement: self.movement,
            attack: self.attack,
            mover: self.mover,
            weapon: self.weapon,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
