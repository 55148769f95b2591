//! Frozen per-tick battlefield state and the read view handed to strategies.
//!
//! At the start of each tick the runtime freezes plain-data snapshots of
//! every actor and the player, together with a copy of the proximity index.
//! Every strategy evaluated that tick — movement and attack, for every actor
//! — reads the same [`TickSnapshot`] through a [`BattlefieldView`], so no
//! strategy can observe another actor's in-tick mutation.

use std::collections::BTreeMap;

use glam::Vec2;
use nearfield::ProximityIndex;
use serde::{Deserialize, Serialize};

use crate::actor::{ActorFlags, ActorId, Faction};
use crate::health::HealthPool;

/// Plain-data snapshot of one actor, frozen at tick start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// The actor's id.
    pub id: ActorId,
    /// Faction marker.
    pub faction: Faction,
    /// Marker flags.
    pub flags: ActorFlags,
    /// World position at tick start.
    pub position: Vec2,
    /// Health at tick start.
    pub health: HealthPool,
}

/// Plain-data snapshot of the player, frozen at tick start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// World position at tick start.
    pub position: Vec2,
    /// Health at tick start.
    pub health: HealthPool,
}

/// Everything a strategy may read during one tick.
///
/// Built once per tick by the battlefield; borrowed immutably by every
/// strategy invocation of that tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Actor snapshots in id order.
    pub actors: BTreeMap<ActorId, ActorSnapshot>,
    /// The player, if one is registered.
    pub player: Option<PlayerSnapshot>,
    /// Frozen proximity index over actor positions.
    pub proximity: ProximityIndex<ActorId>,
    /// The tick this snapshot was taken at.
    pub tick: u64,
}

/// Read-only view over a [`TickSnapshot`].
///
/// This is the only battlefield access a strategy gets: candidate scans, peer
/// snapshots, and the player position. A destroyed player reads as absent —
/// behaviors go idle rather than chase a corpse.
#[derive(Debug, Clone, Copy)]
pub struct BattlefieldView<'a> {
    snapshot: &'a TickSnapshot,
}

impl<'a> BattlefieldView<'a> {
    /// Creates a view over a frozen snapshot.
    #[must_use]
    pub const fn new(snapshot: &'a TickSnapshot) -> Self {
        Self { snapshot }
    }

    /// The tick this view was frozen at.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.snapshot.tick
    }

    /// The player's position, or `None` when absent or destroyed.
    #[must_use]
    pub fn player_position(&self) -> Option<Vec2> {
        self.snapshot
            .player
            .filter(|player| !player.health.is_destroyed())
            .map(|player| player.position)
    }

    /// The full player snapshot, if one is registered (even destroyed).
    #[must_use]
    pub const fn player(&self) -> Option<&PlayerSnapshot> {
        self.snapshot.player.as_ref()
    }

    /// Snapshot of an actor by id, if it existed at tick start.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&ActorSnapshot> {
        self.snapshot.actors.get(&id)
    }

    /// Returns `true` if the actor existed and was not destroyed at tick
    /// start.
    #[must_use]
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.actor(id).is_some_and(|actor| !actor.health.is_destroyed())
    }

    /// Scans a circle over actor positions into a caller-owned buffer.
    ///
    /// Delegates to the frozen proximity index: key-ordered results, silent
    /// truncation at buffer capacity, zero on an empty scene.
    pub fn query_into(&self, origin: Vec2, radius: f32, buffer: &mut [ActorId]) -> usize {
        self.snapshot.proximity.query_into(origin, radius, buffer)
    }

    /// Number of actors in the snapshot.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.snapshot.actors.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
