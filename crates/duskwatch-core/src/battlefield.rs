//! The battlefield: authoritative container for actors and the player.
//!
//! Actors live in a `BTreeMap` so every iteration — and therefore the whole
//! tick — runs in deterministic id order across platforms. The proximity
//! index is owned here and synced on spawn/despawn; after the decide phase
//! moves actors, [`Battlefield::sync_proximity`] re-aligns it in one pass.

use std::collections::BTreeMap;

use glam::Vec2;
use nearfield::ProximityIndex;
use tracing::debug;

use crate::actor::{Actor, ActorBlueprint, ActorId};
use crate::health::HealthPool;
use crate::view::{ActorSnapshot, PlayerSnapshot, TickSnapshot};

/// The player as the behavior layer sees it: a position and a health pool.
///
/// The player is moved by external input, never by this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// World position.
    pub position: Vec2,
    /// The player's health.
    pub health: HealthPool,
}

/// Container for every actor in the encounter.
#[derive(Debug, Default)]
pub struct Battlefield {
    /// Monotonically increasing actor id counter.
    next_id: u64,
    /// Actor storage with deterministic iteration order.
    actors: BTreeMap<ActorId, Actor>,
    /// The player, if one is registered.
    player: Option<PlayerState>,
    /// Proximity index over actor positions.
    proximity: ProximityIndex<ActorId>,
    /// Current simulation tick.
    tick: u64,
}

impl Battlefield {
    /// Creates an empty battlefield at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns an actor from a blueprint. Returns its id.
    pub fn spawn(&mut self, blueprint: ActorBlueprint) -> ActorId {
        let id = ActorId::new(self.next_id);
        self.next_id += 1;

        let actor = blueprint.build(id);
        self.proximity.insert(id, actor.transform.position);
        debug!(%id, faction = %actor.faction(), "actor spawned");
        self.actors.insert(id, actor);
        id
    }

    /// Removes an actor. Returns it if it existed.
    pub fn despawn(&mut self, id: ActorId) -> Option<Actor> {
        self.proximity.remove(id);
        let removed = self.actors.remove(&id);
        if removed.is_some() {
            debug!(%id, "actor despawned");
        }
        removed
    }

    /// Removes every destroyed actor and returns their ids.
    ///
    /// The runtime never reaps on its own; the game layer decides when a
    /// corpse leaves the field.
    pub fn remove_destroyed(&mut self) -> Vec<ActorId> {
        let destroyed: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|(_, actor)| actor.health.is_destroyed())
            .map(|(id, _)| *id)
            .collect();
        for id in &destroyed {
            self.despawn(*id);
        }
        destroyed
    }

    /// Returns an actor by id.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Returns a mutable actor by id.
    #[must_use]
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Iterates actor ids in deterministic (sorted) order.
    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.actors.keys().copied()
    }

    /// Iterates actors in deterministic (sorted by id) order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.values()
    }

    /// Number of actors on the field.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Returns `true` when no actors are on the field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Registers (or replaces) the player with a fresh health pool.
    pub fn set_player(&mut self, position: Vec2, max_health: u32) {
        self.player = Some(PlayerState {
            position,
            health: HealthPool::new(max_health),
        });
    }

    /// Moves the player. Returns `false` if no player is registered.
    pub fn move_player(&mut self, position: Vec2) -> bool {
        match self.player.as_mut() {
            Some(player) => {
                player.position = position;
                true
            }
            None => false,
        }
    }

    /// Unregisters the player entirely.
    pub fn clear_player(&mut self) {
        self.player = None;
    }

    /// The player, if registered.
    #[must_use]
    pub const fn player(&self) -> Option<&PlayerState> {
        self.player.as_ref()
    }

    /// Mutable access to the player, if registered.
    #[must_use]
    pub fn player_mut(&mut self) -> Option<&mut PlayerState> {
        self.player.as_mut()
    }

    /// The proximity index over actor positions.
    #[must_use]
    pub const fn proximity(&self) -> &ProximityIndex<ActorId> {
        &self.proximity
    }

    /// Current simulation tick.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Advances the tick counter.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// Re-aligns the proximity index with every actor's current position.
    pub fn sync_proximity(&mut self) {
        for (id, actor) in &self.actors {
            self.proximity.insert(*id, actor.transform.position);
        }
    }

    /// Freezes the tick-start snapshot every strategy reads this tick.
    #[must_use]
    pub fn snapshot(&self) -> TickSnapshot {
        let actors = self
            .actors
            .iter()
            .map(|(id, actor)| {
                (
                    *id,
                    ActorSnapshot {
                        id: *id,
                        faction: actor.faction(),
                        flags: actor.flags(),
                        position: actor.transform.position,
                        health: actor.health,
                    },
                )
            })
            .collect();

        TickSnapshot {
            actors,
            player: self.player.map(|player| PlayerSnapshot {
                position: player.position,
                health: player.health,
            }),
            proximity: self.proximity.clone(),
            tick: self.tick,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::movement::Tank;

    fn blueprint(position: Vec2) -> ActorBlueprint {
        ActorBlueprint::new(position, Box::new(Tank::new()))
    }

    #[test]
    fn new_is_empty() {
        let field = Battlefield::new();
        assert!(field.is_empty());
        assert_eq!(field.current_tick(), 0);
        assert!(field.player().is_none());
    }

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut field = Battlefield::new();
        let a = field.spawn(blueprint(Vec2::ZERO));
        let b = field.spawn(blueprint(Vec2::ONE));

        assert_eq!(a, ActorId::new(0));
        assert_eq!(b, ActorId::new(1));
        assert_eq!(field.actor_count(), 2);
    }

    #[test]
    fn spawn_indexes_position() {
        let mut field = Battlefield::new();
        let id = field.spawn(blueprint(Vec2::new(3.0, 4.0)));
        assert_eq!(field.proximity().position(id), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn despawn_removes_everywhere() {
        let mut field = Battlefield::new();
        let id = field.spawn(blueprint(Vec2::ZERO));

        assert!(field.despawn(id).is_some());
        assert!(field.actor(id).is_none());
        assert!(field.proximity().position(id).is_none());
        assert!(field.despawn(id).is_none());
    }

    #[test]
    fn ids_stay_sorted_after_despawn() {
        let mut field = Battlefield::new();
        let a = field.spawn(blueprint(Vec2::ZERO));
        let b = field.spawn(blueprint(Vec2::ZERO));
        let c = field.spawn(blueprint(Vec2::ZERO));
        field.despawn(b);

        let ids: Vec<ActorId> = field.actor_ids().collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn player_lifecycle() {
        let mut field = Battlefield::new();
        assert!(!field.move_player(Vec2::ONE));

        field.set_player(Vec2::ZERO, 100);
        assert!(field.move_player(Vec2::new(5.0, 0.0)));
        assert_eq!(field.player().unwrap().position, Vec2::new(5.0, 0.0));

        field.clear_player();
        assert!(field.player().is_none());
    }

    #[test]
    fn sync_proximity_follows_moved_actors() {
        let mut field = Battlefield::new();
        let id = field.spawn(blueprint(Vec2::ZERO));

        field.actor_mut(id).unwrap().transform.position = Vec2::new(9.0, 9.0);
        assert_eq!(field.proximity().position(id), Some(Vec2::ZERO));

        field.sync_proximity();
        assert_eq!(field.proximity().position(id), Some(Vec2::new(9.0, 9.0)));
    }

    #[test]
    fn remove_destroyed_reaps_only_the_dead() {
        let mut field = Battlefield::new();
        let dead = field.spawn(blueprint(Vec2::ZERO));
        let alive = field.spawn(blueprint(Vec2::ONE));
        field.actor_mut(dead).unwrap().health.damage(1000);

        let reaped = field.remove_destroyed();

        assert_eq!(reaped, vec![dead]);
        assert!(field.actor(alive).is_some());
        assert!(field.proximity().position(dead).is_none());
    }

    #[test]
    fn snapshot_freezes_state() {
        let mut field = Battlefield::new();
        let id = field.spawn(blueprint(Vec2::new(2.0, 0.0)));
        field.set_player(Vec2::ZERO, 50);
        field.advance_tick();

        let snapshot = field.snapshot();

        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.actors[&id].position, Vec2::new(2.0, 0.0));
        assert_eq!(snapshot.player.unwrap().health.maximum(), 50);

        // Later mutation must not reach the frozen snapshot.
        field.actor_mut(id).unwrap().transform.position = Vec2::new(50.0, 0.0);
        assert_eq!(snapshot.actors[&id].position, Vec2::new(2.0, 0.0));
    }
}
