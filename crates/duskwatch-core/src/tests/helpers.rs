//! Test helpers for driving strategies and runtimes tick-by-tick.
//!
//! The [`Bed`] owns a hand-built tick snapshot so strategy unit tests can run
//! a single strategy against synthetic battlefield state without standing up
//! a full runtime.

use std::collections::BTreeMap;

use glam::Vec2;
use nearfield::ProximityIndex;

use crate::actor::{ActorBlueprint, ActorFlags, ActorId, Faction};
use crate::battlefield::Battlefield;
use crate::contracts::{LaunchRequest, WeaponControl};
use crate::health::HealthPool;
use crate::runtime::Runtime;
use crate::stats::Stats;
use crate::strategy::movement::FastRunner;
use crate::strategy::{
    AttackStrategy, CombatContext, CombatEffect, MovementStrategy, SteeringContext,
};
use crate::view::{ActorSnapshot, BattlefieldView, PlayerSnapshot, TickSnapshot};

/// Id used for the strategy-under-test in bed-driven unit tests.
pub const SEEKER_ID: u64 = 1000;

/// Synthetic battlefield state for driving a single strategy.
pub struct Bed {
    snapshot: TickSnapshot,
    /// Stats handed to the strategy under test.
    pub stats: Stats,
    /// Health ratio reported for the strategy's own actor.
    pub health_ratio: f32,
    /// Whether the peer attack strategy is reported as channeling.
    pub channeling: bool,
    /// Faction of the strategy's own actor.
    pub faction: Faction,
}

impl Bed {
    /// A bed with a live player at `position` and no other actors.
    pub fn with_player(position: Vec2) -> Self {
        let mut bed = Self::no_player();
        bed.snapshot.player = Some(PlayerSnapshot {
            position,
            health: HealthPool::new(100),
        });
        bed
    }

    /// A bed with no player and no actors.
    pub fn no_player() -> Self {
        Self {
            snapshot: TickSnapshot {
                actors: BTreeMap::new(),
                player: None,
                proximity: ProximityIndex::new(),
                tick: 0,
            },
            stats: Stats::default(),
            health_ratio: 1.0,
            channeling: false,
            faction: Faction::Hostile,
        }
    }

    /// Moves (or removes) the player.
    pub fn set_player(&mut self, position: Option<Vec2>) {
        self.snapshot.player = position.map(|position| PlayerSnapshot {
            position,
            health: HealthPool::new(100),
        });
    }

    /// Adds an actor snapshot and indexes its position. Returns its id.
    pub fn add_actor(
        &mut self,
        raw_id: u64,
        faction: Faction,
        position: Vec2,
        maximum: u32,
        current: u32,
    ) -> ActorId {
        let id = ActorId::new(raw_id);
        self.snapshot.actors.insert(
            id,
            ActorSnapshot {
                id,
                faction,
                flags: ActorFlags::empty(),
                position,
                health: HealthPool::with_current(maximum, current),
            },
        );
        self.snapshot.proximity.insert(id, position);
        id
    }

    /// Runs one movement tick for `strategy` from `origin`.
    pub fn steer(
        &self,
        strategy: &mut dyn MovementStrategy,
        origin: Vec2,
        dt: f32,
    ) -> Vec2 {
        let view = BattlefieldView::new(&self.snapshot);
        let ctx = SteeringContext {
            actor: ActorId::new(SEEKER_ID),
            faction: self.faction,
            origin,
            facing: Vec2::X,
            player: view.player_position(),
            stats: &self.stats,
            health_ratio: self.health_ratio,
            channeling: self.channeling,
            dt,
            view: &view,
        };
        strategy.steer(&ctx)
    }

    /// Runs one attack tick for `strategy` from `origin`.
    pub fn strike(
        &self,
        strategy: &mut dyn AttackStrategy,
        weapon: &mut dyn WeaponControl,
        origin: Vec2,
        dt: f32,
    ) -> Vec<CombatEffect> {
        let view = BattlefieldView::new(&self.snapshot);
        let ctx = CombatContext {
            actor: ActorId::new(SEEKER_ID),
            faction: self.faction,
            origin,
            facing: Vec2::X,
            player: view.player_position(),
            stats: &self.stats,
            dt,
            view: &view,
        };
        strategy.strike(&ctx, weapon)
    }

    /// Borrow the underlying snapshot (for targeting-helper tests).
    pub fn snapshot(&self) -> &TickSnapshot {
        &self.snapshot
    }
}

/// Weapon double that records everything it is told.
#[derive(Debug, Default)]
pub struct RecordingWeapon {
    /// Trigger states in the order they were set.
    pub trigger_history: Vec<bool>,
    /// Launch requests received.
    pub launches: Vec<LaunchRequest>,
    /// Whether `launch` reports acceptance. Defaults to `false`; set to
    /// `true` to simulate a loaded launcher.
    pub accept_launches: bool,
}

impl RecordingWeapon {
    /// A launcher that accepts every request.
    pub fn loaded() -> Self {
        Self {
            accept_launches: true,
            ..Self::default()
        }
    }

    /// The most recent trigger state, if any was set.
    pub fn last_trigger(&self) -> Option<bool> {
        self.trigger_history.last().copied()
    }
}

impl WeaponControl for RecordingWeapon {
    fn set_trigger(&mut self, held: bool) {
        self.trigger_history.push(held);
    }

    fn launch(&mut self, request: LaunchRequest) -> bool {
        self.launches.push(request);
        self.accept_launches
    }
}

// =============================================================================
// Runtime-level factories
// =============================================================================

/// A runtime with a player at the origin and nothing else.
pub fn runtime_with_player(seed: u64) -> Runtime {
    let mut runtime = Runtime::new(seed);
    runtime.battlefield_mut().set_player(Vec2::ZERO, 100);
    runtime
}

/// Spawns a plain chaser with default stats at `position`.
pub fn spawn_runner(field: &mut Battlefield, position: Vec2) -> ActorId {
    field.spawn(ActorBlueprint::new(
        position,
        Box::new(FastRunner::with_defaults()),
    ))
}
