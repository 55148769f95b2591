//! # Duskwatch Core
//!
//! Enemy-behavior runtime for Duskwatch's real-time top-down combat.
//!
//! Every hostile actor owns one movement strategy and at most one attack
//! strategy. Once per simulation tick the runtime hands both a frozen view of
//! the battlefield; the movement strategy proposes a velocity that the host
//! feeds to the actor's physical mover, and the attack strategy drives the
//! weapon collaborator and proposes damage/heal effects that the runtime
//! resolves against health pools.
//!
//! ## Architecture
//!
//! The tick is a four-phase loop:
//!
//! 1. **SNAPSHOT**: freeze plain-data actor/player snapshots plus the
//!    proximity index; every strategy this tick reads the same frozen state.
//! 2. **DECIDE**: per actor in id order — movement strategy, apply velocity
//!    to the mover, then attack strategy.
//! 3. **RESOLVE**: apply the collected combat effects to health pools.
//! 4. **ADVANCE**: re-sync the proximity index and advance the tick counter.
//!
//! The loop is strictly sequential; determinism comes from `BTreeMap` actor
//! storage and per-strategy `ChaCha8` RNG streams derived from the master
//! seed.
//!
//! ## Usage
//!
//! ```rust
//! use duskwatch_core::actor::ActorBlueprint;
//! use duskwatch_core::runtime::Runtime;
//! use duskwatch_core::strategy::movement::FastRunner;
//! use glam::Vec2;
//!
//! let mut runtime = Runtime::new(42);
//! runtime.battlefield_mut().set_player(Vec2::ZERO, 100);
//! runtime.battlefield_mut().spawn(ActorBlueprint::new(
//!     Vec2::new(10.0, 0.0),
//!     Box::new(FastRunner::with_defaults()),
//! ));
//!
//! for _ in 0..60 {
//!     runtime.step(1.0 / 60.0);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export nearfield for spatial queries
pub use nearfield;

pub mod actor;
pub mod battlefield;
pub mod contracts;
pub mod geom;
pub mod health;
pub mod runtime;
pub mod scenario;
pub mod stats;
pub mod strategy;
pub mod targeting;
pub mod timing;
pub mod view;

#[cfg(test)]
mod tests;

pub use actor::{Actor, ActorBlueprint, ActorFlags, ActorId, Faction, Transform};
pub use battlefield::{Battlefield, PlayerState};
pub use contracts::{DirectMover, LaunchRequest, Mover, NullWeapon, WeaponControl};
pub use health::HealthPool;
pub use runtime::Runtime;
pub use scenario::{Scenario, ScenarioError};
pub use stats::Stats;
pub use strategy::{AttackStrategy, CombatContext, CombatEffect, MovementStrategy, SteeringContext};
pub use view::{ActorSnapshot, BattlefieldView, PlayerSnapshot, TickSnapshot};
