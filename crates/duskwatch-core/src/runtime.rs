//! The runtime: deterministic four-phase tick loop over the battlefield.
//!
//! One [`Runtime::step`] runs:
//!
//! 1. **SNAPSHOT**: freeze a [`TickSnapshot`](crate::view::TickSnapshot) —
//!    every strategy this tick reads the same state, so evaluation order can
//!    never leak between actors.
//! 2. **DECIDE**: per actor in id order, run the movement strategy, feed the
//!    velocity to the actor's mover, then run the attack strategy and collect
//!    its effects. Movement always precedes attack within one actor.
//! 3. **RESOLVE**: apply the collected combat effects to health pools.
//!    Damage and healing therefore become visible at the start of the next
//!    tick, never mid-tick.
//! 4. **ADVANCE**: re-sync the proximity index and advance the tick counter.
//!
//! The loop is strictly sequential and every strategy call is a bounded,
//! synchronous computation, so a tick always terminates and never interleaves
//! mutation.
//!
//! # Determinism
//!
//! Given the same master seed and the same spawn/input sequence, two runtimes
//! produce identical states: actor storage iterates in id order, and each
//! randomized strategy owns a `ChaCha8` stream derived from the master seed
//! via [`derive_seed`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::actor::ActorId;
use crate::battlefield::Battlefield;
use crate::strategy::{CombatContext, CombatEffect, SteeringContext};
use crate::view::BattlefieldView;

/// Derives a per-strategy RNG seed from the master seed and a spawn slot.
///
/// The same (master, slot) pair always yields the same stream seed, which is
/// what keeps scenario spawns reproducible across runs and platforms.
#[must_use]
pub fn derive_seed(master: u64, slot: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    slot.hash(&mut hasher);
    hasher.finish()
}

/// Tick orchestrator owning the battlefield and the master seed.
///
/// # Example
///
/// ```
/// use duskwatch_core::actor::ActorBlueprint;
/// use duskwatch_core::runtime::Runtime;
/// use duskwatch_core::strategy::movement::FastRunner;
/// use glam::Vec2;
///
/// let mut runtime = Runtime::new(7);
/// runtime.battlefield_mut().set_player(Vec2::ZERO, 100);
/// runtime.battlefield_mut().spawn(ActorBlueprint::new(
///     Vec2::new(12.0, 0.0),
///     Box::new(FastRunner::with_defaults()),
/// ));
/// runtime.step(1.0 / 60.0);
/// assert_eq!(runtime.battlefield().current_tick(), 1);
/// ```
#[derive(Debug)]
pub struct Runtime {
    field: Battlefield,
    master_seed: u64,
}

impl Runtime {
    /// Creates a runtime with an empty battlefield and the given master seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            field: Battlefield::new(),
            master_seed: seed,
        }
    }

    /// The master seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.master_seed
    }

    /// Derives the RNG seed for a given spawn slot.
    #[must_use]
    pub fn seed_for_slot(&self, slot: u64) -> u64 {
        derive_seed(self.master_seed, slot)
    }

    /// Read access to the battlefield.
    #[must_use]
    pub const fn battlefield(&self) -> &Battlefield {
        &self.field
    }

    /// Mutable access to the battlefield (setup, external input, reaping).
    #[must_use]
    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.field
    }

    /// Runs one simulation tick of `dt` seconds.
    ///
    /// A non-finite or negative `dt` is treated as zero: every strategy is
    /// still polled (and returns its neutral result) but no timer advances.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        // PHASE 1: SNAPSHOT
        let snapshot = self.field.snapshot();
        let view = BattlefieldView::new(&snapshot);
        let ids: Vec<_> = snapshot.actors.keys().copied().collect();

        // PHASE 2: DECIDE - movement then attack, per actor, in id order
        let mut effects: Vec<(ActorId, CombatEffect)> = Vec::new();
        for id in ids {
            let Some(actor) = self.field.actor_mut(id) else {
                continue;
            };
            if actor.health.is_destroyed() {
                // Corpses neither move nor attack; reaping is the game
                // layer's call.
                continue;
            }

            let health_ratio = actor.health.ratio();
            let channeling = actor.is_channeling();
            let faction = actor.faction();

            let steering = SteeringContext {
                actor: id,
                faction,
                origin: actor.transform.position,
                facing: actor.transform.facing,
                player: view.player_position(),
                stats: &actor.stats,
                health_ratio,
                channeling,
                dt,
                view: &view,
            };
            let velocity = actor.movement.steer(&steering);
            actor.mover.apply(&mut actor.transform, velocity, dt);

            if let Some(attack) = actor.attack.as_mut() {
                let combat = CombatContext {
                    actor: id,
                    faction,
                    origin: actor.transform.position,
                    facing: actor.transform.facing,
                    player: view.player_position(),
                    stats: &actor.stats,
                    dt,
                    view: &view,
                };
                for effect in attack.strike(&combat, actor.weapon.as_mut()) {
                    effects.push((id, effect));
                }
            }
        }

        // PHASE 3: RESOLVE - apply effects to health pools
        for (source, effect) in effects {
            match effect {
                CombatEffect::StrikePlayer { damage } => {
                    if let Some(player) = self.field.player_mut() {
                        player.health.damage(damage);
                        debug!(%source, damage, "player struck");
                    }
                }
                CombatEffect::HealAlly { target, amount } => {
                    if let Some(ally) = self.field.actor_mut(target) {
                        ally.health.heal(amount);
                        debug!(%source, %target, amount, "ally healed");
                    }
                }
            }
        }

        // PHASE 4: ADVANCE
        self.field.sync_proximity();
        self.field.advance_tick();
    }
}

// =============================================================================
// Tests
// =============================================================================
