//! Scenario loading: serde-described battle rosters.
//!
//! A [`Scenario`] is the data half of an encounter: where the player starts,
//! and a roster of spawn records naming each actor's position, faction,
//! stats, and strategy configurations. The model is format-agnostic — callers
//! pick the serde format; tests use JSON.
//!
//! Validation policy follows the rest of the crate: tunables that are merely
//! out of range are clamped at load time by each config's `normalized()`,
//! while non-finite positions are a hard [`ScenarioError`] — there is no sane
//! clamp for a NaN spawn point.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::actor::{ActorBlueprint, ActorId, Faction};
use crate::runtime::Runtime;
use crate::stats::Stats;
use crate::strategy::attack::{
    GrenadeConfig, GrenadeThrow, MedicHeal, MedicHealConfig, Melee, MeleeConfig, Shooter,
    ShooterConfig,
};
use crate::strategy::movement::{
    Anchor, AnchorConfig, BushAmbush, BushAmbushConfig, Charger, ChargerConfig, FakeRetreat,
    FakeRetreatConfig, FastRunner, FastRunnerConfig, Flanker, FlankerConfig, LeapVault,
    LeapVaultConfig, MedicSupport, MedicSupportConfig, Orbit, OrbitConfig, StopAndShoot,
    StopAndShootConfig, Tank, ZigZag, ZigZagConfig,
};
use crate::strategy::{AttackStrategy, MovementStrategy};

/// Errors raised while validating or deploying a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The roster names no actors at all.
    #[error("scenario has no actors")]
    EmptyRoster,
    /// A positional field contains NaN or infinity.
    #[error("non-finite value in `{0}`")]
    NonFinite(&'static str),
}

/// Tagged movement strategy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MovementSpec {
    /// Hold a point near the player, relocate on a timer.
    Anchor(AnchorConfig),
    /// Lie in wait, then sneak closer.
    BushAmbush(BushAmbushConfig),
    /// Telegraphed straight-line rushes.
    Charger(ChargerConfig),
    /// Advance, feint a retreat, then charge.
    FakeRetreat(FakeRetreatConfig),
    /// Straight chase with a close-range deadzone.
    FastRunner(FastRunnerConfig),
    /// Approach from a random side angle.
    Flanker(FlankerConfig),
    /// Short locked-direction hops.
    LeapVault(LeapVaultConfig),
    /// Shadow wounded allies, avoid the player.
    MedicSupport(MedicSupportConfig),
    /// Circle the player at a fixed radius.
    Orbit(OrbitConfig),
    /// Advance in bursts, stand still to fire.
    StopAndShoot(StopAndShootConfig),
    /// Hold the preferred engagement band (tuned by stats).
    Tank,
    /// Weave toward the player on a sine wave.
    ZigZag(ZigZagConfig),
}

impl MovementSpec {
    /// Builds the strategy instance, seeding randomized variants.
    #[must_use]
    pub fn build(&self, seed: u64) -> Box<dyn MovementStrategy> {
        match self {
            Self::Anchor(config) => Box::new(Anchor::new(*config, seed)),
            Self::BushAmbush(config) => Box::new(BushAmbush::new(*config)),
            Self::Charger(config) => Box::new(Charger::new(*config)),
            Self::FakeRetreat(config) => Box::new(FakeRetreat::new(*config)),
            Self::FastRunner(config) => Box::new(FastRunner::new(*config)),
            Self::Flanker(config) => Box::new(Flanker::new(*config, seed)),
            Self::LeapVault(config) => Box::new(LeapVault::new(*config)),
            Self::MedicSupport(config) => Box::new(MedicSupport::new(*config)),
            Self::Orbit(config) => Box::new(Orbit::new(*config)),
            Self::StopAndShoot(config) => Box::new(StopAndShoot::new(*config)),
            Self::Tank => Box::new(Tank::new()),
            Self::ZigZag(config) => Box::new(ZigZag::new(*config, seed)),
        }
    }
}

/// Tagged attack strategy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackSpec {
    /// Cooldown-gated close-range strikes.
    Melee(MeleeConfig),
    /// Held-trigger firing by range band.
    Shooter(ShooterConfig),
    /// Lobbed one-shot launches on a cooldown.
    Grenade(GrenadeConfig),
    /// Channelled healing of wounded allies.
    MedicHeal(MedicHealConfig),
}

impl AttackSpec {
    /// Builds the strategy instance.
    #[must_use]
    pub fn build(&self) -> Box<dyn AttackStrategy> {
        match self {
            Self::Melee(config) => Box::new(Melee::new(*config)),
            Self::Shooter(config) => Box::new(Shooter::new(*config)),
            Self::Grenade(config) => Box::new(GrenadeThrow::new(*config)),
            Self::MedicHeal(config) => Box::new(MedicHeal::new(*config)),
        }
    }
}

fn default_max_health() -> u32 {
    ActorBlueprint::DEFAULT_MAX_HEALTH
}

fn default_player_health() -> u32 {
    100
}

/// One spawn record in the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSpec {
    /// Spawn position.
    pub position: Vec2,
    /// Faction marker.
    #[serde(default)]
    pub faction: Faction,
    /// Whether the actor is boss-tier.
    #[serde(default)]
    pub boss: bool,
    /// Stat overrides; missing fields take the defaults.
    #[serde(default)]
    pub stats: Stats,
    /// Maximum health.
    #[serde(default = "default_max_health")]
    pub max_health: u32,
    /// Movement strategy configuration.
    pub movement: MovementSpec,
    /// Optional attack strategy configuration.
    #[serde(default)]
    pub attack: Option<AttackSpec>,
}

/// The player's starting record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Starting position.
    pub position: Vec2,
    /// Maximum health.
    #[serde(default = "default_player_health")]
    pub max_health: u32,
}

/// A full encounter description.
///
/// # Example
///
/// ```
/// use duskwatch_core::runtime::Runtime;
/// use duskwatch_core::scenario::Scenario;
///
/// let json = r#"{
///     "player": { "position": [0.0, 0.0] },
///     "actors": [
///         { "position": [10.0, 0.0], "movement": { "kind": "tank" },
///           "attack": { "kind": "shooter" } }
///     ]
/// }"#;
/// let scenario: Scenario = serde_json::from_str(json).unwrap();
///
/// let mut runtime = Runtime::new(42);
/// let ids = scenario.spawn_into(&mut runtime).unwrap();
/// assert_eq!(ids.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// The player, if the encounter starts with one.
    #[serde(default)]
    pub player: Option<PlayerSpec>,
    /// The actor roster.
    pub actors: Vec<SpawnSpec>,
}

impl Scenario {
    /// Validates the roster without deploying it.
    ///
    /// # Errors
    ///
    /// [`ScenarioError::EmptyRoster`] when no actors are named;
    /// [`ScenarioError::NonFinite`] when a position contains NaN or infinity.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.actors.is_empty() {
            return Err(ScenarioError::EmptyRoster);
        }
        if let Some(player) = &self.player {
            if !player.position.is_finite() {
                return Err(ScenarioError::NonFinite("player.position"));
            }
        }
        for spec in &self.actors {
            if !spec.position.is_finite() {
                return Err(ScenarioError::NonFinite("actor.position"));
            }
        }
        Ok(())
    }

    /// Deploys the scenario into a runtime: registers the player and spawns
    /// every actor, deriving each randomized strategy's seed from the
    /// runtime's master seed and the spawn slot.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate) failures; nothing is spawned
    /// on error.
    pub fn spawn_into(&self, runtime: &mut Runtime) -> Result<Vec<ActorId>, ScenarioError> {
        self.validate()?;

        if let Some(player) = &self.player {
            runtime
                .battlefield_mut()
                .set_player(player.position, player.max_health);
        }

        let mut ids = Vec::with_capacity(self.actors.len());
        for (slot, spec) in self.actors.iter().enumerate() {
            let seed = runtime.seed_for_slot(slot as u64);
            let mut blueprint = ActorBlueprint::new(spec.position, spec.movement.build(seed))
                .with_faction(spec.faction)
                .with_stats(spec.stats)
                .with_max_health(spec.max_health);
            if spec.boss {
                blueprint = blueprint.boss();
            }
            if let Some(attack) = &spec.attack {
                blueprint = blueprint.with_attack(attack.build());
            }
            ids.push(runtime.battlefield_mut().spawn(blueprint));
        }

        debug!(count = ids.len(), "scenario deployed");
        Ok(ids)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tank_spec(position: Vec2) -> SpawnSpec {
        SpawnSpec {
            position,
            faction: Faction::default(),
            boss: false,
            stats: Stats::default(),
            max_health: 20,
            movement: MovementSpec::Tank,
            attack: None,
        }
    }

    #[test]
    fn empty_roster_is_rejected() {
        let scenario = Scenario {
            player: None,
            actors: vec![],
        };
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::EmptyRoster)
        ));
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let scenario = Scenario {
            player: None,
            actors: vec![tank_spec(Vec2::new(f32::NAN, 0.0))],
        };
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::NonFinite("actor.position"))
        ));
    }

    #[test]
    fn non_finite_player_is_rejected() {
        let scenario = Scenario {
            player: Some(PlayerSpec {
                position: Vec2::new(f32::INFINITY, 0.0),
                max_health: 100,
            }),
            actors: vec![tank_spec(Vec2::ZERO)],
        };
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::NonFinite("player.position"))
        ));
    }

    #[test]
    fn spawn_into_deploys_everything() {
        let scenario = Scenario {
            player: Some(PlayerSpec {
                position: Vec2::ZERO,
                max_health: 80,
            }),
            actors: vec![
                tank_spec(Vec2::new(5.0, 0.0)),
                SpawnSpec {
                    boss: true,
                    attack: Some(AttackSpec::Melee(MeleeConfig::default())),
                    ..tank_spec(Vec2::new(-5.0, 0.0))
                },
            ],
        };

        let mut runtime = Runtime::new(7);
        let ids = scenario.spawn_into(&mut runtime).unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(runtime.battlefield().player().unwrap().health.maximum(), 80);
        let boss = runtime.battlefield().actor(ids[1]).unwrap();
        assert!(boss.is_boss());
        assert!(boss.is_armed());
    }

    #[test]
    fn spawn_into_rejects_before_spawning() {
        let scenario = Scenario {
            player: None,
            actors: vec![
                tank_spec(Vec2::ZERO),
                tank_spec(Vec2::new(f32::NAN, 0.0)),
            ],
        };

        let mut runtime = Runtime::new(7);
        assert!(scenario.spawn_into(&mut runtime).is_err());
        assert!(runtime.battlefield().is_empty());
    }

    #[test]
    fn json_roundtrip_with_tagged_strategies() {
        let json = r#"{
            "player": { "position": [0.0, 0.0], "max_health": 120 },
            "actors": [
                { "position": [8.0, 0.0],
                  "movement": { "kind": "anchor", "ring_radius": 4.0 },
                  "attack": { "kind": "grenade", "cooldown": 2.0 } },
                { "position": [-8.0, 0.0],
                  "movement": { "kind": "medic_support" },
                  "attack": { "kind": "medic_heal", "heal_per_second": 6.0 } },
                { "position": [0.0, 8.0], "movement": { "kind": "tank" } }
            ]
        }"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.actors.len(), 3);
        assert!(matches!(
            scenario.actors[0].movement,
            MovementSpec::Anchor(AnchorConfig { ring_radius, .. }) if (ring_radius - 4.0).abs() < f32::EPSILON
        ));

        // Round-trip preserves the roster.
        let reserialized = serde_json::to_string(&scenario).unwrap();
        let restored: Scenario = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(restored.actors.len(), 3);
    }

    #[test]
    fn every_strategy_kind_builds() {
        let movement_kinds = [
            MovementSpec::Anchor(AnchorConfig::default()),
            MovementSpec::BushAmbush(BushAmbushConfig::default()),
            MovementSpec::Charger(ChargerConfig::default()),
            MovementSpec::FakeRetreat(FakeRetreatConfig::default()),
            MovementSpec::FastRunner(FastRunnerConfig::default()),
            MovementSpec::Flanker(FlankerConfig::default()),
            MovementSpec::LeapVault(LeapVaultConfig::default()),
            MovementSpec::MedicSupport(MedicSupportConfig::default()),
            MovementSpec::Orbit(OrbitConfig::default()),
            MovementSpec::StopAndShoot(StopAndShootConfig::default()),
            MovementSpec::Tank,
            MovementSpec::ZigZag(ZigZagConfig::default()),
        ];
        for kind in movement_kinds {
            let _strategy = kind.build(1);
        }

        let attack_kinds = [
            AttackSpec::Melee(MeleeConfig::default()),
            AttackSpec::Shooter(ShooterConfig::default()),
            AttackSpec::Grenade(GrenadeConfig::default()),
            AttackSpec::MedicHeal(MedicHealConfig::default()),
        ];
        for kind in attack_kinds {
            let _strategy = kind.build();
        }
    }
}
