//! Attack strategy implementations.
//!
//! One file per behavior, each behind the
//! [`AttackStrategy`](crate::strategy::AttackStrategy) trait. Weapon-driven
//! behaviors talk to the injected controller; health mutations are returned
//! as [`CombatEffect`](crate::strategy::CombatEffect)s for the runtime to
//! resolve.

pub mod grenade;
pub mod medic_heal;
pub mod melee;
pub mod shooter;

pub use grenade::{GrenadeConfig, GrenadeThrow};
pub use medic_heal::{IndicatorState, MedicHeal, MedicHealConfig};
pub use melee::{Melee, MeleeConfig};
pub use shooter::{Shooter, ShooterConfig};
