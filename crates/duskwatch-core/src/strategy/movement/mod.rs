//! Movement strategy implementations.
//!
//! One file per behavior, each a self-contained timer-driven automaton (or a
//! stateless steering function) behind the
//! [`MovementStrategy`](crate::strategy::MovementStrategy) trait. Randomized
//! behaviors take a `u64` seed at construction and own a deterministic
//! `ChaCha8` stream.

pub mod ambush;
pub mod anchor;
pub mod charger;
pub mod fake_retreat;
pub mod fast_runner;
pub mod flanker;
pub mod leap;
pub mod medic_support;
pub mod orbit;
pub mod stop_and_shoot;
pub mod tank;
pub mod zigzag;

pub use ambush::{BushAmbush, BushAmbushConfig};
pub use anchor::{Anchor, AnchorConfig};
pub use charger::{Charger, ChargerConfig};
pub use fake_retreat::{FakeRetreat, FakeRetreatConfig};
pub use fast_runner::{FastRunner, FastRunnerConfig};
pub use flanker::{Flanker, FlankerConfig};
pub use leap::{LeapVault, LeapVaultConfig};
pub use medic_support::{MedicSupport, MedicSupportConfig};
pub use orbit::{Orbit, OrbitConfig};
pub use stop_and_shoot::{StopAndShoot, StopAndShootConfig};
pub use tank::Tank;
pub use zigzag::{ZigZag, ZigZagConfig};
