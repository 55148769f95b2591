//! External collaborator contracts consumed by the behavior core.
//!
//! The behavior layer never talks to an engine directly. Physical motion and
//! weapon firing are reached through the traits in this module, injected at
//! spawn time; tests substitute recording doubles, the game wires in the real
//! engine adapters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::Transform;
use crate::geom;

// =============================================================================
// Physical Mover
// =============================================================================

/// Integrates a desired velocity into an actor transform.
///
/// The core does not know or care how the velocity becomes motion — a
/// navigation agent, a rigid body, or plain integration all satisfy the
/// contract. Movers are called exactly once per actor per tick, immediately
/// after the movement strategy has produced its velocity.
pub trait Mover: Send + Sync {
    /// Applies `velocity` over `dt` seconds to `transform`.
    fn apply(&mut self, transform: &mut Transform, velocity: Vec2, dt: f32);
}

/// Reference mover: direct Euler integration.
///
/// Updates facing from the velocity when it is non-degenerate, so idle actors
/// keep their last heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMover;

impl Mover for DirectMover {
    fn apply(&mut self, transform: &mut Transform, velocity: Vec2, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        transform.position += velocity * dt;
        if let Some(heading) = geom::try_direction(Vec2::ZERO, velocity) {
            transform.facing = heading;
        }
    }
}

// =============================================================================
// Weapon / Firing Controller
// =============================================================================

/// One-shot launch request for a thrown or fired projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchRequest {
    /// Unit direction of the launch.
    pub direction: Vec2,
    /// Multiplier the projectile applies to its base damage.
    pub damage_multiplier: f32,
    /// Initial projectile speed in world units per second.
    pub launch_speed: f32,
    /// Slow-down factor applied to targets caught in the burst.
    pub slow_factor: f32,
}

/// Firing collaborator owned by each armed actor.
///
/// Two shapes of control exist: a held trigger that is continuously re-set
/// every tick (the controller owns the firing cadence), and one-shot launch
/// requests for thrown projectiles.
pub trait WeaponControl: Send + Sync {
    /// Sets the held-trigger state for this tick.
    ///
    /// Callers re-assert the state every tick; controllers must tolerate the
    /// same value being set repeatedly.
    fn set_trigger(&mut self, held: bool);

    /// Requests a one-shot projectile launch.
    ///
    /// Returns `false` when the controller cannot launch (no projectile
    /// loaded, still rigged, etc.); callers treat refusal as "do not consume
    /// the cooldown".
    fn launch(&mut self, request: LaunchRequest) -> bool;
}

/// Weapon controller for unarmed actors: ignores the trigger, refuses every
/// launch.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWeapon;

impl WeaponControl for NullWeapon {
    fn set_trigger(&mut self, _held: bool) {}

    fn launch(&mut self, _request: LaunchRequest) -> bool {
        false
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod direct_mover_tests {
        use super::*;

        #[test]
        fn integrates_position() {
            let mut mover = DirectMover;
            let mut transform = Transform::at(Vec2::ZERO);

            mover.apply(&mut transform, Vec2::new(2.0, 0.0), 0.5);

            assert!((transform.position - Vec2::new(1.0, 0.0)).length() < 1e-6);
        }

        #[test]
        fn updates_facing_from_velocity() {
            let mut mover = DirectMover;
            let mut transform = Transform::at(Vec2::ZERO);

            mover.apply(&mut transform, Vec2::new(0.0, 3.0), 0.1);

            assert!((transform.facing - Vec2::Y).length() < 1e-6);
        }

        #[test]
        fn zero_velocity_keeps_facing() {
            let mut mover = DirectMover;
            let mut transform = Transform::at(Vec2::ZERO);
            transform.facing = Vec2::Y;

            mover.apply(&mut transform, Vec2::ZERO, 0.1);

            assert_eq!(transform.facing, Vec2::Y);
            assert_eq!(transform.position, Vec2::ZERO);
        }

        #[test]
        fn zero_dt_is_noop() {
            let mut mover = DirectMover;
            let mut transform = Transform::at(Vec2::new(5.0, 5.0));

            mover.apply(&mut transform, Vec2::new(10.0, 0.0), 0.0);

            assert_eq!(transform.position, Vec2::new(5.0, 5.0));
        }
    }

    mod null_weapon_tests {
        use super::*;

        #[test]
        fn refuses_launches() {
            let mut weapon = NullWeapon;
            weapon.set_trigger(true);
            let accepted = weapon.launch(LaunchRequest {
                direction: Vec2::X,
                damage_multiplier: 1.0,
                launch_speed: 10.0,
                slow_factor: 0.5,
            });
            assert!(!accepted);
        }
    }
}
