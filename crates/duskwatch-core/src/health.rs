//! Integer health pools with clamped, destruction-safe mutators.

use serde::{Deserialize, Serialize};

/// Current/maximum health as readable integers.
///
/// Both mutators are idempotent no-ops once the pool is destroyed: a dead
/// target cannot be damaged further, and healing it does not resurrect it.
///
/// # Example
///
/// ```
/// use duskwatch_core::health::HealthPool;
///
/// let mut pool = HealthPool::new(50);
/// pool.damage(60);
/// assert!(pool.is_destroyed());
/// pool.heal(10); // no-op on a destroyed pool
/// assert_eq!(pool.current(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPool {
    current: u32,
    maximum: u32,
}

impl HealthPool {
    /// Creates a full pool with the given maximum.
    #[must_use]
    pub const fn new(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Creates a pool at a specific current value, clamped to `maximum`.
    #[must_use]
    pub fn with_current(maximum: u32, current: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Current health.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Maximum health.
    #[must_use]
    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Applies damage, clamped at zero. No-op on a destroyed pool.
    pub fn damage(&mut self, amount: u32) {
        if self.is_destroyed() {
            return;
        }
        self.current = self.current.saturating_sub(amount);
    }

    /// Applies healing, clamped at maximum. No-op on a destroyed pool.
    pub fn heal(&mut self, amount: u32) {
        if self.is_destroyed() {
            return;
        }
        self.current = self.current.saturating_add(amount).min(self.maximum);
    }

    /// Returns `true` once current health has reached zero.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.current == 0
    }

    /// Returns `true` when the pool is at its maximum.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Current over maximum in `[0, 1]`; 0 for an empty-capacity pool.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f32 {
        if self.maximum == 0 {
            return 0.0;
        }
        self.current as f32 / self.maximum as f32
    }

    /// Missing health over maximum in `[0, 1]`; 0 for an empty-capacity pool.
    ///
    /// This is the wounded ratio used to prioritize heal/support targets.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn wounded_ratio(&self) -> f32 {
        if self.maximum == 0 {
            return 0.0;
        }
        (self.maximum - self.current) as f32 / self.maximum as f32
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_full() {
        let pool = HealthPool::new(100);
        assert_eq!(pool.current(), 100);
        assert_eq!(pool.maximum(), 100);
        assert!(pool.is_full());
        assert!(!pool.is_destroyed());
    }

    #[test]
    fn with_current_clamps_to_maximum() {
        let pool = HealthPool::with_current(50, 80);
        assert_eq!(pool.current(), 50);
    }

    #[test]
    fn damage_subtracts_and_clamps() {
        let mut pool = HealthPool::new(30);
        pool.damage(10);
        assert_eq!(pool.current(), 20);
        pool.damage(100);
        assert_eq!(pool.current(), 0);
        assert!(pool.is_destroyed());
    }

    #[test]
    fn damage_on_destroyed_is_noop() {
        let mut pool = HealthPool::with_current(30, 0);
        pool.damage(5);
        assert_eq!(pool.current(), 0);
    }

    #[test]
    fn heal_adds_and_clamps() {
        let mut pool = HealthPool::with_current(30, 10);
        pool.heal(5);
        assert_eq!(pool.current(), 15);
        pool.heal(100);
        assert_eq!(pool.current(), 30);
    }

    #[test]
    fn heal_on_destroyed_is_noop() {
        let mut pool = HealthPool::with_current(30, 0);
        pool.heal(10);
        assert_eq!(pool.current(), 0);
        assert!(pool.is_destroyed());
    }

    #[test]
    fn ratios() {
        let pool = HealthPool::with_current(40, 10);
        assert!((pool.ratio() - 0.25).abs() < 1e-6);
        assert!((pool.wounded_ratio() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn zero_capacity_ratios_are_zero() {
        let pool = HealthPool::new(0);
        assert!(pool.ratio().abs() < f32::EPSILON);
        assert!(pool.wounded_ratio().abs() < f32::EPSILON);
    }

    #[test]
    fn serialization_roundtrip() {
        let pool = HealthPool::with_current(64, 12);
        let json = serde_json::to_string(&pool).unwrap();
        let restored: HealthPool = serde_json::from_str(&json).unwrap();
        assert_eq!(pool, restored);
    }
}
