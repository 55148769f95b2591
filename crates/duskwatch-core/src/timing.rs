//! Timer and accumulator primitives shared by the strategy state machines.
//!
//! Every timed phase in a strategy runs on a [`Countdown`]: it only moves
//! when ticked with a positive delta, so a zero-delta frame can never advance
//! a state machine. Integer heal/damage flows driven by fractional-per-tick
//! rates use [`DripMeter`] so no fraction is ever lost or double-counted.

use serde::{Deserialize, Serialize};

/// Minimum duration any configured timer is allowed to have.
///
/// Negative or zero duration tunables are clamped to this at
/// configuration-load time, never at use time.
pub const MIN_DURATION: f32 = 0.01;

/// Clamps a configured duration to the minimum positive value.
#[must_use]
pub fn clamp_duration(duration: f32) -> f32 {
    if duration.is_finite() {
        duration.max(MIN_DURATION)
    } else {
        MIN_DURATION
    }
}

/// A one-shot countdown timer with a remembered duration.
///
/// `tick` saturates at zero and reports the tick on which the timer crossed
/// it. Non-positive deltas are ignored entirely.
///
/// # Example
///
/// ```
/// use duskwatch_core::timing::Countdown;
///
/// let mut timer = Countdown::new(1.0);
/// assert!(!timer.tick(0.6));
/// assert!(timer.tick(0.6));
/// assert!(timer.is_ready());
/// timer.reset();
/// assert!(!timer.is_ready());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
    duration: f32,
}

impl Countdown {
    /// Creates a running countdown with `duration` seconds remaining.
    #[must_use]
    pub fn new(duration: f32) -> Self {
        let duration = clamp_duration(duration);
        Self {
            remaining: duration,
            duration,
        }
    }

    /// Creates an already-expired countdown that resets to `duration`.
    ///
    /// Useful for cooldowns that should allow an action on the first tick.
    #[must_use]
    pub fn ready(duration: f32) -> Self {
        Self {
            remaining: 0.0,
            duration: clamp_duration(duration),
        }
    }

    /// Advances the countdown by `dt` seconds.
    ///
    /// Returns `true` only on the tick where the timer reaches zero.
    /// Non-positive `dt` leaves the timer untouched and returns `false`.
    pub fn tick(&mut self, dt: f32) -> bool {
        if dt <= 0.0 || self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining <= 0.0
    }

    /// Returns `true` once the countdown has expired.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Restarts the countdown at its remembered duration.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    /// Restarts the countdown with a new duration.
    pub fn reset_to(&mut self, duration: f32) {
        self.duration = clamp_duration(duration);
        self.remaining = self.duration;
    }

    /// Seconds left before expiry.
    #[must_use]
    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    /// The duration this countdown resets to.
    #[must_use]
    pub const fn duration(&self) -> f32 {
        self.duration
    }
}

/// Fractional-carry accumulator for integer flows.
///
/// Feeding it `rate × dt` every tick yields whole units whose running total
/// equals `floor(Σ rate × dt)` — fractions carry across ticks instead of
/// being dropped or duplicated.
///
/// # Example
///
/// ```
/// use duskwatch_core::timing::DripMeter;
///
/// let mut meter = DripMeter::new();
/// let total: u32 = (0..10).map(|_| meter.accrue(4.0 * 0.3)).sum();
/// assert_eq!(total, 12); // floor(4 × 3.0)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DripMeter {
    carry: f32,
}

impl DripMeter {
    /// Creates an empty meter.
    #[must_use]
    pub fn new() -> Self {
        Self { carry: 0.0 }
    }

    /// Adds `amount` and returns the whole units released.
    ///
    /// Negative or non-finite amounts are ignored.
    // The released amount is bounded by the per-tick inflow, so the cast
    // cannot truncate for any sane rate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn accrue(&mut self, amount: f32) -> u32 {
        if amount.is_finite() && amount > 0.0 {
            self.carry += amount;
        }
        let whole = self.carry.floor();
        self.carry -= whole;
        whole as u32
    }

    /// The fraction currently carried, in `[0, 1)`.
    #[must_use]
    pub const fn carry(&self) -> f32 {
        self.carry
    }
}

/// Quadratic ease-out: fast start, gentle arrival. Input clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

// =============================================================================
// Tests
// =============================================================================
