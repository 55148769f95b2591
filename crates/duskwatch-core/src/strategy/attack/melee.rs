//! Melee attack: cooldown-gated strikes with a cosmetic lunge.
//!
//! On cooldown elapse, if the player is within range, the strike lands for
//! `round(base_damage × max(0, damage_multiplier))` and the cooldown resets.
//! The optional lunge is purely cosmetic: a small elapsed-time state machine
//! spanning half the cooldown whose eased offset is polled by presentation
//! code, never pushed.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::contracts::WeaponControl;
use crate::strategy::{AttackStrategy, CombatContext, CombatEffect};
use crate::timing::{clamp_duration, ease_out_quad, Countdown};

/// Tuning for [`Melee`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeConfig {
    /// Seconds between strikes.
    pub cooldown: f32,
    /// Maximum strike distance.
    pub range: f32,
    /// Damage before the stats multiplier.
    pub base_damage: f32,
    /// Whether a strike plays the cosmetic lunge.
    pub lunge: bool,
    /// Peak height of the lunge arc, in world units.
    pub lunge_height: f32,
}

impl MeleeConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            cooldown: clamp_duration(self.cooldown),
            range: if self.range.is_finite() {
                self.range.max(0.0)
            } else {
                defaults.range
            },
            base_damage: if self.base_damage.is_finite() {
                self.base_damage.max(0.0)
            } else {
                defaults.base_damage
            },
            lunge: self.lunge,
            lunge_height: if self.lunge_height.is_finite() {
                self.lunge_height.max(0.0)
            } else {
                defaults.lunge_height
            },
        }
    }
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            cooldown: 1.4,
            range: 1.6,
            base_damage: 8.0,
            lunge: true,
            lunge_height: 0.5,
        }
    }
}

/// Elapsed-time state for the cosmetic lunge arc.
#[derive(Debug, Clone, Copy, Default)]
struct LungeMotion {
    remaining: f32,
    duration: f32,
}

impl LungeMotion {
    fn start(&mut self, duration: f32) {
        self.duration = clamp_duration(duration);
        self.remaining = self.duration;
    }

    fn tick(&mut self, dt: f32) {
        if dt > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    const fn active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Eased parabolic arc: zero at both ends, `height` near the middle.
    fn offset(&self, height: f32) -> f32 {
        if !self.active() {
            return 0.0;
        }
        let progress = 1.0 - self.remaining / self.duration;
        let eased = ease_out_quad(progress);
        height * 4.0 * eased * (1.0 - eased)
    }
}

/// Attack strategy that strikes the player at close range.
pub struct Melee {
    config: MeleeConfig,
    cooldown: Countdown,
    lunge: LungeMotion,
}

impl Melee {
    /// Creates the strategy with the given tuning.
    ///
    /// The first strike is available immediately.
    #[must_use]
    pub fn new(config: MeleeConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            cooldown: Countdown::ready(config.cooldown),
            lunge: LungeMotion::default(),
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(MeleeConfig::default())
    }

    /// Current vertical offset of the cosmetic lunge, polled by presentation.
    #[must_use]
    pub fn lunge_offset(&self) -> f32 {
        self.lunge.offset(self.config.lunge_height)
    }
}

impl AttackStrategy for Melee {
    fn strike(
        &mut self,
        ctx: &CombatContext<'_>,
        _weapon: &mut dyn WeaponControl,
    ) -> Vec<CombatEffect> {
        if ctx.dt <= 0.0 {
            return Vec::new();
        }

        // The lunge finishes even if the player vanishes mid-arc.
        self.lunge.tick(ctx.dt);
        self.cooldown.tick(ctx.dt);

        let Some(offset) = ctx.player_offset() else {
            return Vec::new();
        };
        if !self.cooldown.is_ready() || offset.length() > self.config.range {
            return Vec::new();
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let damage =
            (self.config.base_damage * ctx.stats.damage_multiplier.max(0.0)).round() as u32;
        self.cooldown.reset();
        if self.config.lunge {
            self.lunge.start(self.config.cooldown * 0.5);
        }
        trace!(actor = %ctx.actor, damage, "melee strike");

        vec![CombatEffect::StrikePlayer { damage }]
    }
}

// =============================================================================
// Tests
// =============================================================================
