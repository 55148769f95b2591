//! Medic heal: channel integer healing into nearby wounded allies.
//!
//! The target list refreshes on a throttled search interval, not every tick.
//! Between rescans, each active target receives
//! `floor(accumulated heal_per_second × dt)` whole points per tick through a
//! per-target fractional-carry meter, so fractional rates never lose or
//! duplicate a point over time.
//!
//! Every target also carries a "healing in progress" indicator: created when
//! the target first enters the set, kept while healing continues, and torn
//! down through a short fade once the target leaves the set, dies, or the
//! channel stops. Peers poll [`MedicHeal::is_channeling`]; presentation polls
//! [`MedicHeal::indicators`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::actor::ActorId;
use crate::contracts::WeaponControl;
use crate::strategy::{AttackStrategy, CombatContext, CombatEffect};
use crate::targeting::{self, ScanParams, SCAN_CAPACITY};
use crate::timing::{clamp_duration, Countdown, DripMeter};

/// Tuning for [`MedicHeal`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicHealConfig {
    /// Radius of the ally scan.
    pub radius: f32,
    /// Healing rate per target, in points per second.
    pub heal_per_second: f32,
    /// Seconds between target rescans.
    pub search_interval: f32,
    /// Weight of the wounded ratio when scoring targets.
    pub wounded_weight: f32,
    /// Maximum simultaneous heal targets.
    pub max_targets: usize,
    /// Seconds an indicator lingers while fading out.
    pub fade_duration: f32,
}

impl MedicHealConfig {
    /// Clamps invalid tunables to safe values.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            radius: if self.radius.is_finite() {
                self.radius.max(0.1)
            } else {
                defaults.radius
            },
            heal_per_second: if self.heal_per_second.is_finite() {
                self.heal_per_second.max(0.0)
            } else {
                defaults.heal_per_second
            },
            search_interval: clamp_duration(self.search_interval),
            wounded_weight: if self.wounded_weight.is_finite() {
                self.wounded_weight.max(0.0)
            } else {
                defaults.wounded_weight
            },
            max_targets: self.max_targets.max(1),
            fade_duration: clamp_duration(self.fade_duration),
        }
    }
}

impl Default for MedicHealConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            heal_per_second: 4.0,
            search_interval: 0.75,
            wounded_weight: 1.5,
            max_targets: 3,
            fade_duration: 0.4,
        }
    }
}

/// Externally visible state of one heal indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// Healing is flowing to this target.
    Active,
    /// The target left the set; the indicator is fading out.
    Fading,
}

#[derive(Debug, Clone, Copy)]
enum ChannelState {
    Active,
    Fading(Countdown),
}

#[derive(Debug, Clone, Copy)]
struct Channel {
    meter: DripMeter,
    state: ChannelState,
}

/// Attack strategy that heals wounded allies instead of attacking.
pub struct MedicHeal {
    config: MedicHealConfig,
    rescan: Countdown,
    channels: BTreeMap<ActorId, Channel>,
    scratch: [ActorId; SCAN_CAPACITY],
}

impl MedicHeal {
    /// Creates the strategy with the given tuning.
    ///
    /// The first rescan happens on the first tick.
    #[must_use]
    pub fn new(config: MedicHealConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            rescan: Countdown::ready(config.search_interval),
            channels: BTreeMap::new(),
            scratch: [ActorId::new(0); SCAN_CAPACITY],
        }
    }

    /// Creates the strategy with default tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(MedicHealConfig::default())
    }

    /// Current indicators, active and fading, in target-id order.
    pub fn indicators(&self) -> impl Iterator<Item = (ActorId, IndicatorState)> + '_ {
        self.channels.iter().map(|(id, channel)| {
            let state = match channel.state {
                ChannelState::Active => IndicatorState::Active,
                ChannelState::Fading(_) => IndicatorState::Fading,
            };
            (*id, state)
        })
    }

    fn refresh_targets(&mut self, ctx: &CombatContext<'_>) {
        let params = ScanParams {
            radius: self.config.radius,
            wounded_weight: self.config.wounded_weight,
        };
        let wounded = targeting::wounded_allies(
            ctx.view,
            ctx.actor,
            ctx.faction,
            ctx.origin,
            params,
            &mut self.scratch,
            self.config.max_targets,
        );

        for candidate in &wounded {
            let channel = self.channels.entry(candidate.id).or_insert_with(|| {
                trace!(medic = %ctx.actor, target = %candidate.id, "heal channel opened");
                Channel {
                    meter: DripMeter::new(),
                    state: ChannelState::Active,
                }
            });
            // A fading indicator whose target re-enters the set lights back up.
            channel.state = ChannelState::Active;
        }

        let fade = self.config.fade_duration;
        for (id, channel) in &mut self.channels {
            let still_chosen = wounded.iter().any(|candidate| candidate.id == *id);
            if !still_chosen {
                if let ChannelState::Active = channel.state {
                    trace!(target = %id, "heal channel fading");
                    channel.state = ChannelState::Fading(Countdown::new(fade));
                }
            }
        }
    }
}

impl AttackStrategy for MedicHeal {
    fn strike(
        &mut self,
        ctx: &CombatContext<'_>,
        _weapon: &mut dyn WeaponControl,
    ) -> Vec<CombatEffect> {
        if ctx.dt <= 0.0 || ctx.player.is_none() {
            return Vec::new();
        }

        self.rescan.tick(ctx.dt);
        if self.rescan.is_ready() {
            self.rescan.reset();
            self.refresh_targets(ctx);
        }

        let mut effects = Vec::new();
        let mut expired = Vec::new();
        let fade = self.config.fade_duration;

        for (id, channel) in &mut self.channels {
            match &mut channel.state {
                ChannelState::Active => {
                    if !ctx.view.is_alive(*id) {
                        channel.state = ChannelState::Fading(Countdown::new(fade));
                        continue;
                    }
                    let amount = channel.meter.accrue(self.config.heal_per_second * ctx.dt);
                    if amount > 0 {
                        effects.push(CombatEffect::HealAlly {
                            target: *id,
                            amount,
                        });
                    }
                }
                ChannelState::Fading(countdown) => {
                    if countdown.tick(ctx.dt) {
                        expired.push(*id);
                    }
                }
            }
        }

        for id in expired {
            self.channels.remove(&id);
        }

        effects
    }

    fn is_channeling(&self) -> bool {
        self.channels
            .values()
            .any(|channel| matches!(channel.state, ChannelState::Active))
    }
}

// =============================================================================
// Tests
// =============================================================================
