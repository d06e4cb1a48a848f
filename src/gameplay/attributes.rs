//! Stat attributes: base values plus additive fractional bonus channels.
//!
//! Every effective stat is `base * (1 + sum of bonuses on its channel)`.
//! Bonuses are never clamped (a negative sum is a debuff); only derived
//! values are clamped at their use sites (health in the damage path).

use bevy::prelude::*;

/// Bonus channels a buff or debuff can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BonusChannel {
    Health,
    Speed,
    Damage,
    AttackSpeed,
    /// Fractional incoming-damage reduction, applied at the damage site.
    Defense,
}

impl BonusChannel {
    /// All channels, for iteration.
    pub const ALL: &[Self] = &[
        Self::Health,
        Self::Speed,
        Self::Damage,
        Self::AttackSpeed,
        Self::Defense,
    ];

    /// Parses the wire/config name of a channel (`"damage_bonus"` etc.).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "health_bonus" => Some(Self::Health),
            "speed_bonus" => Some(Self::Speed),
            "damage_bonus" => Some(Self::Damage),
            "attack_speed_bonus" => Some(Self::AttackSpeed),
            "defense_bonus" => Some(Self::Defense),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Health => 0,
            Self::Speed => 1,
            Self::Damage => 2,
            Self::AttackSpeed => 3,
            Self::Defense => 4,
        }
    }
}

/// Base combat stats plus per-channel bonus accumulators.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Attributes {
    pub base_max_health: f32,
    pub base_speed: f32,
    pub base_damage: f32,
    pub base_attack_speed: f32,
    bonuses: [f32; 5],
}

impl Attributes {
    #[must_use]
    pub const fn new(max_health: f32, speed: f32, damage: f32, attack_speed: f32) -> Self {
        Self {
            base_max_health: max_health,
            base_speed: speed,
            base_damage: damage,
            base_attack_speed: attack_speed,
            bonuses: [0.0; 5],
        }
    }

    /// Current accumulated bonus on a channel.
    #[must_use]
    pub const fn bonus(&self, channel: BonusChannel) -> f32 {
        self.bonuses[channel.index()]
    }

    /// Adds to a channel's accumulator. Callers expire a timed buff by adding
    /// the additive inverse later; the model itself has no expiry logic.
    pub const fn add_bonus(&mut self, channel: BonusChannel, delta: f32) {
        self.bonuses[channel.index()] += delta;
    }

    /// Name-keyed variant of [`Self::add_bonus`]. Unknown channel names are
    /// ignored (compatibility with the original data), with a diagnostic so
    /// typos don't vanish silently.
    pub fn add_bonus_by_name(&mut self, name: &str, delta: f32) {
        match BonusChannel::from_name(name) {
            Some(channel) => self.add_bonus(channel, delta),
            None => warn!("ignoring bonus for unknown attribute channel {name:?}"),
        }
    }

    #[must_use]
    pub fn effective_max_health(&self) -> f32 {
        self.base_max_health * (1.0 + self.bonus(BonusChannel::Health))
    }

    #[must_use]
    pub fn effective_speed(&self) -> f32 {
        self.base_speed * (1.0 + self.bonus(BonusChannel::Speed))
    }

    #[must_use]
    pub fn effective_damage(&self) -> f32 {
        self.base_damage * (1.0 + self.bonus(BonusChannel::Damage))
    }

    #[must_use]
    pub fn effective_attack_speed(&self) -> f32 {
        self.base_attack_speed * (1.0 + self.bonus(BonusChannel::AttackSpeed))
    }

    /// Scales incoming damage by the Defense channel. A fully stacked defense
    /// floor is zero — damage never heals.
    #[must_use]
    pub fn damage_after_defense(&self, amount: f32) -> f32 {
        (amount * (1.0 - self.bonus(BonusChannel::Defense))).max(0.0)
    }
}
