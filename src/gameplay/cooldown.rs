//! Timestamp cooldowns and timed attribute buffs.
//!
//! All waiting in the simulation is a comparison against the virtual clock
//! (`Time::elapsed_secs()`), never a wall-clock read, so pausing the game
//! freezes every cooldown and buff at once and tests can drive time
//! explicitly.

use bevy::prelude::*;

use super::attributes::{Attributes, BonusChannel};
use crate::GameSet;

// === Cooldown primitive ===

/// A "can I act yet" gate: records the last trigger timestamp and compares
/// `now - last >= period`. The period is passed per check so rate buffs
/// (attack speed) take effect immediately instead of on the next trigger.
#[derive(Debug, Clone, Copy, Default, Reflect)]
pub struct Cooldown {
    last_trigger: Option<f32>,
}

impl Cooldown {
    /// A cooldown that has never triggered — ready immediately.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_trigger: None }
    }

    #[must_use]
    pub fn ready(&self, now: f32, period: f32) -> bool {
        self.last_trigger.is_none_or(|last| now - last >= period)
    }

    pub const fn trigger(&mut self, now: f32) {
        self.last_trigger = Some(now);
    }

    /// Seconds until the cooldown is ready again. Zero when ready.
    #[must_use]
    pub fn remaining(&self, now: f32, period: f32) -> f32 {
        self.last_trigger
            .map_or(0.0, |last| (period - (now - last)).max(0.0))
    }

    /// Fraction of the period elapsed since the last trigger, in `[0, 1]`.
    /// `1.0` when never triggered or the period has fully elapsed.
    #[must_use]
    pub fn progress(&self, now: f32, period: f32) -> f32 {
        match self.last_trigger {
            None => 1.0,
            Some(_) if period <= 0.0 => 1.0,
            Some(last) => ((now - last) / period).clamp(0.0, 1.0),
        }
    }
}

/// Per-character attack gate. Period is `1 / effective_attack_speed`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AttackCooldown(pub Cooldown);

// === Timed buffs ===

/// A bonus applied through the attribute model that reverses itself when the
/// clock passes `expires_at`.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct ActiveBuff {
    pub channel: BonusChannel,
    pub amount: f32,
    pub expires_at: f32,
}

/// Timed buffs currently applied to this entity's [`Attributes`].
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ActiveBuffs(pub Vec<ActiveBuff>);

impl ActiveBuffs {
    /// Applies `amount` on `channel` now and schedules the inverse at
    /// `expires_at`.
    pub fn apply(
        &mut self,
        attributes: &mut Attributes,
        channel: BonusChannel,
        amount: f32,
        expires_at: f32,
    ) {
        attributes.add_bonus(channel, amount);
        self.0.push(ActiveBuff {
            channel,
            amount,
            expires_at,
        });
    }

    /// Reverses and removes every buff whose expiry has passed. Idempotent:
    /// a late tick expires the buff once, never twice.
    pub fn expire(&mut self, attributes: &mut Attributes, now: f32) {
        self.0.retain(|buff| {
            if now >= buff.expires_at {
                attributes.add_bonus(buff.channel, -buff.amount);
                false
            } else {
                true
            }
        });
    }
}

// === Systems ===

/// Runs buff expiry for every buffed entity, every tick, before AI and
/// combat read effective stats.
fn expire_buffs(time: Res<Time>, mut buffed: Query<(&mut ActiveBuffs, &mut Attributes)>) {
    let now = time.elapsed_secs();
    for (mut buffs, mut attributes) in &mut buffed {
        if !buffs.0.is_empty() {
            buffs.expire(&mut attributes, now);
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<AttackCooldown>().register_type::<ActiveBuffs>();

    app.add_systems(
        Update,
        expire_buffs
            .in_set(GameSet::Ai)
            .run_if(crate::gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_cooldown_is_ready() {
        let cooldown = Cooldown::new();
        assert!(cooldown.ready(0.0, 5.0));
    }

    #[test]
    fn triggered_cooldown_blocks_until_period_elapses() {
        let mut cooldown = Cooldown::new();
        cooldown.trigger(10.0);

        assert!(!cooldown.ready(10.0, 2.0));
        assert!(!cooldown.ready(11.9, 2.0));
        assert!(cooldown.ready(12.0, 2.0)); // inclusive boundary
        assert!(cooldown.ready(30.0, 2.0));
    }

    #[test]
    fn shorter_period_unlocks_existing_cooldown() {
        // An attack-speed buff shortens the period mid-cooldown.
        let mut cooldown = Cooldown::new();
        cooldown.trigger(0.0);

        assert!(!cooldown.ready(0.6, 1.0));
        assert!(cooldown.ready(0.6, 0.5));
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let mut cooldown = Cooldown::new();
        assert_eq!(cooldown.remaining(0.0, 5.0), 0.0);

        cooldown.trigger(10.0);
        assert!((cooldown.remaining(12.0, 5.0) - 3.0).abs() < f32::EPSILON);
        assert_eq!(cooldown.remaining(20.0, 5.0), 0.0);
    }

    #[test]
    fn progress_clamps_to_unit_interval() {
        let mut cooldown = Cooldown::new();
        assert_eq!(cooldown.progress(0.0, 5.0), 1.0);

        cooldown.trigger(0.0);
        assert_eq!(cooldown.progress(0.0, 5.0), 0.0);
        assert!((cooldown.progress(2.5, 5.0) - 0.5).abs() < f32::EPSILON);
        assert_eq!(cooldown.progress(99.0, 5.0), 1.0);
    }

    #[test]
    fn buff_applies_and_expires_to_exact_inverse() {
        let mut attributes = Attributes::new(100.0, 5.0, 10.0, 2.0);
        let mut buffs = ActiveBuffs::default();

        buffs.apply(&mut attributes, BonusChannel::AttackSpeed, 1.0, 3.0);
        assert!((attributes.effective_attack_speed() - 4.0).abs() < f32::EPSILON);

        // Before expiry nothing changes
        buffs.expire(&mut attributes, 2.9);
        assert_eq!(buffs.0.len(), 1);

        // A late tick still expires exactly once
        buffs.expire(&mut attributes, 7.0);
        assert!(buffs.0.is_empty());
        assert_eq!(attributes.bonus(BonusChannel::AttackSpeed), 0.0);

        // Idempotent: nothing left to reverse
        buffs.expire(&mut attributes, 8.0);
        assert_eq!(attributes.bonus(BonusChannel::AttackSpeed), 0.0);
    }

    #[test]
    fn nested_buffs_on_different_channels_restore_independently() {
        let mut attributes = Attributes::new(100.0, 5.0, 10.0, 2.0);
        let mut buffs = ActiveBuffs::default();

        buffs.apply(&mut attributes, BonusChannel::Damage, 2.0, 5.0);
        buffs.apply(&mut attributes, BonusChannel::Speed, 1.0, 10.0);

        buffs.expire(&mut attributes, 6.0);
        assert_eq!(attributes.bonus(BonusChannel::Damage), 0.0);
        assert!((attributes.bonus(BonusChannel::Speed) - 1.0).abs() < f32::EPSILON);

        buffs.expire(&mut attributes, 11.0);
        assert_eq!(attributes.bonus(BonusChannel::Speed), 0.0);
    }

    mod system_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        fn create_buff_test_app() -> App {
            let mut app = App::new();
            app.add_plugins(MinimalPlugins);
            app.add_systems(Update, expire_buffs);
            app.update(); // Initialize time
            app
        }

        #[test]
        fn expired_buff_reversed_by_system() {
            let mut app = create_buff_test_app();

            let mut attributes = Attributes::new(100.0, 5.0, 10.0, 2.0);
            attributes.add_bonus(BonusChannel::Damage, 2.0);
            let entity = app
                .world_mut()
                .spawn((
                    attributes,
                    ActiveBuffs(vec![ActiveBuff {
                        channel: BonusChannel::Damage,
                        amount: 2.0,
                        expires_at: 0.0, // already past
                    }]),
                ))
                .id();

            app.update();

            let attributes = app.world().get::<Attributes>(entity).unwrap();
            assert_eq!(attributes.bonus(BonusChannel::Damage), 0.0);
            assert!(app.world().get::<ActiveBuffs>(entity).unwrap().0.is_empty());
        }

        #[test]
        fn unexpired_buff_survives_system() {
            let mut app = create_buff_test_app();

            let mut attributes = Attributes::new(100.0, 5.0, 10.0, 2.0);
            attributes.add_bonus(BonusChannel::Speed, 1.0);
            let entity = app
                .world_mut()
                .spawn((
                    attributes,
                    ActiveBuffs(vec![ActiveBuff {
                        channel: BonusChannel::Speed,
                        amount: 1.0,
                        expires_at: f32::MAX,
                    }]),
                ))
                .id();

            app.update();

            let attributes = app.world().get::<Attributes>(entity).unwrap();
            assert!((attributes.bonus(BonusChannel::Speed) - 1.0).abs() < f32::EPSILON);
        }
    }
}
