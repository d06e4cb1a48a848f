//! Boss phase machinery: the orchestrator that rotates phases, the three
//! attack patterns, minion summoning, and the shield absorption contract.

use bevy::prelude::*;
use rand::Rng;

use crate::gameplay::attributes::Attributes;
use crate::gameplay::combat::DeathCheck;
use crate::gameplay::enemy::{Enemy, EnemyArchetype, spawn_enemy_scaled};
use crate::gameplay::player::Player;
use crate::gameplay::projectile::{ProjectileMotion, spawn_projectile};
use crate::gameplay::{Health, Team};
use crate::theme::palette;
use crate::{GameSet, gameplay_running};

use super::{BOSS_PROJECTILE_SPEED, Boss};

// === Constants ===

/// Nominal phase length in seconds.
pub const PHASE_DURATION: f32 = 20.0;

/// Seconds between attack-pattern switches inside the attack phase.
pub const PATTERN_SWITCH_INTERVAL: f32 = 5.0;

/// Seconds between summons inside the summon phase.
pub const SUMMON_INTERVAL: f32 = 3.0;

/// Most minions a boss keeps alive at once.
pub const MINION_CAP: usize = 5;

/// Minion stat multipliers relative to the base archetype.
pub const MINION_HEALTH_MULT: f32 = 1.5;
pub const MINION_DAMAGE_MULT: f32 = 1.2;

/// Shield hit points per shield phase.
pub const SHIELD_HP: f32 = 100.0;

/// Chance an absorbed hit is partly reflected at the shooter.
pub const SHIELD_REFLECT_CHANCE: f32 = 0.3;

/// Fraction of the incoming amount reflected when the reflect roll succeeds.
pub const SHIELD_REFLECT_FRACTION: f32 = 0.5;

/// Spiral arm count and per-tick angle step (reference rate 60 ticks/s).
const SPIRAL_ARMS: u32 = 3;
const SPIRAL_STEP: f32 = 0.2;
const TICK_RATE: f32 = 60.0;

/// Per-tick fire odds for the stochastic patterns, converted to rates.
const RAIN_SHOTS_PER_SEC: f32 = 0.1 * TICK_RATE;
const TARGETED_SHOTS_PER_SEC: f32 = 0.2 * TICK_RATE;

/// How far from the boss summoned minions appear.
const SUMMON_RADIUS: f32 = 90.0;

// === Components ===

/// Which phase the boss is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum BossPhase {
    Attack,
    Summon,
    Shield,
}

impl BossPhase {
    /// The two phases that are not `self`, in declaration order.
    #[must_use]
    pub const fn others(self) -> [Self; 2] {
        match self {
            Self::Attack => [Self::Summon, Self::Shield],
            Self::Summon => [Self::Attack, Self::Shield],
            Self::Shield => [Self::Attack, Self::Summon],
        }
    }
}

/// Attack-phase bullet patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AttackPattern {
    /// Three rotating arms of bullets.
    Spiral,
    /// Bullets falling from above the player at random x offsets.
    Rain,
    /// Aimed bursts straight at the player.
    Targeted,
}

impl AttackPattern {
    pub const ALL: &[Self] = &[Self::Spiral, Self::Rain, Self::Targeted];
}

/// Shield pool for the shield phase. Kept as a plain struct so the absorb
/// contract is testable without a world.
#[derive(Debug, Clone, Copy, Default, Reflect)]
pub struct ShieldState {
    pub hp: f32,
}

/// Result of the shield absorbing one hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldAbsorb {
    /// Damage sent back at the shooter (zero when the reflect roll fails).
    pub reflected: f32,
    /// The shield just broke; the boss is vulnerable from this hit onward.
    pub broke: bool,
}

impl ShieldState {
    /// Absorbs a hit: the boss takes nothing, the shield pool takes the full
    /// amount (floored at zero). `reflect_roll` is a uniform sample in
    /// `[0, 1)`; rolls under [`SHIELD_REFLECT_CHANCE`] bounce half the amount
    /// back.
    pub fn absorb(&mut self, amount: f32, reflect_roll: f32) -> ShieldAbsorb {
        self.hp = (self.hp - amount).max(0.0);
        ShieldAbsorb {
            reflected: if reflect_roll < SHIELD_REFLECT_CHANCE {
                amount * SHIELD_REFLECT_FRACTION
            } else {
                0.0
            },
            broke: self.hp <= 0.0,
        }
    }

    #[must_use]
    pub const fn active(&self) -> bool {
        self.hp > 0.0
    }
}

/// All per-boss phase state. Timestamps are virtual-clock seconds.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct BossPhases {
    pub phase: BossPhase,
    pub phase_ends_at: f32,
    pub pattern: AttackPattern,
    pub pattern_switch_at: f32,
    pub spiral_angle: f32,
    pub next_summon_at: f32,
    /// Live minion handles. Validated (and pruned) before each summon.
    pub minions: Vec<Entity>,
    pub shield: ShieldState,
}

impl BossPhases {
    /// A boss entering the arena starts in the attack phase.
    #[must_use]
    pub fn new(now: f32) -> Self {
        Self {
            phase: BossPhase::Attack,
            phase_ends_at: now + PHASE_DURATION,
            pattern: AttackPattern::Spiral,
            pattern_switch_at: now + PATTERN_SWITCH_INTERVAL,
            spiral_angle: 0.0,
            next_summon_at: 0.0,
            minions: Vec::new(),
            shield: ShieldState::default(),
        }
    }

    /// Transition into `phase` at time `now`, setting up phase-local state
    /// and tearing down the old phase's.
    pub fn enter_phase(&mut self, phase: BossPhase, now: f32, boss: &mut Boss) {
        self.phase = phase;
        self.phase_ends_at = now + PHASE_DURATION;
        // Leaving the shield phase always drops what's left of the shield.
        self.shield = ShieldState::default();
        boss.vulnerable = true;

        match phase {
            BossPhase::Attack => {
                self.pattern_switch_at = now + PATTERN_SWITCH_INTERVAL;
            }
            BossPhase::Summon => {
                // First summon fires immediately.
                self.next_summon_at = now;
            }
            BossPhase::Shield => {
                self.shield = ShieldState { hp: SHIELD_HP };
                boss.vulnerable = false;
            }
        }
    }
}

// === Pure functions ===

/// Uniform choice among the two non-active phases. `index` is 0 or 1.
#[must_use]
pub const fn next_phase(current: BossPhase, index: usize) -> BossPhase {
    current.others()[index % 2]
}

// === Systems ===

/// Rotates phases when their duration elapses, or immediately once a shield
/// phase's pool is emptied. Runs in `GameSet::Ai`.
fn orchestrate_phases(time: Res<Time>, mut bosses: Query<(&mut Boss, &mut BossPhases)>) {
    let now = time.elapsed_secs();
    for (mut boss, mut phases) in &mut bosses {
        let shield_broken = phases.phase == BossPhase::Shield && !phases.shield.active();
        if now < phases.phase_ends_at && !shield_broken {
            continue;
        }
        let next = next_phase(phases.phase, rand::rng().random_range(0..2));
        phases.enter_phase(next, now, &mut boss);
    }
}

/// Runs the active attack pattern. Runs in `GameSet::Combat`.
fn run_attack_pattern(
    time: Res<Time>,
    mut commands: Commands,
    mut bosses: Query<(Entity, &Attributes, &mut BossPhases, &GlobalTransform), With<Boss>>,
    player: Single<&GlobalTransform, With<Player>>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();
    let player_pos = player.translation().truncate();
    let mut rng = rand::rng();

    for (entity, attributes, mut phases, transform) in &mut bosses {
        if phases.phase != BossPhase::Attack {
            continue;
        }
        if now >= phases.pattern_switch_at {
            phases.pattern = AttackPattern::ALL[rng.random_range(0..AttackPattern::ALL.len())];
            phases.pattern_switch_at = now + PATTERN_SWITCH_INTERVAL;
        }

        let position = transform.translation().truncate();
        let damage = attributes.effective_damage();
        match phases.pattern {
            AttackPattern::Spiral => {
                phases.spiral_angle += SPIRAL_STEP * TICK_RATE * dt;
                for arm in 0..SPIRAL_ARMS {
                    let angle = phases.spiral_angle
                        + arm as f32 * std::f32::consts::TAU / SPIRAL_ARMS as f32;
                    spawn_projectile(
                        &mut commands,
                        entity,
                        Team::Enemy,
                        position,
                        ProjectileMotion::Spinning {
                            direction: Vec2::from_angle(angle),
                            angular_speed: SPIRAL_STEP,
                        },
                        damage,
                        BOSS_PROJECTILE_SPEED,
                        palette::BOSS_PROJECTILE,
                    );
                }
            }
            AttackPattern::Rain => {
                if rng.random_bool(f64::from((RAIN_SHOTS_PER_SEC * dt).min(1.0))) {
                    let x = player_pos.x + rng.random_range(-200.0..=200.0);
                    let origin = Vec2::new(x, position.y.max(player_pos.y) + 200.0);
                    spawn_projectile(
                        &mut commands,
                        entity,
                        Team::Enemy,
                        origin,
                        ProjectileMotion::Straight {
                            direction: Vec2::NEG_Y,
                        },
                        damage,
                        BOSS_PROJECTILE_SPEED,
                        palette::BOSS_PROJECTILE,
                    );
                }
            }
            AttackPattern::Targeted => {
                if rng.random_bool(f64::from((TARGETED_SHOTS_PER_SEC * dt).min(1.0))) {
                    spawn_projectile(
                        &mut commands,
                        entity,
                        Team::Enemy,
                        position,
                        ProjectileMotion::Straight {
                            direction: (player_pos - position).normalize_or(Vec2::NEG_Y),
                        },
                        damage,
                        BOSS_PROJECTILE_SPEED,
                        palette::BOSS_PROJECTILE,
                    );
                }
            }
        }
    }
}

/// Summons scaled minions on the summon cadence, up to the live cap.
/// Dead minion handles are pruned before counting. Runs in `GameSet::Combat`.
fn run_summons(
    time: Res<Time>,
    mut commands: Commands,
    mut bosses: Query<(&mut BossPhases, &GlobalTransform), With<Boss>>,
    live: Query<(), With<Enemy>>,
) {
    let now = time.elapsed_secs();
    let mut rng = rand::rng();

    for (mut phases, transform) in &mut bosses {
        if phases.phase != BossPhase::Summon {
            continue;
        }
        phases.minions.retain(|&minion| live.get(minion).is_ok());
        if now < phases.next_summon_at || phases.minions.len() >= MINION_CAP {
            continue;
        }
        phases.next_summon_at = now + SUMMON_INTERVAL;

        let archetype = EnemyArchetype::ALL[rng.random_range(0..EnemyArchetype::ALL.len())];
        let offset = Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU)) * SUMMON_RADIUS;
        let minion = spawn_enemy_scaled(
            &mut commands,
            archetype,
            transform.translation().truncate() + offset,
            MINION_HEALTH_MULT,
            MINION_DAMAGE_MULT,
        );
        phases.minions.push(minion);
    }
}

/// A dying boss takes its surviving minions with it. Runs before the death
/// sweep so the boss is still queryable on the tick it dies.
fn despawn_minions_with_boss(
    mut commands: Commands,
    bosses: Query<(&Health, &BossPhases), With<Boss>>,
    live: Query<(), With<Enemy>>,
) {
    for (health, phases) in &bosses {
        if health.current > 0.0 {
            continue;
        }
        for &minion in &phases.minions {
            if live.get(minion).is_ok() {
                commands.entity(minion).despawn();
            }
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<BossPhases>();

    app.add_systems(
        Update,
        orchestrate_phases.in_set(GameSet::Ai).run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        (run_attack_pattern, run_summons)
            .in_set(GameSet::Combat)
            .run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        despawn_minions_with_boss
            .in_set(GameSet::Death)
            .before(DeathCheck)
            .run_if(gameplay_running),
    );
}
