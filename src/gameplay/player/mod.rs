//! The player: classes, stats, movement, attacks, and the active skill.

pub mod input;

use bevy::prelude::*;

use crate::gameplay::arena::Arena;
use crate::gameplay::attributes::{Attributes, BonusChannel};
use crate::gameplay::cooldown::{ActiveBuffs, AttackCooldown, Cooldown};
use crate::gameplay::projectile::{ProjectileMotion, spawn_projectile};
use crate::gameplay::{CHARACTER_HITBOX, Health, Hitbox, Team};
use crate::screens::GameState;
use crate::theme::palette;
use crate::{GameSet, Z_CHARACTER, gameplay_running};

use input::PlayerIntent;

// === Constants ===

/// Blast radius of an artillery shell detonation.
pub const SHELL_BLAST_RADIUS: f32 = 60.0;

/// Longest distance a shell will fly before detonating on its own.
pub const SHELL_MAX_RANGE: f32 = 500.0;

/// Shortest shell flight, so point-blank clicks still arc away from the
/// player instead of detonating on top of them.
const SHELL_MIN_RANGE: f32 = 80.0;

// === Class system ===

/// Playable classes. Each is a stat row, a skill, and a level-up growth row.
#[derive(Component, Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[reflect(Component, Resource)]
pub enum PlayerClass {
    #[default]
    Soldier,
    Assault,
    Sniper,
    Tank,
    Artillery,
}

impl PlayerClass {
    /// All classes, in selection-menu order.
    pub const ALL: &[Self] = &[
        Self::Soldier,
        Self::Assault,
        Self::Sniper,
        Self::Tank,
        Self::Artillery,
    ];

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Soldier => "Soldier",
            Self::Assault => "Assault",
            Self::Sniper => "Sniper",
            Self::Tank => "Tank",
            Self::Artillery => "Artillery",
        }
    }
}

/// Base stats for a player class. All values are compile-time constants.
#[derive(Debug, Clone, Copy)]
pub struct ClassStats {
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
    pub attack_speed: f32,
    pub projectile_speed: f32,
}

/// Look up base stats for a class.
#[must_use]
pub const fn class_stats(class: PlayerClass) -> ClassStats {
    match class {
        PlayerClass::Soldier => ClassStats {
            max_health: 120.0,
            speed: 240.0,
            damage: 15.0,
            attack_speed: 2.0,
            projectile_speed: 600.0,
        },
        PlayerClass::Assault => ClassStats {
            max_health: 100.0,
            speed: 360.0,
            damage: 12.0,
            attack_speed: 3.0,
            projectile_speed: 720.0,
        },
        PlayerClass::Sniper => ClassStats {
            max_health: 80.0,
            speed: 240.0,
            damage: 35.0,
            attack_speed: 1.0,
            projectile_speed: 1200.0,
        },
        PlayerClass::Tank => ClassStats {
            max_health: 150.0,
            speed: 180.0,
            damage: 20.0,
            attack_speed: 1.5,
            projectile_speed: 480.0,
        },
        PlayerClass::Artillery => ClassStats {
            max_health: 80.0,
            speed: 180.0,
            damage: 30.0,
            attack_speed: 1.0,
            projectile_speed: 480.0,
        },
    }
}

/// A class skill: a timed bonus on one attribute channel behind its own
/// cooldown.
#[derive(Debug, Clone, Copy)]
pub struct SkillSpec {
    pub cooldown: f32,
    pub duration: f32,
    pub channel: BonusChannel,
    pub amount: f32,
}

/// Look up the skill for a class.
#[must_use]
pub const fn skill_spec(class: PlayerClass) -> SkillSpec {
    match class {
        PlayerClass::Soldier => SkillSpec {
            cooldown: 8.0,
            duration: 3.0,
            channel: BonusChannel::AttackSpeed,
            amount: 1.0,
        },
        PlayerClass::Assault => SkillSpec {
            cooldown: 5.0,
            duration: 1.0,
            channel: BonusChannel::Speed,
            amount: 2.0,
        },
        PlayerClass::Sniper => SkillSpec {
            cooldown: 8.0,
            duration: 3.0,
            channel: BonusChannel::Damage,
            amount: 2.0,
        },
        PlayerClass::Tank => SkillSpec {
            cooldown: 12.0,
            duration: 4.0,
            channel: BonusChannel::Defense,
            amount: 0.5,
        },
        PlayerClass::Artillery => SkillSpec {
            cooldown: 12.0,
            duration: 0.5,
            channel: BonusChannel::Damage,
            amount: 2.0,
        },
    }
}

/// Flat base-stat increases applied on each level up.
#[derive(Debug, Clone, Copy)]
pub struct LevelGrowth {
    pub max_health: f32,
    pub damage: f32,
    pub attack_speed: f32,
}

/// Look up per-level growth for a class.
#[must_use]
pub const fn level_growth(class: PlayerClass) -> LevelGrowth {
    match class {
        PlayerClass::Soldier => LevelGrowth {
            max_health: 10.0,
            damage: 2.0,
            attack_speed: 0.1,
        },
        PlayerClass::Assault => LevelGrowth {
            max_health: 8.0,
            damage: 1.5,
            attack_speed: 0.15,
        },
        PlayerClass::Sniper => LevelGrowth {
            max_health: 6.0,
            damage: 3.0,
            attack_speed: 0.05,
        },
        PlayerClass::Tank => LevelGrowth {
            max_health: 12.0,
            damage: 2.0,
            attack_speed: 0.1,
        },
        PlayerClass::Artillery => LevelGrowth {
            max_health: 6.0,
            damage: 4.0,
            attack_speed: 0.05,
        },
    }
}

// === Components ===

/// Marker for the player entity.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Cooldown gate for the class skill.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SkillCooldown(pub Cooldown);

// === Resources ===

/// Class chosen on the main menu, consumed when the run starts.
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct SelectedClass(pub PlayerClass);

// === Spawning ===

/// Spawn the player entity with all required components.
/// Single source of truth for the player archetype.
pub fn spawn_player(commands: &mut Commands, class: PlayerClass) -> Entity {
    let stats = class_stats(class);
    commands
        .spawn((
            Name::new(format!("Player {}", class.display_name())),
            Player,
            class,
            Team::Player,
            Attributes::new(stats.max_health, stats.speed, stats.damage, stats.attack_speed),
            Health::new(stats.max_health),
            Hitbox(CHARACTER_HITBOX),
            AttackCooldown::default(),
            SkillCooldown::default(),
            ActiveBuffs::default(),
            Sprite::from_color(palette::PLAYER, CHARACTER_HITBOX),
            Transform::from_xyz(0.0, 0.0, Z_CHARACTER),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

fn spawn_player_on_enter(mut commands: Commands, selected: Res<SelectedClass>) {
    spawn_player(&mut commands, selected.0);
}

// === Systems ===

/// Applies movement intent, clamped to the arena. Runs in `GameSet::Movement`.
fn move_player(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    arena: Res<Arena>,
    mut player: Single<(&Attributes, &Hitbox, &mut Transform), With<Player>>,
) {
    let (attributes, hitbox, transform) = &mut *player;
    let step = intent.move_direction * attributes.effective_speed() * time.delta_secs();
    let next = arena.clamp(
        transform.translation.truncate() + step,
        hitbox.0.x / 2.0,
    );
    transform.translation.x = next.x;
    transform.translation.y = next.y;
}

/// Fires toward the cursor when the trigger is held and the attack cooldown
/// allows it. The artillery class lobs a shell that detonates at the aimed
/// point (clamped to its range band); every other class fires a straight
/// round. Runs in `GameSet::Combat`.
fn player_attack(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    mut commands: Commands,
    mut player: Single<
        (
            Entity,
            &PlayerClass,
            &Attributes,
            &mut AttackCooldown,
            &GlobalTransform,
        ),
        With<Player>,
    >,
) {
    if !intent.fire {
        return;
    }
    let Some(aim) = intent.aim else {
        return;
    };

    let (entity, class, attributes, cooldown, transform) = &mut *player;
    let now = time.elapsed_secs();
    let period = 1.0 / attributes.effective_attack_speed();
    if !cooldown.0.ready(now, period) {
        return;
    }

    let position = transform.translation().truncate();
    let to_aim = aim - position;
    let direction = to_aim.normalize_or_zero();
    if direction == Vec2::ZERO {
        return;
    }
    cooldown.0.trigger(now);

    let stats = class_stats(**class);
    let motion = if **class == PlayerClass::Artillery {
        ProjectileMotion::Shell {
            direction,
            max_range: to_aim.length().clamp(SHELL_MIN_RANGE, SHELL_MAX_RANGE),
            traveled: 0.0,
        }
    } else {
        ProjectileMotion::Straight { direction }
    };

    spawn_projectile(
        &mut commands,
        *entity,
        Team::Player,
        position,
        motion,
        attributes.effective_damage(),
        stats.projectile_speed,
        palette::PLAYER_PROJECTILE,
    );
}

/// Activates the class skill: applies its timed bonus and starts its
/// cooldown. Runs in `GameSet::Combat`.
fn activate_skill(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    mut player: Single<
        (
            &PlayerClass,
            &mut Attributes,
            &mut ActiveBuffs,
            &mut SkillCooldown,
        ),
        With<Player>,
    >,
) {
    if !intent.skill {
        return;
    }

    let (class, attributes, buffs, cooldown) = &mut *player;
    let skill = skill_spec(**class);
    let now = time.elapsed_secs();
    if !cooldown.0.ready(now, skill.cooldown) {
        return;
    }
    cooldown.0.trigger(now);
    buffs.apply(attributes, skill.channel, skill.amount, now + skill.duration);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Player>()
        .register_type::<PlayerClass>()
        .register_type::<SkillCooldown>()
        .register_type::<SelectedClass>()
        .register_type::<PlayerIntent>()
        .init_resource::<SelectedClass>()
        .init_resource::<PlayerIntent>();

    app.add_systems(OnEnter(GameState::InGame), spawn_player_on_enter);

    app.add_systems(
        Update,
        input::collect_input
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        move_player.in_set(GameSet::Movement).run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        (activate_skill, player_attack)
            .chain()
            .in_set(GameSet::Combat)
            .run_if(gameplay_running),
    );
}
