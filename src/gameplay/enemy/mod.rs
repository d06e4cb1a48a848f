//! Enemies: geometric archetypes, their fire patterns, and kill rewards.

pub mod ai;
pub mod spawn;

use bevy::prelude::*;

use crate::gameplay::attributes::Attributes;
use crate::gameplay::cooldown::AttackCooldown;
use crate::gameplay::player::Player;
use crate::gameplay::projectile::{ProjectileMotion, spawn_projectile};
use crate::gameplay::{CHARACTER_HITBOX, Health, Hitbox, Team};
use crate::screens::GameState;
use crate::theme::palette;
use crate::{GameSet, Z_CHARACTER, gameplay_running};

use ai::{AiState, EnemyAi};

// === Constants ===

/// Chance an ordinary enemy drops a fragment on death.
const FRAGMENT_DROP_CHANCE: f32 = 0.3;

/// Chance an ordinary enemy drops a star on death.
const STAR_DROP_CHANCE: f32 = 0.1;

/// How far every enemy can see the player.
pub const DETECTION_RANGE: f32 = 400.0;

// === Components ===

/// Marker for enemy entities.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Enemy;

/// Geometric enemy archetypes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum EnemyArchetype {
    Triangle,
    Circle,
    Square,
}

impl EnemyArchetype {
    /// All archetypes, for iteration and random picks.
    pub const ALL: &[Self] = &[Self::Triangle, Self::Circle, Self::Square];

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Triangle => "Triangle",
            Self::Circle => "Circle",
            Self::Square => "Square",
        }
    }
}

/// How an archetype shoots once its attack cooldown allows it.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub enum FirePattern {
    /// One straight round at the player.
    Single,
    /// A fan of straight rounds centered on the player.
    Spread { count: u32, arc_degrees: f32 },
    /// One homing round that steers toward the player.
    Homing { turn_rate: f32 },
}

/// Stats for an enemy archetype. All values are compile-time constants.
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeStats {
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
    pub attack_speed: f32,
    pub attack_range: f32,
    pub projectile_speed: f32,
    pub score: u32,
    pub pattern: FirePattern,
}

/// Look up stats for an enemy archetype.
#[must_use]
pub const fn archetype_stats(archetype: EnemyArchetype) -> ArchetypeStats {
    match archetype {
        EnemyArchetype::Triangle => ArchetypeStats {
            max_health: 60.0,
            speed: 360.0,
            damage: 10.0,
            attack_speed: 1.0,
            attack_range: 300.0,
            projectile_speed: 480.0,
            score: 10,
            pattern: FirePattern::Single,
        },
        EnemyArchetype::Circle => ArchetypeStats {
            max_health: 80.0,
            speed: 240.0,
            damage: 15.0,
            attack_speed: 0.8,
            attack_range: 150.0,
            projectile_speed: 360.0,
            score: 15,
            pattern: FirePattern::Spread {
                count: 3,
                arc_degrees: 30.0,
            },
        },
        EnemyArchetype::Square => ArchetypeStats {
            max_health: 100.0,
            speed: 180.0,
            damage: 20.0,
            attack_speed: 0.5,
            attack_range: 200.0,
            projectile_speed: 300.0,
            score: 20,
            pattern: FirePattern::Homing { turn_rate: 0.1 },
        },
    }
}

/// What killing this entity pays out. Rolled independently per drop kind.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct EnemyReward {
    pub score: u32,
    pub fragment_chance: f32,
    pub fragments: u32,
    pub star_chance: f32,
    pub stars: u32,
}

// === Spawning ===

/// Spawn an enemy with stats scaled by the given multipliers (used for boss
/// minions). Single source of truth for the enemy archetype bundle.
pub fn spawn_enemy_scaled(
    commands: &mut Commands,
    archetype: EnemyArchetype,
    position: Vec2,
    health_mult: f32,
    damage_mult: f32,
) -> Entity {
    let stats = archetype_stats(archetype);
    let max_health = stats.max_health * health_mult;
    commands
        .spawn((
            Name::new(format!("Enemy {}", archetype.display_name())),
            Enemy,
            archetype,
            Team::Enemy,
            Attributes::new(
                max_health,
                stats.speed,
                stats.damage * damage_mult,
                stats.attack_speed,
            ),
            Health::new(max_health),
            Hitbox(CHARACTER_HITBOX),
            stats.pattern,
            AttackCooldown::default(),
            EnemyAi::default(),
            EnemyReward {
                score: stats.score,
                fragment_chance: FRAGMENT_DROP_CHANCE,
                fragments: 1,
                star_chance: STAR_DROP_CHANCE,
                stars: 1,
            },
            Sprite::from_color(palette::enemy_color(archetype), CHARACTER_HITBOX),
            Transform::from_xyz(position.x, position.y, Z_CHARACTER),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Spawn an unscaled enemy.
pub fn spawn_enemy(commands: &mut Commands, archetype: EnemyArchetype, position: Vec2) -> Entity {
    spawn_enemy_scaled(commands, archetype, position, 1.0, 1.0)
}

// === Systems ===

/// Fires at the player when in the attack state and off cooldown, following
/// the archetype's pattern. Runs in `GameSet::Combat`.
fn enemy_attack(
    time: Res<Time>,
    mut commands: Commands,
    mut enemies: Query<
        (
            Entity,
            &EnemyAi,
            &EnemyArchetype,
            &FirePattern,
            &Attributes,
            &mut AttackCooldown,
            &GlobalTransform,
        ),
        With<Enemy>,
    >,
    player: Single<(Entity, &GlobalTransform), With<Player>>,
) {
    let (player_entity, player_pos) = *player;
    let now = time.elapsed_secs();

    for (entity, ai, archetype, pattern, attributes, mut cooldown, transform) in &mut enemies {
        if ai.state != AiState::Attack {
            continue;
        }
        let period = 1.0 / attributes.effective_attack_speed();
        if !cooldown.0.ready(now, period) {
            continue;
        }

        let position = transform.translation().truncate();
        let direction =
            (player_pos.translation().truncate() - position).normalize_or(Vec2::X);
        cooldown.0.trigger(now);

        let projectile_speed = archetype_stats(*archetype).projectile_speed;
        let damage = attributes.effective_damage();
        match *pattern {
            FirePattern::Single => {
                spawn_projectile(
                    &mut commands,
                    entity,
                    Team::Enemy,
                    position,
                    ProjectileMotion::Straight { direction },
                    damage,
                    projectile_speed,
                    palette::ENEMY_PROJECTILE,
                );
            }
            FirePattern::Spread { count, arc_degrees } => {
                let arc = arc_degrees.to_radians();
                for i in 0..count {
                    let t = if count > 1 {
                        i as f32 / (count - 1) as f32
                    } else {
                        0.5
                    };
                    let angle = (t - 0.5) * arc;
                    spawn_projectile(
                        &mut commands,
                        entity,
                        Team::Enemy,
                        position,
                        ProjectileMotion::Straight {
                            direction: Vec2::from_angle(angle).rotate(direction),
                        },
                        damage,
                        projectile_speed,
                        palette::ENEMY_PROJECTILE,
                    );
                }
            }
            FirePattern::Homing { turn_rate } => {
                spawn_projectile(
                    &mut commands,
                    entity,
                    Team::Enemy,
                    position,
                    ProjectileMotion::Homing {
                        direction,
                        target: player_entity,
                        turn_rate,
                    },
                    damage,
                    projectile_speed,
                    palette::ENEMY_PROJECTILE,
                );
            }
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Enemy>()
        .register_type::<EnemyArchetype>()
        .register_type::<FirePattern>()
        .register_type::<EnemyReward>();

    app.add_plugins((ai::plugin, spawn::plugin));

    app.add_systems(
        Update,
        enemy_attack.in_set(GameSet::Combat).run_if(gameplay_running),
    );
}
