//! Bosses: heavyweight enemies that cycle through attack, summon, and
//! shield phases (see `phases`).

pub mod phases;

use bevy::prelude::*;

use crate::gameplay::attributes::Attributes;
use crate::gameplay::enemy::EnemyReward;
use crate::gameplay::player::Player;
use crate::gameplay::{Health, Hitbox, Team};
use crate::screens::GameState;
use crate::theme::palette;
use crate::{GameSet, Z_CHARACTER, gameplay_running};

use phases::BossPhases;

// === Constants ===

pub const BOSS_MAX_HEALTH: f32 = 1000.0;
pub const BOSS_SPEED: f32 = 120.0;
pub const BOSS_DAMAGE: f32 = 25.0;
pub const BOSS_ATTACK_SPEED: f32 = 1.0;
pub const BOSS_PROJECTILE_SPEED: f32 = 360.0;
pub const BOSS_SCORE: u32 = 200;

/// Boss collision box (larger than ordinary characters).
pub const BOSS_HITBOX: Vec2 = Vec2::new(60.0, 60.0);

/// Bosses always drop their full reward.
const BOSS_FRAGMENTS: u32 = 10;
const BOSS_STARS: u32 = 5;

// === Components ===

/// Marker plus the one piece of combat state the resolver needs every frame:
/// whether damage currently lands or is absorbed by the shield.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Boss {
    pub vulnerable: bool,
}

// === Spawning ===

/// Spawn a boss entity with all required components.
/// Single source of truth for the boss archetype.
pub fn spawn_boss(commands: &mut Commands, position: Vec2, now: f32) -> Entity {
    commands
        .spawn((
            Name::new("Boss"),
            Boss { vulnerable: true },
            Team::Enemy,
            Attributes::new(BOSS_MAX_HEALTH, BOSS_SPEED, BOSS_DAMAGE, BOSS_ATTACK_SPEED),
            Health::new(BOSS_MAX_HEALTH),
            Hitbox(BOSS_HITBOX),
            BossPhases::new(now),
            EnemyReward {
                score: BOSS_SCORE,
                fragment_chance: 1.0,
                fragments: BOSS_FRAGMENTS,
                star_chance: 1.0,
                stars: BOSS_STARS,
            },
            Sprite::from_color(palette::BOSS, BOSS_HITBOX),
            Transform::from_xyz(position.x, position.y, Z_CHARACTER),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

// === Systems ===

/// Bosses lumber toward the player regardless of phase.
/// Runs in `GameSet::Movement`.
fn boss_move(
    time: Res<Time>,
    mut bosses: Query<(&Attributes, &mut Transform), (With<Boss>, Without<Player>)>,
    player: Single<&GlobalTransform, With<Player>>,
) {
    let player_pos = player.translation().truncate();
    for (attributes, mut transform) in &mut bosses {
        let position = transform.translation.truncate();
        let step = (player_pos - position).normalize_or_zero()
            * attributes.effective_speed()
            * time.delta_secs();
        transform.translation.x += step.x;
        transform.translation.y += step.y;
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Boss>();

    app.add_plugins(phases::plugin);

    app.add_systems(
        Update,
        boss_move.in_set(GameSet::Movement).run_if(gameplay_running),
    );
}
