//! Projectiles: straight rounds, homing and spinning enemy fire, and
//! explosive shells that detonate into area damage.
//!
//! Motion runs in `GameSet::Movement`; hits are resolved afterwards in
//! `GameSet::Combat` (see `combat.rs`), so a projectile never damages
//! anything on the frame it spawns.

use bevy::prelude::*;

use crate::gameplay::arena::Arena;
use crate::gameplay::{Hitbox, Team};
use crate::screens::GameState;
use crate::{GameSet, Z_EFFECT, Z_PROJECTILE, gameplay_running};

// === Constants ===

/// Reference simulation rate the turn-rate tuning was authored against.
const TURN_REFERENCE_RATE: f32 = 60.0;

/// Distance past the arena edge before an escaped projectile is pruned.
const PRUNE_MARGIN: f32 = 50.0;

/// How long an explosion sprite lingers after dealing its damage.
const EXPLOSION_LIFETIME: f32 = 0.3;

/// Projectile visual radius (pixels).
const PROJECTILE_RADIUS: f32 = 4.0;

// === Components ===

/// A projectile in flight. Damage and shooter are fixed at spawn time; the
/// shooter handle may dangle (reflection then has nowhere to land).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub damage: f32,
    pub speed: f32,
    pub shooter: Entity,
}

/// How a projectile steers each frame.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub enum ProjectileMotion {
    /// Flies along a fixed unit direction.
    Straight { direction: Vec2 },
    /// Steers toward a target by lerping the direction vector and
    /// renormalizing. Falls back to straight flight if the target is gone.
    Homing {
        direction: Vec2,
        target: Entity,
        turn_rate: f32,
    },
    /// Straight flight with a visual spin: the sprite rotates at
    /// `angular_speed` radians/second, the heading never changes.
    Spinning {
        direction: Vec2,
        angular_speed: f32,
    },
    /// Straight flight that detonates after `max_range` distance (or on
    /// impact, handled by the combat resolver).
    Shell {
        direction: Vec2,
        max_range: f32,
        traveled: f32,
    },
}

/// One-shot area damage left behind by a detonated shell. `damage` is
/// consumed exactly once by the combat resolver, then the sprite lingers
/// until `expires_at`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Explosion {
    pub damage: f32,
    pub radius: f32,
    pub shooter: Entity,
    pub damage_pending: bool,
    pub expires_at: f32,
}

// === Spawning ===

/// Spawn a projectile entity with all required components.
/// Single source of truth for the projectile archetype.
pub fn spawn_projectile(
    commands: &mut Commands,
    shooter: Entity,
    team: Team,
    position: Vec2,
    motion: ProjectileMotion,
    damage: f32,
    speed: f32,
    color: Color,
) -> Entity {
    commands
        .spawn((
            Name::new("Projectile"),
            Projectile {
                damage,
                speed,
                shooter,
            },
            motion,
            team,
            Hitbox(Vec2::splat(PROJECTILE_RADIUS * 2.0)),
            Sprite::from_color(color, Vec2::splat(PROJECTILE_RADIUS * 2.0)),
            Transform::from_xyz(position.x, position.y, Z_PROJECTILE),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Spawn an explosion at a detonation point. The combat resolver applies the
/// area damage on its next pass.
pub fn spawn_explosion(
    commands: &mut Commands,
    shooter: Entity,
    team: Team,
    position: Vec2,
    damage: f32,
    radius: f32,
    now: f32,
) -> Entity {
    commands
        .spawn((
            Name::new("Explosion"),
            Explosion {
                damage,
                radius,
                shooter,
                damage_pending: true,
                expires_at: now + EXPLOSION_LIFETIME,
            },
            team,
            Sprite::from_color(
                crate::theme::palette::EXPLOSION,
                Vec2::splat(radius * 2.0),
            ),
            Transform::from_xyz(position.x, position.y, Z_EFFECT),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

// === Pure helpers ===

/// One homing steering step: lerp the current direction toward the target
/// direction and renormalize. Always returns a unit vector (falls back to the
/// current direction when the lerp degenerates).
#[must_use]
pub fn homing_step(direction: Vec2, to_target: Vec2, turn_rate: f32, delta_secs: f32) -> Vec2 {
    let target_dir = to_target.normalize_or_zero();
    if target_dir == Vec2::ZERO {
        return direction;
    }
    let t = (turn_rate * TURN_REFERENCE_RATE * delta_secs).clamp(0.0, 1.0);
    direction.lerp(target_dir, t).normalize_or(direction)
}

// === Systems ===

/// Advances every projectile along its motion rule.
fn move_projectiles(
    time: Res<Time>,
    mut projectiles: Query<(&Projectile, &mut ProjectileMotion, &mut Transform)>,
    positions: Query<&GlobalTransform>,
) {
    let dt = time.delta_secs();
    for (projectile, mut motion, mut transform) in &mut projectiles {
        let position = transform.translation.truncate();
        let direction = match &mut *motion {
            ProjectileMotion::Straight { direction } => *direction,
            ProjectileMotion::Homing {
                direction,
                target,
                turn_rate,
            } => {
                // Dangling target: keep flying straight on the last heading.
                if let Ok(target_pos) = positions.get(*target) {
                    let to_target = target_pos.translation().truncate() - position;
                    *direction = homing_step(*direction, to_target, *turn_rate, dt);
                }
                *direction
            }
            ProjectileMotion::Spinning {
                direction,
                angular_speed,
            } => {
                // Spin is cosmetic only; the round keeps its heading.
                transform.rotate_z(*angular_speed * dt);
                *direction
            }
            ProjectileMotion::Shell {
                direction,
                traveled,
                ..
            } => {
                *traveled += projectile.speed * dt;
                *direction
            }
        };

        let step = direction * projectile.speed * dt;
        transform.translation.x += step.x;
        transform.translation.y += step.y;
    }
}

/// Detonates shells that have flown their full range.
fn detonate_spent_shells(
    time: Res<Time>,
    mut commands: Commands,
    shells: Query<(Entity, &Projectile, &ProjectileMotion, &Team, &Transform)>,
) {
    let now = time.elapsed_secs();
    for (entity, projectile, motion, team, transform) in &shells {
        let ProjectileMotion::Shell {
            max_range,
            traveled,
            ..
        } = motion
        else {
            continue;
        };
        if traveled >= max_range {
            spawn_explosion(
                &mut commands,
                projectile.shooter,
                *team,
                transform.translation.truncate(),
                projectile.damage,
                crate::gameplay::player::SHELL_BLAST_RADIUS,
                now,
            );
            commands.entity(entity).despawn();
        }
    }
}

/// Despawns projectiles that have left the arena (plus a margin).
fn prune_out_of_bounds(
    arena: Res<Arena>,
    mut commands: Commands,
    projectiles: Query<(Entity, &Transform), With<Projectile>>,
) {
    for (entity, transform) in &projectiles {
        if !arena.contains(transform.translation.truncate(), PRUNE_MARGIN) {
            commands.entity(entity).despawn();
        }
    }
}

/// Removes explosion sprites whose linger time is up.
fn expire_explosions(
    time: Res<Time>,
    mut commands: Commands,
    explosions: Query<(Entity, &Explosion)>,
) {
    let now = time.elapsed_secs();
    for (entity, explosion) in &explosions {
        if now >= explosion.expires_at && !explosion.damage_pending {
            commands.entity(entity).despawn();
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Projectile>()
        .register_type::<ProjectileMotion>()
        .register_type::<Explosion>();

    app.add_systems(
        Update,
        (move_projectiles, detonate_spent_shells, prune_out_of_bounds)
            .chain_ignore_deferred()
            .in_set(GameSet::Movement)
            .run_if(gameplay_running),
    );

    app.add_systems(
        Update,
        expire_explosions
            .in_set(GameSet::Death)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn homing_step_stays_unit_length() {
        let mut direction = Vec2::X;
        for _ in 0..200 {
            direction = homing_step(direction, Vec2::new(-3.0, 7.0), 0.1, 1.0 / 60.0);
            assert!((direction.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn homing_step_turns_toward_target() {
        let direction = Vec2::X;
        let to_target = Vec2::Y;
        let turned = homing_step(direction, to_target, 0.1, 1.0 / 60.0);
        assert!(turned.y > 0.0);
        assert!(turned.angle_to(to_target).abs() < direction.angle_to(to_target).abs());
    }

    #[test]
    fn homing_step_ignores_degenerate_target() {
        let direction = Vec2::X;
        assert_eq!(homing_step(direction, Vec2::ZERO, 0.1, 1.0 / 60.0), direction);
    }
}
