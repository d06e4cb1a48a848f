//! Combat resolution: AABB overlap tests, projectile hits (including boss
//! shield routing), explosion area damage, mutual contact damage, and death.

use bevy::prelude::*;

use crate::gameplay::attributes::Attributes;
use crate::gameplay::boss::phases::BossPhases;
use crate::gameplay::boss::Boss;
use crate::gameplay::enemy::Enemy;
use crate::gameplay::player::{Player, SHELL_BLAST_RADIUS};
use crate::gameplay::projectile::{Explosion, Projectile, ProjectileMotion, spawn_explosion};
use crate::gameplay::{Health, Hitbox, Team};
use crate::menus::Menu;
use crate::{GameSet, gameplay_running};

// === System sets ===

/// `SystemSet` for death detection. Other systems can order against this
/// (e.g., `.before(DeathCheck)`) instead of referencing the function directly.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeathCheck;

// === Pure functions ===

/// Whether two axis-aligned boxes overlap. Boxes that merely touch along an
/// edge do not collide.
#[must_use]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    let delta = (a_pos - b_pos).abs();
    let reach = (a_size + b_size) / 2.0;
    delta.x < reach.x && delta.y < reach.y
}

// === Systems ===

/// Resolves projectile hits: each projectile damages at most one opposing
/// entity, then despawns. Shells detonate into an explosion instead of
/// dealing direct damage. Hits on a shielded boss are absorbed by the shield
/// (with a reflect chance back at the shooter); a breaking shield leaves the
/// boss vulnerable from that same hit onward.
fn handle_projectile_hits(
    time: Res<Time>,
    mut commands: Commands,
    projectiles: Query<(
        Entity,
        &Projectile,
        &ProjectileMotion,
        &Team,
        &Hitbox,
        &Transform,
    )>,
    candidates: Query<
        (Entity, &Team, &Hitbox, &GlobalTransform),
        (With<Health>, Without<Projectile>),
    >,
    mut healths: Query<(&mut Health, Option<&Attributes>)>,
    mut bosses: Query<(&mut Boss, &mut BossPhases)>,
) {
    let now = time.elapsed_secs();

    for (entity, projectile, motion, team, hitbox, transform) in &projectiles {
        let position = transform.translation.truncate();

        let mut hit = None;
        for (candidate, candidate_team, candidate_hitbox, candidate_pos) in &candidates {
            // No friendly fire
            if *candidate_team != team.opposing() {
                continue;
            }
            if aabb_overlap(
                position,
                hitbox.0,
                candidate_pos.translation().truncate(),
                candidate_hitbox.0,
            ) {
                hit = Some(candidate);
                break; // One hit per projectile
            }
        }
        let Some(target) = hit else {
            continue;
        };

        // Shells never deal direct damage; the explosion covers the target.
        if matches!(motion, ProjectileMotion::Shell { .. }) {
            spawn_explosion(
                &mut commands,
                projectile.shooter,
                *team,
                position,
                projectile.damage,
                SHELL_BLAST_RADIUS,
                now,
            );
            commands.entity(entity).despawn();
            continue;
        }

        if let Ok((mut boss, mut phases)) = bosses.get_mut(target)
            && !boss.vulnerable
            && phases.shield.active()
        {
            let result = phases.shield.absorb(projectile.damage, rand::random::<f32>());
            if result.broke {
                boss.vulnerable = true;
            }
            if result.reflected > 0.0
                && let Ok((mut health, attributes)) = healths.get_mut(projectile.shooter)
            {
                health.current -= scaled_damage(attributes, result.reflected);
            }
            commands.entity(entity).despawn();
            continue;
        }

        if let Ok((mut health, attributes)) = healths.get_mut(target) {
            health.current -= scaled_damage(attributes, projectile.damage);
        }
        commands.entity(entity).despawn();
    }
}

/// Applies each pending explosion's damage to every opposing entity in its
/// blast radius, exactly once.
fn resolve_explosions(
    mut explosions: Query<(&mut Explosion, &Team, &Transform)>,
    candidates: Query<(Entity, &Team, &GlobalTransform), With<Health>>,
    mut healths: Query<(&mut Health, Option<&Attributes>)>,
    mut bosses: Query<(&mut Boss, &mut BossPhases)>,
) {
    for (mut explosion, team, transform) in &mut explosions {
        if !explosion.damage_pending {
            continue;
        }
        explosion.damage_pending = false;

        let center = transform.translation.truncate();
        for (candidate, candidate_team, candidate_pos) in &candidates {
            if candidate_team == team {
                continue;
            }
            if candidate_pos.translation().truncate().distance(center) > explosion.radius {
                continue;
            }

            if let Ok((mut boss, mut phases)) = bosses.get_mut(candidate)
                && !boss.vulnerable
                && phases.shield.active()
            {
                let result = phases.shield.absorb(explosion.damage, rand::random::<f32>());
                if result.broke {
                    boss.vulnerable = true;
                }
                if result.reflected > 0.0
                    && let Ok((mut health, attributes)) = healths.get_mut(explosion.shooter)
                {
                    health.current -= scaled_damage(attributes, result.reflected);
                }
                continue;
            }

            if let Ok((mut health, attributes)) = healths.get_mut(candidate) {
                health.current -= scaled_damage(attributes, explosion.damage);
            }
        }
    }
}

/// Mutual contact damage: while the player overlaps an enemy or boss, both
/// sides take the other's damage every tick, with no cooldown. A shielded
/// boss still hurts the player but takes nothing itself.
fn contact_damage(
    mut player: Single<
        (&Hitbox, &GlobalTransform, &mut Health, &Attributes),
        With<Player>,
    >,
    mut hostiles: Query<
        (
            &Hitbox,
            &GlobalTransform,
            &mut Health,
            &Attributes,
            Option<&Boss>,
        ),
        (Or<(With<Enemy>, With<Boss>)>, Without<Player>),
    >,
) {
    let (player_hitbox, player_pos, player_health, player_attributes) = &mut *player;
    let player_xy = player_pos.translation().truncate();

    for (hitbox, pos, mut health, attributes, boss) in &mut hostiles {
        if !aabb_overlap(player_xy, player_hitbox.0, pos.translation().truncate(), hitbox.0) {
            continue;
        }
        player_health.current -=
            player_attributes.damage_after_defense(attributes.effective_damage());
        if boss.is_none_or(|boss| boss.vulnerable) {
            health.current -= scaled_damage(Some(attributes), player_attributes.effective_damage());
        }
    }
}

fn scaled_damage(attributes: Option<&Attributes>, amount: f32) -> f32 {
    attributes.map_or(amount, |attributes| attributes.damage_after_defense(amount))
}

/// Despawns any entity whose health drops to 0 or below.
fn check_death(mut commands: Commands, query: Query<(Entity, &Health)>) {
    for (entity, health) in &query {
        if health.current <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Opens the game-over overlay when the player's health is gone. Runs before
/// `DeathCheck` so the dying player entity is still queryable.
fn detect_player_death(
    player: Single<&Health, With<Player>>,
    mut next_menu: ResMut<NextState<Menu>>,
) {
    if player.current <= 0.0 {
        next_menu.set(Menu::GameOver);
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (handle_projectile_hits, resolve_explosions, contact_damage)
            .chain_ignore_deferred()
            .in_set(GameSet::Combat)
            .run_if(gameplay_running),
    );

    app.add_systems(
        Update,
        detect_player_death
            .in_set(GameSet::Death)
            .before(DeathCheck)
            .run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        check_death
            .in_set(DeathCheck)
            .in_set(GameSet::Death)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn overlapping_boxes_collide() {
        assert!(aabb_overlap(
            Vec2::ZERO,
            Vec2::splat(40.0),
            Vec2::new(30.0, 0.0),
            Vec2::splat(40.0),
        ));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        assert!(!aabb_overlap(
            Vec2::ZERO,
            Vec2::splat(40.0),
            Vec2::new(40.0, 0.0),
            Vec2::splat(40.0),
        ));
    }

    #[test]
    fn distant_boxes_do_not_collide() {
        assert!(!aabb_overlap(
            Vec2::ZERO,
            Vec2::splat(40.0),
            Vec2::new(100.0, 100.0),
            Vec2::splat(40.0),
        ));
    }

    #[test]
    fn contained_box_collides() {
        assert!(aabb_overlap(
            Vec2::ZERO,
            Vec2::splat(100.0),
            Vec2::new(5.0, 5.0),
            Vec2::splat(10.0),
        ));
    }

    #[test]
    fn scaled_damage_without_attributes_is_raw() {
        assert_eq!(scaled_damage(None, 25.0), 25.0);
    }
}
