//! Gameplay domain: attributes, cooldowns, arena, combat, projectiles,
//! player, enemies, bosses, and progression.

pub mod arena;
pub mod attributes;
pub mod boss;
pub mod combat;
pub mod cooldown;
pub mod enemy;
pub mod hud;
pub mod player;
pub mod progression;
pub mod projectile;

use bevy::prelude::*;

// === Shared components ===

/// Which side an entity fights for. Drives targeting and friendly-fire checks.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    #[must_use]
    pub const fn opposing(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Current and maximum hit points.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }
}

/// Axis-aligned collision box size (full width and height, centered on the
/// entity's translation). Collision is plain AABB overlap, no physics engine.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hitbox(pub Vec2);

/// Default character collision box.
pub const CHARACTER_HITBOX: Vec2 = Vec2::new(40.0, 40.0);

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Team>()
        .register_type::<Health>()
        .register_type::<Hitbox>()
        .register_type::<attributes::Attributes>();

    app.add_plugins((
        arena::plugin,
        cooldown::plugin,
        projectile::plugin,
        player::plugin,
        enemy::plugin,
        boss::plugin,
        combat::plugin,
        progression::plugin,
        hud::plugin,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn health_new_sets_current_to_max() {
        let health = Health::new(120.0);
        assert_eq!(health.current, 120.0);
        assert_eq!(health.max, 120.0);
    }

    #[test]
    fn team_opposing_flips_sides() {
        assert_eq!(Team::Player.opposing(), Team::Enemy);
        assert_eq!(Team::Enemy.opposing(), Team::Player);
    }
}
