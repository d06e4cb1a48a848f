//! The arena: world bounds, camera, and background.
//!
//! The arena is a fixed rectangle centered on the origin. Characters are
//! clamped inside it; projectiles that leave it are pruned.

use bevy::camera::ScalingMode;
use bevy::prelude::*;

use crate::screens::GameState;
use crate::theme::palette;
use crate::Z_ARENA;

// === Constants ===

/// Arena width in world units.
pub const ARENA_WIDTH: f32 = 1280.0;

/// Arena height in world units.
pub const ARENA_HEIGHT: f32 = 720.0;

// === Resources ===

/// World-space arena bounds, queried by movement, AI wander, and projectile
/// pruning.
#[derive(Resource, Debug, Clone, Copy, Reflect)]
#[reflect(Resource)]
pub struct Arena {
    pub half_extents: Vec2,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
        }
    }
}

impl Arena {
    /// Clamps a point into the arena, keeping `margin` distance from each edge.
    #[must_use]
    pub fn clamp(&self, point: Vec2, margin: f32) -> Vec2 {
        let limit = self.half_extents - Vec2::splat(margin);
        point.clamp(-limit, limit)
    }

    /// Whether a point lies inside the arena, expanded outward by `margin`.
    #[must_use]
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        let limit = self.half_extents + Vec2::splat(margin);
        point.x.abs() <= limit.x && point.y.abs() <= limit.y
    }

    /// A uniformly random point at least `margin` from every edge.
    #[must_use]
    pub fn random_interior_point(&self, margin: f32) -> Vec2 {
        let limit = self.half_extents - Vec2::splat(margin);
        Vec2::new(
            rand::random_range(-limit.x..=limit.x),
            rand::random_range(-limit.y..=limit.y),
        )
    }
}

// === Systems ===

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Camera"),
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: ARENA_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}

fn spawn_background(mut commands: Commands) {
    commands.spawn((
        Name::new("Arena Background"),
        Sprite::from_color(palette::ARENA_BACKGROUND, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT)),
        Transform::from_xyz(0.0, 0.0, Z_ARENA),
        DespawnOnExit(GameState::InGame),
    ));
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Arena>().init_resource::<Arena>();

    app.add_systems(Startup, setup_camera);
    app.add_systems(OnEnter(GameState::InGame), spawn_background);
}
