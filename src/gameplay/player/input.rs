//! Input snapshotting: device state is collected once per frame into
//! [`PlayerIntent`] so the simulation never polls hardware directly.

use bevy::prelude::*;

/// What the player wants to do this frame, in world-space terms.
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct PlayerIntent {
    /// Normalized movement direction, or zero when idle.
    pub move_direction: Vec2,
    /// Cursor position in world space, if the cursor is over the window.
    pub aim: Option<Vec2>,
    /// Primary fire held.
    pub fire: bool,
    /// Skill key pressed this frame.
    pub skill: bool,
}

/// Reads keyboard and mouse into [`PlayerIntent`]. Runs in `GameSet::Input`.
pub(super) fn collect_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    window: Single<&Window>,
    camera: Single<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut intent: ResMut<PlayerIntent>,
) {
    let mut direction = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        direction.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        direction.y -= 1.0;
    }

    let (camera, camera_global) = *camera;
    let aim = window
        .cursor_position()
        .and_then(|screen_pos| camera.viewport_to_world_2d(camera_global, screen_pos).ok());

    *intent = PlayerIntent {
        move_direction: direction.normalize_or_zero(),
        aim,
        fire: mouse.pressed(MouseButton::Left),
        skill: keyboard.just_pressed(KeyCode::Space),
    };
}
