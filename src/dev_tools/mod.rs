//! Development tools — only included with `cargo run --features dev`.
//!
//! Debug spawners and state-transition logging go here.
//! This module is stripped from release builds.

use bevy::prelude::*;

use crate::gameplay::arena::Arena;
use crate::gameplay::boss::spawn_boss;
use crate::gameplay::enemy::{EnemyArchetype, spawn_enemy};
use crate::menus::Menu;
use crate::screens::GameState;
use crate::{GameSet, gameplay_running};

/// One of each archetype per E key press.
fn debug_spawn_enemies(
    keyboard: Res<ButtonInput<KeyCode>>,
    arena: Res<Arena>,
    mut commands: Commands,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }

    for &archetype in EnemyArchetype::ALL {
        spawn_enemy(&mut commands, archetype, arena.random_interior_point(60.0));
    }
}

/// B drops a boss at the top edge.
fn debug_spawn_boss(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    arena: Res<Arena>,
    mut commands: Commands,
) {
    if !keyboard.just_pressed(KeyCode::KeyB) {
        return;
    }

    spawn_boss(
        &mut commands,
        Vec2::new(0.0, arena.half_extents.y - 100.0),
        time.elapsed_secs(),
    );
}

fn log_game_state_transitions(mut transitions: MessageReader<StateTransitionEvent<GameState>>) {
    for transition in transitions.read() {
        info!(
            "GameState: {:?} -> {:?}",
            transition.exited, transition.entered
        );
    }
}

fn log_menu_transitions(mut transitions: MessageReader<StateTransitionEvent<Menu>>) {
    for transition in transitions.read() {
        info!("Menu: {:?} -> {:?}", transition.exited, transition.entered);
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (debug_spawn_enemies, debug_spawn_boss)
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        (log_game_state_transitions, log_menu_transitions),
    );
}
