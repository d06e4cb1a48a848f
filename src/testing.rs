//! Testing utilities for Bevy systems.

#![cfg(test)]

use std::time::Duration;

use bevy::ecs::query::QueryFilter;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::GameSet;
use crate::menus::Menu;
use crate::screens::GameState;

/// Minimal app with both state machines and the system-set chain configured,
/// but no gameplay plugins. Tests add just the systems under test.
pub fn create_base_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    app.init_state::<Menu>();
    app.configure_sets(
        Update,
        (
            GameSet::Input,
            GameSet::Ai,
            GameSet::Movement,
            GameSet::Combat,
            GameSet::Death,
            GameSet::Ui,
        )
            .chain(),
    );
    app
}

/// Drives the state machine into `InGame` (menu stays closed) and runs one
/// update so `OnEnter` systems fire.
pub fn transition_to_ingame(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
}

/// Bare world with a hand-driven clock, for exercising systems that consume
/// `Res<Time>` with an exact delta. Frame-based apps recompute the delta from
/// the wall clock on every update, so distance-per-tick assertions need this
/// instead.
pub fn create_time_test_world() -> World {
    let mut world = World::new();
    world.init_resource::<Time>();
    world
}

/// Advances the hand-driven clock by exactly `dt`, then runs `system` once.
pub fn step_system<M, S>(world: &mut World, system: S, dt: Duration)
where
    S: IntoSystem<(), (), M>,
{
    world.resource_mut::<Time>().advance_by(dt);
    if let Err(err) = world.run_system_once(system) {
        panic!("system failed to run: {err:?}");
    }
}

/// Asserts how many entities match a query filter.
pub fn assert_entity_count<F: QueryFilter>(app: &mut App, expected: usize) {
    let count = app
        .world_mut()
        .query_filtered::<(), F>()
        .iter(app.world())
        .count();
    assert_eq!(count, expected, "expected {expected} matching entities, found {count}");
}
