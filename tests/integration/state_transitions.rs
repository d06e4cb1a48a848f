//! Tests for game state transitions through the full plugin stack.

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use geometry_arena::gameplay::player::Player;
use geometry_arena::menus::Menu;
use geometry_arena::screens::GameState;
use pretty_assertions::assert_eq;

fn create_game_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.add_plugins(InputPlugin);
    app.add_plugins(geometry_arena::plugin);
    app
}

fn count_players(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<Player>>()
        .iter(app.world())
        .count()
}

#[test]
fn game_initializes_in_loading_state() {
    let app = create_game_app();
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(*state.get(), GameState::Loading);
}

#[test]
fn loading_advances_to_main_menu_with_overlay() {
    let mut app = create_game_app();

    app.update(); // Loading runs, queues MainMenu
    app.update(); // MainMenu entered, queues Menu::Main
    app.update(); // Menu::Main entered

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::MainMenu
    );
    assert_eq!(*app.world().resource::<State<Menu>>().get(), Menu::Main);
}

#[test]
fn entering_the_game_spawns_the_player() {
    let mut app = create_game_app();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app.update(); // apply deferred spawns

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::InGame
    );
    assert_eq!(count_players(&mut app), 1);
}

#[test]
fn leaving_the_game_despawns_the_player() {
    let mut app = create_game_app();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app.update();
    assert_eq!(count_players(&mut app), 1);

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::MainMenu);
    app.update();
    app.update();

    assert_eq!(count_players(&mut app), 0);
}

#[test]
fn escape_pauses_the_game_and_freezes_virtual_time() {
    let mut app = create_game_app();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app.update();

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Escape);
    app.update(); // pause key handled, queues Menu::Pause
    app.update(); // Menu::Pause entered, virtual clock paused

    assert_eq!(*app.world().resource::<State<Menu>>().get(), Menu::Pause);
    assert!(app.world().resource::<Time<Virtual>>().is_paused());
}
