//! Main menu screen plugin: raises the menu overlay and services queued
//! restarts from the game-over screen.

use bevy::prelude::*;

use super::GameState;
use crate::menus::Menu;

/// Present while a "play again" request is in flight. The restart bounces
/// through `MainMenu` so `OnExit`/`OnEnter` schedules tear down and rebuild
/// the run (an in-place `InGame` -> `InGame` transition would not).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PendingRestart;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::MainMenu), open_main_menu);
}

fn open_main_menu(
    pending_restart: Option<Res<PendingRestart>>,
    mut commands: Commands,
    mut next_game: ResMut<NextState<GameState>>,
    mut next_menu: ResMut<NextState<Menu>>,
) {
    if pending_restart.is_some() {
        commands.remove_resource::<PendingRestart>();
        next_game.set(GameState::InGame);
        next_menu.set(Menu::None);
    } else {
        next_menu.set(Menu::Main);
    }
}
