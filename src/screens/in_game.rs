//! In-game screen plugin: clears any overlay on entry and opens the pause
//! menu on Escape. Gameplay itself is owned by the domain plugins.

use bevy::prelude::*;

use super::GameState;
use crate::gameplay_running;
use crate::menus::Menu;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), clear_menu_overlay);
    app.add_systems(Update, handle_pause_key.run_if(gameplay_running));
}

fn clear_menu_overlay(mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::None);
}

fn handle_pause_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_menu: ResMut<NextState<Menu>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_menu.set(Menu::Pause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_opens_the_pause_menu() {
        let mut app = crate::testing::create_base_test_app();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_systems(Update, handle_pause_key.run_if(gameplay_running));
        crate::testing::transition_to_ingame(&mut app);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();

        let next_menu = app.world().resource::<NextState<Menu>>();
        assert!(
            matches!(*next_menu, NextState::Pending(Menu::Pause)),
            "Expected NextState<Menu>::Pause, got {next_menu:?}"
        );
    }
}
