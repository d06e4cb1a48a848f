//! Game-over overlay UI: final score, best score, and retry / main menu
//! buttons. Opened by the death detector when the player's health is gone.

use bevy::prelude::*;

use super::Menu;
use crate::gameplay::progression::Score;
use crate::save::SaveData;
use crate::screens::{GameState, PendingRestart};
use crate::theme::{palette, widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::GameOver), spawn_game_over_screen);
}

fn spawn_game_over_screen(mut commands: Commands, score: Res<Score>, save: Res<SaveData>) {
    // Save data was already folded by the save plugin's OnEnter system, so
    // `best_score` here includes this run.
    let best = save.best_score.max(score.0);

    commands.spawn((
        widget::ui_root("Game Over Screen"),
        BackgroundColor(palette::OVERLAY_BACKGROUND),
        GlobalZIndex(1),
        DespawnOnExit(Menu::GameOver),
        children![
            // Bordered panel
            (
                Name::new("Game Over Panel"),
                Node {
                    width: Val::Px(500.0),
                    min_height: Val::Px(360.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::SpaceEvenly,
                    padding: UiRect::all(Val::Px(40.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(palette::PANEL_BACKGROUND),
                BorderColor::all(palette::PANEL_BORDER),
                children![
                    (
                        Text::new("GAME OVER"),
                        TextFont::from_font_size(palette::FONT_SIZE_HEADER),
                        TextColor(Color::srgb(0.9, 0.2, 0.2)),
                    ),
                    widget::label(format!("Score: {}", score.0)),
                    (
                        Text::new(format!("Best: {best}")),
                        TextFont::from_font_size(palette::FONT_SIZE_PROMPT),
                        TextColor(palette::CURRENCY_TEXT),
                    ),
                    widget::button(
                        "Play Again",
                        |_: On<Pointer<Click>>,
                         mut commands: Commands,
                         mut next_game: ResMut<NextState<GameState>>| {
                            commands.insert_resource(PendingRestart);
                            next_game.set(GameState::MainMenu);
                        },
                    ),
                    widget::button(
                        "Main Menu",
                        |_: On<Pointer<Click>>, mut next_game: ResMut<NextState<GameState>>| {
                            next_game.set(GameState::MainMenu);
                        },
                    ),
                ],
            ),
        ],
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_entity_count;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn game_over_screen_spawns_panel_and_buttons() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.init_state::<GameState>();
        app.init_state::<Menu>();
        app.insert_resource(Score(150));
        app.insert_resource(SaveData::default());
        app.add_plugins(plugin);

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.update();
        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::GameOver);
        app.update();
        app.update(); // Apply deferred

        assert_entity_count::<With<Button>>(&mut app, 2); // play again + main menu
    }
}
