//! Main menu UI: bordered panel with title, best score, class selection
//! (keys 1-5), and clickable buttons.

use bevy::prelude::*;

use super::Menu;
use crate::gameplay::player::{PlayerClass, SelectedClass, class_stats};
use crate::save::SaveData;
use crate::screens::GameState;
use crate::theme::{palette, widget};

/// Marker for the class choice line, rewritten when the selection changes.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ClassChoiceText;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<ClassChoiceText>();

    app.add_systems(OnEnter(Menu::Main), spawn_main_menu);
    app.add_systems(
        Update,
        (handle_class_keys, update_class_choice_text)
            .chain()
            .run_if(in_state(Menu::Main)),
    );
}

fn class_choice_line(selected: PlayerClass) -> String {
    let stats = class_stats(selected);
    format!(
        "Class: {}  (HP {:.0} | DMG {:.0} | SPD {:.0})",
        selected.display_name(),
        stats.max_health,
        stats.damage,
        stats.speed,
    )
}

fn spawn_main_menu(mut commands: Commands, selected: Res<SelectedClass>, save: Res<SaveData>) {
    commands.spawn((
        widget::ui_root("Main Menu Screen"),
        DespawnOnExit(Menu::Main),
        children![
            // Bordered panel
            (
                Name::new("Main Menu Panel"),
                Node {
                    width: Val::Px(560.0),
                    min_height: Val::Px(460.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::SpaceBetween,
                    padding: UiRect::all(Val::Px(40.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(palette::PANEL_BACKGROUND),
                BorderColor::all(palette::PANEL_BORDER),
                children![
                    // Title
                    (
                        Text::new("Geometry Arena"),
                        TextFont::from_font_size(palette::FONT_SIZE_TITLE),
                        TextColor(palette::HEADER_TEXT),
                    ),
                    // Best score from the save file
                    (
                        Text::new(format!("Best score: {}", save.best_score)),
                        TextFont::from_font_size(palette::FONT_SIZE_PROMPT),
                        TextColor(palette::CURRENCY_TEXT),
                    ),
                    // Current class choice
                    (
                        ClassChoiceText,
                        Text::new(class_choice_line(selected.0)),
                        TextFont::from_font_size(palette::FONT_SIZE_PROMPT),
                        TextColor(palette::BODY_TEXT),
                    ),
                    (
                        Text::new("Press 1-5 to choose a class"),
                        TextFont::from_font_size(palette::FONT_SIZE_SMALL),
                        TextColor(palette::BODY_TEXT),
                    ),
                    // Start button
                    widget::button(
                        "Start Run",
                        |_: On<Pointer<Click>>,
                         mut next_game: ResMut<NextState<GameState>>,
                         mut next_menu: ResMut<NextState<Menu>>| {
                            next_game.set(GameState::InGame);
                            next_menu.set(Menu::None);
                        },
                    ),
                    // Exit button
                    widget::button(
                        "Exit Game",
                        |_: On<Pointer<Click>>, mut exit: MessageWriter<AppExit>| {
                            exit.write(AppExit::Success);
                        },
                    ),
                ],
            ),
        ],
    ));
}

/// Number keys 1-5 pick the class for the next run.
fn handle_class_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut selected: ResMut<SelectedClass>,
) {
    const KEYS: [KeyCode; 5] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
    ];
    for (key, &class) in KEYS.iter().zip(PlayerClass::ALL) {
        if keyboard.just_pressed(*key) {
            selected.0 = class;
        }
    }
}

fn update_class_choice_text(
    selected: Res<SelectedClass>,
    mut query: Single<&mut Text, With<ClassChoiceText>>,
) {
    if selected.is_changed() {
        **query = Text::new(class_choice_line(selected.0));
    }
}
