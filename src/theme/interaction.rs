//! Pointer feedback for menu buttons: the background color swaps as the
//! cursor hovers and presses.

use bevy::picking::hover::Hovered;
use bevy::prelude::*;
use bevy::ui::Pressed;

use super::palette;

/// Background colors for a clickable element's idle/hovered/pressed states.
/// Defaults to the shared button palette. Attach next to `Button` and
/// `BackgroundColor`.
#[derive(Component, Debug, Reflect)]
#[reflect(Component)]
#[require(Hovered)]
pub struct InteractionPalette {
    pub none: Color,
    pub hovered: Color,
    pub pressed: Color,
}

impl Default for InteractionPalette {
    fn default() -> Self {
        Self {
            none: palette::BUTTON_BACKGROUND,
            hovered: palette::BUTTON_HOVERED_BACKGROUND,
            pressed: palette::BUTTON_PRESSED_BACKGROUND,
        }
    }
}

/// Press beats hover; hover beats idle.
fn swap_button_backgrounds(
    mut buttons: Query<
        (
            Has<Pressed>,
            &Hovered,
            &InteractionPalette,
            &mut BackgroundColor,
        ),
        Changed<Interaction>,
    >,
) {
    for (pressed, Hovered(hovered), colors, mut background) in &mut buttons {
        *background = if pressed {
            colors.pressed
        } else if *hovered {
            colors.hovered
        } else {
            colors.none
        }
        .into();
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<InteractionPalette>();
    app.add_systems(Update, swap_button_backgrounds);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_feedback_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, swap_button_backgrounds);
        app
    }

    #[test]
    fn idle_button_wears_the_idle_color() {
        let mut app = create_feedback_test_app();
        let button = app
            .world_mut()
            .spawn((
                Button,
                BackgroundColor(Color::BLACK),
                InteractionPalette::default(),
                Interaction::None,
            ))
            .id();

        app.update();

        let background = app.world().get::<BackgroundColor>(button).unwrap();
        assert_eq!(background.0, palette::BUTTON_BACKGROUND);
    }

    #[test]
    fn press_wins_over_hover() {
        let mut app = create_feedback_test_app();
        let button = app
            .world_mut()
            .spawn((
                Button,
                BackgroundColor(Color::BLACK),
                InteractionPalette::default(),
                Hovered(true),
                Pressed,
                Interaction::Pressed,
            ))
            .id();

        app.update();

        let background = app.world().get::<BackgroundColor>(button).unwrap();
        assert_eq!(background.0, palette::BUTTON_PRESSED_BACKGROUND);
    }
}
