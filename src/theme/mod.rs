//! Look and feel shared by every screen: the color and font palette, button
//! pointer feedback, and the widget constructors the menus are built from.

pub mod interaction;
pub mod palette;
pub mod widget;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(interaction::plugin);
}
