//! Geometry Arena — a top-down arcade shooter where a geometric hero fights
//! waves of geometric enemies and multi-phase bosses.
//!
//! The simulation is a single-threaded fixed-order tick: every frame the
//! [`GameSet`] chain runs Input → Ai → Movement → Combat → Death → Ui, so
//! all entities move before collisions are resolved and all damage is applied
//! before dead entities are removed (despawns are deferred commands).

#[cfg(feature = "dev")]
pub mod dev_tools;
pub mod gameplay;
pub mod menus;
pub mod save;
pub mod screens;
#[cfg(test)]
pub mod testing;
pub mod theme;

use bevy::prelude::*;

use crate::menus::Menu;
use crate::screens::GameState;

// === Z-layer constants ===

/// Z layer for the arena background.
pub const Z_ARENA: f32 = 0.0;

/// Z layer for characters (player, enemies, bosses).
pub const Z_CHARACTER: f32 = 10.0;

/// Z layer for projectiles (above characters).
pub const Z_PROJECTILE: f32 = 10.5;

/// Z layer for overlay effects (explosions, shields).
pub const Z_EFFECT: f32 = 11.0;

// === System sets ===

/// Per-tick simulation phases, chained in declaration order.
///
/// The ordering is load-bearing: AI decides intent before anything moves,
/// everything moves before collisions are tested, and all damage lands
/// before death removal runs.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Input snapshotting and debug spawn keys.
    Input,
    /// AI behavior re-evaluation, boss phase orchestration.
    Ai,
    /// Player/enemy/projectile motion and facing.
    Movement,
    /// Attack firing, collision resolution, damage application.
    Combat,
    /// Reward payout and removal of dead entities.
    Death,
    /// HUD and other presentation updates.
    Ui,
}

// === Run conditions ===

/// True while actual gameplay is simulating: in-game with no menu overlay.
pub fn gameplay_running(
    game_state: Option<Res<State<GameState>>>,
    menu: Option<Res<State<Menu>>>,
) -> bool {
    game_state.is_some_and(|state| *state.get() == GameState::InGame)
        && menu.is_none_or(|menu| *menu.get() == Menu::None)
}

// === Root plugin ===

/// Adds the whole game: states, system-set ordering, and all domain plugins.
pub fn plugin(app: &mut App) {
    app.init_state::<GameState>();

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

    app.add_plugins((
        theme::plugin,
        screens::plugin,
        menus::plugin,
        gameplay::plugin,
        save::plugin,
    ));

    #[cfg(feature = "dev")]
    app.add_plugins(dev_tools::plugin);
}
