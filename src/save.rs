//! Persistent save data: best score, wallet currency, and total play time,
//! stored as RON next to the executable. Load failures fall back to defaults
//! with a log line instead of crashing.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::gameplay::progression::{Score, Wallet};
use crate::menus::Menu;
use crate::screens::GameState;

// === Data ===

/// What persists across sessions. Every field carries `#[serde(default)]` so
/// saves from older builds still parse.
#[derive(Resource, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct SaveData {
    #[serde(default)]
    pub best_score: u32,
    #[serde(default)]
    pub fragments: u32,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub play_time_secs: f64,
}

// === Resources ===

/// Cumulative gameplay seconds this session. Ticks on the virtual clock, so
/// paused time does not count.
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct PlayTime(pub f64);

// === Storage backend ===

mod storage {
    use super::SaveData;
    use bevy::prelude::*;
    use std::path::PathBuf;

    fn save_file_path() -> PathBuf {
        PathBuf::from("save").join("geometry_arena.ron")
    }

    /// Reads save data from disk, or `None` when missing or unreadable.
    pub fn load() -> Option<SaveData> {
        let path = save_file_path();
        if !path.exists() {
            info!("no save file at {path:?}, starting fresh");
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => match ron::from_str::<SaveData>(&contents) {
                Ok(data) => Some(data),
                Err(e) => {
                    error!("failed to parse save file: {e}, using defaults");
                    None
                }
            },
            Err(e) => {
                error!("failed to read save file: {e}, using defaults");
                None
            }
        }
    }

    /// Writes save data to disk. Failures are logged and otherwise ignored.
    pub fn save(data: &SaveData) {
        let path = save_file_path();
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            error!("failed to create save directory: {e}");
            return;
        }

        match ron::ser::to_string_pretty(data, ron::ser::PrettyConfig::default()) {
            Ok(serialized) => {
                if let Err(e) = std::fs::write(&path, serialized) {
                    error!("failed to write save file: {e}");
                } else {
                    info!("game saved to {path:?}");
                }
            }
            Err(e) => error!("failed to serialize save data: {e}"),
        }
    }
}

// === Pure functions ===

/// Folds a finished run into the persistent data: best score is a running
/// maximum, the wallet replaces the stored balances, play time accumulates.
fn fold_run(data: &mut SaveData, score: u32, wallet: &Wallet, play_secs: f64) {
    data.best_score = data.best_score.max(score);
    data.fragments = wallet.fragments;
    data.stars = wallet.stars;
    data.play_time_secs += play_secs;
}

// === Systems ===

/// Loads the save file (or defaults) and seeds the wallet from it.
fn load_save_data(mut commands: Commands) {
    let data = storage::load().unwrap_or_default();
    commands.insert_resource(Wallet {
        fragments: data.fragments,
        stars: data.stars,
    });
    commands.insert_resource(data);
}

fn tick_play_time(time: Res<Time>, mut play_time: ResMut<PlayTime>) {
    play_time.0 += f64::from(time.delta_secs());
}

/// Folds the finished run into the save data and writes it out.
fn save_on_game_over(
    score: Res<Score>,
    wallet: Res<Wallet>,
    play_time: Res<PlayTime>,
    mut data: ResMut<SaveData>,
) {
    fold_run(&mut data, score.0, &wallet, play_time.0);
    storage::save(&data);
}

/// Play time folded into the save is consumed so it is not double-counted.
fn reset_play_time(mut play_time: ResMut<PlayTime>) {
    play_time.0 = 0.0;
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<PlayTime>().init_resource::<PlayTime>();

    app.add_systems(PreStartup, load_save_data);

    app.add_systems(
        Update,
        tick_play_time.run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        OnEnter(Menu::GameOver),
        (save_on_game_over, reset_play_time).chain(),
    );
}
