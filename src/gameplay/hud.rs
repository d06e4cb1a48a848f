//! In-game HUD: top status bar (score, level, skill, wallet, timer, boss
//! shield) and floating health bars over every character.

use bevy::prelude::*;

use crate::gameplay::boss::phases::BossPhases;
use crate::gameplay::boss::Boss;
use crate::gameplay::player::{Player, PlayerClass, SkillCooldown, skill_spec};
use crate::gameplay::progression::{Progression, Score, Wallet};
use crate::gameplay::{Health, Hitbox};
use crate::screens::GameState;
use crate::theme::palette;
use crate::{GameSet, gameplay_running};

// === Constants ===

const HEALTH_BAR_BG_COLOR: Color = Color::srgb(0.8, 0.1, 0.1);
const HEALTH_BAR_FILL_COLOR: Color = Color::srgb(0.1, 0.9, 0.1);

/// Bar height and gap above the character's hitbox (pixels).
const HEALTH_BAR_HEIGHT: f32 = 4.0;
const HEALTH_BAR_GAP: f32 = 8.0;

const BAR_PADDING: f32 = 12.0;

// === Resources ===

/// Virtual-clock timestamp of the current run's start, for the elapsed timer.
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct RunStartTime(pub f32);

// === Components ===

/// Marker: red background bar (full width, shows "missing" HP).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HealthBarBackground;

/// Marker: green foreground bar (scales with current/max HP).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HealthBarFill;

/// Bar sizing, derived from the owner's hitbox when the bar is spawned.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HealthBarConfig {
    pub width: f32,
    pub y_offset: f32,
}

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ScoreDisplay;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct LevelDisplay;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SkillDisplay;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct WalletDisplay;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ElapsedTimeDisplay;

/// Marker for the boss shield readout (blank while no shielded boss lives).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BossShieldDisplay;

// === Health bars ===

/// Spawns health bar child entities when `Health` is added to an entity with
/// a `Hitbox`, sized to the hitbox.
fn spawn_health_bars(add: On<Add, Health>, hitboxes: Query<&Hitbox>, mut commands: Commands) {
    let Ok(hitbox) = hitboxes.get(add.entity) else {
        return; // Health without a hitbox gets no bar (nothing spawns these today)
    };
    let config = HealthBarConfig {
        width: hitbox.0.x,
        y_offset: hitbox.0.y / 2.0 + HEALTH_BAR_GAP,
    };
    let size = Vec2::new(config.width, HEALTH_BAR_HEIGHT);
    commands
        .entity(add.entity)
        .insert(config.clone())
        .with_children(|parent| {
            parent.spawn((
                Name::new("Health Bar BG"),
                Sprite::from_color(HEALTH_BAR_BG_COLOR, size),
                Transform::from_xyz(0.0, config.y_offset, 1.0),
                HealthBarBackground,
            ));
            parent.spawn((
                Name::new("Health Bar Fill"),
                Sprite::from_color(HEALTH_BAR_FILL_COLOR, size),
                Transform::from_xyz(0.0, config.y_offset, 1.1),
                HealthBarFill,
            ));
        });
}

/// Updates health bar fill width based on current/max HP.
/// Runs in `GameSet::Ui`.
fn update_health_bars(
    health_query: Query<(&Health, &Children, &HealthBarConfig)>,
    mut bar_query: Query<&mut Transform, With<HealthBarFill>>,
) {
    for (health, children, config) in &health_query {
        let ratio = (health.current / health.max).clamp(0.0, 1.0);
        for child in children.iter() {
            if let Ok(mut transform) = bar_query.get_mut(child) {
                transform.scale.x = ratio;
                // Shift left to keep bar left-aligned as it shrinks
                transform.translation.x = config.width.mul_add(-(1.0 - ratio), 0.0) / 2.0;
            }
        }
    }
}

// === Status bar ===

/// Spawns the full-width top status bar on entering `InGame`.
fn spawn_status_bar(
    mut commands: Commands,
    time: Res<Time<Virtual>>,
    mut start: ResMut<RunStartTime>,
) {
    start.0 = time.elapsed_secs();

    commands.spawn((
        Name::new("Status Bar"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(0.0),
            left: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Auto,
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            padding: UiRect::all(Val::Px(BAR_PADDING)),
            column_gap: Val::Px(BAR_PADDING * 2.0),
            ..default()
        },
        BackgroundColor(palette::STATUS_BAR_BACKGROUND),
        DespawnOnExit(GameState::InGame),
        children![
            (
                Name::new("Score Display"),
                ScoreDisplay,
                Node {
                    min_width: Val::Px(140.0),
                    ..default()
                },
                Text::new("Score: 0"),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::HEADER_TEXT),
            ),
            (
                Name::new("Level Display"),
                LevelDisplay,
                Text::new("Lv 1  0/100"),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::BODY_TEXT),
            ),
            (
                Name::new("Skill Display"),
                SkillDisplay,
                Text::new("Skill ready"),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::BODY_TEXT),
            ),
            (
                Name::new("Boss Shield Display"),
                BossShieldDisplay,
                Node {
                    flex_grow: 1.0,
                    ..default()
                },
                Text::new(""),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::SHIELD_TEXT),
            ),
            (
                Name::new("Wallet Display"),
                WalletDisplay,
                Text::new("Fragments: 0  Stars: 0"),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::CURRENCY_TEXT),
            ),
            (
                Name::new("Elapsed Time"),
                ElapsedTimeDisplay,
                Text::new("00:00"),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::BODY_TEXT),
            ),
        ],
    ));
}

fn update_score_display(score: Res<Score>, mut query: Single<&mut Text, With<ScoreDisplay>>) {
    if score.is_changed() {
        **query = Text::new(format!("Score: {}", score.0));
    }
}

fn update_level_display(
    progression: Res<Progression>,
    mut query: Single<&mut Text, With<LevelDisplay>>,
) {
    if progression.is_changed() {
        **query = Text::new(format!(
            "Lv {}  {}/{}",
            progression.level, progression.experience, progression.to_next
        ));
    }
}

fn update_skill_display(
    time: Res<Time>,
    player: Single<(&PlayerClass, &SkillCooldown), With<Player>>,
    mut query: Single<&mut Text, With<SkillDisplay>>,
) {
    let (class, cooldown) = *player;
    let skill = skill_spec(*class);
    let remaining = cooldown.0.remaining(time.elapsed_secs(), skill.cooldown);
    **query = if remaining > 0.0 {
        Text::new(format!("Skill {remaining:.1}s"))
    } else {
        Text::new("Skill ready")
    };
}

fn update_wallet_display(wallet: Res<Wallet>, mut query: Single<&mut Text, With<WalletDisplay>>) {
    if wallet.is_changed() {
        **query = Text::new(format!(
            "Fragments: {}  Stars: {}",
            wallet.fragments, wallet.stars
        ));
    }
}

fn update_elapsed_time(
    time: Res<Time<Virtual>>,
    start: Res<RunStartTime>,
    mut query: Single<&mut Text, With<ElapsedTimeDisplay>>,
) {
    let elapsed = time.elapsed_secs() - start.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_secs = elapsed as u32;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    **query = Text::new(format!("{minutes:02}:{seconds:02}"));
}

fn update_boss_shield_display(
    bosses: Query<(&Boss, &BossPhases)>,
    mut query: Single<&mut Text, With<BossShieldDisplay>>,
) {
    let shielded = bosses
        .iter()
        .find(|(boss, phases)| !boss.vulnerable && phases.shield.active());
    **query = match shielded {
        Some((_, phases)) => Text::new(format!("Boss shield: {:.0}", phases.shield.hp)),
        None => Text::new(""),
    };
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<RunStartTime>()
        .register_type::<HealthBarBackground>()
        .register_type::<HealthBarFill>()
        .register_type::<HealthBarConfig>()
        .register_type::<ScoreDisplay>()
        .register_type::<LevelDisplay>()
        .register_type::<SkillDisplay>()
        .register_type::<WalletDisplay>()
        .register_type::<ElapsedTimeDisplay>()
        .register_type::<BossShieldDisplay>()
        .init_resource::<RunStartTime>();

    // Observer: spawn health bars immediately when Health is added
    app.add_observer(spawn_health_bars);

    app.add_systems(OnEnter(GameState::InGame), spawn_status_bar);

    app.add_systems(
        Update,
        (
            update_health_bars,
            update_score_display,
            update_level_display,
            update_skill_display,
            update_wallet_display,
            update_elapsed_time,
            update_boss_shield_display,
        )
            .in_set(GameSet::Ui)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::CHARACTER_HITBOX;
    use crate::testing::assert_entity_count;
    use pretty_assertions::assert_eq;

    fn create_health_bar_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_observer(spawn_health_bars);
        app.add_systems(Update, update_health_bars);
        app
    }

    #[test]
    fn health_bar_spawned_for_character() {
        let mut app = create_health_bar_test_app();

        app.world_mut()
            .spawn((Health::new(100.0), Hitbox(CHARACTER_HITBOX)));
        app.update(); // spawn_health_bars runs, deferred with_children queued
        app.update(); // deferred commands applied

        assert_entity_count::<With<HealthBarBackground>>(&mut app, 1);
        assert_entity_count::<With<HealthBarFill>>(&mut app, 1);
    }

    #[test]
    fn no_bar_without_a_hitbox() {
        let mut app = create_health_bar_test_app();

        app.world_mut().spawn(Health::new(100.0));
        app.update();
        app.update();

        assert_entity_count::<With<HealthBarFill>>(&mut app, 0);
    }

    #[test]
    fn bar_width_matches_hitbox() {
        let mut app = create_health_bar_test_app();

        let entity = app
            .world_mut()
            .spawn((Health::new(100.0), Hitbox(Vec2::new(60.0, 60.0))))
            .id();
        app.update();
        app.update();

        let config = app.world().get::<HealthBarConfig>(entity).unwrap();
        assert_eq!(config.width, 60.0);
        assert_eq!(config.y_offset, 38.0);
    }

    #[test]
    fn health_bar_fill_scales_with_damage() {
        let mut app = create_health_bar_test_app();

        let entity = app
            .world_mut()
            .spawn((Health::new(100.0), Hitbox(CHARACTER_HITBOX)))
            .id();
        app.update(); // spawn health bars
        app.update(); // apply deferred

        // Damage to 50%
        app.world_mut().get_mut::<Health>(entity).unwrap().current = 50.0;
        app.update(); // update_health_bars

        let mut bar_query = app
            .world_mut()
            .query_filtered::<&Transform, With<HealthBarFill>>();
        let bar_transform = bar_query.single(app.world()).unwrap();
        assert!(
            (bar_transform.scale.x - 0.5).abs() < f32::EPSILON,
            "Health bar fill should be 0.5, got {}",
            bar_transform.scale.x
        );
        // Left-alignment offset: width * -(1 - ratio) / 2 = 40 * -0.5 / 2
        assert!((bar_transform.translation.x - (-10.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn health_bar_despawned_with_parent() {
        let mut app = create_health_bar_test_app();

        let entity = app
            .world_mut()
            .spawn((Health::new(100.0), Hitbox(CHARACTER_HITBOX)))
            .id();
        app.update();
        app.update();

        assert_entity_count::<With<HealthBarBackground>>(&mut app, 1);

        app.world_mut().despawn(entity);

        assert_entity_count::<With<HealthBarBackground>>(&mut app, 0);
        assert_entity_count::<With<HealthBarFill>>(&mut app, 0);
    }

    #[test]
    fn score_display_tracks_resource() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Score>();
        app.add_systems(Update, update_score_display);

        app.world_mut().spawn((Text::new("Score: 0"), ScoreDisplay));
        app.world_mut().resource_mut::<Score>().0 = 150;
        app.update();

        let mut query = app.world_mut().query_filtered::<&Text, With<ScoreDisplay>>();
        let text = query.single(app.world()).unwrap();
        assert_eq!(**text, "Score: 150");
    }

    #[test]
    fn level_display_tracks_progression() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Progression>();
        app.add_systems(Update, update_level_display);

        app.world_mut().spawn((Text::new(""), LevelDisplay));
        {
            let mut progression = app.world_mut().resource_mut::<Progression>();
            progression.level = 2;
            progression.experience = 20;
            progression.to_next = 120;
        }
        app.update();

        let mut query = app.world_mut().query_filtered::<&Text, With<LevelDisplay>>();
        let text = query.single(app.world()).unwrap();
        assert_eq!(**text, "Lv 2  20/120");
    }

    #[test]
    fn elapsed_time_starts_at_zero() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<RunStartTime>();
        app.add_systems(Update, update_elapsed_time);

        app.world_mut()
            .spawn((Text::new("00:00"), ElapsedTimeDisplay));
        app.update();

        let mut query = app
            .world_mut()
            .query_filtered::<&Text, With<ElapsedTimeDisplay>>();
        let text = query.single(app.world()).unwrap();
        assert_eq!(**text, "00:00");
    }

    #[test]
    fn shield_display_blank_without_shielded_boss() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, update_boss_shield_display);

        app.world_mut().spawn((Text::new("stale"), BossShieldDisplay));
        app.update();

        let mut query = app
            .world_mut()
            .query_filtered::<&Text, With<BossShieldDisplay>>();
        let text = query.single(app.world()).unwrap();
        assert_eq!(**text, "");
    }
}
