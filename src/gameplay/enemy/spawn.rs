//! Continuous enemy spawning with ramping difficulty, plus the boss cadence.

use bevy::prelude::*;
use rand::Rng;

use crate::gameplay::arena::Arena;
use crate::gameplay::boss;
use crate::screens::GameState;
use crate::{GameSet, gameplay_running};

use super::{Enemy, EnemyArchetype, spawn_enemy};

// === Constants ===

/// Seconds before the first enemy spawns after entering `InGame`.
pub const INITIAL_DELAY: f32 = 2.0;

/// Starting spawn interval (seconds between enemies).
pub const START_INTERVAL: f32 = 3.0;

/// Minimum spawn interval (floor — never spawns faster than this).
pub const MIN_INTERVAL: f32 = 0.8;

/// Duration (seconds) over which the interval ramps from START to MIN.
pub const RAMP_DURATION: f32 = 300.0; // 5 minutes

/// Live ordinary enemies are capped; the spawner idles at the cap.
pub const MAX_LIVE_ENEMIES: usize = 20;

/// Seconds between boss arrivals.
pub const BOSS_INTERVAL: f32 = 60.0;

/// How far outside the arena edge enemies appear.
const EDGE_OFFSET: f32 = 30.0;

// === Resources ===

/// Tracks enemy spawn timing with ramping difficulty.
///
/// Inserted on `OnEnter(GameState::InGame)`, reset each time the state is entered.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct EnemySpawnTimer {
    /// Fires to trigger a spawn. Starts as one-shot for the initial delay,
    /// then re-created with decreasing intervals after each spawn.
    pub timer: Timer,
    /// Total elapsed time (seconds) since entering `InGame`.
    pub elapsed_secs: f32,
}

impl Default for EnemySpawnTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(INITIAL_DELAY, TimerMode::Once),
            elapsed_secs: 0.0,
        }
    }
}

/// Fires every [`BOSS_INTERVAL`] seconds to bring in a boss.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct BossSpawnTimer(pub Timer);

impl Default for BossSpawnTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(BOSS_INTERVAL, TimerMode::Repeating))
    }
}

// === Pure Functions ===

/// Compute the current spawn interval based on elapsed time.
///
/// Returns `START_INTERVAL` when spawning begins (after `INITIAL_DELAY`),
/// linearly decreasing to `MIN_INTERVAL` over `RAMP_DURATION` seconds.
#[must_use]
pub fn current_interval(elapsed_secs: f32) -> f32 {
    let spawning_time = (elapsed_secs - INITIAL_DELAY).max(0.0);
    let t = (spawning_time / RAMP_DURATION).min(1.0);
    (MIN_INTERVAL - START_INTERVAL).mul_add(t, START_INTERVAL)
}

/// A spawn point just outside a random arena edge.
fn random_edge_point(arena: &Arena) -> Vec2 {
    let mut rng = rand::rng();
    let half = arena.half_extents;
    match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(-half.x..=half.x), half.y + EDGE_OFFSET),
        1 => Vec2::new(rng.random_range(-half.x..=half.x), -half.y - EDGE_OFFSET),
        2 => Vec2::new(-half.x - EDGE_OFFSET, rng.random_range(-half.y..=half.y)),
        _ => Vec2::new(half.x + EDGE_OFFSET, rng.random_range(-half.y..=half.y)),
    }
}

// === Systems ===

/// Reset (or insert) the spawn timers when entering `InGame`.
fn reset_spawn_timers(mut commands: Commands) {
    commands.insert_resource(EnemySpawnTimer::default());
    commands.insert_resource(BossSpawnTimer::default());
}

/// Tick the spawn timer and spawn a random enemy at an arena edge when it
/// fires. Idles (but keeps ticking) while the live-enemy cap is reached.
fn tick_enemy_spawner(
    time: Res<Time>,
    arena: Res<Arena>,
    mut spawn_timer: ResMut<EnemySpawnTimer>,
    live_enemies: Query<(), With<Enemy>>,
    mut commands: Commands,
) {
    spawn_timer.elapsed_secs += time.delta_secs();
    spawn_timer.timer.tick(time.delta());

    if !spawn_timer.timer.just_finished() {
        return;
    }

    if live_enemies.iter().count() < MAX_LIVE_ENEMIES {
        let archetype =
            EnemyArchetype::ALL[rand::rng().random_range(0..EnemyArchetype::ALL.len())];
        spawn_enemy(&mut commands, archetype, random_edge_point(&arena));
    }

    // Set next spawn interval based on elapsed time
    let next_interval = current_interval(spawn_timer.elapsed_secs);
    spawn_timer.timer = Timer::from_seconds(next_interval, TimerMode::Once);
}

/// Tick the boss timer and bring in a boss at the top edge when it fires.
/// Only one boss at a time; the cadence keeps ticking while one is alive.
fn tick_boss_spawner(
    time: Res<Time>,
    arena: Res<Arena>,
    mut boss_timer: ResMut<BossSpawnTimer>,
    live_bosses: Query<(), With<boss::Boss>>,
    mut commands: Commands,
) {
    boss_timer.0.tick(time.delta());
    if !boss_timer.0.just_finished() || !live_bosses.is_empty() {
        return;
    }

    let now = time.elapsed_secs();
    boss::spawn_boss(
        &mut commands,
        Vec2::new(0.0, arena.half_extents.y + EDGE_OFFSET),
        now,
    );
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<EnemySpawnTimer>()
        .register_type::<BossSpawnTimer>();

    app.add_systems(OnEnter(GameState::InGame), reset_spawn_timers);

    app.add_systems(
        Update,
        (tick_enemy_spawner, tick_boss_spawner)
            .in_set(GameSet::Ai)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn constants_are_valid() {
        assert!(INITIAL_DELAY > 0.0);
        assert!(START_INTERVAL > MIN_INTERVAL);
        assert!(MIN_INTERVAL > 0.0);
        assert!(RAMP_DURATION > 0.0);
        assert!(BOSS_INTERVAL > START_INTERVAL);
    }

    #[test]
    fn default_timer_has_initial_delay() {
        let timer = EnemySpawnTimer::default();
        assert_eq!(timer.timer.duration().as_secs_f32(), INITIAL_DELAY);
        assert_eq!(timer.elapsed_secs, 0.0);
    }

    #[test]
    fn current_interval_at_start_is_start_interval() {
        let interval = current_interval(INITIAL_DELAY);
        assert!((interval - START_INTERVAL).abs() < f32::EPSILON);
    }

    #[test]
    fn current_interval_at_ramp_end_is_min_interval() {
        let interval = current_interval(INITIAL_DELAY + RAMP_DURATION);
        assert!((interval - MIN_INTERVAL).abs() < f32::EPSILON);
    }

    #[test]
    fn current_interval_beyond_ramp_stays_at_min() {
        let interval = current_interval(INITIAL_DELAY + RAMP_DURATION + 100.0);
        assert!((interval - MIN_INTERVAL).abs() < f32::EPSILON);
    }

    #[test]
    fn current_interval_at_midpoint() {
        let midpoint = INITIAL_DELAY + RAMP_DURATION / 2.0;
        let expected = (START_INTERVAL + MIN_INTERVAL) / 2.0;
        let interval = current_interval(midpoint);
        assert!((interval - expected).abs() < 0.01);
    }

    #[test]
    fn edge_points_lie_outside_the_arena() {
        let arena = Arena::default();
        for _ in 0..100 {
            let point = random_edge_point(&arena);
            assert!(!arena.contains(point, 0.0));
            assert!(arena.contains(point, EDGE_OFFSET));
        }
    }
}
