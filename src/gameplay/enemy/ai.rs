//! Enemy behavior: a three-state machine (wander, chase, attack) driven by
//! distance to the player, re-evaluated on a fixed cadence.

use bevy::prelude::*;

use crate::gameplay::arena::Arena;
use crate::gameplay::attributes::Attributes;
use crate::gameplay::player::Player;
use crate::gameplay::Hitbox;
use crate::{GameSet, gameplay_running};

use super::{DETECTION_RANGE, Enemy, EnemyArchetype, archetype_stats};

// === Constants ===

/// Seconds between behavior re-evaluations.
pub const DECISION_INTERVAL: f32 = 2.0;

/// Wander moves at this fraction of full speed.
pub const WANDER_SPEED_FACTOR: f32 = 0.5;

/// Distance at which a wander waypoint counts as reached.
const WANDER_ARRIVAL_RADIUS: f32 = 10.0;

/// Margin kept from arena edges when picking wander waypoints.
const WANDER_MARGIN: f32 = 60.0;

// === Components ===

/// Current behavior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum AiState {
    #[default]
    Wander,
    Chase,
    Attack,
}

/// Behavior state machine bookkeeping. `next_decision_at` is a virtual-clock
/// timestamp; a fresh component decides on its first tick.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct EnemyAi {
    pub state: AiState,
    pub next_decision_at: f32,
    pub wander_target: Vec2,
}

// === Pure functions ===

/// Pick a behavior state from the distance to the player. Boundaries are
/// inclusive: standing exactly at attack range attacks, exactly at detection
/// range chases.
#[must_use]
pub fn decide_state(distance: f32, attack_range: f32, detection_range: f32) -> AiState {
    if distance <= attack_range {
        AiState::Attack
    } else if distance <= detection_range {
        AiState::Chase
    } else {
        AiState::Wander
    }
}

// === Systems ===

/// Re-evaluates each enemy's behavior state on the decision cadence.
/// Runs in `GameSet::Ai`.
fn ai_decide(
    time: Res<Time>,
    arena: Res<Arena>,
    mut enemies: Query<(&EnemyArchetype, &mut EnemyAi, &GlobalTransform), With<Enemy>>,
    player: Single<&GlobalTransform, With<Player>>,
) {
    let now = time.elapsed_secs();
    let player_pos = player.translation().truncate();

    for (archetype, mut ai, transform) in &mut enemies {
        if now < ai.next_decision_at {
            continue;
        }
        ai.next_decision_at = now + DECISION_INTERVAL;

        let distance = transform.translation().truncate().distance(player_pos);
        let previous = ai.state;
        ai.state = decide_state(
            distance,
            archetype_stats(*archetype).attack_range,
            DETECTION_RANGE,
        );

        // Entering wander picks a fresh waypoint.
        if ai.state == AiState::Wander && previous != AiState::Wander {
            ai.wander_target = arena.random_interior_point(WANDER_MARGIN);
        }
    }
}

/// Moves each enemy per its behavior state: toward the waypoint at half
/// speed when wandering, toward the player at full speed when chasing,
/// holding position when attacking. Runs in `GameSet::Movement`.
fn ai_move(
    time: Res<Time>,
    arena: Res<Arena>,
    mut enemies: Query<
        (&Attributes, &mut EnemyAi, &Hitbox, &mut Transform),
        (With<Enemy>, Without<Player>),
    >,
    player: Single<&GlobalTransform, With<Player>>,
) {
    let dt = time.delta_secs();
    let player_pos = player.translation().truncate();

    for (attributes, mut ai, hitbox, mut transform) in &mut enemies {
        let position = transform.translation.truncate();
        let step = match ai.state {
            AiState::Wander => {
                if position.distance(ai.wander_target) <= WANDER_ARRIVAL_RADIUS {
                    ai.wander_target = arena.random_interior_point(WANDER_MARGIN);
                }
                (ai.wander_target - position).normalize_or_zero()
                    * attributes.effective_speed()
                    * WANDER_SPEED_FACTOR
            }
            AiState::Chase => {
                (player_pos - position).normalize_or_zero() * attributes.effective_speed()
            }
            AiState::Attack => Vec2::ZERO,
        } * dt;

        let next = arena.clamp(position + step, hitbox.0.x / 2.0);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<EnemyAi>();

    app.add_systems(
        Update,
        ai_decide.in_set(GameSet::Ai).run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        ai_move.in_set(GameSet::Movement).run_if(gameplay_running),
    );
}
