//! Run progression: score, experience levels with class growth, and the
//! fragment/star wallet.

use bevy::prelude::*;
use rand::Rng;

use crate::gameplay::attributes::Attributes;
use crate::gameplay::combat::DeathCheck;
use crate::gameplay::enemy::EnemyReward;
use crate::gameplay::player::{Player, PlayerClass, level_growth};
use crate::gameplay::Health;
use crate::screens::GameState;
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Experience required from level 1 to level 2.
pub const XP_TO_FIRST_LEVEL: u32 = 100;

/// Each level's requirement is the previous one times this, truncated.
pub const XP_CURVE_FACTOR: f32 = 1.2;

// === Resources ===

/// Run score. Resets when a new run starts.
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct Score(pub u32);

/// Currency earned from kills. Persists across runs (see the save file).
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct Wallet {
    pub fragments: u32,
    pub stars: u32,
}

/// Experience level state. Resets when a new run starts.
#[derive(Resource, Debug, Clone, Copy, Reflect)]
#[reflect(Resource)]
pub struct Progression {
    pub level: u32,
    pub experience: u32,
    /// Experience still counted toward the next level (not cumulative).
    pub to_next: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            to_next: XP_TO_FIRST_LEVEL,
        }
    }
}

impl Progression {
    /// Grants experience, carrying any overflow into subsequent levels.
    /// Returns the number of levels gained (a large grant can be several).
    pub fn grant(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let mut gained = 0;
        while self.experience >= self.to_next {
            self.experience -= self.to_next;
            self.to_next = (self.to_next as f32 * XP_CURVE_FACTOR) as u32;
            self.level += 1;
            gained += 1;
        }
        gained
    }
}

// === Systems ===

/// Fresh score and level state for each run. The wallet carries over.
fn reset_run_progress(mut commands: Commands) {
    commands.insert_resource(Score::default());
    commands.insert_resource(Progression::default());
}

/// Pays out score, experience, and drop rolls for entities that died this
/// frame, and applies class growth (plus a full heal) on level up.
///
/// Runs before [`DeathCheck`] so the dying entities are still queryable.
fn award_rewards(
    mut score: ResMut<Score>,
    mut wallet: ResMut<Wallet>,
    mut progression: ResMut<Progression>,
    defeated: Query<(&Health, &EnemyReward)>,
    mut player: Single<
        (&PlayerClass, &mut Attributes, &mut Health),
        (With<Player>, Without<EnemyReward>),
    >,
) {
    let mut rng = rand::rng();
    let mut experience = 0;

    for (health, reward) in &defeated {
        if health.current > 0.0 {
            continue;
        }
        score.0 += reward.score;
        experience += reward.score;
        if rng.random_bool(f64::from(reward.fragment_chance)) {
            wallet.fragments += reward.fragments;
        }
        if rng.random_bool(f64::from(reward.star_chance)) {
            wallet.stars += reward.stars;
        }
    }

    if experience == 0 {
        return;
    }

    let (class, attributes, health) = &mut *player;
    let gained = progression.grant(experience);
    if gained > 0 {
        let growth = level_growth(**class);
        let gained = gained as f32;
        attributes.base_max_health += growth.max_health * gained;
        attributes.base_damage += growth.damage * gained;
        attributes.base_attack_speed += growth.attack_speed * gained;
        // Level up is a full heal at the new maximum.
        health.max = attributes.effective_max_health();
        health.current = health.max;
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Score>()
        .register_type::<Wallet>()
        .register_type::<Progression>()
        .init_resource::<Score>()
        .init_resource::<Wallet>()
        .init_resource::<Progression>();

    app.add_systems(OnEnter(GameState::InGame), reset_run_progress);

    app.add_systems(
        Update,
        award_rewards
            .in_set(GameSet::Death)
            .before(DeathCheck)
            .run_if(gameplay_running),
    );
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::player::class_stats;
    use crate::gameplay::Team;
    use pretty_assertions::assert_eq;

    fn create_reward_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Score>();
        app.init_resource::<Wallet>();
        app.init_resource::<Progression>();
        app.add_systems(Update, award_rewards);
        app
    }

    fn spawn_test_player(world: &mut World, class: PlayerClass) -> Entity {
        let stats = class_stats(class);
        world
            .spawn((
                Player,
                class,
                Team::Player,
                Attributes::new(stats.max_health, stats.speed, stats.damage, stats.attack_speed),
                Health::new(stats.max_health),
            ))
            .id()
    }

    fn spawn_dead_enemy(world: &mut World, score: u32, fragment_chance: f32) {
        world.spawn((
            Team::Enemy,
            Health {
                current: 0.0,
                max: 60.0,
            },
            EnemyReward {
                score,
                fragment_chance,
                fragments: 2,
                star_chance: 0.0,
                stars: 1,
            },
        ));
    }

    #[test]
    fn kill_pays_score_and_experience() {
        let mut app = create_reward_test_app();
        spawn_test_player(app.world_mut(), PlayerClass::Soldier);
        spawn_dead_enemy(app.world_mut(), 10, 0.0);

        app.update();

        assert_eq!(app.world().resource::<Score>().0, 10);
        assert_eq!(app.world().resource::<Progression>().experience, 10);
    }

    #[test]
    fn live_enemies_pay_nothing() {
        let mut app = create_reward_test_app();
        spawn_test_player(app.world_mut(), PlayerClass::Soldier);
        app.world_mut().spawn((
            Team::Enemy,
            Health::new(60.0),
            EnemyReward {
                score: 10,
                fragment_chance: 1.0,
                fragments: 2,
                star_chance: 1.0,
                stars: 1,
            },
        ));

        app.update();

        assert_eq!(app.world().resource::<Score>().0, 0);
        assert_eq!(app.world().resource::<Wallet>().fragments, 0);
    }

    #[test]
    fn guaranteed_drop_lands_in_the_wallet() {
        let mut app = create_reward_test_app();
        spawn_test_player(app.world_mut(), PlayerClass::Soldier);
        spawn_dead_enemy(app.world_mut(), 10, 1.0);

        app.update();

        assert_eq!(app.world().resource::<Wallet>().fragments, 2);
        assert_eq!(app.world().resource::<Wallet>().stars, 0);
    }

    #[test]
    fn level_up_grows_stats_and_fully_heals() {
        let mut app = create_reward_test_app();
        let player = spawn_test_player(app.world_mut(), PlayerClass::Soldier);

        // Wounded player one kill away from leveling.
        app.world_mut().get_mut::<Health>(player).unwrap().current = 30.0;
        app.world_mut().resource_mut::<Progression>().experience = 95;
        spawn_dead_enemy(app.world_mut(), 10, 0.0);

        app.update();

        let progression = app.world().resource::<Progression>();
        assert_eq!(progression.level, 2);
        assert_eq!(progression.experience, 5);

        let attributes = app.world().get::<Attributes>(player).unwrap();
        assert_eq!(attributes.base_max_health, 130.0);
        assert_eq!(attributes.base_damage, 17.0);

        let health = app.world().get::<Health>(player).unwrap();
        assert_eq!(health.max, 130.0);
        assert_eq!(health.current, 130.0);
    }

    #[test]
    fn two_kills_in_one_frame_both_count() {
        let mut app = create_reward_test_app();
        spawn_test_player(app.world_mut(), PlayerClass::Soldier);
        spawn_dead_enemy(app.world_mut(), 10, 0.0);
        spawn_dead_enemy(app.world_mut(), 20, 0.0);

        app.update();

        assert_eq!(app.world().resource::<Score>().0, 30);
        assert_eq!(app.world().resource::<Progression>().experience, 30);
    }
}
