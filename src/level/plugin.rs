//! Level plugin - data loading, construction, and element behaviour.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::{GameState, Score, ScoreEvent, ScoreSet};
use crate::player::{spawn_camera, spawn_player, OrbitAngles, OrbitCamera, Player, PlayerTuning};

use super::builder::{build_level, LevelEntity};
use super::data::{load_level_registry, CurrentLevel, LevelRegistry};
use super::decor::bob_and_spin;
use super::elements;
use super::hazards;

/// Level plugin - handles level loading and all level-element behaviour.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentLevel>()
            .add_systems(Startup, load_level_registry)
            .add_systems(
                Update,
                finish_loading.run_if(in_state(GameState::Loading)),
            )
            .add_systems(
                OnTransition {
                    exited: GameState::Loading,
                    entered: GameState::InGame,
                },
                setup_level,
            )
            .add_systems(OnEnter(GameState::Loading), cleanup_level)
            // Trigger-volume glue on the frame clock. Collectables run
            // before score accumulation and goals after it, so a pickup can
            // unlock the goal in the same frame it is collected.
            .add_systems(
                Update,
                (
                    elements::booster_volumes,
                    elements::checkpoints,
                    elements::collectables.before(ScoreSet),
                    elements::goals.after(ScoreSet),
                    elements::launch_pads,
                    elements::bumpers,
                    elements::teleporters,
                    bob_and_spin,
                )
                    .run_if(in_state(GameState::InGame)),
            )
            // Hazards move on the physics clock, before Rapier steps.
            .add_systems(
                FixedUpdate,
                (
                    hazards::move_platforms,
                    hazards::fire_cannons,
                    hazards::age_cannonballs,
                )
                    .before(PhysicsSet::SyncBackend)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Leave Loading as soon as the configured level is available.
fn finish_loading(
    registry: Option<Res<LevelRegistry>>,
    current: Res<CurrentLevel>,
    mut warned: Local<bool>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(registry) = registry else {
        return;
    };
    if registry.get(&current.name).is_some() {
        next_state.set(GameState::InGame);
    } else if !*warned {
        error!("Level '{}' not found in registry", current.name);
        *warned = true;
    }
}

/// Build the level and spawn the player ball and camera into it.
fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    registry: Res<LevelRegistry>,
    current: Res<CurrentLevel>,
    tuning: Res<PlayerTuning>,
    mut score: ResMut<Score>,
    mut score_events: EventWriter<ScoreEvent>,
) {
    let Some(level) = registry.get(&current.name) else {
        error!("Level '{}' disappeared from registry", current.name);
        return;
    };

    info!("Building level: {}", level.name);

    let spawn_point = build_level(&mut commands, &mut meshes, &mut materials, level);
    spawn_player(
        &mut commands,
        &mut meshes,
        &mut materials,
        spawn_point,
        level.death_height,
    );
    spawn_camera(
        &mut commands,
        OrbitAngles::new(level.camera_start.0, level.camera_start.1),
        tuning.camera_mode,
    );

    // Announce the starting score so listeners initialize without feedback.
    score.total = 0;
    score_events.send(ScoreEvent::silent(0));
}

/// Despawn everything a level setup created.
fn cleanup_level(
    mut commands: Commands,
    level_query: Query<Entity, With<LevelEntity>>,
    player_query: Query<Entity, With<Player>>,
    camera_query: Query<Entity, With<OrbitCamera>>,
) {
    for entity in level_query
        .iter()
        .chain(player_query.iter())
        .chain(camera_query.iter())
    {
        commands.entity(entity).despawn_recursive();
    }
}
