//! Core plugin that sets up game states, events, and session flow.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::RapierConfiguration;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused, LevelComplete)
/// - Global events (ScoreEvent, BumperHitEvent, ...)
/// - The score accumulator
/// - Pause handling and cursor grab
pub struct CorePlugin;

/// Label for the score-accumulation step so listeners can order after it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreSet;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<ScoreEvent>()
            .add_event::<BumperHitEvent>()
            .add_event::<CheckpointEvent>()
            .add_event::<GoalReachedEvent>()

            // Score accumulation runs before anything that reads the total
            .init_resource::<Score>()
            .add_systems(Update, apply_score_events.in_set(ScoreSet))

            // Cursor is only grabbed during active play, and the physics
            // pipeline only steps while the cursor is grabbed
            .add_systems(OnEnter(GameState::InGame), (grab_cursor, resume_physics))
            .add_systems(OnExit(GameState::InGame), (release_cursor, freeze_physics))

            // Goal entry ends the level
            .add_systems(
                Update,
                handle_goal_reached.run_if(in_state(GameState::InGame)),
            )

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            );
    }
}

/// Grab and hide cursor when entering gameplay.
fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Stop the physics pipeline while the game is paused.
fn freeze_physics(mut config_query: Query<&mut RapierConfiguration>) {
    for mut config in &mut config_query {
        config.physics_pipeline_active = false;
    }
}

/// Resume the physics pipeline when gameplay starts.
fn resume_physics(mut config_query: Query<&mut RapierConfiguration>) {
    for mut config in &mut config_query {
        config.physics_pipeline_active = true;
    }
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

/// Move to LevelComplete when the goal fires.
fn handle_goal_reached(
    mut events: EventReader<GoalReachedEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if events.read().next().is_some() {
        info!("Level complete");
        next_state.set(GameState::LevelComplete);
    }
}
