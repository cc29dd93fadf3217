//! Player plugin - wires locomotion, camera, and input to the two clocks.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::camera::setup_camera_systems;
use super::components::{JumpEvent, MoveInput, PlayerTuning};
use super::input::gather_input;
use super::movement;
use crate::core::GameState;

/// Player plugin - handles ball locomotion, camera control, and respawning.
///
/// Frame clock: input sampling and camera updates. Physics clock
/// (`FixedUpdate`): ground probing, jumps, forces - ordered before Rapier
/// consumes them - and the death watchdog after Rapier writes positions back.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PlayerTuning::load())
            .init_resource::<MoveInput>()
            .add_event::<JumpEvent>()
            .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
            .add_systems(
                FixedUpdate,
                (
                    movement::sample_ground,
                    movement::handle_jump,
                    movement::apply_locomotion,
                )
                    .chain()
                    .before(PhysicsSet::SyncBackend)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                FixedUpdate,
                movement::death_watchdog
                    .after(PhysicsSet::Writeback)
                    .run_if(in_state(GameState::InGame)),
            );

        setup_camera_systems(app);
    }
}
