//! Input gathering - sampled on the frame clock, consumed on the physics clock.
//!
//! Keyboard and mouse state is folded into the [`MoveInput`] resource every
//! frame; discrete jump presses become [`JumpEvent`]s so the fixed-tick
//! systems never miss a press that happened between two physics steps.

use bevy::prelude::*;

use super::components::{JumpEvent, MoveInput, PlayerTuning};

/// Sample movement, brake, and jump inputs.
pub fn gather_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    tuning: Res<PlayerTuning>,
    mut move_input: ResMut<MoveInput>,
    mut jump_events: EventWriter<JumpEvent>,
) {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }

    // Magnitude capped at 1 so diagonals are no faster, then restricted to
    // the configured movement mode.
    move_input.axis = tuning.movement_mode.filter(axis.clamp_length_max(1.0));

    // Hold Ctrl or right mouse button to brake.
    move_input.braking =
        keyboard.pressed(KeyCode::ControlLeft) || mouse.pressed(MouseButton::Right);

    // Space or left click to jump.
    if keyboard.just_pressed(KeyCode::Space) || mouse.just_pressed(MouseButton::Left) {
        jump_events.send(JumpEvent);
    }
}
