//! Orbit camera - mouse look and ball following.
//!
//! The camera owns the facing direction the locomotion systems build their
//! movement basis from. Angles are accumulated in degrees; yaw wraps into
//! [0, 360) and pitch is hard-stopped just shy of straight up and down so
//! the basis never flips over the poles.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Player, PlayerTuning};
use crate::core::GameState;

/// How much control the player has over the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
pub enum CameraMode {
    /// No camera control.
    Fixed,
    /// Mouse turns the camera left and right only.
    HorizontalControl,
    /// Full mouse control.
    #[default]
    FullControl,
}

/// Accumulated camera orientation, in degrees.
#[derive(Debug, Clone, Copy)]
pub struct OrbitAngles {
    /// Wrapped into [0, 360); the band (89, 271) around straight-down/up is
    /// excluded by snapping.
    pub pitch: f32,
    /// Wrapped into [0, 360).
    pub yaw: f32,
}

impl Default for OrbitAngles {
    fn default() -> Self {
        Self { pitch: 0.0, yaw: 0.0 }
    }
}

impl OrbitAngles {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        let mut angles = Self {
            pitch: pitch.rem_euclid(360.0),
            yaw: yaw.rem_euclid(360.0),
        };
        angles.clamp_pitch();
        angles
    }

    /// Apply one pointer delta. Pitch moves against the vertical delta, yaw
    /// with the horizontal one.
    pub fn apply_delta(&mut self, delta: Vec2, sensitivity: f32) {
        self.pitch = (self.pitch - delta.y * sensitivity).rem_euclid(360.0);
        self.clamp_pitch();
        self.yaw = (self.yaw + delta.x * sensitivity).rem_euclid(360.0);
    }

    /// Snap pitch out of the excluded band: values that crossed past the
    /// lower pole stop at 89, values past the upper pole stop at 271. This
    /// tolerates wraparound while never letting the camera flip.
    fn clamp_pitch(&mut self) {
        if self.pitch > 89.0 && self.pitch <= 180.0 {
            self.pitch = 89.0;
        } else if self.pitch >= 180.0 && self.pitch < 271.0 {
            self.pitch = 271.0;
        }
    }

    /// The unit forward direction for the current angles.
    pub fn direction(&self) -> Vec3 {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            0.0,
        ) * Vec3::NEG_Z
    }
}

/// The camera that orbits the player ball.
#[derive(Component)]
pub struct OrbitCamera {
    pub angles: OrbitAngles,
    pub mode: CameraMode,
}

/// Spawn the orbit camera looking at the given angles.
pub fn spawn_camera(commands: &mut Commands, angles: OrbitAngles, mode: CameraMode) -> Entity {
    commands
        .spawn((
            Camera3d::default(),
            Transform::default(),
            OrbitCamera { angles, mode },
        ))
        .id()
}

/// Handle mouse movement for turning the camera.
///
/// Pure synchronous state update: the new direction is visible to the next
/// physics tick's basis construction.
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    tuning: Res<PlayerTuning>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok(mut camera) = camera_query.get_single_mut() else {
        return;
    };

    match camera.mode {
        CameraMode::Fixed => return,
        CameraMode::HorizontalControl => delta.y = 0.0,
        CameraMode::FullControl => {}
    }

    let sensitivity = tuning.mouse_sensitivity;
    camera.angles.apply_delta(delta, sensitivity);
}

/// Keep the camera behind the ball, pulled in when geometry is in the way.
pub fn follow_camera(
    tuning: Res<PlayerTuning>,
    rapier_context: Query<&RapierContext>,
    player_query: Query<(Entity, &Transform), With<Player>>,
    mut camera_query: Query<(&mut Transform, &OrbitCamera), Without<Player>>,
) {
    let Ok((player_entity, player_transform)) = player_query.get_single() else {
        return;
    };
    let Ok((mut camera_transform, camera)) = camera_query.get_single_mut() else {
        return;
    };

    let focus = player_transform.translation + tuning.camera_focus_offset();
    let direction = camera.angles.direction();

    // Pull the camera in front of any obstruction between it and the ball.
    let distance = if let Ok(context) = rapier_context.get_single() {
        let filter = QueryFilter {
            flags: QueryFilterFlags::EXCLUDE_SENSORS,
            ..QueryFilter::default()
        }
        .exclude_collider(player_entity);

        match context.cast_ray(focus, -direction, tuning.camera_distance, true, filter) {
            Some((_, toi)) => (toi - 1.0).max(0.0),
            None => tuning.camera_distance,
        }
    } else {
        tuning.camera_distance
    };

    camera_transform.translation = focus - direction * distance;
    camera_transform.look_to(direction, Vec3::Y);
}

/// Register the camera systems. Mouse look runs before the follow so the
/// camera is placed with the frame's final angles.
pub fn setup_camera_systems(app: &mut App) {
    app.add_systems(
        Update,
        (mouse_look, follow_camera)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
}
