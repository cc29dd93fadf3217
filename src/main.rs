//! Tumble - Entry Point
//!
//! A marble-rolling 3D platformer. Roll, boost, and jump your way to the goal.
//!
//! Controls:
//! - WASD: Roll (relative to the camera)
//! - Mouse: Orbit the camera
//! - Space / Left click: Jump
//! - Left Ctrl / Right click: Brake
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use tumble::PHYSICS_TICK_RATE;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tumble".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics on the fixed clock, so locomotion forces are framerate-independent
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
        .insert_resource(TimestepMode::Fixed {
            dt: 1.0 / PHYSICS_TICK_RATE,
            substeps: 1,
        })
        .insert_resource(Time::<Fixed>::from_hz(f64::from(PHYSICS_TICK_RATE)))
        // Our game plugin
        .add_plugins(tumble::TumblePlugin)
        .run();
}
