//! Player module - ball locomotion, orbit camera, and respawn handling.

mod camera;
mod components;
mod input;
mod movement;
mod plugin;

#[cfg(test)]
mod tests;

pub use camera::{spawn_camera, CameraMode, OrbitAngles, OrbitCamera};
pub use components::*;
pub use movement::{spawn_player, wish_direction};
pub use plugin::PlayerPlugin;
