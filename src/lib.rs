//! Tumble - a marble-rolling 3D platformer in Bevy.
//!
//! Steer a ball through floating courses by applying camera-relative
//! forces, chain speed boosters, collect pickups, and reach the goal.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, score, global events
//! - **Player**: Ball locomotion, jumping, the orbit camera
//! - **Level**: Level data files, blocks, interactive elements, hazards
//! - **Ui**: HUD, death fade, level-complete banner
//! - **Audio**: Wind loop, chimes, impact sounds

pub mod audio;
pub mod core;
pub mod level;
pub mod player;
pub mod ui;

use bevy::prelude::*;

/// Fixed physics ticks per second. Durations expressed in seconds in
/// level files are converted to tick counts with this.
pub const PHYSICS_TICK_RATE: f32 = 64.0;

/// Main game plugin that adds all sub-plugins.
pub struct TumblePlugin;

impl Plugin for TumblePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            // Player systems
            .add_plugins(player::PlayerPlugin)
            // Level systems
            .add_plugins(level::LevelPlugin)
            // UI systems
            .add_plugins(ui::UiPlugin)
            // Audio systems
            .add_plugins(audio::GameAudioPlugin);
    }
}
