//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Locomotion and
//! level-element triggers only run in the InGame state; pause and the
//! level-complete banner take over outside of it.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// The session moves through these states:
/// - Start in `Loading` while tuning and level data are read from disk
/// - Move to `InGame` once the level registry is populated
/// - `Paused` freezes gameplay but keeps the world visible
/// - `LevelComplete` when the player rolls into an active goal
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading tuning and level data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Player reached the level goal
    LevelComplete,
}
