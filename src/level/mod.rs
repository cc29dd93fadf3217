//! Level module - data-driven levels and their interactive elements.

mod builder;
mod data;
mod decor;
mod elements;
mod error;
mod hazards;
mod plugin;

#[cfg(test)]
mod tests;

pub use builder::LevelEntity;
pub use data::{CurrentLevel, ElementDef, LevelData, LevelRegistry};
pub use elements::{Bumper, Checkpoint, Collectable, LaunchPad, LevelGoal, SpeedBoosterPad};
pub use error::LevelLoadError;
pub use plugin::LevelPlugin;
