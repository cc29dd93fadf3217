//! Core game module - states, events, and session flow.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod plugin;
mod states;

#[cfg(test)]
mod tests;

pub use events::*;
pub use plugin::{CorePlugin, ScoreSet};
pub use states::*;
