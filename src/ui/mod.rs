mod hud;
mod plugin;

pub use hud::{Darkness, HudRoot, ScoreText, Speedometer};
pub use plugin::UiPlugin;
