mod plugin;
mod sounds;

pub use plugin::GameAudioPlugin;
pub use sounds::{ChimeStreak, SoundAssets, WindLoop};
