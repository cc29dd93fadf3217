use bevy::prelude::*;
use bevy_kira_audio::prelude::{AudioInstance, AudioPlugin as KiraAudioPlugin, AudioTween};

use crate::core::{GameState, ScoreSet};

use super::sounds::{
    drive_wind_loop, play_bounce_sounds, play_bumper_sounds, play_checkpoint_sounds,
    play_score_chimes, setup_audio, WindLoop,
};

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(KiraAudioPlugin)
            .add_systems(Startup, setup_audio)
            .add_systems(
                Update,
                (
                    drive_wind_loop,
                    play_score_chimes.after(ScoreSet),
                    play_bounce_sounds,
                    play_bumper_sounds,
                    play_checkpoint_sounds,
                )
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnExit(GameState::InGame), silence_wind);
    }
}

/// Cut the wind when gameplay stops, otherwise the pause menu keeps
/// whatever volume the last frame set.
fn silence_wind(wind: Option<Res<WindLoop>>, mut instances: ResMut<Assets<AudioInstance>>) {
    let Some(wind) = wind else {
        return;
    };
    if let Some(instance) = instances.get_mut(&wind.instance) {
        instance.set_volume(0.0, AudioTween::default());
    }
}
