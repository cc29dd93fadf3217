//! Sound playback - wind rush, score chimes, and impact thumps.

use bevy::prelude::*;
use bevy_kira_audio::prelude::{Audio, AudioControl, AudioInstance, AudioTween};
use bevy_rapier3d::prelude::{ContactForceEvent, Velocity};

use crate::core::{BumperHitEvent, CheckpointEvent, ScoreEvent};
use crate::player::Player;

/// Playback rate ceiling for the chime streak.
const CHIME_MAX_RATE: f64 = 2.0;
/// Chime playback rate after a quiet second.
const CHIME_BASE_RATE: f64 = 0.9;
/// Seconds of quiet before a chime streak resets.
const CHIME_STREAK_WINDOW: f32 = 1.0;
/// Contact force below this plays no bounce sound at all.
const BOUNCE_FORCE_FLOOR: f32 = 40.0;

/// Handles to the loaded sound files.
#[derive(Resource)]
pub struct SoundAssets {
    pub wind: Handle<bevy_kira_audio::AudioSource>,
    pub chime: Handle<bevy_kira_audio::AudioSource>,
    pub bounce: Handle<bevy_kira_audio::AudioSource>,
    pub bumper: Handle<bevy_kira_audio::AudioSource>,
    pub checkpoint: Handle<bevy_kira_audio::AudioSource>,
}

/// Instance handle for the looping wind bed, so its volume can be driven
/// by the ball's speed every frame.
#[derive(Resource)]
pub struct WindLoop {
    pub instance: Handle<AudioInstance>,
}

/// Rising-pitch state for consecutive pickups.
#[derive(Resource)]
pub struct ChimeStreak {
    pub rate: f64,
    pub since_last: f32,
}

impl Default for ChimeStreak {
    fn default() -> Self {
        Self {
            rate: CHIME_BASE_RATE,
            since_last: CHIME_STREAK_WINDOW,
        }
    }
}

/// Load the sound files and start the wind loop silent.
pub fn setup_audio(mut commands: Commands, asset_server: Res<AssetServer>, audio: Res<Audio>) {
    let assets = SoundAssets {
        wind: asset_server.load("audio/wind.ogg"),
        chime: asset_server.load("audio/chime.ogg"),
        bounce: asset_server.load("audio/bounce.ogg"),
        bumper: asset_server.load("audio/bumper.ogg"),
        checkpoint: asset_server.load("audio/checkpoint.ogg"),
    };

    let instance = audio
        .play(assets.wind.clone())
        .looped()
        .with_volume(0.0)
        .handle();

    commands.insert_resource(WindLoop { instance });
    commands.insert_resource(assets);
    commands.insert_resource(ChimeStreak::default());
    info!("Audio initialized, wind loop started");
}

/// Scale the wind loop's volume with the ball's speed.
///
/// The offset keeps the loop inaudible below a slow roll.
pub fn drive_wind_loop(
    wind: Res<WindLoop>,
    mut instances: ResMut<Assets<AudioInstance>>,
    player_query: Query<&Velocity, With<Player>>,
) {
    let Ok(velocity) = player_query.get_single() else {
        return;
    };
    let Some(instance) = instances.get_mut(&wind.instance) else {
        return;
    };
    let volume = (velocity.linvel.length() / 450.0 - 0.025).clamp(0.0, 1.0);
    instance.set_volume(volume as f64, AudioTween::default());
}

/// Play a chime for each audible score event, raising the pitch while the
/// streak stays alive.
pub fn play_score_chimes(
    mut score_events: EventReader<ScoreEvent>,
    mut streak: ResMut<ChimeStreak>,
    assets: Res<SoundAssets>,
    audio: Res<Audio>,
    time: Res<Time>,
) {
    streak.since_last += time.delta_secs();
    if streak.since_last >= CHIME_STREAK_WINDOW {
        streak.rate = CHIME_BASE_RATE;
    }

    for event in score_events.read() {
        if event.silent {
            continue;
        }
        audio
            .play(assets.chime.clone())
            .with_playback_rate(streak.rate);
        streak.rate = (streak.rate + 0.05 * f64::from(event.delta)).min(CHIME_MAX_RATE);
        streak.since_last = 0.0;
    }
}

/// Thump on hard landings and wall hits, louder and sharper the harder
/// the ball comes in.
pub fn play_bounce_sounds(
    mut contact_events: EventReader<ContactForceEvent>,
    player_query: Query<(Entity, &Velocity), With<Player>>,
    assets: Res<SoundAssets>,
    audio: Res<Audio>,
) {
    let Ok((player, velocity)) = player_query.get_single() else {
        contact_events.clear();
        return;
    };
    for event in contact_events.read() {
        if event.collider1 != player && event.collider2 != player {
            continue;
        }
        if event.total_force_magnitude < BOUNCE_FORCE_FLOOR {
            continue;
        }
        let volume = (event.total_force_magnitude / 2000.0).clamp(0.1, 1.0);
        let rate = f64::from(velocity.linvel.length() / 10.0 + 0.5).clamp(0.5, 1.8);
        audio
            .play(assets.bounce.clone())
            .with_volume(f64::from(volume))
            .with_playback_rate(rate);
    }
}

/// Confirmation ping when a checkpoint lights up.
pub fn play_checkpoint_sounds(
    mut checkpoint_events: EventReader<CheckpointEvent>,
    assets: Res<SoundAssets>,
    audio: Res<Audio>,
) {
    for _event in checkpoint_events.read() {
        audio.play(assets.checkpoint.clone());
    }
}

/// Distinct boing when a bumper flings the ball.
pub fn play_bumper_sounds(
    mut bumper_events: EventReader<BumperHitEvent>,
    assets: Res<SoundAssets>,
    audio: Res<Audio>,
) {
    for _event in bumper_events.read() {
        audio.play(assets.bumper.clone());
    }
}
