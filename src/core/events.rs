//! Global events and the score accumulator.
//!
//! Events allow decoupled systems to communicate. Collectables and goals
//! send ScoreEvents; the HUD and audio systems receive them to update their
//! own state. This keeps systems independent and testable.

use bevy::prelude::*;

/// The player's running score.
///
/// Signed on purpose: callers may pass negative deltas (penalties) and the
/// accumulator does not clamp. Monotonicity is a convention of callers only.
#[derive(Resource, Default)]
pub struct Score {
    pub total: i32,
}

/// Sent whenever the score changes.
///
/// `silent` marks bookkeeping updates (e.g. the initial "score is 0" push at
/// level start) that listeners should apply without audio/visual feedback.
/// Bevy delivers events in send order, so listeners see changes in the order
/// they were made.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScoreEvent {
    pub delta: i32,
    pub silent: bool,
}

impl ScoreEvent {
    pub fn points(delta: i32) -> Self {
        Self { delta, silent: false }
    }

    pub fn silent(delta: i32) -> Self {
        Self { delta, silent: true }
    }
}

/// Sent when the player bounces off a bumper. Consumed by the audio systems.
#[derive(Event)]
pub struct BumperHitEvent {
    pub bumper: Entity,
}

/// Sent when the player activates a checkpoint.
#[derive(Event)]
pub struct CheckpointEvent {
    pub checkpoint: Entity,
}

/// Sent when the player enters an active level goal.
#[derive(Event)]
pub struct GoalReachedEvent;

/// Fold score events into the [`Score`] resource.
///
/// Runs before any listener system so that readers of both the event and the
/// resource see a consistent total within the same frame.
pub fn apply_score_events(mut score: ResMut<Score>, mut events: EventReader<ScoreEvent>) {
    for event in events.read() {
        score.total += event.delta;
    }
}
