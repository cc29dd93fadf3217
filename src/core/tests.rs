//! Core domain: tests for score accumulation and event delivery.

use bevy::prelude::*;

use super::{apply_score_events, Score, ScoreEvent};

fn score_app() -> App {
    let mut app = App::new();
    app.add_event::<ScoreEvent>()
        .init_resource::<Score>()
        .add_systems(Update, apply_score_events);
    app
}

#[test]
fn score_accumulates_signed_deltas() {
    let mut app = score_app();

    app.world_mut().send_event(ScoreEvent::points(3));
    app.world_mut().send_event(ScoreEvent::silent(-1));
    app.update();

    assert_eq!(app.world().resource::<Score>().total, 2);
}

#[test]
fn score_events_preserve_order_and_silent_flag() {
    let mut app = score_app();

    app.world_mut().send_event(ScoreEvent::points(3));
    app.world_mut().send_event(ScoreEvent::silent(-1));

    let events = app.world().resource::<Events<ScoreEvent>>();
    let mut cursor = events.get_cursor();
    let seen: Vec<(i32, bool)> = cursor
        .read(events)
        .map(|event| (event.delta, event.silent))
        .collect();

    assert_eq!(seen, vec![(3, false), (-1, true)]);
}

#[test]
fn score_is_not_clamped_below_zero() {
    let mut app = score_app();

    app.world_mut().send_event(ScoreEvent::points(-5));
    app.update();

    assert_eq!(app.world().resource::<Score>().total, -5);
}
