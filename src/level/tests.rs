//! Level domain: tests for data parsing, hazard math, and trigger glue.

use approx::assert_relative_eq;
use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use bevy_rapier3d::rapier::prelude::CollisionEventFlags;

use crate::core::CheckpointEvent;
use crate::player::{Player, RespawnPoint};

use super::data::{vec3, ElementDef, LevelData};
use super::elements::{checkpoints, teleporters, Checkpoint, Teleporter, TeleporterLink};
use super::hazards::platform_phase;

// -----------------------------------------------------------------------------
// Platform phase
// -----------------------------------------------------------------------------

#[test]
fn platform_phase_hits_both_endpoints() {
    for smoothing in [0.0, 0.5, 1.0] {
        assert_relative_eq!(platform_phase(0.0, 100.0, smoothing), 0.0, epsilon = 1e-5);
        assert_relative_eq!(platform_phase(50.0, 100.0, smoothing), 1.0, epsilon = 1e-5);
        assert_relative_eq!(platform_phase(100.0, 100.0, smoothing), 0.0, epsilon = 1e-5);
    }
}

#[test]
fn linear_platform_moves_at_constant_rate() {
    assert_relative_eq!(platform_phase(25.0, 100.0, 0.0), 0.5, epsilon = 1e-5);
    assert_relative_eq!(platform_phase(75.0, 100.0, 0.0), 0.5, epsilon = 1e-5);
}

#[test]
fn smooth_platform_eases_at_endpoints() {
    // Cosine easing is slower than linear near the turnaround points.
    let eased = platform_phase(10.0, 100.0, 1.0);
    let linear = platform_phase(10.0, 100.0, 0.0);
    assert!(eased < linear);
}

// -----------------------------------------------------------------------------
// Level data parsing
// -----------------------------------------------------------------------------

#[test]
fn minimal_level_parses_with_defaults() {
    let level: LevelData = ron::from_str(
        r#"(
            name: "Test",
            spawn_point: (0.0, 2.0, 0.0),
        )"#,
    )
    .expect("minimal level should parse");

    assert_eq!(level.name, "Test");
    assert_relative_eq!(level.death_height, -50.0);
    assert_eq!(level.camera_start, (0.0, 0.0));
    assert!(level.blocks.is_empty());
    assert!(level.elements.is_empty());
}

#[test]
fn elements_parse_with_field_defaults() {
    let level: LevelData = ron::from_str(
        r#"(
            name: "Test",
            spawn_point: (0.0, 2.0, 0.0),
            elements: [
                Collectable(position: (1.0, 1.0, 1.0)),
                Booster(position: (0.0, 0.5, 4.0), size: (4.0, 1.0, 8.0), boost_factor: 2.0),
                Goal(position: (9.0, 0.0, 9.0), required_score: Some(3)),
            ],
        )"#,
    )
    .expect("level with elements should parse");

    assert_eq!(level.elements.len(), 3);
    match &level.elements[0] {
        ElementDef::Collectable { value, .. } => assert_eq!(*value, 1),
        other => panic!("expected Collectable, got {:?}", other),
    }
    match &level.elements[2] {
        ElementDef::Goal { required_score, .. } => assert_eq!(*required_score, Some(3)),
        other => panic!("expected Goal, got {:?}", other),
    }
}

#[test]
fn malformed_level_is_an_error() {
    assert!(ron::from_str::<LevelData>("(name: \"broken\")").is_err());
}

#[test]
fn vec3_converts_tuples() {
    let v = vec3((1.0, -2.0, 3.5));
    assert_relative_eq!(v.x, 1.0);
    assert_relative_eq!(v.y, -2.0);
    assert_relative_eq!(v.z, 3.5);
}

// -----------------------------------------------------------------------------
// Teleporter arming
// -----------------------------------------------------------------------------

fn teleporter_app() -> (App, Entity, Entity, Entity) {
    let mut app = App::new();
    app.add_event::<CollisionEvent>()
        .add_systems(Update, teleporters);

    let pad_a = app
        .world_mut()
        .spawn((Transform::from_xyz(0.0, 0.0, 0.0), Teleporter { armed: true }))
        .id();
    let pad_b = app
        .world_mut()
        .spawn((Transform::from_xyz(10.0, 0.0, 0.0), Teleporter { armed: true }))
        .id();
    app.world_mut().entity_mut(pad_a).insert(TeleporterLink(pad_b));
    app.world_mut().entity_mut(pad_b).insert(TeleporterLink(pad_a));

    let player = app
        .world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 1.0, 0.0)))
        .id();
    (app, player, pad_a, pad_b)
}

fn player_position(app: &App, player: Entity) -> Vec3 {
    app.world().get::<Transform>(player).unwrap().translation
}

#[test]
fn teleporter_moves_ball_and_disarms_the_destination() {
    let (mut app, player, pad_a, _pad_b) = teleporter_app();

    app.world_mut().send_event(CollisionEvent::Started(
        player,
        pad_a,
        CollisionEventFlags::SENSOR,
    ));
    app.update();

    // Arrives above the destination with its height above the pad kept.
    assert_eq!(player_position(&app, player), Vec3::new(10.0, 1.0, 0.0));
}

#[test]
fn disarmed_pad_refuses_entry_until_the_ball_leaves() {
    let (mut app, player, pad_a, pad_b) = teleporter_app();

    app.world_mut().send_event(CollisionEvent::Started(
        player,
        pad_a,
        CollisionEventFlags::SENSOR,
    ));
    app.update();
    assert!(!app.world().get::<Teleporter>(pad_b).unwrap().armed);

    // Landing on the disarmed destination must not bounce the ball back.
    app.world_mut().send_event(CollisionEvent::Started(
        player,
        pad_b,
        CollisionEventFlags::SENSOR,
    ));
    app.update();
    assert_eq!(player_position(&app, player), Vec3::new(10.0, 1.0, 0.0));

    // Rolling off re-arms it, so the next entry teleports again.
    app.world_mut().send_event(CollisionEvent::Stopped(
        player,
        pad_b,
        CollisionEventFlags::SENSOR,
    ));
    app.update();
    assert!(app.world().get::<Teleporter>(pad_b).unwrap().armed);

    app.world_mut().send_event(CollisionEvent::Started(
        player,
        pad_b,
        CollisionEventFlags::SENSOR,
    ));
    app.update();
    assert_eq!(player_position(&app, player), Vec3::new(0.0, 1.0, 0.0));
    assert!(!app.world().get::<Teleporter>(pad_a).unwrap().armed);
}

// -----------------------------------------------------------------------------
// Checkpoints
// -----------------------------------------------------------------------------

#[test]
fn touching_a_checkpoint_moves_the_respawn_point_and_notifies() {
    let mut app = App::new();
    app.init_resource::<Assets<StandardMaterial>>()
        .add_event::<CollisionEvent>()
        .add_event::<CheckpointEvent>()
        .add_systems(Update, checkpoints);

    let checkpoint = app
        .world_mut()
        .spawn((
            Transform::from_xyz(4.0, 1.0, -8.0),
            Checkpoint { active: false },
            MeshMaterial3d::<StandardMaterial>(Handle::default()),
        ))
        .id();
    let player = app
        .world_mut()
        .spawn((
            Player,
            Transform::from_xyz(4.0, 1.5, -8.0),
            RespawnPoint(Vec3::ZERO),
        ))
        .id();

    app.world_mut().send_event(CollisionEvent::Started(
        player,
        checkpoint,
        CollisionEventFlags::SENSOR,
    ));
    app.update();

    assert!(app.world().get::<Checkpoint>(checkpoint).unwrap().active);
    // Respawn sits half a unit above the checkpoint base.
    assert_eq!(
        app.world().get::<RespawnPoint>(player).unwrap().0,
        Vec3::new(4.0, 1.5, -8.0)
    );

    let events = app.world().resource::<Events<CheckpointEvent>>();
    let mut cursor = events.get_cursor();
    assert_eq!(cursor.read(events).count(), 1);
}
