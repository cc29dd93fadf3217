//! Trigger-volume level elements.
//!
//! Each element is stateless glue between a collision event and one of the
//! player's hooks: boosters feed the speed modifier set, checkpoints move
//! the respawn point, collectables and goals go through the score events,
//! bumpers and launch pads push the ball. Enter/exit ordering between
//! overlapping volumes is not guaranteed, which is why the booster set
//! treats a remove of a missing member as a no-op.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::{BumperHitEvent, CheckpointEvent, GoalReachedEvent, Score, ScoreEvent};
use crate::player::{Boosters, Player, RespawnPoint};

/// Volume that raises the ball's acceleration while overlapped.
#[derive(Component)]
pub struct SpeedBoosterPad {
    pub boost_factor: f32,
}

/// Respawn point marker. At most one checkpoint is active at a time.
#[derive(Component)]
pub struct Checkpoint {
    pub active: bool,
}

/// Pickup worth `value` points.
#[derive(Component)]
pub struct Collectable {
    pub value: i32,
}

/// Level exit, optionally inactive until a score threshold is met.
#[derive(Component)]
pub struct LevelGoal {
    pub required_score: Option<i32>,
    pub active: bool,
}

/// Solid obstacle that knocks the ball away on contact.
#[derive(Component)]
pub struct Bumper {
    pub force: f32,
}

/// Volume that applies a fixed world-space impulse on entry.
#[derive(Component)]
pub struct LaunchPad {
    pub impulse: Vec3,
}

/// One end of a teleporter pair. Disarmed while the ball stands on it so a
/// round trip needs the player to roll off first.
#[derive(Component)]
pub struct Teleporter {
    pub armed: bool,
}

/// Destination entity of a teleporter, linked up after spawning.
#[derive(Component)]
pub struct TeleporterLink(pub Entity);

const CHECKPOINT_ACTIVE_COLOR: Color = Color::srgb(0.26, 0.84, 0.44);
const CHECKPOINT_INACTIVE_COLOR: Color = Color::srgb(0.0, 0.26, 1.0);
const GOAL_ACTIVE_COLOR: Color = Color::srgb(0.0, 1.0, 0.35);
const GOAL_INACTIVE_COLOR: Color = Color::srgb(1.0, 0.31, 0.4);

/// If exactly one of the two entities is the player, return the other.
fn other_than_player(player: Entity, e1: Entity, e2: Entity) -> Option<Entity> {
    if e1 == player {
        Some(e2)
    } else if e2 == player {
        Some(e1)
    } else {
        None
    }
}

/// Feed booster overlaps into the player's speed modifier set.
pub fn booster_volumes(
    mut collisions: EventReader<CollisionEvent>,
    pads: Query<&SpeedBoosterPad>,
    mut player_query: Query<(Entity, &mut Boosters), With<Player>>,
) {
    let Ok((player, mut boosters)) = player_query.get_single_mut() else {
        return;
    };

    for event in collisions.read() {
        match *event {
            CollisionEvent::Started(e1, e2, _) => {
                if let Some(other) = other_than_player(player, e1, e2) {
                    if let Ok(pad) = pads.get(other) {
                        boosters.add(other, pad.boost_factor);
                    }
                }
            }
            CollisionEvent::Stopped(e1, e2, _) => {
                if let Some(other) = other_than_player(player, e1, e2) {
                    if pads.contains(other) {
                        boosters.remove(other);
                    }
                }
            }
        }
    }
}

/// Move the respawn point to a touched checkpoint and restyle the markers.
pub fn checkpoints(
    mut collisions: EventReader<CollisionEvent>,
    mut checkpoint_query: Query<(
        Entity,
        &Transform,
        &mut Checkpoint,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut player_query: Query<(Entity, &mut RespawnPoint), With<Player>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut events: EventWriter<CheckpointEvent>,
) {
    let Ok((player, mut respawn)) = player_query.get_single_mut() else {
        return;
    };

    for event in collisions.read() {
        let CollisionEvent::Started(e1, e2, _) = *event else {
            continue;
        };
        let Some(other) = other_than_player(player, e1, e2) else {
            continue;
        };
        if !checkpoint_query.contains(other) {
            continue;
        }

        for (entity, transform, mut checkpoint, material) in &mut checkpoint_query {
            let becomes_active = entity == other;
            if checkpoint.active == becomes_active {
                continue;
            }
            checkpoint.active = becomes_active;
            if let Some(material) = materials.get_mut(&material.0) {
                material.base_color = if becomes_active {
                    CHECKPOINT_ACTIVE_COLOR
                } else {
                    CHECKPOINT_INACTIVE_COLOR
                };
            }
            if becomes_active {
                // Half a unit up so the ball never respawns intersecting
                // the checkpoint base.
                respawn.0 = transform.translation + Vec3::Y * 0.5;
                events.send(CheckpointEvent { checkpoint: entity });
            }
        }
    }
}

/// Award points and despawn touched collectables.
pub fn collectables(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    pickups: Query<&Collectable>,
    player_query: Query<Entity, With<Player>>,
    mut score_events: EventWriter<ScoreEvent>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    for event in collisions.read() {
        let CollisionEvent::Started(e1, e2, _) = *event else {
            continue;
        };
        let Some(other) = other_than_player(player, e1, e2) else {
            continue;
        };
        if let Ok(pickup) = pickups.get(other) {
            score_events.send(ScoreEvent::points(pickup.value));
            commands.entity(other).despawn_recursive();
        }
    }
}

/// Unlock score-gated goals and fire the end-of-level event on entry.
///
/// Runs after score accumulation so a pickup and the goal it unlocks can be
/// touched in the same frame.
pub fn goals(
    mut collisions: EventReader<CollisionEvent>,
    mut goal_query: Query<(&mut LevelGoal, &MeshMaterial3d<StandardMaterial>)>,
    player_query: Query<Entity, With<Player>>,
    score: Res<Score>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut events: EventWriter<GoalReachedEvent>,
) {
    // Activation sweep: a gated goal opens the moment the score crosses it.
    for (mut goal, material) in &mut goal_query {
        let should_be_active = goal
            .required_score
            .map_or(true, |threshold| score.total >= threshold);
        if should_be_active && !goal.active {
            goal.active = true;
            info!("Level goal unlocked at {} points", score.total);
            if let Some(material) = materials.get_mut(&material.0) {
                material.base_color = GOAL_ACTIVE_COLOR;
            }
        }
    }

    let Ok(player) = player_query.get_single() else {
        return;
    };

    for event in collisions.read() {
        let CollisionEvent::Started(e1, e2, _) = *event else {
            continue;
        };
        let Some(other) = other_than_player(player, e1, e2) else {
            continue;
        };
        if let Ok((goal, _)) = goal_query.get(other) {
            if goal.active {
                events.send(GoalReachedEvent);
            }
        }
    }
}

/// Apply launch pad impulses.
pub fn launch_pads(
    mut collisions: EventReader<CollisionEvent>,
    pads: Query<&LaunchPad>,
    mut player_query: Query<(Entity, &mut ExternalImpulse), With<Player>>,
) {
    let Ok((player, mut impulse)) = player_query.get_single_mut() else {
        return;
    };

    for event in collisions.read() {
        let CollisionEvent::Started(e1, e2, _) = *event else {
            continue;
        };
        let Some(other) = other_than_player(player, e1, e2) else {
            continue;
        };
        if let Ok(pad) = pads.get(other) {
            impulse.impulse += pad.impulse;
        }
    }
}

/// Knock the ball away from touched bumpers.
///
/// The push points from the bumper centre to the ball with the vertical
/// component pinned, so a glancing hit still pops the ball up the same way.
pub fn bumpers(
    mut collisions: EventReader<CollisionEvent>,
    bumper_query: Query<(&Bumper, &Transform)>,
    mut player_query: Query<(Entity, &Transform, &mut ExternalImpulse), With<Player>>,
    mut events: EventWriter<BumperHitEvent>,
) {
    let Ok((player, player_transform, mut impulse)) = player_query.get_single_mut() else {
        return;
    };

    for event in collisions.read() {
        let CollisionEvent::Started(e1, e2, _) = *event else {
            continue;
        };
        let Some(other) = other_than_player(player, e1, e2) else {
            continue;
        };
        if let Ok((bumper, bumper_transform)) = bumper_query.get(other) {
            let mut push = (player_transform.translation - bumper_transform.translation)
                .normalize_or_zero()
                * bumper.force;
            push.y = 5.0;
            impulse.impulse += push;
            events.send(BumperHitEvent { bumper: other });
        }
    }
}

/// Teleport the ball between linked pads.
///
/// The destination pad is disarmed until the ball leaves it, so arriving on
/// a pad never instantly bounces the ball back.
pub fn teleporters(
    mut collisions: EventReader<CollisionEvent>,
    mut teleporter_query: Query<(&Transform, &mut Teleporter, &TeleporterLink)>,
    mut player_query: Query<(Entity, &mut Transform), (With<Player>, Without<Teleporter>)>,
) {
    let Ok((player, mut player_transform)) = player_query.get_single_mut() else {
        return;
    };

    for event in collisions.read() {
        match *event {
            CollisionEvent::Started(e1, e2, _) => {
                let Some(other) = other_than_player(player, e1, e2) else {
                    continue;
                };
                let Ok((pad_transform, pad, link)) = teleporter_query.get(other) else {
                    continue;
                };
                if !pad.armed {
                    continue;
                }
                let height_above_pad =
                    player_transform.translation.y - pad_transform.translation.y;
                let destination = link.0;
                let Ok((dest_transform, _, _)) = teleporter_query.get(destination) else {
                    continue;
                };
                let target =
                    dest_transform.translation + Vec3::Y * height_above_pad;
                player_transform.translation = target;
                if let Ok((_, mut dest_pad, _)) = teleporter_query.get_mut(destination) {
                    dest_pad.armed = false;
                }
            }
            CollisionEvent::Stopped(e1, e2, _) => {
                let Some(other) = other_than_player(player, e1, e2) else {
                    continue;
                };
                if let Ok((_, mut pad, _)) = teleporter_query.get_mut(other) {
                    pad.armed = true;
                }
            }
        }
    }
}
