//! Ball locomotion - the fixed-tick force model.
//!
//! Every physics tick: probe the ground, build a camera-relative movement
//! basis, push the ball with an acceleration-mode force, counter it with a
//! hand-rolled linear drag, and damp runaway spin. Braking and jumping edit
//! velocity directly; everything else goes through forces so the speed
//! ceiling stays soft.
//!
//! Tick ordering (all within one `FixedUpdate` run): ground probe, then jump
//! handling, then force computation - all before Rapier consumes the
//! accumulated forces - and the death watchdog after Rapier has written
//! positions back.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::camera::OrbitCamera;
use super::components::*;

/// Probe for ground beneath the ball and cache the result for this tick.
///
/// The probe is a downward ray from the ball centre reaching just past the
/// ball surface. Landing (airborne last tick, grounded now) resets the jump
/// budget here, before any jump event is handled this tick.
pub fn sample_ground(
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<(Entity, &Transform, &mut GroundContact, &mut JumpState), With<Player>>,
) {
    let Ok((player_entity, transform, mut contact, mut jumps)) = player_query.get_single_mut()
    else {
        return;
    };

    let hit = rapier_context.get_single().ok().and_then(|context| {
        let filter = QueryFilter {
            flags: QueryFilterFlags::EXCLUDE_SENSORS,
            ..QueryFilter::default()
        }
        .exclude_collider(player_entity);

        context.cast_ray(
            transform.translation,
            Vec3::NEG_Y,
            BALL_RADIUS + GROUND_PROBE_DISTANCE,
            true,
            filter,
        )
    });

    let was_grounded = contact.grounded;
    contact.grounded = hit.is_some();
    contact.distance = hit.map(|(_, toi)| toi);

    if contact.grounded && !was_grounded {
        jumps.land();
    }
}

/// Combine input components along the camera-relative lateral and forward
/// axes into a unit horizontal push direction.
///
/// `facing` is the camera's forward direction projected onto the x-z plane.
/// Its perpendicular is the camera-right axis: with forward -Z the facing is
/// (0, -1) and `perp` gives (1, 0), which is +X in world space.
/// Returns zero when the input or the facing vector is degenerate.
pub fn wish_direction(input: Vec2, facing: Vec2) -> Vec3 {
    let forward = facing.normalize_or_zero();
    let lateral = forward.perp();
    let combined = (input.x * lateral + input.y * forward).normalize_or_zero();
    Vec3::new(combined.x, 0.0, combined.y)
}

/// Apply movement forces, drag, spin damping, and braking for this tick.
pub fn apply_locomotion(
    tuning: Res<PlayerTuning>,
    input: Res<MoveInput>,
    camera_query: Query<&OrbitCamera>,
    mut player_query: Query<
        (&GroundContact, &Boosters, &mut ExternalForce, &mut Velocity),
        With<Player>,
    >,
) {
    let Ok((contact, boosters, mut force, mut velocity)) = player_query.get_single_mut() else {
        return;
    };
    let Ok(camera) = camera_query.get_single() else {
        return;
    };

    let direction = camera.angles.direction();
    let facing = Vec2::new(direction.x, direction.z);

    // Boosters raise the push and the drag ceiling together, so the top
    // speed scales with the active multiplier.
    let acceleration = tuning.base_acceleration * boosters.active_multiplier();
    let drag = tuning.drag_coefficient();

    let horizontal_velocity = Vec3::new(velocity.linvel.x, 0.0, velocity.linvel.z);

    if contact.grounded {
        force.force = wish_direction(input.axis, facing) * acceleration
            - horizontal_velocity * drag;
        // Yaw spin damping only: rolling needs the other axes free.
        force.torque = Vec3::new(0.0, -SPIN_DRAG * velocity.angvel.y, 0.0);
    } else {
        let air = tuning.air_control_multiplier;
        force.force = wish_direction(input.axis, facing) * acceleration * air
            - horizontal_velocity * drag * air;
        force.torque = -AIR_ANGULAR_DRAG * velocity.angvel;
    }

    // Braking is a direct velocity edit, bypassing the force model, so the
    // slowdown is an exact per-tick fraction regardless of current drag.
    if input.braking && tuning.allow_braking.permits(contact.grounded) {
        velocity.linvel = brake_velocity(velocity.linvel, tuning.brake_amount);
    }
}

/// Scale the horizontal velocity components down by the brake fraction,
/// leaving vertical velocity untouched.
pub fn brake_velocity(linvel: Vec3, brake_amount: f32) -> Vec3 {
    Vec3::new(
        linvel.x * (1.0 - brake_amount),
        linvel.y,
        linvel.z * (1.0 - brake_amount),
    )
}

/// Spend jump budget and apply jump impulses.
pub fn handle_jump(
    tuning: Res<PlayerTuning>,
    mut jump_events: EventReader<JumpEvent>,
    mut player_query: Query<
        (&GroundContact, &mut JumpState, &mut ExternalImpulse, &mut Velocity),
        With<Player>,
    >,
) {
    for _ in jump_events.read() {
        if !tuning.allow_jumping {
            continue;
        }
        let Ok((contact, mut jumps, mut impulse, mut velocity)) = player_query.get_single_mut()
        else {
            return;
        };

        match jumps.try_jump(contact.grounded, tuning.jump_count) {
            Some(JumpKind::Grounded) => {
                impulse.impulse += Vec3::Y * tuning.jump_force;
            }
            Some(JumpKind::Airborne) => {
                // Air jumps replace downward momentum instead of fighting it.
                velocity.linvel.y = 0.0;
                impulse.impulse += Vec3::Y * tuning.jump_force;
            }
            None => {}
        }
    }
}

/// Tick the death watchdog and respawn the ball when it fires.
///
/// Runs after Rapier's writeback so it sees this tick's settled position and
/// a respawn never re-applies forces computed against the pre-respawn state.
pub fn death_watchdog(
    mut player_query: Query<
        (&mut Transform, &mut Velocity, &mut DeathWatch, &RespawnPoint),
        With<Player>,
    >,
) {
    let Ok((mut transform, mut velocity, mut watch, respawn)) = player_query.get_single_mut()
    else {
        return;
    };

    let below = transform.translation.y <= watch.death_height;
    if watch.tick(below) {
        info!("Ball fell out of the level, respawning at {:?}", respawn.0);
        transform.translation = respawn.0;
        velocity.linvel = Vec3::ZERO;
        velocity.angvel = Vec3::ZERO;
    }
}

/// Spawn the player ball at the given position.
///
/// The body is set up the way the locomotion model expects: unit mass so
/// forces act as accelerations, no built-in damping (drag is hand-rolled in
/// `apply_locomotion`), and contact events enabled for the audio systems.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    death_height: f32,
) -> Entity {
    commands
        .spawn((
            (
                Player,
                GroundContact::default(),
                JumpState::default(),
                Boosters::default(),
                DeathWatch::new(death_height),
                RespawnPoint(position + Vec3::Y * RESPAWN_EPSILON),
            ),
            (
                Mesh3d(meshes.add(Sphere::new(BALL_RADIUS))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.85, 0.3, 0.2),
                    perceptual_roughness: 0.3,
                    metallic: 0.4,
                    ..default()
                })),
                Transform::from_translation(position),
            ),
            // Rapier physics components
            (
                RigidBody::Dynamic,
                Collider::ball(BALL_RADIUS),
                ColliderMassProperties::Mass(1.0),
                Velocity::default(),
                ExternalForce::default(),
                ExternalImpulse::default(),
                Friction::coefficient(1.0),
                Ccd::enabled(),
                ActiveEvents::COLLISION_EVENTS | ActiveEvents::CONTACT_FORCE_EVENTS,
            ),
        ))
        .id()
}
