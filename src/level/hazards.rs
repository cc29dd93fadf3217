//! Fixed-tick hazards: moving platforms and cannons.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::builder::LevelEntity;

/// Kinematic platform looping between a start and end pose.
///
/// The loop phase blends a triangle wave (fully linear motion) with a cosine
/// wave (fully smooth motion) according to `smoothing`.
#[derive(Component)]
pub struct MovingPlatform {
    pub start_position: Vec3,
    pub end_position: Vec3,
    pub start_rotation: Quat,
    pub end_rotation: Quat,
    /// Loop duration in physics ticks.
    pub duration_ticks: f32,
    /// 0 = linear, 1 = smooth.
    pub smoothing: f32,
    pub counter: f32,
}

/// Interpolation phase in [0, 1] for a platform `counter` ticks into its
/// loop: 0 at the start pose, 1 at the end pose half a loop later.
pub fn platform_phase(counter: f32, duration_ticks: f32, smoothing: f32) -> f32 {
    let cycle = counter / duration_ticks;
    let triangle = 2.0 * ((cycle % 1.0) - 0.5).abs();
    let cosine = 0.5 * (std::f32::consts::TAU * cycle).cos() + 0.5;
    1.0 - ((1.0 - smoothing) * triangle + smoothing * cosine)
}

/// Advance every moving platform one tick.
pub fn move_platforms(mut query: Query<(&mut MovingPlatform, &mut Transform)>) {
    for (mut platform, mut transform) in &mut query {
        platform.counter += 1.0;
        let phase = platform_phase(platform.counter, platform.duration_ticks, platform.smoothing);
        transform.translation = platform.start_position.lerp(platform.end_position, phase);
        transform.rotation = platform.start_rotation.slerp(platform.end_rotation, phase);
    }
}

/// Fires a cannonball along its aim axis every reload period.
#[derive(Component)]
pub struct Cannon {
    pub aim: Vec3,
    pub force: f32,
    pub reload_time: f32,
    /// Seconds since the last shot; pre-set to stagger synchronized cannons.
    pub timer: f32,
}

/// A fired projectile. Ages out by shrinking rather than popping out of
/// existence.
#[derive(Component)]
pub struct Cannonball {
    pub age: f32,
    pub lifetime: f32,
}

const CANNONBALL_RADIUS: f32 = 0.4;

/// Fire cannons whose reload timer has elapsed.
pub fn fire_cannons(
    mut commands: Commands,
    time: Res<Time>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut cannons: Query<(&mut Cannon, &Transform)>,
) {
    for (mut cannon, transform) in &mut cannons {
        cannon.timer += time.delta_secs();
        if cannon.timer < cannon.reload_time {
            continue;
        }
        cannon.timer -= cannon.reload_time;

        let aim = cannon.aim.normalize_or_zero();
        commands.spawn((
            LevelEntity,
            Cannonball {
                age: 0.0,
                lifetime: 5.0,
            },
            Mesh3d(meshes.add(Sphere::new(CANNONBALL_RADIUS))),
            MeshMaterial3d(materials.add(Color::srgb(0.2, 0.2, 0.22))),
            Transform::from_translation(transform.translation + aim * 1.0),
            RigidBody::Dynamic,
            Collider::ball(CANNONBALL_RADIUS),
            ColliderMassProperties::Mass(1.0),
            Velocity::default(),
            ExternalImpulse {
                impulse: aim * cannon.force,
                ..default()
            },
            Ccd::enabled(),
        ));
    }
}

/// Age cannonballs and shrink expired ones away.
pub fn age_cannonballs(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Cannonball, &mut Transform)>,
) {
    for (entity, mut ball, mut transform) in &mut query {
        ball.age += time.delta_secs();
        if ball.age < ball.lifetime {
            continue;
        }
        transform.scale *= 0.99;
        if transform.scale.length() <= 0.01 {
            commands.entity(entity).despawn_recursive();
        }
    }
}
