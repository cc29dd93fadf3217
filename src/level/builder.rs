//! Level construction from data definitions.

use bevy::prelude::*;
use bevy::utils::HashMap;
use bevy_rapier3d::prelude::*;

use super::data::{vec3, BlockDef, ElementDef, LevelData};
use super::decor::BobAndSpin;
use super::elements::{
    Bumper, Checkpoint, Collectable, LaunchPad, LevelGoal, SpeedBoosterPad, Teleporter,
    TeleporterLink,
};
use super::hazards::{Cannon, MovingPlatform};
use crate::PHYSICS_TICK_RATE;

/// Marker for every entity spawned as part of the level.
#[derive(Component)]
pub struct LevelEntity;

const BLOCK_COLOR: Color = Color::srgb(0.45, 0.55, 0.4);
const BOOSTER_COLOR: Color = Color::srgba(1.0, 0.55, 0.1, 0.55);
const LAUNCH_PAD_COLOR: Color = Color::srgb(0.06, 0.14, 1.0);
const CHECKPOINT_COLOR: Color = Color::srgb(0.0, 0.26, 1.0);
const GOAL_LOCKED_COLOR: Color = Color::srgb(1.0, 0.31, 0.4);
const GOAL_OPEN_COLOR: Color = Color::srgb(0.0, 1.0, 0.35);
const COLLECTABLE_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);
const BUMPER_COLOR: Color = Color::srgb(0.9, 0.2, 0.6);
const TELEPORTER_COLOR: Color = Color::srgb(0.55, 0.2, 0.9);

/// Build a level from its data definition. Returns the player spawn point.
pub fn build_level(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    level: &LevelData,
) -> Vec3 {
    setup_environment(commands);

    for block in &level.blocks {
        spawn_block(commands, meshes, materials, block);
    }

    // Teleporters link to each other by id, so they spawn in two passes:
    // first the pads, then the links once every id has an entity.
    let mut teleporters_by_id: HashMap<String, Entity> = HashMap::default();
    let mut teleporter_links: Vec<(Entity, String)> = Vec::new();

    for element in &level.elements {
        spawn_element(
            commands,
            meshes,
            materials,
            element,
            &mut teleporters_by_id,
            &mut teleporter_links,
        );
    }

    for (entity, link) in teleporter_links {
        match teleporters_by_id.get(&link) {
            Some(&target) => {
                commands.entity(entity).insert(TeleporterLink(target));
            }
            // An unlinked teleporter is inert, not fatal.
            None => warn!("Teleporter links to unknown id '{}'", link),
        }
    }

    vec3(level.spawn_point)
}

/// Set up global ambient light and sunlight.
fn setup_environment(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.8, 0.85, 1.0),
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        LevelEntity,
    ));
}

/// Spawn one solid ground/wall block.
fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    block: &BlockDef,
) {
    let size = vec3(block.size);
    let color = block
        .color
        .map(|(r, g, b)| Color::srgb(r, g, b))
        .unwrap_or(BLOCK_COLOR);

    commands.spawn((
        LevelEntity,
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(materials.add(color)),
        Transform::from_translation(vec3(block.position)),
        Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
        Friction::coefficient(1.0),
    ));
}

fn spawn_element(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    element: &ElementDef,
    teleporters_by_id: &mut HashMap<String, Entity>,
    teleporter_links: &mut Vec<(Entity, String)>,
) {
    match element {
        ElementDef::Booster {
            position,
            size,
            boost_factor,
        } => {
            let size = vec3(*size);
            commands.spawn((
                LevelEntity,
                SpeedBoosterPad {
                    boost_factor: *boost_factor,
                },
                Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: BOOSTER_COLOR,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                })),
                Transform::from_translation(vec3(*position)),
                Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
                Sensor,
            ));
        }
        ElementDef::Checkpoint { position } => {
            commands.spawn((
                LevelEntity,
                Checkpoint { active: false },
                Mesh3d(meshes.add(Cylinder::new(0.8, 0.2))),
                MeshMaterial3d(materials.add(CHECKPOINT_COLOR)),
                Transform::from_translation(vec3(*position)),
                Collider::cylinder(1.0, 0.8),
                Sensor,
            ));
        }
        ElementDef::Collectable { position, value } => {
            let position = vec3(*position);
            commands.spawn((
                LevelEntity,
                Collectable { value: *value },
                BobAndSpin::at(position),
                Mesh3d(meshes.add(Sphere::new(0.3))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: COLLECTABLE_COLOR,
                    emissive: LinearRgba::new(1.0, 0.8, 0.1, 1.0),
                    ..default()
                })),
                Transform::from_translation(position)
                    .with_rotation(Quat::from_rotation_y(BobAndSpin::random_start_yaw())),
                Collider::ball(0.5),
                Sensor,
            ));
        }
        ElementDef::Goal {
            position,
            required_score,
        } => {
            let locked = required_score.is_some();
            commands.spawn((
                LevelEntity,
                LevelGoal {
                    required_score: *required_score,
                    active: !locked,
                },
                Mesh3d(meshes.add(Cylinder::new(1.2, 0.3))),
                MeshMaterial3d(materials.add(if locked {
                    GOAL_LOCKED_COLOR
                } else {
                    GOAL_OPEN_COLOR
                })),
                Transform::from_translation(vec3(*position)),
                Collider::cylinder(1.5, 1.2),
                Sensor,
            ));
        }
        ElementDef::Bumper {
            position,
            radius,
            force,
        } => {
            commands.spawn((
                LevelEntity,
                Bumper { force: *force },
                Mesh3d(meshes.add(Sphere::new(*radius))),
                MeshMaterial3d(materials.add(BUMPER_COLOR)),
                Transform::from_translation(vec3(*position)),
                Collider::ball(*radius),
                Restitution::coefficient(0.8),
            ));
        }
        ElementDef::LaunchPad {
            position,
            size,
            impulse,
        } => {
            let size = vec3(*size);
            commands.spawn((
                LevelEntity,
                LaunchPad {
                    impulse: vec3(*impulse),
                },
                Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                MeshMaterial3d(materials.add(LAUNCH_PAD_COLOR)),
                Transform::from_translation(vec3(*position)),
                Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
                Sensor,
            ));
        }
        ElementDef::Teleporter { id, link, position } => {
            let entity = commands
                .spawn((
                    LevelEntity,
                    Teleporter { armed: true },
                    Mesh3d(meshes.add(Cylinder::new(1.0, 0.15))),
                    MeshMaterial3d(materials.add(TELEPORTER_COLOR)),
                    Transform::from_translation(vec3(*position)),
                    Collider::cylinder(1.0, 1.0),
                    Sensor,
                ))
                .id();
            if teleporters_by_id.insert(id.clone(), entity).is_some() {
                warn!("Duplicate teleporter id '{}'", id);
            }
            teleporter_links.push((entity, link.clone()));
        }
        ElementDef::MovingPlatform {
            position,
            size,
            movement,
            end_rotation,
            duration,
            smoothing,
        } => {
            let size = vec3(*size);
            let start = vec3(*position);
            let end_rotation = vec3(*end_rotation);
            commands.spawn((
                LevelEntity,
                MovingPlatform {
                    start_position: start,
                    end_position: start + vec3(*movement),
                    start_rotation: Quat::IDENTITY,
                    end_rotation: Quat::from_euler(
                        EulerRot::XYZ,
                        end_rotation.x.to_radians(),
                        end_rotation.y.to_radians(),
                        end_rotation.z.to_radians(),
                    ),
                    duration_ticks: (duration * PHYSICS_TICK_RATE).max(1.0),
                    smoothing: smoothing.clamp(0.0, 1.0),
                    counter: 0.0,
                },
                Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                MeshMaterial3d(materials.add(BLOCK_COLOR)),
                Transform::from_translation(start),
                RigidBody::KinematicPositionBased,
                Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
                Friction::coefficient(1.0),
            ));
        }
        ElementDef::Cannon {
            position,
            aim,
            force,
            reload_time,
            start_phase,
        } => {
            commands.spawn((
                LevelEntity,
                Cannon {
                    aim: vec3(*aim),
                    force: *force,
                    reload_time: *reload_time,
                    timer: *start_phase,
                },
                Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
                MeshMaterial3d(materials.add(Color::srgb(0.3, 0.3, 0.32))),
                Transform::from_translation(vec3(*position)),
                Collider::cuboid(0.5, 0.5, 0.5),
            ));
        }
    }
}
