//! Decorative animation for pickups - bobbing and spinning.

use bevy::prelude::*;
use rand::Rng;

/// Bob-and-spin animation state for a decoration.
///
/// The bob phase is seeded from the decoration's position so rows of
/// collectables bob in a travelling wave instead of in lockstep.
#[derive(Component)]
pub struct BobAndSpin {
    pub base_y: f32,
    pub bob_phase: f32,
    pub bob_amplitude: f32,
}

impl BobAndSpin {
    pub fn at(position: Vec3) -> Self {
        Self {
            base_y: position.y,
            bob_phase: ((position.x + position.z) / 5.0).sin(),
            bob_amplitude: 1.0,
        }
    }

    /// Random starting yaw so a field of pickups doesn't face one way.
    pub fn random_start_yaw() -> f32 {
        rand::thread_rng().gen_range(0.0..std::f32::consts::TAU)
    }
}

const SPIN_SPEED: f32 = std::f32::consts::FRAC_PI_2;

/// Animate decorations on the frame clock.
pub fn bob_and_spin(time: Res<Time>, mut query: Query<(&mut BobAndSpin, &mut Transform)>) {
    for (mut decor, mut transform) in &mut query {
        transform.rotate_y(SPIN_SPEED * time.delta_secs());

        decor.bob_phase += time.delta_secs();
        transform.translation.y = decor.base_y + decor.bob_amplitude * 0.4 * decor.bob_phase.sin();
    }
}
