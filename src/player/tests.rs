//! Player domain: tests for the pure locomotion bookkeeping.

use approx::assert_relative_eq;
use bevy::prelude::*;

use super::components::*;
use super::movement::wish_direction;
use super::OrbitAngles;

// -----------------------------------------------------------------------------
// Booster set
// -----------------------------------------------------------------------------

#[test]
fn booster_multiplier_is_max_of_members() {
    let a = Entity::from_raw(1);
    let b = Entity::from_raw(2);
    let mut boosters = Boosters::default();

    assert_relative_eq!(boosters.active_multiplier(), 1.0);

    boosters.add(a, 2.0);
    assert_relative_eq!(boosters.active_multiplier(), 2.0);

    boosters.add(b, 5.0);
    assert_relative_eq!(boosters.active_multiplier(), 5.0);

    boosters.remove(a);
    assert_relative_eq!(boosters.active_multiplier(), 5.0);

    boosters.remove(b);
    assert_relative_eq!(boosters.active_multiplier(), 1.0);
}

#[test]
fn booster_readd_with_lower_factor_drops_the_max() {
    let a = Entity::from_raw(1);
    let mut boosters = Boosters::default();

    boosters.add(a, 5.0);
    boosters.add(a, 2.0);
    assert_relative_eq!(boosters.active_multiplier(), 2.0);
}

#[test]
fn booster_remove_of_missing_member_is_noop() {
    let a = Entity::from_raw(1);
    let stranger = Entity::from_raw(99);
    let mut boosters = Boosters::default();

    boosters.add(a, 3.0);
    boosters.remove(stranger);
    assert_relative_eq!(boosters.active_multiplier(), 3.0);
}

#[test]
fn booster_order_of_removal_does_not_matter() {
    let a = Entity::from_raw(1);
    let b = Entity::from_raw(2);

    let mut forward = Boosters::default();
    forward.add(a, 2.0);
    forward.add(b, 5.0);
    forward.remove(b);

    let mut backward = Boosters::default();
    backward.add(b, 5.0);
    backward.add(a, 2.0);
    backward.remove(b);

    assert_relative_eq!(forward.active_multiplier(), 2.0);
    assert_relative_eq!(backward.active_multiplier(), 2.0);
}

// -----------------------------------------------------------------------------
// Jump budget
// -----------------------------------------------------------------------------

#[test]
fn ground_jump_is_always_available() {
    let mut jumps = JumpState::default();
    assert_eq!(jumps.try_jump(true, 1), Some(JumpKind::Grounded));
    jumps.land();
    assert_eq!(jumps.try_jump(true, 1), Some(JumpKind::Grounded));
}

#[test]
fn single_jump_config_has_no_air_jump() {
    let mut jumps = JumpState::default();
    assert_eq!(jumps.try_jump(true, 1), Some(JumpKind::Grounded));
    assert_eq!(jumps.try_jump(false, 1), None);
}

#[test]
fn falling_off_a_ledge_charges_one_jump() {
    // Double-jump config, but the player walked off without jumping: the
    // airborne state itself counts as the first jump.
    let mut jumps = JumpState::default();
    assert_eq!(jumps.try_jump(false, 2), Some(JumpKind::Airborne));
    assert_eq!(jumps.try_jump(false, 2), None);
}

#[test]
fn jump_budget_never_exceeds_max() {
    let mut jumps = JumpState::default();
    assert_eq!(jumps.try_jump(true, 3), Some(JumpKind::Grounded));
    assert_eq!(jumps.try_jump(false, 3), Some(JumpKind::Airborne));
    assert_eq!(jumps.try_jump(false, 3), Some(JumpKind::Airborne));
    assert!(jumps.spent <= 3);
    assert_eq!(jumps.try_jump(false, 3), None);
    assert_eq!(jumps.spent, 3);
}

#[test]
fn landing_resets_budget_to_zero() {
    let mut jumps = JumpState::default();
    jumps.try_jump(true, 2);
    jumps.try_jump(false, 2);
    jumps.land();
    assert_eq!(jumps.spent, 0);
}

// -----------------------------------------------------------------------------
// Death watchdog
// -----------------------------------------------------------------------------

#[test]
fn watchdog_triggers_after_sustained_dip() {
    let mut watch = DeathWatch::new(-50.0);
    for _ in 0..DEATH_FRAMES - 1 {
        assert!(!watch.tick(true));
    }
    assert!(watch.tick(true));
    // Counter reset on trigger.
    assert_relative_eq!(watch.dying_ratio(), 0.0);
}

#[test]
fn watchdog_recovers_from_brief_dips() {
    let mut watch = DeathWatch::new(-50.0);
    for _ in 0..DEATH_FRAMES - 1 {
        assert!(!watch.tick(true));
    }
    // One tick back above the death plane unwinds the counter a step, so the
    // next tick below must not trigger.
    assert!(!watch.tick(false));
    assert!(!watch.tick(true));
}

#[test]
fn watchdog_counter_never_goes_negative() {
    let mut watch = DeathWatch::new(-50.0);
    for _ in 0..10 {
        assert!(!watch.tick(false));
    }
    assert_relative_eq!(watch.dying_ratio(), 0.0);
}

#[test]
fn dying_ratio_climbs_linearly() {
    let mut watch = DeathWatch::new(-50.0);
    for _ in 0..DEATH_FRAMES / 2 {
        watch.tick(true);
    }
    assert_relative_eq!(watch.dying_ratio(), 0.5);
}

// -----------------------------------------------------------------------------
// Camera angles
// -----------------------------------------------------------------------------

#[test]
fn pitch_never_enters_excluded_band() {
    let mut angles = OrbitAngles::default();
    let deltas = [
        Vec2::new(0.0, -500.0),
        Vec2::new(120.0, 37.0),
        Vec2::new(-3.0, 901.5),
        Vec2::new(0.0, -179.0),
        Vec2::new(45.0, 270.0),
        Vec2::new(0.0, -1.0),
    ];
    for delta in deltas {
        angles.apply_delta(delta, 0.7);
        assert!(
            !(angles.pitch > 89.0 && angles.pitch < 271.0),
            "pitch {} inside excluded band",
            angles.pitch
        );
        assert!((0.0..360.0).contains(&angles.pitch));
        assert!((0.0..360.0).contains(&angles.yaw));
    }
}

#[test]
fn pitch_snaps_to_nearest_pole_stop() {
    // A delta that would carry pitch to 130 lands exactly on 89.
    let mut down = OrbitAngles::default();
    down.apply_delta(Vec2::new(0.0, -130.0), 1.0);
    assert_relative_eq!(down.pitch, 89.0);

    // One that would carry pitch to 230 lands exactly on 271.
    let mut up = OrbitAngles::default();
    up.apply_delta(Vec2::new(0.0, 130.0), 1.0);
    assert_relative_eq!(up.pitch, 271.0);
}

#[test]
fn yaw_wraps_into_range() {
    let mut angles = OrbitAngles::default();
    angles.apply_delta(Vec2::new(725.0, 0.0), 1.0);
    assert_relative_eq!(angles.yaw, 5.0, max_relative = 1e-5);

    angles.apply_delta(Vec2::new(-10.0, 0.0), 1.0);
    assert_relative_eq!(angles.yaw, 355.0, max_relative = 1e-5);
}

#[test]
fn direction_is_unit_length() {
    let angles = OrbitAngles::new(30.0, 200.0);
    assert_relative_eq!(angles.direction().length(), 1.0, max_relative = 1e-5);
}

// -----------------------------------------------------------------------------
// Movement modes and braking
// -----------------------------------------------------------------------------

#[test]
fn movement_modes_restrict_axes() {
    let input = Vec2::new(0.8, 0.3);
    assert_eq!(
        MovementMode::BackAndForth.filter(input),
        Vec2::new(0.0, 0.3)
    );
    assert_eq!(MovementMode::SideToSide.filter(input), Vec2::new(0.8, 0.0));
    assert_eq!(
        MovementMode::RookMovement.filter(input),
        Vec2::new(0.8, 0.0)
    );
    assert_eq!(
        MovementMode::RookMovement.filter(Vec2::new(0.2, -0.9)),
        Vec2::new(0.0, -0.9)
    );
    assert_eq!(MovementMode::Omnidirectional.filter(input), input);
}

#[test]
fn braking_scales_horizontal_velocity_exactly() {
    let braked = super::movement::brake_velocity(Vec3::new(10.0, -4.0, -20.0), 0.05);
    assert_relative_eq!(braked.x, 9.5);
    assert_relative_eq!(braked.y, -4.0);
    assert_relative_eq!(braked.z, -19.0);
}

#[test]
fn brake_modes_gate_on_ground_state() {
    assert!(!BrakeMode::Never.permits(true));
    assert!(!BrakeMode::Never.permits(false));
    assert!(BrakeMode::GroundedOnly.permits(true));
    assert!(!BrakeMode::GroundedOnly.permits(false));
    assert!(BrakeMode::AnyTime.permits(true));
    assert!(BrakeMode::AnyTime.permits(false));
}

// -----------------------------------------------------------------------------
// Movement basis
// -----------------------------------------------------------------------------

#[test]
fn wish_direction_is_horizontal_unit_or_zero() {
    let facing = Vec2::new(0.3, -0.9);
    for input in [
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, -1.0),
        Vec2::new(0.5, 0.5),
        Vec2::new(-0.2, 0.1),
    ] {
        let wish = wish_direction(input, facing);
        assert_relative_eq!(wish.length(), 1.0, max_relative = 1e-5);
        assert_relative_eq!(wish.y, 0.0);
    }

    assert_eq!(wish_direction(Vec2::ZERO, facing), Vec3::ZERO);
    assert_eq!(wish_direction(Vec2::ONE, Vec2::ZERO), Vec3::ZERO);
}

#[test]
fn forward_input_pushes_along_facing() {
    let facing = Vec2::new(0.0, 1.0);
    let wish = wish_direction(Vec2::new(0.0, 1.0), facing);
    assert_relative_eq!(wish.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(wish.z, 1.0, epsilon = 1e-6);
}

#[test]
fn lateral_input_pushes_to_camera_right() {
    // Facing -Z, the camera's default forward: right is +X.
    let wish = wish_direction(Vec2::X, Vec2::new(0.0, -1.0));
    assert_relative_eq!(wish.x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(wish.z, 0.0, epsilon = 1e-6);

    // Facing +X (90 degrees of yaw): right is +Z.
    let wish = wish_direction(Vec2::X, Vec2::new(1.0, 0.0));
    assert_relative_eq!(wish.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(wish.z, 1.0, epsilon = 1e-6);

    // A-input mirrors to camera-left.
    let wish = wish_direction(Vec2::new(-1.0, 0.0), Vec2::new(0.0, -1.0));
    assert_relative_eq!(wish.x, -1.0, epsilon = 1e-6);
}

// -----------------------------------------------------------------------------
// Tuning validation
// -----------------------------------------------------------------------------

#[test]
fn degenerate_tuning_is_clamped() {
    let tuning = PlayerTuning {
        base_speed: 0.0,
        base_acceleration: -3.0,
        jump_count: 0,
        brake_amount: 2.0,
        ..PlayerTuning::default()
    }
    .validated();

    assert!(tuning.base_speed >= 1.0);
    assert!(tuning.base_acceleration >= 1.0);
    assert_eq!(tuning.jump_count, 1);
    assert!(tuning.brake_amount <= 1.0);
    assert!(tuning.drag_coefficient().is_finite());
}

#[test]
fn drag_coefficient_is_acceleration_over_speed() {
    let tuning = PlayerTuning {
        base_speed: 20.0,
        base_acceleration: 10.0,
        ..PlayerTuning::default()
    };
    assert_relative_eq!(tuning.drag_coefficient(), 0.5);
}
