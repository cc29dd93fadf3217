//! Player-related components, resources, and tuning.
//!
//! The pure gameplay bookkeeping (booster set, jump budget, death watchdog)
//! lives here as plain types with no engine calls, so the physics systems in
//! `movement` stay thin and the rules stay unit-testable.

use bevy::prelude::*;
use bevy::utils::HashMap;
use serde::Deserialize;
use std::fs;

/// Angular drag torque applied around the vertical axis while rolling, to
/// stop the ball spinning in place from rolling friction.
pub const SPIN_DRAG: f32 = 0.5;
/// Coefficient by which the ball's rotation slows while airborne.
pub const AIR_ANGULAR_DRAG: f32 = 0.025;
/// Physics ticks the ball must spend below the death height before respawning.
pub const DEATH_FRAMES: u32 = 50;
/// Radius of the player ball collider.
pub const BALL_RADIUS: f32 = 0.5;
/// How far below the ball surface the ground probe reaches.
pub const GROUND_PROBE_DISTANCE: f32 = 0.2;
/// Vertical offset added to respawn points so the ball never re-penetrates
/// the geometry it respawns on.
pub const RESPAWN_EPSILON: f32 = 0.1;

/// Marker component for the player ball entity.
#[derive(Component)]
pub struct Player;

/// Which directions the player can move in, relative to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum MovementMode {
    /// Only away from and towards the camera.
    BackAndForth,
    /// Only left and right across the camera.
    SideToSide,
    /// Forwards, backwards, left, and right, but never diagonally.
    RookMovement,
    /// Any direction.
    #[default]
    Omnidirectional,
}

impl MovementMode {
    /// Restrict a raw input vector to the axes this mode allows.
    pub fn filter(self, input: Vec2) -> Vec2 {
        match self {
            MovementMode::BackAndForth => Vec2::new(0.0, input.y),
            MovementMode::SideToSide => Vec2::new(input.x, 0.0),
            MovementMode::RookMovement => {
                if input.x.abs() > input.y.abs() {
                    Vec2::new(input.x, 0.0)
                } else {
                    Vec2::new(0.0, input.y)
                }
            }
            MovementMode::Omnidirectional => input,
        }
    }
}

/// When the player is allowed to brake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum BrakeMode {
    /// Braking is disabled.
    #[default]
    Never,
    /// Braking only works on the ground.
    GroundedOnly,
    /// Braking works both on the ground and in the air.
    AnyTime,
}

impl BrakeMode {
    /// Whether braking is permitted in the given ground state.
    pub fn permits(self, grounded: bool) -> bool {
        match self {
            BrakeMode::Never => false,
            BrakeMode::GroundedOnly => grounded,
            BrakeMode::AnyTime => true,
        }
    }
}

/// Directional input sampled once per frame, read by the fixed-tick systems.
///
/// The axis vector has magnitude <= 1 and is already restricted to the
/// configured [`MovementMode`].
#[derive(Resource, Default)]
pub struct MoveInput {
    pub axis: Vec2,
    pub braking: bool,
}

/// Sent when the player presses the jump input.
#[derive(Event)]
pub struct JumpEvent;

/// Result of the ground probe, valid for the physics tick it was sampled in.
///
/// Written by `sample_ground` at the start of every fixed tick, before any
/// system that reads it - the "once per tick" memoization is the system
/// ordering, not a timestamp.
#[derive(Component, Default)]
pub struct GroundContact {
    pub grounded: bool,
    /// Probe hit distance from the ball centre, if anything was hit.
    pub distance: Option<f32>,
}

/// How a successful jump should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// Straight impulse on top of current velocity.
    Grounded,
    /// Vertical velocity is zeroed before the impulse.
    Airborne,
}

/// Counts jumps spent since the ball last touched the ground.
#[derive(Component, Default)]
pub struct JumpState {
    pub spent: u32,
}

impl JumpState {
    /// Reset the budget on landing.
    pub fn land(&mut self) {
        self.spent = 0;
    }

    /// Try to spend a jump. Returns how to apply it, or `None` if no jumps
    /// remain.
    ///
    /// Jumping off the ground is always possible. In the air, falling off a
    /// ledge without jumping charges one jump first, so a double-jump setup
    /// never grants two full jumps after a plain fall.
    pub fn try_jump(&mut self, grounded: bool, max_jumps: u32) -> Option<JumpKind> {
        if grounded {
            self.spent = (self.spent + 1).min(max_jumps);
            return Some(JumpKind::Grounded);
        }
        if self.spent == 0 {
            self.spent = 1;
        }
        if self.spent < max_jumps {
            self.spent += 1;
            Some(JumpKind::Airborne)
        } else {
            None
        }
    }
}

/// Debounce counter for the fall-into-the-void respawn.
///
/// The counter climbs while the ball sits at or below the death height and
/// unwinds one step per tick above it, so a brief dip through a thin gap
/// never triggers a respawn.
#[derive(Component)]
pub struct DeathWatch {
    /// y level at which the ball counts as dying.
    pub death_height: f32,
    frames: u32,
}

impl DeathWatch {
    pub fn new(death_height: f32) -> Self {
        Self {
            death_height,
            frames: 0,
        }
    }

    /// Advance the watchdog one physics tick. Returns `true` exactly when the
    /// respawn should fire; the counter resets to zero at that point.
    pub fn tick(&mut self, below_death_height: bool) -> bool {
        if below_death_height {
            self.frames += 1;
            if self.frames >= DEATH_FRAMES {
                self.frames = 0;
                return true;
            }
        } else if self.frames > 0 {
            self.frames -= 1;
        }
        false
    }

    /// How far along the ball is towards dying, in [0, 1]. Read by the HUD
    /// for the fade-to-black overlay.
    pub fn dying_ratio(&self) -> f32 {
        self.frames as f32 / DEATH_FRAMES as f32
    }
}

/// The set of speed boosters the ball currently overlaps.
///
/// Keyed by booster entity so that enter/exit pairs from overlapping volumes
/// can arrive in any order. The active multiplier is the maximum boost factor
/// among members, or 1 when empty; adds fold into the cached maximum, removes
/// rescan the (tiny) remainder.
#[derive(Component, Default)]
pub struct Boosters {
    factors: HashMap<Entity, f32>,
    active: Option<f32>,
}

impl Boosters {
    /// Register an overlapping booster. O(1) for a new member; re-adding an
    /// existing member replaces its factor and rescans, since the replaced
    /// value may have been the maximum.
    pub fn add(&mut self, source: Entity, factor: f32) {
        if self.factors.insert(source, factor).is_some() {
            self.rescan();
        } else if factor > self.active.unwrap_or(1.0) {
            self.active = Some(factor);
        }
    }

    /// Remove a booster the ball has left. Removing a booster that was never
    /// added is a no-op. O(k) in the number of remaining boosters.
    pub fn remove(&mut self, source: Entity) {
        if self.factors.remove(&source).is_none() {
            return;
        }
        self.rescan();
    }

    fn rescan(&mut self) {
        self.active = self
            .factors
            .values()
            .copied()
            .fold(None, |best, f| Some(best.map_or(f, |b: f32| b.max(f))));
    }

    /// The multiplier applied to base acceleration this tick.
    pub fn active_multiplier(&self) -> f32 {
        self.active.map_or(1.0, |f| f.max(1.0))
    }
}

/// Where the ball goes when the watchdog fires. Updated by checkpoints.
#[derive(Component)]
pub struct RespawnPoint(pub Vec3);

/// Player movement tuning loaded from assets/config/player.ron.
///
/// Allows tweaking the feel of the ball without recompilation.
#[derive(Resource, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Max speed before modifiers such as speed boosters.
    pub base_speed: f32,
    /// Acceleration. Lower than base_speed gives the ball weight; higher
    /// makes it very responsive.
    pub base_acceleration: f32,
    /// How much control the player has in the air. 0 disables air steering.
    pub air_control_multiplier: f32,
    /// Which directions input can push the ball, relative to the camera.
    pub movement_mode: MovementMode,
    /// Whether the jump input does anything.
    pub allow_jumping: bool,
    /// Impulse applied on jump.
    pub jump_force: f32,
    /// Total jumps before landing: 1 = ground only, n = ground plus n-1 in
    /// the air.
    pub jump_count: u32,
    /// When braking is permitted.
    pub allow_braking: BrakeMode,
    /// Fraction of horizontal velocity removed per tick while braking.
    pub brake_amount: f32,
    /// Mouse sensitivity for the orbit camera.
    pub mouse_sensitivity: f32,
    /// How much control the player has over the camera.
    pub camera_mode: super::camera::CameraMode,
    /// Distance the camera follows the ball from.
    pub camera_distance: f32,
    /// Offset of the camera focus above the ball.
    pub camera_offset: (f32, f32, f32),
}

impl PlayerTuning {
    /// Camera focus offset as a world vector.
    pub fn camera_focus_offset(&self) -> Vec3 {
        Vec3::new(
            self.camera_offset.0,
            self.camera_offset.1,
            self.camera_offset.2,
        )
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            base_speed: 20.0,
            base_acceleration: 20.0,
            air_control_multiplier: 1.0,
            movement_mode: MovementMode::Omnidirectional,
            allow_jumping: false,
            jump_force: 5.0,
            jump_count: 1,
            allow_braking: BrakeMode::Never,
            brake_amount: 0.05,
            mouse_sensitivity: 0.7,
            camera_mode: super::camera::CameraMode::FullControl,
            camera_distance: 10.0,
            camera_offset: (0.0, 1.0, 0.0),
        }
    }
}

impl PlayerTuning {
    /// Load tuning from the RON file, falling back to defaults when the file
    /// is missing or malformed.
    pub fn load() -> Self {
        let path = "assets/config/player.ron";
        let tuning = match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str::<PlayerTuning>(&contents) {
                Ok(tuning) => {
                    info!("Loaded player tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        };
        tuning.validated()
    }

    /// Clamp degenerate values so derived quantities stay finite. A zero or
    /// negative base speed would make the drag coefficient undefined.
    pub fn validated(mut self) -> Self {
        if self.base_speed < 1.0 {
            warn!("base_speed {} below 1, clamping", self.base_speed);
            self.base_speed = 1.0;
        }
        if self.base_acceleration < 1.0 {
            warn!("base_acceleration {} below 1, clamping", self.base_acceleration);
            self.base_acceleration = 1.0;
        }
        if self.jump_count == 0 {
            warn!("jump_count 0, clamping to 1");
            self.jump_count = 1;
        }
        self.brake_amount = self.brake_amount.clamp(0.0, 1.0);
        self
    }

    /// Linear drag factor along the x-z plane. Linear rather than quadratic
    /// drag is unrealistic, but it gives a soft speed ceiling at exactly
    /// base_speed times the active booster multiplier.
    pub fn drag_coefficient(&self) -> f32 {
        self.base_acceleration / self.base_speed
    }
}
