//! Level data structures and RON loading.
//!
//! Levels are described declaratively: a spawn point, a set of cuboid ground
//! blocks, and a list of element placements. Positions and sizes are plain
//! float tuples in the files and converted to `Vec3` at build time.

use bevy::prelude::*;
use bevy::utils::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::error::LevelLoadError;

/// Convert a RON float triple into a world vector.
pub fn vec3(t: (f32, f32, f32)) -> Vec3 {
    Vec3::new(t.0, t.1, t.2)
}

fn default_death_height() -> f32 {
    -50.0
}

fn default_value() -> i32 {
    1
}

fn default_boost_factor() -> f32 {
    5.0
}

fn default_bumper_force() -> f32 {
    20.0
}

fn default_bumper_radius() -> f32 {
    1.0
}

fn default_duration() -> f32 {
    1.0
}

fn default_smoothing() -> f32 {
    1.0
}

fn default_reload_time() -> f32 {
    1.5
}

fn default_cannon_force() -> f32 {
    100.0
}

/// A cuboid ground/wall block.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDef {
    pub position: (f32, f32, f32),
    pub size: (f32, f32, f32),
    #[serde(default)]
    pub color: Option<(f32, f32, f32)>,
}

/// One level element placement.
#[derive(Debug, Clone, Deserialize)]
pub enum ElementDef {
    /// Volume that multiplies the ball's acceleration while overlapped.
    Booster {
        position: (f32, f32, f32),
        size: (f32, f32, f32),
        #[serde(default = "default_boost_factor")]
        boost_factor: f32,
    },
    /// Updates the respawn point when touched.
    Checkpoint { position: (f32, f32, f32) },
    /// Grants points when collected.
    Collectable {
        position: (f32, f32, f32),
        #[serde(default = "default_value")]
        value: i32,
    },
    /// Ends the level, optionally gated behind a score threshold.
    Goal {
        position: (f32, f32, f32),
        #[serde(default)]
        required_score: Option<i32>,
    },
    /// Knocks the ball away on contact.
    Bumper {
        position: (f32, f32, f32),
        #[serde(default = "default_bumper_radius")]
        radius: f32,
        #[serde(default = "default_bumper_force")]
        force: f32,
    },
    /// Applies a fixed impulse when entered.
    LaunchPad {
        position: (f32, f32, f32),
        size: (f32, f32, f32),
        impulse: (f32, f32, f32),
    },
    /// One end of a teleporter pair; `link` names the partner's `id`.
    Teleporter {
        id: String,
        link: String,
        position: (f32, f32, f32),
    },
    /// Kinematic platform looping between its start pose and an offset pose.
    MovingPlatform {
        position: (f32, f32, f32),
        size: (f32, f32, f32),
        movement: (f32, f32, f32),
        #[serde(default)]
        end_rotation: (f32, f32, f32),
        #[serde(default = "default_duration")]
        duration: f32,
        #[serde(default = "default_smoothing")]
        smoothing: f32,
    },
    /// Periodically fires a cannonball along its aim axis.
    Cannon {
        position: (f32, f32, f32),
        aim: (f32, f32, f32),
        #[serde(default = "default_cannon_force")]
        force: f32,
        #[serde(default = "default_reload_time")]
        reload_time: f32,
        #[serde(default)]
        start_phase: f32,
    },
}

/// A complete level as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub spawn_point: (f32, f32, f32),
    /// Initial camera (pitch, yaw) in degrees.
    #[serde(default)]
    pub camera_start: (f32, f32),
    /// y level at which the ball starts dying.
    #[serde(default = "default_death_height")]
    pub death_height: f32,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
}

/// All loaded levels, keyed by file stem.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    levels: HashMap<String, LevelData>,
}

impl LevelRegistry {
    pub fn get(&self, name: &str) -> Option<&LevelData> {
        self.levels.get(name)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Resource naming which level to play.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "rolling_meadow".to_string(),
        }
    }
}

/// Parse one level file.
fn load_level_file(path: &Path) -> Result<LevelData, LevelLoadError> {
    let contents = fs::read_to_string(path).map_err(|e| LevelLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| LevelLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Load all level definitions from assets/levels/.
///
/// Individual broken files are logged and skipped; an entirely empty
/// directory leaves the registry empty and the game parked in Loading.
pub fn load_level_registry(mut commands: Commands) {
    let mut registry = LevelRegistry::default();
    let levels_dir = Path::new("assets/levels");

    match fs::read_dir(levels_dir) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "ron") {
                    let Some(stem) = path.file_stem() else {
                        continue;
                    };
                    let key = stem.to_string_lossy().to_string();
                    match load_level_file(&path) {
                        Ok(level) => {
                            info!("Loaded level '{}' ({})", level.name, key);
                            registry.levels.insert(key, level);
                        }
                        Err(e) => error!("{}", e),
                    }
                }
            }
        }
        Err(e) => error!(
            "{}",
            LevelLoadError::ReadError {
                path: levels_dir.display().to_string(),
                details: e.to_string(),
            }
        ),
    }

    if registry.is_empty() {
        error!(
            "{}",
            LevelLoadError::NoLevels {
                dir: levels_dir.display().to_string(),
            }
        );
    } else {
        info!("Loaded {} level(s)", registry.len());
    }
    commands.insert_resource(registry);
}
