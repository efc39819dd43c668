//! Character and camera tuning loaded from an external RON file.
//!
//! Allows tweaking all gameplay feel parameters without recompilation.
//! Every value has a sane default; the file overrides them wholesale.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use super::error::ConfigError;
use crate::core::MuzzleSide;

/// Movement feel and collider dimensions.
#[derive(Clone, Deserialize)]
pub struct MovementTuning {
    /// Walk speed in units per second
    pub walk_speed: f32,
    /// Run speed in units per second
    pub run_speed: f32,
    /// Damping time for the animator's speed parameter, in seconds
    pub speed_damp_time: f32,
    /// Turn interpolation rate toward the desired facing (per second)
    pub turn_rate: f32,
    /// Gravity acceleration
    pub gravity: f32,
    /// Small downward velocity applied while grounded, so the ground probe
    /// doesn't flicker at exactly zero
    pub grounded_stick_velocity: f32,
    /// Standing capsule half-height (cylinder part)
    pub capsule_half_height: f32,
    /// Capsule radius
    pub capsule_radius: f32,
    /// Crouched capsule half-height
    pub crouch_half_height: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 2.2,
            run_speed: 5.5,
            speed_damp_time: 0.12,
            turn_rate: 12.0,
            gravity: 20.0,
            grounded_stick_velocity: -2.0,
            capsule_half_height: 0.6,
            capsule_radius: 0.3,
            crouch_half_height: 0.35,
        }
    }
}

impl MovementTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("turn_rate", self.turn_rate),
            ("gravity", self.gravity),
            ("capsule_half_height", self.capsule_half_height),
            ("capsule_radius", self.capsule_radius),
            ("crouch_half_height", self.crouch_half_height),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.crouch_half_height > self.capsule_half_height {
            return Err(ConfigError::CrouchTallerThanStanding {
                crouched: self.crouch_half_height,
                standing: self.capsule_half_height,
            });
        }
        Ok(())
    }
}

/// Weapon, crouch, and cover state timing.
#[derive(Clone, Deserialize)]
pub struct CombatTuning {
    /// Seconds the weapon overlay stays visible after holstering
    pub holster_fade: f32,
    /// Seconds the cover-shot lean is held
    pub cover_shoot_hold: f32,
    /// Minimum seconds between accepted crouch toggles
    pub crouch_cooldown: f32,
    /// Seconds crouch must be held before the camera lowers
    pub crouch_camera_delay: f32,
    /// Muzzle side of the first shot; later shots alternate
    pub start_muzzle_side: MuzzleSide,
    /// Fixed muzzle side used for every shot from cover
    pub cover_shot_side: MuzzleSide,
    /// Blend rate for the upper-body layer weights (per second)
    pub layer_blend_rate: f32,
    /// Extra clearance between the capsule and a cover surface
    pub cover_standoff_margin: f32,
    /// Angular rate toward the camera bearing while in cover (radians/sec)
    pub cover_turn_rate: f32,
    /// How far away a cover surface can be grabbed from
    pub cover_search_radius: f32,
    /// Volume scale for gunshot one-shots
    pub gunshot_volume: f32,
    /// Volume scale for draw/holster foley
    pub foley_volume: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            holster_fade: 0.4,
            cover_shoot_hold: 0.15,
            crouch_cooldown: 0.25,
            crouch_camera_delay: 0.25,
            start_muzzle_side: MuzzleSide::Right,
            cover_shot_side: MuzzleSide::Right,
            layer_blend_rate: 8.0,
            cover_standoff_margin: 0.15,
            cover_turn_rate: 7.0,
            cover_search_radius: 1.6,
            gunshot_volume: 1.0,
            foley_volume: 0.7,
        }
    }
}

impl CombatTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("holster_fade", self.holster_fade),
            ("cover_shoot_hold", self.cover_shoot_hold),
            ("crouch_cooldown", self.crouch_cooldown),
            ("crouch_camera_delay", self.crouch_camera_delay),
            ("layer_blend_rate", self.layer_blend_rate),
            ("cover_turn_rate", self.cover_turn_rate),
            ("cover_search_radius", self.cover_search_radius),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.cover_standoff_margin < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "cover_standoff_margin",
                value: self.cover_standoff_margin,
            });
        }
        Ok(())
    }
}

/// Third-person camera rig tuning.
#[derive(Clone, Deserialize)]
pub struct CameraTuning {
    /// Look sensitivity (radians per input unit per second)
    pub sensitivity: f32,
    /// Pitch limits in radians (negative looks down)
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Follow distance behind the character
    pub base_distance: f32,
    /// Height of the orbit pivot above the character root
    pub base_height: f32,
    /// Signed sideways shoulder offset (positive = right shoulder)
    pub shoulder_offset: f32,
    /// Follow distance while aiming
    pub aim_distance: f32,
    /// Shoulder offset magnitude while aiming (keeps the current side)
    pub aim_shoulder_offset: f32,
    /// Whether aiming zooms the camera at all
    pub aim_zoom_enabled: bool,
    /// Field of view in degrees
    pub base_fov_deg: f32,
    pub aim_fov_deg: f32,
    /// Interpolation rate for shoulder/distance changes (per second)
    pub zoom_rate: f32,
    /// Smooth-damp time for the camera position, in seconds
    pub position_smooth_time: f32,
    /// Interpolation rate for the camera rotation (per second)
    pub rotation_rate: f32,
    /// Interpolation rate for FOV changes (per second)
    pub fov_rate: f32,
    /// Vertical offset applied after crouch has settled (usually negative)
    pub crouch_offset: f32,
    /// Interpolation rate for the crouch offset (per second)
    pub crouch_offset_rate: f32,
    /// Radius of the obstruction probe sphere
    pub obstruction_radius: f32,
    /// Pull-in padding in front of an obstruction hit
    pub obstruction_padding: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            sensitivity: 2.4,
            min_pitch: -1.1,
            max_pitch: 0.9,
            base_distance: 3.2,
            base_height: 1.5,
            shoulder_offset: 0.45,
            aim_distance: 1.6,
            aim_shoulder_offset: 0.65,
            aim_zoom_enabled: true,
            base_fov_deg: 65.0,
            aim_fov_deg: 45.0,
            zoom_rate: 9.0,
            position_smooth_time: 0.12,
            rotation_rate: 18.0,
            fov_rate: 8.0,
            crouch_offset: -0.45,
            crouch_offset_rate: 6.0,
            obstruction_radius: 0.2,
            obstruction_padding: 0.1,
        }
    }
}

impl CameraTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_pitch > self.max_pitch {
            return Err(ConfigError::InvertedPitchRange {
                min: self.min_pitch,
                max: self.max_pitch,
            });
        }
        for (name, value) in [
            ("sensitivity", self.sensitivity),
            ("base_distance", self.base_distance),
            ("aim_distance", self.aim_distance),
            ("base_fov_deg", self.base_fov_deg),
            ("aim_fov_deg", self.aim_fov_deg),
            ("zoom_rate", self.zoom_rate),
            ("position_smooth_time", self.position_smooth_time),
            ("rotation_rate", self.rotation_rate),
            ("fov_rate", self.fov_rate),
            ("crouch_offset_rate", self.crouch_offset_rate),
            ("obstruction_radius", self.obstruction_radius),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

/// Full character tuning, loaded from assets/data/player_config.ron.
#[derive(Resource, Clone, Default, Deserialize)]
pub struct PlayerConfig {
    pub movement: MovementTuning,
    pub combat: CombatTuning,
    pub camera: CameraTuning,
}

impl PlayerConfig {
    /// Load tuning from the RON file, falling back to defaults if the file
    /// is missing or malformed.
    pub fn load() -> Self {
        let path = "assets/data/player_config.ron";
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded player config from {}", path);
                    config
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
        }
    }
}

/// System to load player config at startup.
pub fn load_player_config(mut commands: Commands) {
    let config = PlayerConfig::load();
    commands.insert_resource(config);
}
