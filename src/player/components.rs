//! Player-related components.

use bevy::prelude::*;

use crate::core::MuzzleSide;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Tracks player movement state for physics.
#[derive(Component)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
        }
    }
}

/// One-shot displacement to apply through the character controller this
/// frame, on top of regular movement. Used by the cover snap.
#[derive(Component, Default)]
pub struct PendingDisplacement(pub Vec3);

/// Last pose the physics capsule was synced to, so resizes happen only on
/// actual crouch transitions.
#[derive(Component, Default)]
pub struct PreviousPose {
    pub crouching: bool,
}

/// Marks a muzzle anchor child of the player, one per side.
#[derive(Component)]
pub struct MuzzleSocket {
    pub side: MuzzleSide,
}

/// Short-lived muzzle flash light.
#[derive(Component)]
pub struct MuzzleFlash {
    pub timer: Timer,
}
