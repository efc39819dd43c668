//! Camera plugin - third-person orbit rig and cursor capture.

use bevy::prelude::*;

use super::systems;
use crate::core::{FrameSet, GameState};

/// Camera plugin - spawns and drives the third-person orbit camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::InGame),
            (systems::setup_camera, systems::grab_cursor),
        )
        .add_systems(OnExit(GameState::InGame), systems::release_cursor)
        .add_systems(Update, systems::update_camera.in_set(FrameSet::LateOutputs));
    }
}
