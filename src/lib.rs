//! Greyfall - a third-person cover-shooter character prototype in Bevy.
//!
//! The playable core is a single character: camera-relative locomotion,
//! weapon draw/holster and aimed shooting, crouching, snapping into cover
//! and shooting from it, all coordinated by one state machine that gates
//! movement, camera behavior, and animation-layer blending.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, frame ordering, timers and
//!   interpolation helpers
//! - **Player**: The character state coordinator, locomotion, cover snap,
//!   input resolution, and muzzle FX
//! - **Animation**: The capability boundary toward the animation backend
//! - **Camera**: Third-person orbit rig with aim zoom, crouch offset, and
//!   obstruction handling
//! - **World**: Test arena and tagged cover geometry
//! - **Audio**: Ambient music loop and one-shot SFX pools

pub mod animation;
pub mod audio;
pub mod camera;
pub mod core;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct GreyfallPlugin;

impl Plugin for GreyfallPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Camera systems
            .add_plugins(camera::CameraPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Audio systems
            .add_plugins(audio::GameAudioPlugin);
    }
}
