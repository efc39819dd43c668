//! Greyfall - Entry Point
//!
//! A third-person cover-shooter character prototype.
//!
//! Controls:
//! - WASD: Move
//! - Mouse: Look around
//! - Shift: Run
//! - F: Draw/holster weapon
//! - Right mouse: Aim
//! - Left mouse: Shoot
//! - C: Crouch
//! - E: Take/leave cover (while crouched, near a cover block)
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Greyfall".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Audio backend
        .add_plugins(bevy_kira_audio::AudioPlugin)

        // Our game plugin
        .add_plugins(greyfall::GreyfallPlugin)

        .run();
}
