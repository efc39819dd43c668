//! Resolved input signals for the character.
//!
//! Raw devices are sampled exactly once per frame into [`PlayerInput`];
//! gameplay systems only ever read the resolved signals, so there is a
//! single source of truth for edge-triggered presses and held buttons.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

/// One frame of resolved input.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Move axes, x = strafe, y = forward, each in [-1, 1]
    pub move_axis: Vec2,
    /// Accumulated raw look delta for this frame (unbounded)
    pub look_delta: Vec2,
    pub run_held: bool,
    pub aim_held: bool,
    pub draw_pressed: bool,
    pub attack_pressed: bool,
    pub crouch_pressed: bool,
    pub interact_pressed: bool,
}

/// Sample keyboard and mouse into the resolved input resource.
pub fn gather_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut input: ResMut<PlayerInput>,
) {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    input.move_axis = axis;

    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }
    input.look_delta = delta;

    input.run_held = keyboard.pressed(KeyCode::ShiftLeft);
    input.aim_held = mouse.pressed(MouseButton::Right);
    input.attack_pressed = mouse.just_pressed(MouseButton::Left);
    input.draw_pressed = keyboard.just_pressed(KeyCode::KeyF);
    input.crouch_pressed = keyboard.just_pressed(KeyCode::KeyC);
    input.interact_pressed = keyboard.just_pressed(KeyCode::KeyE);
}
