//! Camera-relative locomotion planning.
//!
//! Pure functions: the movement system feeds them input axes, the camera
//! basis, and the read-only character state, and applies the resulting
//! displacement through the kinematic character controller.

use bevy::prelude::*;

use super::config::MovementTuning;
use super::coordinator::CharacterState;

/// Speed parameter targets for idle, walk, and run.
pub const SPEED_IDLE: f32 = 0.0;
pub const SPEED_WALK: f32 = 0.5;
pub const SPEED_RUN: f32 = 1.0;

/// Input magnitude below which no facing update happens, so releasing the
/// stick doesn't snap the character toward a zero vector.
const FACING_DEADZONE_SQ: f32 = 1e-4;

/// Resolved movement input for one frame.
#[derive(Debug, Clone, Copy)]
pub struct LocomotionInput {
    /// Raw move axes, x = strafe, y = forward, each in [-1, 1]
    pub move_axis: Vec2,
    pub run_held: bool,
    /// Camera basis, not yet flattened to the ground plane
    pub cam_forward: Vec3,
    pub cam_right: Vec3,
}

/// Planned movement for one frame.
#[derive(Debug, Clone, Copy)]
pub struct LocomotionPlan {
    /// World-space planar velocity in units per second
    pub planar_velocity: Vec3,
    /// Facing the character should turn toward, if any
    pub desired_facing: Option<Vec3>,
    /// Target for the animator's damped speed parameter
    pub speed_target: f32,
}

/// Plan this frame's planar movement and facing.
///
/// While in cover, movement is locked and facing follows the coordinator's
/// camera-bearing override. Otherwise the move axes are projected onto the
/// camera's ground-plane basis; partial analog deflection is preserved
/// (only over-unit vectors are normalized back to length 1).
pub fn plan_locomotion(
    input: &LocomotionInput,
    state: &CharacterState,
    tuning: &MovementTuning,
) -> LocomotionPlan {
    if state.in_cover {
        return LocomotionPlan {
            planar_velocity: Vec3::ZERO,
            desired_facing: state.facing_override,
            speed_target: SPEED_IDLE,
        };
    }

    let mut axis = input.move_axis;
    if axis.length_squared() > 1.0 {
        axis = axis.normalize();
    }

    let forward = flatten(input.cam_forward);
    let right = flatten(input.cam_right);
    let direction = right * axis.x + forward * axis.y;

    let speed = if input.run_held {
        tuning.run_speed
    } else {
        tuning.walk_speed
    };

    let moving = direction.length_squared() > FACING_DEADZONE_SQ;
    let speed_target = if !moving {
        SPEED_IDLE
    } else if input.run_held {
        SPEED_RUN
    } else {
        SPEED_WALK
    };

    LocomotionPlan {
        planar_velocity: direction * speed,
        desired_facing: moving.then(|| direction.normalize()),
        speed_target,
    }
}

/// Advance the vertical velocity accumulator by one frame.
///
/// Grounded-and-falling resets to a small negative stick velocity so the
/// ground probe doesn't flicker at exactly zero; airborne accumulates
/// gravity. Gravity applies every frame, including while movement is
/// locked in cover.
pub fn integrate_gravity(
    vertical_velocity: f32,
    grounded: bool,
    tuning: &MovementTuning,
    dt: f32,
) -> f32 {
    if grounded && vertical_velocity <= 0.0 {
        tuning.grounded_stick_velocity
    } else {
        vertical_velocity - tuning.gravity * dt
    }
}

/// Strip the vertical component and renormalize, preserving heading.
fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basis_input(move_axis: Vec2, run_held: bool) -> LocomotionInput {
        LocomotionInput {
            move_axis,
            run_held,
            cam_forward: Vec3::new(0.0, -0.4, -1.0),
            cam_right: Vec3::X,
        }
    }

    #[test]
    fn partial_analog_deflection_is_preserved() {
        let tuning = MovementTuning::default();
        let state = CharacterState::default();

        // Magnitude 0.3 stays 0.3 - no renormalization of small inputs.
        let plan = plan_locomotion(&basis_input(Vec2::new(0.3, 0.0), false), &state, &tuning);
        let expected = 0.3 * tuning.walk_speed;
        assert!((plan.planar_velocity.length() - expected).abs() < 1e-4);

        // Magnitude over 1 clamps back to exactly 1.
        let plan = plan_locomotion(&basis_input(Vec2::new(1.4, 0.0), false), &state, &tuning);
        assert!((plan.planar_velocity.length() - tuning.walk_speed).abs() < 1e-4);
    }

    #[test]
    fn camera_basis_is_flattened() {
        let tuning = MovementTuning::default();
        let state = CharacterState::default();

        // Forward input with a pitched-down camera still moves horizontally.
        let plan = plan_locomotion(&basis_input(Vec2::new(0.0, 1.0), false), &state, &tuning);
        assert_eq!(plan.planar_velocity.y, 0.0);
        assert!((plan.planar_velocity.length() - tuning.walk_speed).abs() < 1e-4);
    }

    #[test]
    fn released_input_keeps_last_facing() {
        let tuning = MovementTuning::default();
        let state = CharacterState::default();

        let plan = plan_locomotion(&basis_input(Vec2::ZERO, false), &state, &tuning);
        assert!(plan.desired_facing.is_none());
        assert_eq!(plan.speed_target, SPEED_IDLE);
    }

    #[test]
    fn speed_target_is_tri_state() {
        let tuning = MovementTuning::default();
        let state = CharacterState::default();

        let walk = plan_locomotion(&basis_input(Vec2::new(0.0, 1.0), false), &state, &tuning);
        assert_eq!(walk.speed_target, SPEED_WALK);

        let run = plan_locomotion(&basis_input(Vec2::new(0.0, 1.0), true), &state, &tuning);
        assert_eq!(run.speed_target, SPEED_RUN);
    }

    #[test]
    fn cover_locks_movement_and_uses_override_facing() {
        let tuning = MovementTuning::default();
        let state = CharacterState {
            in_cover: true,
            crouching: true,
            facing_override: Some(Vec3::X),
            ..Default::default()
        };

        let plan = plan_locomotion(&basis_input(Vec2::new(0.0, 1.0), true), &state, &tuning);
        assert_eq!(plan.planar_velocity, Vec3::ZERO);
        assert_eq!(plan.desired_facing, Some(Vec3::X));
        assert_eq!(plan.speed_target, SPEED_IDLE);
    }

    #[test]
    fn gravity_accumulates_until_grounded() {
        let tuning = MovementTuning::default();

        let falling = integrate_gravity(0.0, false, &tuning, 0.1);
        assert!((falling - (-tuning.gravity * 0.1)).abs() < 1e-5);

        let faster = integrate_gravity(falling, false, &tuning, 0.1);
        assert!(faster < falling);

        // Landing resets to the stick velocity, not zero.
        let landed = integrate_gravity(faster, true, &tuning, 0.1);
        assert_eq!(landed, tuning.grounded_stick_velocity);
    }
}
