//! Interpolation helpers shared by the character, camera, and animation code.
//!
//! Everything here is frame-rate independent: callers pass `dt` and get a
//! step that approaches the target without overshooting it.

use bevy::prelude::*;

/// Exponential approach toward a target.
///
/// The lerp factor is clamped to 1 so a long frame lands exactly on the
/// target instead of stepping past it.
pub fn exp_approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt).min(1.0)
}

/// Lerp factor equivalent to a first-order filter with the given time
/// constant. `damp_time` is the time to cover ~63% of the remaining distance.
pub fn damp_factor(damp_time: f32, dt: f32) -> f32 {
    if damp_time <= f32::EPSILON {
        return 1.0;
    }
    1.0 - (-dt / damp_time).exp()
}

/// Critically damped spring toward a target position.
///
/// `velocity` is carried between frames by the caller. Overshoot is bounded
/// by the damping; `smooth_time` is roughly the time to reach the target.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    target + (change + temp) * exp
}

/// Rotate a direction toward another by at most `max_radians`, along the
/// shortest arc. Both inputs are expected to be (near) unit length.
pub fn turn_towards(current: Vec3, target: Vec3, max_radians: f32) -> Vec3 {
    let current = current.normalize_or_zero();
    let target = target.normalize_or_zero();
    if current == Vec3::ZERO || target == Vec3::ZERO {
        return target;
    }

    let angle = current.angle_between(target);
    if angle <= max_radians || angle <= f32::EPSILON {
        return target;
    }

    let rotation = Quat::from_rotation_arc(current, target);
    Quat::IDENTITY.slerp(rotation, max_radians / angle) * current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_approach_never_overshoots() {
        // A huge rate * dt product must land exactly on the target.
        let stepped = exp_approach(0.0, 1.0, 50.0, 1.0);
        assert_eq!(stepped, 1.0);

        // A normal step moves part of the way.
        let stepped = exp_approach(0.0, 1.0, 10.0, 0.016);
        assert!(stepped > 0.0 && stepped < 1.0);
    }

    #[test]
    fn damp_factor_reaches_one_for_zero_time() {
        assert_eq!(damp_factor(0.0, 0.016), 1.0);
        let f = damp_factor(0.2, 0.016);
        assert!(f > 0.0 && f < 1.0);
    }

    #[test]
    fn smooth_damp_converges() {
        let mut velocity = Vec3::ZERO;
        let mut pos = Vec3::ZERO;
        let target = Vec3::new(3.0, 0.0, -2.0);

        for _ in 0..300 {
            pos = smooth_damp(pos, target, &mut velocity, 0.15, 1.0 / 60.0);
        }

        assert!(pos.distance(target) < 1e-3);
    }

    #[test]
    fn turn_towards_caps_rotation_angle() {
        let current = Vec3::Z;
        let target = Vec3::X;
        let step = 0.1;

        let turned = turn_towards(current, target, step);
        let moved = current.angle_between(turned);
        assert!((moved - step).abs() < 1e-4);

        // Large budget snaps straight to the target.
        let turned = turn_towards(current, target, 10.0);
        assert!(turned.distance(target) < 1e-5);
    }
}
