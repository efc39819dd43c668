//! Third-person orbit rig state and pose math.
//!
//! The rig accumulates look input into yaw/pitch and low-pass filters every
//! continuous quantity (shoulder, distance, crouch offset, FOV) toward
//! targets derived from the character's state. All of it is plain math so
//! the camera feel is testable without a render loop.

use bevy::prelude::*;

use crate::core::exp_approach;
use crate::player::CameraTuning;

/// Marker for the gameplay camera entity.
#[derive(Component)]
pub struct OrbitCamera;

/// Persistent orbit state, smoothed across frames.
#[derive(Component, Debug)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
    /// Signed sideways offset; the sign picks the shoulder
    shoulder: f32,
    distance: f32,
    crouch_offset: f32,
    fov: f32,
    /// Carried velocity for the critically damped position filter
    pub position_velocity: Vec3,
    // Cached at activation so crouch/aim cycles never drift the baseline.
    base_distance: f32,
    base_height: f32,
}

impl CameraRig {
    /// Initialize from configured base values, facing straight ahead.
    pub fn new(tuning: &CameraTuning) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            shoulder: tuning.shoulder_offset,
            distance: tuning.base_distance,
            crouch_offset: 0.0,
            fov: tuning.base_fov_deg.to_radians(),
            position_velocity: Vec3::ZERO,
            base_distance: tuning.base_distance,
            base_height: tuning.base_height,
        }
    }

    /// Accumulate a raw look delta, clamping pitch to the configured range.
    pub fn apply_look(&mut self, delta: Vec2, tuning: &CameraTuning, dt: f32) {
        let scale = tuning.sensitivity * dt;
        self.yaw -= delta.x * scale;
        self.pitch = (self.pitch - delta.y * scale).clamp(tuning.min_pitch, tuning.max_pitch);
    }

    /// Current look orientation.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Smooth every continuous value toward its state-derived target.
    ///
    /// Aim zoom swaps in the aim distance and aim shoulder magnitude while
    /// keeping the current shoulder's side; the crouch offset only engages
    /// once the coordinator reports the debounce has settled.
    pub fn advance(&mut self, aiming: bool, crouch_settled: bool, tuning: &CameraTuning, dt: f32) {
        let aim_active = aiming && tuning.aim_zoom_enabled;

        let side = self.shoulder.signum();
        let shoulder_target = side
            * if aim_active {
                tuning.aim_shoulder_offset
            } else {
                tuning.shoulder_offset.abs()
            };
        let distance_target = if aim_active {
            tuning.aim_distance
        } else {
            self.base_distance
        };
        let crouch_target = if crouch_settled { tuning.crouch_offset } else { 0.0 };
        let fov_target = if aim_active {
            tuning.aim_fov_deg.to_radians()
        } else {
            tuning.base_fov_deg.to_radians()
        };

        self.shoulder = exp_approach(self.shoulder, shoulder_target, tuning.zoom_rate, dt);
        self.distance = exp_approach(self.distance, distance_target, tuning.zoom_rate, dt);
        self.crouch_offset =
            exp_approach(self.crouch_offset, crouch_target, tuning.crouch_offset_rate, dt);
        self.fov = exp_approach(self.fov, fov_target, tuning.fov_rate, dt);
    }

    /// Orbit pivot above the character root.
    pub fn pivot(&self, character_pos: Vec3) -> Vec3 {
        character_pos + Vec3::Y * (self.base_height + self.crouch_offset)
    }

    /// Ideal camera position before obstruction handling.
    pub fn desired_position(&self, pivot: Vec3) -> Vec3 {
        pivot + self.orientation() * Vec3::new(self.shoulder, 0.0, self.distance)
    }

    pub fn shoulder(&self) -> f32 {
        self.shoulder
    }

    pub fn crouch_offset(&self) -> f32 {
        self.crouch_offset
    }
}

/// Pull the camera in front of whatever blocks the pivot-to-camera ray.
///
/// `hit_distance` is how far the obstruction probe got; the camera stops
/// `padding` short of it, never closer than 0.1 to the pivot.
pub fn clamp_obstructed(pivot: Vec3, desired: Vec3, hit_distance: Option<f32>, padding: f32) -> Vec3 {
    let offset = desired - pivot;
    let full_distance = offset.length();
    if full_distance <= f32::EPSILON {
        return desired;
    }

    match hit_distance {
        Some(hit) if hit < full_distance => {
            let clamped = (hit - padding).max(0.1);
            pivot + offset / full_distance * clamped
        }
        _ => desired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> CameraTuning {
        CameraTuning::default()
    }

    #[test]
    fn pitch_clamps_to_configured_range() {
        let tuning = tuning();
        let mut rig = CameraRig::new(&tuning);

        // Drag far past the limit in both directions.
        rig.apply_look(Vec2::new(0.0, 1e5), &tuning, 0.016);
        assert_eq!(rig.pitch, tuning.min_pitch);

        rig.apply_look(Vec2::new(0.0, -1e5), &tuning, 0.016);
        assert_eq!(rig.pitch, tuning.max_pitch);
    }

    #[test]
    fn aim_zoom_keeps_shoulder_side() {
        let mut left_handed = tuning();
        left_handed.shoulder_offset = -0.45;
        let mut rig = CameraRig::new(&left_handed);

        for _ in 0..300 {
            rig.advance(true, false, &left_handed, 0.016);
        }

        // Magnitude switches to the aim value, sign stays on the left.
        assert!(rig.shoulder() < 0.0);
        assert!((rig.shoulder().abs() - left_handed.aim_shoulder_offset).abs() < 1e-3);
    }

    #[test]
    fn aim_zoom_respects_enable_flag() {
        let mut tuning = tuning();
        tuning.aim_zoom_enabled = false;
        let mut rig = CameraRig::new(&tuning);

        for _ in 0..300 {
            rig.advance(true, false, &tuning, 0.016);
        }

        assert!((rig.fov() - tuning.base_fov_deg.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn crouch_offset_engages_only_when_settled() {
        let tuning = tuning();
        let mut rig = CameraRig::new(&tuning);

        rig.advance(false, false, &tuning, 0.016);
        assert_eq!(rig.crouch_offset(), 0.0);

        for _ in 0..300 {
            rig.advance(false, true, &tuning, 0.016);
        }
        assert!((rig.crouch_offset() - tuning.crouch_offset).abs() < 1e-3);

        // Standing back up returns to the cached baseline.
        for _ in 0..300 {
            rig.advance(false, false, &tuning, 0.016);
        }
        assert!(rig.crouch_offset().abs() < 1e-3);
        let pivot = rig.pivot(Vec3::ZERO);
        assert!((pivot.y - tuning.base_height).abs() < 1e-3);
    }

    #[test]
    fn obstruction_clamps_along_the_ray() {
        let pivot = Vec3::new(0.0, 1.5, 0.0);
        let desired = pivot + Vec3::Z * 4.0;

        // No hit: desired position unchanged.
        assert_eq!(clamp_obstructed(pivot, desired, None, 0.1), desired);

        // Hit at 2.0: camera sits at 1.9 along the same ray.
        let clamped = clamp_obstructed(pivot, desired, Some(2.0), 0.1);
        assert!((clamped - (pivot + Vec3::Z * 1.9)).length() < 1e-5);

        // Hit right at the pivot: never closer than 0.1.
        let clamped = clamp_obstructed(pivot, desired, Some(0.0), 0.1);
        assert!(((clamped - pivot).length() - 0.1).abs() < 1e-5);

        // Hit beyond the desired distance is ignored.
        assert_eq!(clamp_obstructed(pivot, desired, Some(9.0), 0.1), desired);
    }
}
