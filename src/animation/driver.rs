//! Animation backend boundary.
//!
//! The character never talks to a concrete animation graph. It writes named
//! parameters, trigger pulses, and layer weights through [`AnimationDriver`],
//! and any backend implementing that capability set is substitutable - the
//! shipped [`PoseAnimator`] buffers values for a downstream graph, and the
//! tests drive the coordinator with a recording fake.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::core::damp_factor;

// Boolean parameters mirroring the discrete character state.
pub const PARAM_IS_ARMED: &str = "isArmed";
pub const PARAM_IS_AIMING: &str = "isAiming";
pub const PARAM_IS_CROUCHING: &str = "isCrouching";
pub const PARAM_IS_IN_COVER: &str = "isInCover";
pub const PARAM_IS_COVER_SHOOTING: &str = "isCoverShooting";

/// Damped locomotion speed parameter (0 idle, 0.5 walk, 1 run).
pub const PARAM_SPEED: &str = "speed";

// One-shot cues, consumed once by the backend and auto-cleared.
pub const TRIGGER_DRAW: &str = "draw";
pub const TRIGGER_HOLSTER: &str = "holster";
pub const TRIGGER_SHOOT: &str = "shoot";
pub const TRIGGER_COVER_SHOOT: &str = "coverShoot";
pub const TRIGGER_ENTER_CROUCH: &str = "enterCrouch";
pub const TRIGGER_EXIT_CROUCH: &str = "exitCrouch";
pub const TRIGGER_ENTER_COVER: &str = "enterCover";
pub const TRIGGER_EXIT_COVER: &str = "exitCover";

/// Full-body base layer.
pub const LAYER_BASE: usize = 0;
/// Upper-body weapon overlay, blended in while armed (or holstering).
pub const LAYER_UPPER_ARMED: usize = 1;
/// Upper-body cover-aim overlay; takes precedence over the armed overlay.
pub const LAYER_COVER_UPPER: usize = 2;

pub const LAYER_COUNT: usize = 3;

/// Capability interface over an animation state machine.
///
/// The character owns none of the backend's state: it writes parameters and
/// weights, and reads back only what the backend independently reports
/// (transition status, current state tag).
pub trait AnimationDriver {
    fn set_bool(&mut self, name: &str, value: bool);
    fn get_bool(&self, name: &str) -> bool;

    /// Fire a one-shot cue. The backend consumes it once and auto-clears it.
    fn set_trigger(&mut self, name: &str);

    /// Write a float parameter, low-pass filtered over `damp_time` seconds.
    /// A zero damp time writes the value directly.
    fn set_float(&mut self, name: &str, value: f32, damp_time: f32, dt: f32);

    fn set_layer_weight(&mut self, layer: usize, weight: f32);
    fn get_layer_weight(&self, layer: usize) -> f32;

    /// Whether the backend is currently crossfading between states.
    fn is_in_transition(&self) -> bool;

    /// Tag of the state the backend is currently playing, if it reports one.
    fn current_state_tag(&self) -> Option<&str>;
}

/// Buffered animation front-end.
///
/// Stores the most recent parameter values, pending trigger pulses, and
/// layer weights for a downstream animation graph to consume. Also records
/// what the graph reports back (transition flag, state tag) so gameplay code
/// can read it without owning graph internals.
#[derive(Component, Debug)]
pub struct PoseAnimator {
    bools: HashMap<String, bool>,
    floats: HashMap<String, f32>,
    triggers: Vec<String>,
    layer_weights: [f32; LAYER_COUNT],
    in_transition: bool,
    state_tag: Option<String>,
}

impl Default for PoseAnimator {
    fn default() -> Self {
        let mut layer_weights = [0.0; LAYER_COUNT];
        layer_weights[LAYER_BASE] = 1.0;
        Self {
            bools: HashMap::new(),
            floats: HashMap::new(),
            triggers: Vec::new(),
            layer_weights,
            in_transition: false,
            state_tag: None,
        }
    }
}

impl PoseAnimator {
    /// Take all pending trigger pulses, clearing them.
    pub fn drain_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.triggers)
    }

    /// Current value of a float parameter (0 if never written).
    pub fn float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    /// Called by the graph side to report its playback status.
    pub fn report_playback(&mut self, in_transition: bool, state_tag: Option<String>) {
        self.in_transition = in_transition;
        self.state_tag = state_tag;
    }
}

impl AnimationDriver for PoseAnimator {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    fn set_trigger(&mut self, name: &str) {
        self.triggers.push(name.to_string());
    }

    fn set_float(&mut self, name: &str, value: f32, damp_time: f32, dt: f32) {
        let current = self.float(name);
        let blended = current + (value - current) * damp_factor(damp_time, dt);
        self.floats.insert(name.to_string(), blended);
    }

    fn set_layer_weight(&mut self, layer: usize, weight: f32) {
        if let Some(slot) = self.layer_weights.get_mut(layer) {
            *slot = weight.clamp(0.0, 1.0);
        }
    }

    fn get_layer_weight(&self, layer: usize) -> f32 {
        self.layer_weights.get(layer).copied().unwrap_or(0.0)
    }

    fn is_in_transition(&self) -> bool {
        self.in_transition
    }

    fn current_state_tag(&self) -> Option<&str> {
        self.state_tag.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_drain_once() {
        let mut animator = PoseAnimator::default();
        animator.set_trigger(TRIGGER_DRAW);
        animator.set_trigger(TRIGGER_SHOOT);

        assert_eq!(animator.drain_triggers(), vec![TRIGGER_DRAW, TRIGGER_SHOOT]);
        assert!(animator.drain_triggers().is_empty());
    }

    #[test]
    fn floats_damp_toward_target() {
        let mut animator = PoseAnimator::default();

        // Direct write with zero damping.
        animator.set_float(PARAM_SPEED, 1.0, 0.0, 0.016);
        assert_eq!(animator.float(PARAM_SPEED), 1.0);

        // Damped write approaches without reaching in one short frame.
        animator.set_float(PARAM_SPEED, 0.0, 0.2, 0.016);
        let value = animator.float(PARAM_SPEED);
        assert!(value > 0.0 && value < 1.0);

        // Repeated ticks converge.
        for _ in 0..600 {
            animator.set_float(PARAM_SPEED, 0.0, 0.2, 0.016);
        }
        assert!(animator.float(PARAM_SPEED) < 1e-3);
    }

    #[test]
    fn layer_weights_clamp_and_default() {
        let mut animator = PoseAnimator::default();
        assert_eq!(animator.get_layer_weight(LAYER_BASE), 1.0);
        assert_eq!(animator.get_layer_weight(LAYER_UPPER_ARMED), 0.0);

        animator.set_layer_weight(LAYER_UPPER_ARMED, 1.7);
        assert_eq!(animator.get_layer_weight(LAYER_UPPER_ARMED), 1.0);

        // Out-of-range layers are ignored rather than panicking.
        animator.set_layer_weight(42, 0.5);
        assert_eq!(animator.get_layer_weight(42), 0.0);
    }

    #[test]
    fn playback_report_round_trips() {
        let mut animator = PoseAnimator::default();
        assert!(!animator.is_in_transition());
        assert_eq!(animator.current_state_tag(), None);

        animator.report_playback(true, Some("coverIdle".to_string()));
        assert!(animator.is_in_transition());
        assert_eq!(animator.current_state_tag(), Some("coverIdle"));
    }
}
