//! The character state coordinator.
//!
//! Owns every discrete behavioral flag (armed, aiming, crouching, cover,
//! cover-shooting) and is the only code allowed to mutate them. Input
//! systems translate edge-triggered presses into `request_*` calls; the
//! coordinator either performs the transition - firing animation cues and
//! effect requests as it goes - or silently declines it. A rejected input
//! never disturbs an in-flight animation, so there is no error to handle.
//!
//! Delayed transitions (holster fade, cover-shot hold, crouch camera
//! debounce) live in an [`EffectTimers`] table and are resolved inside
//! [`Coordinator::tick`].

use bevy::prelude::*;

use super::config::CombatTuning;
use super::cover::CoverSurface;
use super::error::ConfigError;
use crate::animation::{
    AnimationDriver, LAYER_COVER_UPPER, LAYER_UPPER_ARMED, PARAM_IS_AIMING, PARAM_IS_ARMED,
    PARAM_IS_COVER_SHOOTING, PARAM_IS_CROUCHING, PARAM_IS_IN_COVER, TRIGGER_COVER_SHOOT,
    TRIGGER_DRAW, TRIGGER_ENTER_COVER, TRIGGER_ENTER_CROUCH, TRIGGER_EXIT_COVER,
    TRIGGER_EXIT_CROUCH, TRIGGER_HOLSTER, TRIGGER_SHOOT,
};
use crate::core::{exp_approach, turn_towards, EffectKind, EffectTimers, MuzzleSide, SfxCue};

/// Fire-and-forget effect output. The game forwards these to the audio and
/// particle systems; tests record them.
pub trait FxSink {
    fn play_sfx(&mut self, cue: SfxCue, volume: f32);
    fn muzzle_flash(&mut self, side: MuzzleSide);
}

/// The character's discrete behavioral state.
///
/// Owned by the [`Coordinator`]; everything else reads it through
/// [`Coordinator::state`] and requests changes through the `request_*` API.
#[derive(Debug, Clone, Default)]
pub struct CharacterState {
    /// Weapon drawn
    pub armed: bool,
    /// Armed and holding the aim input
    pub aiming: bool,
    pub crouching: bool,
    pub in_cover: bool,
    /// Leaning out of cover for a shot (held briefly after the trigger)
    pub cover_shooting: bool,
    /// While in cover, the facing the character is forced toward
    pub facing_override: Option<Vec3>,
}

/// Per-tick context the coordinator cannot observe on its own.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    pub aim_held: bool,
    pub camera_pos: Vec3,
    pub character_pos: Vec3,
}

/// Central state machine for the third-person character.
#[derive(Component)]
pub struct Coordinator {
    tuning: CombatTuning,
    state: CharacterState,
    timers: EffectTimers,
    /// Side the next non-cover shot fires from
    next_muzzle: MuzzleSide,
    /// Seconds until another crouch toggle is accepted
    crouch_cooldown: f32,
    /// Keeps the weapon overlay visible while the holster animation fades
    force_holster_visible: bool,
    /// Set once crouch has been held long enough for the camera to lower
    crouch_camera_ready: bool,
    upper_armed_weight: f32,
    cover_upper_weight: f32,
}

impl Coordinator {
    /// Build a coordinator from validated tuning.
    ///
    /// Fails fast on bad configuration; the caller disables the character
    /// for the session rather than limping along with invalid timing.
    pub fn new(tuning: CombatTuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let next_muzzle = tuning.start_muzzle_side;
        Ok(Self {
            tuning,
            state: CharacterState::default(),
            timers: EffectTimers::default(),
            next_muzzle,
            crouch_cooldown: 0.0,
            force_holster_visible: false,
            crouch_camera_ready: false,
            upper_armed_weight: 0.0,
            cover_upper_weight: 0.0,
        })
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    /// Whether the camera should apply its crouch offset: crouch must have
    /// been held past the debounce delay.
    pub fn crouch_camera_active(&self) -> bool {
        self.state.crouching && self.crouch_camera_ready
    }

    /// Whether the weapon overlay is forced visible by a fading holster.
    pub fn holster_visible(&self) -> bool {
        self.force_holster_visible
    }

    /// Toggle between drawn and holstered.
    ///
    /// Drawing takes effect immediately. Holstering drops aim instantly and
    /// keeps the weapon overlay visible until the fade-out timer expires;
    /// re-requesting while a fade is pending replaces it cleanly, so the
    /// old fade's completion never fires.
    pub fn request_draw_holster_toggle(
        &mut self,
        anim: &mut dyn AnimationDriver,
        fx: &mut dyn FxSink,
    ) {
        if self.state.armed {
            self.state.armed = false;
            if self.state.aiming {
                self.state.aiming = false;
                anim.set_bool(PARAM_IS_AIMING, false);
            }
            if self.state.cover_shooting {
                self.clear_cover_shot(anim);
            }
            anim.set_bool(PARAM_IS_ARMED, false);
            anim.set_trigger(TRIGGER_HOLSTER);
            fx.play_sfx(SfxCue::Holster, self.tuning.foley_volume);
            self.force_holster_visible = true;
            self.timers
                .start(EffectKind::HolsterFadeout, self.tuning.holster_fade);
        } else {
            self.state.armed = true;
            anim.set_bool(PARAM_IS_ARMED, true);
            anim.set_trigger(TRIGGER_DRAW);
            fx.play_sfx(SfxCue::Draw, self.tuning.foley_volume);
            // A draw interrupting a pending holster fade cancels it; the
            // overlay stays visible because the character is armed again.
            self.timers.cancel(EffectKind::HolsterFadeout);
            self.force_holster_visible = false;
        }
    }

    /// Fire the weapon, if the current state allows it.
    ///
    /// From cover this requires aiming and leans the character out for a
    /// fixed hold window, always shooting from the configured cover side.
    /// In the open the muzzle side alternates on successive shots.
    pub fn request_attack(&mut self, anim: &mut dyn AnimationDriver, fx: &mut dyn FxSink) {
        if !self.state.armed {
            return;
        }

        if self.state.in_cover {
            if !self.state.aiming {
                return;
            }
            anim.set_trigger(TRIGGER_COVER_SHOOT);
            fx.muzzle_flash(self.tuning.cover_shot_side);
            fx.play_sfx(SfxCue::Gunshot, self.tuning.gunshot_volume);
            self.state.cover_shooting = true;
            anim.set_bool(PARAM_IS_COVER_SHOOTING, true);
            self.timers
                .start(EffectKind::CoverShootWindow, self.tuning.cover_shoot_hold);
        } else {
            anim.set_trigger(TRIGGER_SHOOT);
            fx.muzzle_flash(self.next_muzzle);
            fx.play_sfx(SfxCue::Gunshot, self.tuning.gunshot_volume);
            self.next_muzzle = self.next_muzzle.opposite();
        }
    }

    /// Toggle crouch, unless the cooldown is still running or the character
    /// is locked into cover.
    pub fn request_crouch_toggle(&mut self, anim: &mut dyn AnimationDriver) {
        if self.crouch_cooldown > 0.0 || self.state.in_cover {
            return;
        }

        self.state.crouching = !self.state.crouching;
        self.crouch_cooldown = self.tuning.crouch_cooldown;
        anim.set_bool(PARAM_IS_CROUCHING, self.state.crouching);

        if self.state.crouching {
            anim.set_trigger(TRIGGER_ENTER_CROUCH);
            self.timers
                .start(EffectKind::CrouchCameraDelay, self.tuning.crouch_camera_delay);
        } else {
            anim.set_trigger(TRIGGER_EXIT_CROUCH);
            self.timers.cancel(EffectKind::CrouchCameraDelay);
            self.crouch_camera_ready = false;
        }
    }

    /// Enter or leave cover.
    ///
    /// Entry requires crouching and a nearby surface, and returns the snap
    /// position the movement collider should be displaced to. Exit never
    /// displaces and immediately cancels any pending cover shot.
    pub fn request_cover_toggle(
        &mut self,
        anim: &mut dyn AnimationDriver,
        surface: Option<&CoverSurface>,
        character_pos: Vec3,
        collider_radius: f32,
    ) -> Option<Vec3> {
        if self.state.in_cover {
            self.state.in_cover = false;
            if self.state.cover_shooting {
                self.clear_cover_shot(anim);
            }
            self.state.facing_override = None;
            anim.set_bool(PARAM_IS_IN_COVER, false);
            anim.set_trigger(TRIGGER_EXIT_COVER);
            return None;
        }

        if !self.state.crouching {
            return None;
        }
        let surface = surface?;

        self.state.in_cover = true;
        anim.set_bool(PARAM_IS_IN_COVER, true);
        anim.set_trigger(TRIGGER_ENTER_COVER);
        Some(surface.snap_point(character_pos, collider_radius, self.tuning.cover_standoff_margin))
    }

    /// Advance continuous state: aim recomputation, the in-cover facing
    /// override, and all pending timed effects.
    pub fn tick(&mut self, dt: f32, ctx: &TickContext, anim: &mut dyn AnimationDriver) {
        self.crouch_cooldown = (self.crouch_cooldown - dt).max(0.0);

        // Aiming is derived, never stored independently of the inputs.
        let aiming = self.state.armed && ctx.aim_held;
        if aiming != self.state.aiming {
            self.state.aiming = aiming;
            anim.set_bool(PARAM_IS_AIMING, aiming);
        }
        if !self.state.aiming && self.state.cover_shooting {
            // Losing aim cancels the lean right away, not at timer expiry.
            self.clear_cover_shot(anim);
        }

        if self.state.in_cover {
            let bearing = Vec3::new(
                ctx.camera_pos.x - ctx.character_pos.x,
                0.0,
                ctx.camera_pos.z - ctx.character_pos.z,
            )
            .normalize_or_zero();
            if bearing != Vec3::ZERO {
                let current = self.state.facing_override.unwrap_or(bearing);
                self.state.facing_override =
                    Some(turn_towards(current, bearing, self.tuning.cover_turn_rate * dt));
            }
        }

        for kind in self.timers.tick(dt) {
            match kind {
                EffectKind::HolsterFadeout => self.force_holster_visible = false,
                EffectKind::CoverShootWindow => {
                    self.state.cover_shooting = false;
                    anim.set_bool(PARAM_IS_COVER_SHOOTING, false);
                }
                EffectKind::CrouchCameraDelay => self.crouch_camera_ready = true,
            }
        }
    }

    /// Late-frame upper-body layer blending.
    ///
    /// The armed overlay shows while armed or while a holster is fading
    /// out; the cover-aim overlay takes precedence and pushes the armed
    /// overlay out even though the character is still armed. Weights
    /// approach their targets exponentially and never overshoot within a
    /// variable-length frame.
    pub fn blend_layers(&mut self, dt: f32, anim: &mut dyn AnimationDriver) {
        let cover_aim = self.state.in_cover && self.state.aiming;
        let armed_target = if (self.state.armed || self.force_holster_visible) && !cover_aim {
            1.0
        } else {
            0.0
        };
        let cover_target = if cover_aim { 1.0 } else { 0.0 };

        let rate = self.tuning.layer_blend_rate;
        self.upper_armed_weight = exp_approach(self.upper_armed_weight, armed_target, rate, dt);
        self.cover_upper_weight = exp_approach(self.cover_upper_weight, cover_target, rate, dt);

        anim.set_layer_weight(LAYER_UPPER_ARMED, self.upper_armed_weight);
        anim.set_layer_weight(LAYER_COVER_UPPER, self.cover_upper_weight);
    }

    /// Release all pending timed effects, e.g. on despawn.
    pub fn shutdown(&mut self) {
        self.timers.clear();
    }

    fn clear_cover_shot(&mut self, anim: &mut dyn AnimationDriver) {
        self.timers.cancel(EffectKind::CoverShootWindow);
        self.state.cover_shooting = false;
        anim.set_bool(PARAM_IS_COVER_SHOOTING, false);
    }
}
