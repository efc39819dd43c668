//! Core module - game states, global events, frame ordering, and shared
//! timing/interpolation utilities.

mod events;
mod plugin;
mod scheduler;
mod smoothing;
mod states;

pub use events::{MuzzleFlashEvent, MuzzleSide, SfxCue, SfxEvent};
pub use plugin::{CorePlugin, FrameSet};
pub use scheduler::{EffectKind, EffectTimers};
pub use smoothing::{damp_factor, exp_approach, smooth_damp, turn_towards};
pub use states::GameState;
