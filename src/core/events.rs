//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. The character coordinator
//! emits fire-and-forget effect requests, and the audio and FX systems
//! receive them to play sounds and spawn muzzle flashes. This keeps the
//! coordinator independent of any concrete audio or particle backend.

use bevy::prelude::*;
use serde::Deserialize;

/// Which muzzle socket a shot fires from.
///
/// Normal shots alternate sides on successive attacks; shots from cover
/// always use a configured fixed side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MuzzleSide {
    Left,
    Right,
}

impl MuzzleSide {
    pub fn opposite(self) -> Self {
        match self {
            MuzzleSide::Left => MuzzleSide::Right,
            MuzzleSide::Right => MuzzleSide::Left,
        }
    }
}

/// Sound effect cues the character can request.
///
/// Each cue maps to a pool of clips in the audio library; a random clip
/// from the pool is played per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SfxCue {
    Gunshot,
    Draw,
    Holster,
}

/// Sent when the character wants a one-shot sound played.
///
/// The audio system picks a clip from the cue's pool and plays it,
/// scaled by the event's volume. An empty pool silently plays nothing.
#[derive(Event)]
pub struct SfxEvent {
    pub cue: SfxCue,
    /// Per-request volume scale, multiplied with the global SFX volume
    pub volume: f32,
}

/// Sent when a shot should flash the muzzle on the given side.
#[derive(Event)]
pub struct MuzzleFlashEvent {
    pub side: MuzzleSide,
}
