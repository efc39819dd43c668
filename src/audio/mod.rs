//! Audio module - mixer channels, clip pools, and ambient playback.

mod library;
mod plugin;

pub use library::{AudioSettings, SfxLibrary};
pub use plugin::{GameAudioPlugin, MusicChannel, SfxChannel};
