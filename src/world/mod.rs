//! World module - the test arena and tagged cover geometry.

mod cover;
mod plugin;
mod spawning;

pub use cover::{find_nearby_cover, surface_of, CoverVolume};
pub use plugin::WorldPlugin;
pub use spawning::ArenaGeometry;
