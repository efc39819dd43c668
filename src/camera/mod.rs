//! Camera module - the third-person orbit rig.

mod plugin;
mod rig;
mod systems;

pub use plugin::CameraPlugin;
pub use rig::{clamp_obstructed, CameraRig, OrbitCamera};
