//! Player module - the character state coordinator, locomotion, cover, and
//! the input/physics/effect glue around them.

mod components;
mod config;
mod coordinator;
mod cover;
mod error;
mod input;
mod locomotion;
mod plugin;
mod systems;


pub use components::{MovementState, MuzzleSocket, Player};
pub use config::{CameraTuning, CombatTuning, MovementTuning, PlayerConfig};
pub use coordinator::{CharacterState, Coordinator, FxSink, TickContext};
pub use cover::CoverSurface;
pub use error::ConfigError;
pub use input::PlayerInput;
pub use locomotion::{plan_locomotion, integrate_gravity, LocomotionInput, LocomotionPlan};
pub use plugin::{spawn_player, PlayerPlugin};
