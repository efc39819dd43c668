//! Error types for character configuration validation.

use thiserror::Error;

/// Errors detected while validating tuning values at initialization.
///
/// Validation runs once, before the character or camera is spawned; a
/// failing section disables only the component it configures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A duration, rate, or dimension that must be strictly positive.
    #[error("'{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    /// Camera pitch limits are inverted.
    #[error("camera pitch range is inverted: min {min} > max {max}")]
    InvertedPitchRange { min: f32, max: f32 },

    /// The crouch capsule would be taller than the standing capsule.
    #[error("crouch capsule half-height {crouched} exceeds standing half-height {standing}")]
    CrouchTallerThanStanding { crouched: f32, standing: f32 },
}
