//! Error types for the animation construction core.
//!
//! Errors are layered the way they surface: [`ValidationError`] at the preset
//! boundary, [`ConfigError`] while building a config or keyframe sequence,
//! [`IndexError`] for out-of-range keyframe lookups, and [`TargetError`] for
//! failures raised by a host's mutation callback. [`AnimationError`] wraps
//! them all for the public entry points.

use serde::{Deserialize, Serialize};

/// Malformed options object handed to a preset.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ValidationError {
    /// Options were not a JSON object.
    #[error("Options must be an object, got {found}")]
    NotAnObject { found: String },

    /// A key outside the allow-list was supplied.
    #[error("Unknown option '{key}'; options may only include: {allowed}")]
    UnknownOption { key: String, allowed: String },

    /// A recognised key carried a value of the wrong type.
    #[error("Option '{key}' must be a {expected}, got {found}")]
    WrongType {
        key: String,
        expected: String,
        found: String,
    },
}

/// Resolved configuration or keyframe data violates a numeric invariant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Duration must be finite and > 0, got {duration}")]
    InvalidDuration { duration: f64 },

    #[error("Delay must be finite and >= 0, got {delay}")]
    InvalidDelay { delay: f64 },

    #[error("Repeat delay must be finite and >= 0, got {repeat_delay}")]
    InvalidRepeatDelay { repeat_delay: f64 },

    #[error("Repeat must be -1 (infinite) or >= 0, got {repeat}")]
    InvalidRepeat { repeat: i64 },

    #[error("Keyframe sequence must contain at least one keyframe")]
    EmptySequence,

    #[error("Keyframe {index} duration must be finite and > 0, got {duration}")]
    InvalidKeyframeDuration { index: usize, duration: f64 },

    #[error("Unknown ease '{name}'")]
    UnknownEase { name: String },
}

/// Keyframe lookup outside `0..=total_duration`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("Time {time} is out of range [0, {total}]")]
pub struct IndexError {
    pub time: f64,
    pub total: f64,
}

/// Failure reported by an [`AnimationTarget`](crate::target::AnimationTarget)
/// while applying a sampled value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("Failed to apply '{property}': {reason}")]
pub struct TargetError {
    pub property: String,
    pub reason: String,
}

impl TargetError {
    pub fn new(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            reason: reason.into(),
        }
    }
}

/// Umbrella error returned by construction and playback entry points.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Target(#[from] TargetError),

    /// Tick delta was negative or not finite.
    #[error("Invalid tick delta: {dt}")]
    InvalidTick { dt: f64 },

    /// Speed multiplier was negative or not finite.
    #[error("Invalid speed: {speed}")]
    InvalidSpeed { speed: f64 },
}

impl AnimationError {
    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Config(_) => "config",
            Self::Index(_) => "index",
            Self::Target(_) => "target",
            Self::InvalidTick { .. } | Self::InvalidSpeed { .. } => "playback",
        }
    }

    /// Construction-time errors abort before any playback state exists.
    #[inline]
    pub fn is_construction_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }
}
