//! Seeker Animation Core (host-agnostic)
//!
//! Builds keyframe animations from declarative descriptors and drives a
//! target's properties across externally supplied ticks: looping, yoyo
//! playback, per-keyframe easing, start delay and inter-repeat delay.
//! Named presets sit on top as validated default tables.

pub mod config;
pub mod construct;
pub mod data;
pub mod error;
pub mod interp;
pub mod options;
pub mod outputs;
pub mod playback;
pub mod preset;
pub mod sequence;
pub mod target;
pub mod timeline;
pub mod value;

// Re-exports for hosts
pub use config::{AnimationConfig, Repeat};
pub use construct::{construct, construct_with_sequence, AnimationHandle};
pub use data::{AnimationDefinition, KeyframeDescriptor};
pub use error::{AnimationError, ConfigError, IndexError, TargetError, ValidationError};
pub use interp::{Ease, EaseMode};
pub use options::{resolve, PresetDefaults, UserOptions};
pub use outputs::{PlaybackEvent, TickOutcome};
pub use playback::{Direction, PlaybackController, PlaybackState, PlaybackStatus};
pub use preset::{validate_options, Preset, ALLOWED_OPTIONS};
pub use sequence::{ActiveKeyframe, Keyframe, KeyframeSequence};
pub use target::{AnimationTarget, CallbackTarget, PropertyMap};
pub use timeline::Timeline;
pub use value::PropertyValue;
