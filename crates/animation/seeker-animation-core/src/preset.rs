//! Preset boundary: allow-list validation of caller options and named
//! default tables that feed the construction core.
//!
//! A preset only accepts `{ duration: number, delay: number, loop: boolean }`
//! from callers. Shape errors abort before any resolution or construction.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::construct::{construct, AnimationHandle};
use crate::data::{AnimationDefinition, KeyframeDescriptor};
use crate::error::{AnimationError, ValidationError};
use crate::options::{resolve, PresetDefaults, UserOptions};
use crate::target::AnimationTarget;

/// Human-readable allow-list used in validation messages.
pub const ALLOWED_OPTIONS: &str = "duration(number), delay(number), loop(boolean)";

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn wrong_type(key: &str, expected: &str, found: &JsonValue) -> ValidationError {
    ValidationError::WrongType {
        key: key.to_string(),
        expected: expected.to_string(),
        found: json_kind(found).to_string(),
    }
}

fn number(key: &str, value: &JsonValue) -> Result<f64, ValidationError> {
    value.as_f64().ok_or_else(|| wrong_type(key, "number", value))
}

fn boolean(key: &str, value: &JsonValue) -> Result<bool, ValidationError> {
    value.as_bool().ok_or_else(|| wrong_type(key, "boolean", value))
}

/// Check a caller's options object against the allow-list.
///
/// `null` is treated as "no options".
pub fn validate_options(options: &JsonValue) -> Result<UserOptions, ValidationError> {
    let map = match options {
        JsonValue::Null => return Ok(UserOptions::default()),
        JsonValue::Object(map) => map,
        other => {
            return Err(ValidationError::NotAnObject {
                found: json_kind(other).to_string(),
            })
        }
    };

    let mut user = UserOptions::default();
    for (key, value) in map {
        match key.as_str() {
            "duration" => user.duration = Some(number(key, value)?),
            "delay" => user.delay = Some(number(key, value)?),
            "loop" => user.looping = Some(boolean(key, value)?),
            _ => {
                return Err(ValidationError::UnknownOption {
                    key: key.clone(),
                    allowed: ALLOWED_OPTIONS.to_string(),
                })
            }
        }
    }
    Ok(user)
}

/// A named effect: default table plus keyframes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub defaults: PresetDefaults,
    pub keyframes: Vec<KeyframeDescriptor>,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        defaults: PresetDefaults,
        keyframes: Vec<KeyframeDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            defaults,
            keyframes,
        }
    }

    /// Validate `options`, resolve them against the defaults and construct.
    pub fn try_animate<T: AnimationTarget>(
        &self,
        target: T,
        options: &JsonValue,
    ) -> Result<AnimationHandle<T>, AnimationError> {
        let user = validate_options(options)?;
        let config = resolve(&self.defaults, &user)?;
        construct(
            target,
            AnimationDefinition::new(config, self.keyframes.clone()),
        )
    }

    /// Like [`try_animate`](Self::try_animate), reporting failures through the
    /// log and returning `None`.
    pub fn animate<T: AnimationTarget>(
        &self,
        target: T,
        options: &JsonValue,
    ) -> Option<AnimationHandle<T>> {
        match self.try_animate(target, options) {
            Ok(handle) => Some(handle),
            Err(AnimationError::Validation(err)) => {
                log::error!(
                    "{}: {err}. Options object should only include: {ALLOWED_OPTIONS}",
                    self.name
                );
                None
            }
            Err(err) => {
                log::error!("{}: {err}", self.name);
                None
            }
        }
    }
}
