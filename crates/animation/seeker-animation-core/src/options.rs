//! Options resolution: merge caller overrides with a preset's default table.
//!
//! Precedence, field by field (user value if set, else preset default):
//!
//! | field         | user value used when                                  |
//! |---------------|-------------------------------------------------------|
//! | `duration`    | present and non-zero                                  |
//! | `delay`       | present and non-zero                                  |
//! | `repeatDelay` | present; otherwise a set `delay` is used              |
//! | `repeat`      | `loop: true` forces infinite; otherwise present       |
//! | `yoyo`        | present                                               |
//!
//! `loop` is authoritative: when true it overrides any explicit `repeat`.

use serde::{Deserialize, Serialize};

use crate::config::{AnimationConfig, Repeat};
use crate::error::ConfigError;

/// Per-preset default table.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetDefaults {
    pub duration: f64,
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub repeat_delay: f64,
    #[serde(default)]
    pub yoyo: bool,
}

impl PresetDefaults {
    pub fn new(duration: f64) -> Self {
        let base = AnimationConfig::new(duration);
        Self {
            duration,
            delay: base.delay,
            repeat: base.repeat,
            repeat_delay: base.repeat_delay,
            yoyo: base.yoyo,
        }
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_repeat_delay(mut self, repeat_delay: f64) -> Self {
        self.repeat_delay = repeat_delay;
        self
    }

    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }
}

/// Caller overrides. Every field is optional; unknown keys are rejected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(rename = "loop", default, skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_delay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yoyo: Option<bool>,
}

impl UserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = Some(looping);
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn with_repeat_delay(mut self, repeat_delay: f64) -> Self {
        self.repeat_delay = Some(repeat_delay);
        self
    }

    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = Some(yoyo);
        self
    }
}

/// Merge `user` over `defaults` and validate the result.
pub fn resolve(
    defaults: &PresetDefaults,
    user: &UserOptions,
) -> Result<AnimationConfig, ConfigError> {
    let set = |v: Option<f64>| v.filter(|x| *x != 0.0);

    let user_delay = set(user.delay);
    let repeat = if user.looping == Some(true) {
        Repeat::Infinite
    } else {
        user.repeat.unwrap_or(defaults.repeat)
    };

    let config = AnimationConfig {
        duration: set(user.duration).unwrap_or(defaults.duration),
        delay: user_delay.unwrap_or(defaults.delay),
        repeat,
        repeat_delay: user
            .repeat_delay
            .or(user_delay)
            .unwrap_or(defaults.repeat_delay),
        yoyo: user.yoyo.unwrap_or(defaults.yoyo),
    };
    config.validate()?;
    log::trace!("resolved options {user:?} -> {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jello_defaults() -> PresetDefaults {
        PresetDefaults::new(2.0)
            .with_repeat(Repeat::Count(0))
            .with_repeat_delay(0.111)
            .with_yoyo(true)
    }

    #[test]
    fn empty_options_yield_defaults() {
        let cfg = resolve(&jello_defaults(), &UserOptions::new()).unwrap();
        assert_eq!(
            cfg,
            AnimationConfig::new(2.0)
                .with_repeat(Repeat::Count(0))
                .with_repeat_delay(0.111)
                .with_yoyo(true)
        );
    }

    #[test]
    fn user_values_override() {
        let user = UserOptions::new().with_duration(0.5).with_delay(0.3);
        let cfg = resolve(&jello_defaults(), &user).unwrap();
        assert_eq!(cfg.duration, 0.5);
        assert_eq!(cfg.delay, 0.3);
        assert_eq!(cfg.repeat_delay, 0.3);

        let user = UserOptions::new().with_delay(0.3).with_repeat_delay(0.0);
        let cfg = resolve(&jello_defaults(), &user).unwrap();
        assert_eq!(cfg.delay, 0.3);
        assert_eq!(cfg.repeat_delay, 0.0);
    }

    #[test]
    fn zero_duration_and_delay_count_as_unset() {
        let user = UserOptions::new().with_duration(0.0).with_delay(0.0);
        let cfg = resolve(&jello_defaults(), &user).unwrap();
        assert_eq!(cfg.duration, 2.0);
        assert_eq!(cfg.delay, 0.0);
        assert_eq!(cfg.repeat_delay, 0.111);
    }

    #[test]
    fn loop_is_authoritative_over_repeat() {
        let user = UserOptions::new().with_loop(true).with_repeat(Repeat::Count(3));
        assert_eq!(
            resolve(&jello_defaults(), &user).unwrap().repeat,
            Repeat::Infinite
        );

        let user = UserOptions::new().with_loop(false).with_repeat(Repeat::Count(3));
        assert_eq!(
            resolve(&jello_defaults(), &user).unwrap().repeat,
            Repeat::Count(3)
        );

        let user = UserOptions::new().with_loop(false);
        assert_eq!(
            resolve(&jello_defaults(), &user).unwrap().repeat,
            Repeat::Count(0)
        );
    }

    #[test]
    fn invalid_numbers_fail() {
        let user = UserOptions::new().with_duration(-1.0);
        assert_eq!(
            resolve(&jello_defaults(), &user).unwrap_err(),
            ConfigError::InvalidDuration { duration: -1.0 }
        );
        let user = UserOptions::new().with_delay(-0.2);
        assert!(resolve(&jello_defaults(), &user).is_err());
        let user = UserOptions::new().with_duration(f64::NAN);
        assert!(resolve(&jello_defaults(), &user).is_err());
    }

    #[test]
    fn user_options_json() {
        let user: UserOptions =
            serde_json::from_str(r#"{"duration":1.5,"loop":true,"repeatDelay":0.2}"#).unwrap();
        assert_eq!(
            user,
            UserOptions::new()
                .with_duration(1.5)
                .with_loop(true)
                .with_repeat_delay(0.2)
        );
        assert!(serde_json::from_str::<UserOptions>(r#"{"speed":2}"#).is_err());
    }
}
