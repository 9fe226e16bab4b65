//! Resolved animation configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How many extra cycles follow the first one.
///
/// Serialises with the integer convention: `-1` is infinite, `n >= 0` is `n`
/// extra cycles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Repeat {
    Count(u32),
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl Repeat {
    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// Whether another cycle follows the (0-based) cycle `cycle_index`.
    #[inline]
    pub fn has_cycle_after(&self, cycle_index: u64) -> bool {
        self.cycles_after(cycle_index) != Some(0)
    }

    /// Cycles still to come after `cycle_index`, `None` when infinite.
    #[inline]
    pub fn cycles_after(&self, cycle_index: u64) -> Option<u64> {
        match self {
            Self::Infinite => None,
            Self::Count(n) => Some(u64::from(*n).saturating_sub(cycle_index)),
        }
    }

    /// Total number of cycles, `None` when infinite.
    #[inline]
    pub fn cycles(&self) -> Option<u64> {
        match self {
            Self::Infinite => None,
            Self::Count(n) => Some(u64::from(*n) + 1),
        }
    }
}

impl TryFrom<i64> for Repeat {
    type Error = ConfigError;

    fn try_from(repeat: i64) -> Result<Self, Self::Error> {
        match repeat {
            -1 => Ok(Self::Infinite),
            n => u32::try_from(n)
                .map(Self::Count)
                .map_err(|_| ConfigError::InvalidRepeat { repeat }),
        }
    }
}

impl From<Repeat> for i64 {
    fn from(repeat: Repeat) -> Self {
        match repeat {
            Repeat::Infinite => -1,
            Repeat::Count(n) => i64::from(n),
        }
    }
}

/// Fully resolved timing for one animation instance. Immutable once an
/// animation is constructed.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Length of one cycle in seconds.
    pub duration: f64,
    /// Wait before the first cycle starts, in seconds.
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub repeat: Repeat,
    /// Wait between consecutive cycles, in seconds.
    #[serde(default)]
    pub repeat_delay: f64,
    /// Reverse direction on every repeat.
    #[serde(default)]
    pub yoyo: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl AnimationConfig {
    #[inline]
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            delay: 0.0,
            repeat: Repeat::default(),
            repeat_delay: 0.0,
            yoyo: false,
        }
    }

    #[inline]
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    #[inline]
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    #[inline]
    pub fn with_repeat_delay(mut self, repeat_delay: f64) -> Self {
        self.repeat_delay = repeat_delay;
        self
    }

    #[inline]
    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Check numeric invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ConfigError::InvalidDuration {
                duration: self.duration,
            });
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(ConfigError::InvalidDelay { delay: self.delay });
        }
        if !self.repeat_delay.is_finite() || self.repeat_delay < 0.0 {
            return Err(ConfigError::InvalidRepeatDelay {
                repeat_delay: self.repeat_delay,
            });
        }
        Ok(())
    }

    /// Wall time from `play()` to completion, `None` when repeating forever.
    pub fn total_duration(&self) -> Option<f64> {
        let cycles = self.repeat.cycles()? as f64;
        Some(self.delay + cycles * self.duration + (cycles - 1.0) * self.repeat_delay)
    }
}
