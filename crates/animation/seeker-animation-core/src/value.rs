//! Property values carried by keyframes and written to targets.
//!
//! Presets describe targets as JSON numbers or strings such as `"-12.5deg"`.
//! Strings made of a number followed by an alphabetic (or `%`) unit become
//! [`PropertyValue::Dimension`], plain numeric strings become
//! [`PropertyValue::Number`], anything else is kept as step-only text.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    /// Number with a unit suffix, e.g. `6.25deg` or `50%`.
    Dimension { value: f64, unit: String },
    /// Step-only value (no blending).
    Text(String),
}

impl PropertyValue {
    pub fn dimension(value: f64, unit: impl Into<String>) -> Self {
        Self::Dimension {
            value,
            unit: unit.into(),
        }
    }

    /// Parse a preset literal. Never fails: unparseable input becomes `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let split = trimmed
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(split);
        let unit = unit.trim();

        match number.parse::<f64>() {
            Ok(value) if unit.is_empty() => Self::Number(value),
            Ok(value) if unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') => {
                Self::dimension(value, unit)
            }
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Numeric magnitude, ignoring any unit.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) | Self::Dimension { value: v, .. } => Some(*v),
            Self::Text(_) => None,
        }
    }

    #[inline]
    pub fn unit(&self) -> Option<&str> {
        match self {
            Self::Dimension { unit, .. } => Some(unit),
            _ => None,
        }
    }

    /// Neutral starting value for a property whose target reports nothing.
    pub fn zero_like(&self) -> Self {
        match self {
            Self::Number(_) => Self::Number(0.0),
            Self::Dimension { unit, .. } => Self::dimension(0.0, unit.clone()),
            Self::Text(_) => self.clone(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Dimension { value, unit } => write!(f, "{value}{unit}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for PropertyValue {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(v) => serializer.serialize_f64(*v),
            other => serializer.collect_str(other),
        }
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Self::Number(v),
            Raw::Text(s) => Self::parse(&s),
        })
    }
}
