//! Declarative animation data: keyframe descriptors and full definitions.
//!
//! Descriptors use the flat preset shape, where every key other than
//! `duration` and `ease` names an animated property:
//!
//! ```json
//! { "skewX": "-12.5deg", "skewY": "-12.5deg", "ease": "none", "duration": 0.222 }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::value::PropertyValue;

/// One timed target state, as written by a preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyframeDescriptor {
    /// Seconds, > 0.
    pub duration: f64,
    /// Named easing curve; `None` runs linearly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<String>,
    /// Property name -> target value.
    #[serde(flatten)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl KeyframeDescriptor {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ease: None,
            properties: BTreeMap::new(),
        }
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    pub fn with_ease(mut self, ease: impl Into<String>) -> Self {
        self.ease = Some(ease.into());
        self
    }
}

/// Resolved configuration plus keyframes: everything `construct` needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationDefinition {
    #[serde(flatten)]
    pub config: AnimationConfig,
    pub keyframes: Vec<KeyframeDescriptor>,
}

impl AnimationDefinition {
    pub fn new(config: AnimationConfig, keyframes: Vec<KeyframeDescriptor>) -> Self {
        Self { config, keyframes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Repeat;

    #[test]
    fn descriptor_reads_flat_preset_shape() {
        let kf: KeyframeDescriptor = serde_json::from_str(
            r#"{ "skewX": "6.25deg", "skewY": "6.25deg", "ease": "none", "duration": 0.111 }"#,
        )
        .unwrap();
        assert_eq!(
            kf,
            KeyframeDescriptor::new(0.111)
                .with("skewX", "6.25deg")
                .with("skewY", "6.25deg")
                .with_ease("none")
        );
        assert_eq!(
            kf.properties.get("skewY"),
            Some(&PropertyValue::dimension(6.25, "deg"))
        );
    }

    #[test]
    fn definition_flattens_config() {
        let def: AnimationDefinition = serde_json::from_str(
            r#"{
                "duration": 2,
                "repeat": 0,
                "repeatDelay": 0.111,
                "yoyo": true,
                "keyframes": [{ "opacity": 0, "duration": 1 }]
            }"#,
        )
        .unwrap();
        assert_eq!(def.config.repeat, Repeat::Count(0));
        assert!(def.config.yoyo);
        assert_eq!(def.keyframes.len(), 1);
        assert_eq!(
            def.keyframes[0].properties.get("opacity"),
            Some(&PropertyValue::Number(0.0))
        );
    }
}
