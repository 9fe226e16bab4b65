//! Validated, immutable keyframe sequences.
//!
//! A sequence is built once from descriptors and shared read-only (cloning
//! only bumps a reference count). Cumulative start offsets are precomputed so
//! [`KeyframeSequence::keyframe_at`] is a binary search over the boundaries.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::KeyframeDescriptor;
use crate::error::{ConfigError, IndexError};
use crate::interp::Ease;
use crate::value::PropertyValue;

/// A validated keyframe with its position in the sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    pub properties: BTreeMap<String, PropertyValue>,
    pub duration: f64,
    pub ease: Ease,
    /// Offset of this keyframe from the start of the sequence, in seconds.
    pub start: f64,
}

/// Keyframe active at a queried time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveKeyframe<'a> {
    pub index: usize,
    pub keyframe: &'a Keyframe,
    /// Linear progress through the keyframe in `[0, 1]`.
    pub progress: f64,
}

#[derive(Debug, PartialEq)]
struct SequenceData {
    keyframes: Vec<Keyframe>,
    total: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeSequence {
    data: Arc<SequenceData>,
}

impl KeyframeSequence {
    /// Validate descriptors and precompute offsets.
    ///
    /// Fails when the list is empty, a duration is not finite and positive, or
    /// an ease name is unknown.
    pub fn from_descriptors(descriptors: Vec<KeyframeDescriptor>) -> Result<Self, ConfigError> {
        if descriptors.is_empty() {
            return Err(ConfigError::EmptySequence);
        }

        let mut keyframes = Vec::with_capacity(descriptors.len());
        let mut offset = 0.0f64;
        for (index, desc) in descriptors.into_iter().enumerate() {
            if !desc.duration.is_finite() || desc.duration <= 0.0 {
                return Err(ConfigError::InvalidKeyframeDuration {
                    index,
                    duration: desc.duration,
                });
            }
            let ease = match desc.ease.as_deref() {
                Some(name) => name.parse::<Ease>()?,
                None => Ease::default(),
            };
            keyframes.push(Keyframe {
                properties: desc.properties,
                duration: desc.duration,
                ease,
                start: offset,
            });
            offset += desc.duration;
        }

        Ok(Self {
            data: Arc::new(SequenceData {
                keyframes,
                total: offset,
            }),
        })
    }

    /// Sum of all keyframe durations.
    #[inline]
    pub fn total_duration(&self) -> f64 {
        self.data.total
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.keyframes.len()
    }

    /// Always false: construction rejects empty sequences.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.keyframes.is_empty()
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.data.keyframes
    }

    /// Distinct property names animated anywhere in the sequence, sorted.
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .data
            .keyframes
            .iter()
            .flat_map(|k| k.properties.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// First value assigned to `property` in playback order.
    pub fn first_value(&self, property: &str) -> Option<&PropertyValue> {
        self.data
            .keyframes
            .iter()
            .find_map(|k| k.properties.get(property))
    }

    /// Keyframe active at time `t` (seconds from sequence start) and the linear
    /// progress within it. A time on a boundary belongs to the later keyframe;
    /// `t == total_duration()` resolves to the last keyframe at progress 1.
    pub fn keyframe_at(&self, t: f64) -> Result<ActiveKeyframe<'_>, IndexError> {
        let total = self.data.total;
        if !t.is_finite() || t < 0.0 || t > total {
            return Err(IndexError { time: t, total });
        }

        let keyframes = &self.data.keyframes;
        if t == total {
            let index = keyframes.len() - 1;
            return Ok(ActiveKeyframe {
                index,
                keyframe: &keyframes[index],
                progress: 1.0,
            });
        }

        let index = keyframes.partition_point(|k| k.start <= t).saturating_sub(1);
        let keyframe = &keyframes[index];
        let progress = ((t - keyframe.start) / keyframe.duration).clamp(0.0, 1.0);
        Ok(ActiveKeyframe {
            index,
            keyframe,
            progress,
        })
    }
}
