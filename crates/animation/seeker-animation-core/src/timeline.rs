//! Timeline: a keyframe sequence bound to a resolved config.
//!
//! Model:
//! - One cycle lasts `config.duration`; the sequence is stretched uniformly
//!   onto it, so a local time `t` maps to sequence time
//!   `t * sequence.total_duration() / config.duration`.
//! - Each animated property keeps the value it holds at the start of every
//!   keyframe: its base value before the first keyframe touching it, then the
//!   target of the latest keyframe that touched it.
//! - Sampling interpolates properties touched by the active keyframe from that
//!   start value to the keyframe's target with the keyframe's ease; untouched
//!   properties hold their start value.
//!
//! The timeline does not track playback. Callers pass a local time that
//! already accounts for direction and cycle.

use std::collections::BTreeMap;

use crate::config::AnimationConfig;
use crate::error::IndexError;
use crate::interp::interpolate;
use crate::sequence::KeyframeSequence;
use crate::target::AnimationTarget;
use crate::value::PropertyValue;

#[derive(Clone, Debug, PartialEq)]
struct PropertyTrack {
    name: String,
    /// Value held at the start of each keyframe (index-aligned with the sequence).
    starts: Vec<PropertyValue>,
}

impl PropertyTrack {
    fn build(name: &str, base: PropertyValue, sequence: &KeyframeSequence) -> Self {
        let mut current = base;
        let mut starts = Vec::with_capacity(sequence.len());
        for keyframe in sequence.keyframes() {
            starts.push(current.clone());
            if let Some(target) = keyframe.properties.get(name) {
                current = target.clone();
            }
        }
        Self {
            name: name.to_string(),
            starts,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Timeline {
    sequence: KeyframeSequence,
    config: AnimationConfig,
    tracks: Vec<PropertyTrack>,
    armed: bool,
}

impl Timeline {
    /// Bind a sequence to a config. Until [`arm`](Self::arm) is called every
    /// property starts from zero in the unit of its first target.
    pub fn new(sequence: KeyframeSequence, config: AnimationConfig) -> Self {
        let tracks = Self::build_tracks(&sequence, |_| None);
        Self {
            sequence,
            config,
            tracks,
            armed: false,
        }
    }

    fn build_tracks(
        sequence: &KeyframeSequence,
        base_of: impl Fn(&str) -> Option<PropertyValue>,
    ) -> Vec<PropertyTrack> {
        sequence
            .property_names()
            .into_iter()
            .map(|name| {
                let base = base_of(name).unwrap_or_else(|| {
                    sequence
                        .first_value(name)
                        .map(PropertyValue::zero_like)
                        .unwrap_or(PropertyValue::Number(0.0))
                });
                PropertyTrack::build(name, base, sequence)
            })
            .collect()
    }

    /// Capture the target's current values as the starting point of the first
    /// keyframe touching each property.
    pub fn arm<T: AnimationTarget + ?Sized>(&mut self, target: &T) {
        self.tracks = Self::build_tracks(&self.sequence, |name| target.current_value(name));
        self.armed = true;
        log::trace!(
            "timeline armed: {} properties over {} keyframes",
            self.tracks.len(),
            self.sequence.len()
        );
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[inline]
    pub fn sequence(&self) -> &KeyframeSequence {
        &self.sequence
    }

    #[inline]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Length of one cycle in seconds.
    #[inline]
    pub fn cycle_duration(&self) -> f64 {
        self.config.duration
    }

    /// Base value captured for `property`, if the sequence animates it.
    pub fn base_value(&self, property: &str) -> Option<&PropertyValue> {
        self.tracks
            .iter()
            .find(|t| t.name == property)
            .and_then(|t| t.starts.first())
    }

    /// Map a local cycle time onto the sequence's own time axis.
    pub fn sequence_time(&self, local_time: f64) -> Result<f64, IndexError> {
        let cycle = self.cycle_duration();
        if !local_time.is_finite() || local_time < 0.0 || local_time > cycle {
            return Err(IndexError {
                time: local_time,
                total: cycle,
            });
        }
        let total = self.sequence.total_duration();
        if local_time == cycle {
            return Ok(total);
        }
        Ok((local_time / cycle * total).min(total))
    }

    /// Sample every animated property at `local_time` in `0..=cycle_duration()`.
    pub fn sample(&self, local_time: f64) -> Result<BTreeMap<String, PropertyValue>, IndexError> {
        let seq_time = self.sequence_time(local_time)?;
        let active = self.sequence.keyframe_at(seq_time)?;
        let weight = active.keyframe.ease.apply(active.progress);

        let mut out = BTreeMap::new();
        for track in &self.tracks {
            let from = &track.starts[active.index];
            let value = match active.keyframe.properties.get(&track.name) {
                Some(to) => interpolate(from, to, weight),
                None => from.clone(),
            };
            out.insert(track.name.clone(), value);
        }
        Ok(out)
    }
}
