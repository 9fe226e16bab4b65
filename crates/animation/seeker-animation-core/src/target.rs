//! Host-side targets that receive sampled property values.
//!
//! The core never touches a real element. Hosts implement [`AnimationTarget`]
//! to report base values when a timeline is armed and to apply each sampled
//! value once per tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;
use crate::value::PropertyValue;

pub trait AnimationTarget {
    /// Current value of `property`, read once when playback starts.
    fn current_value(&self, property: &str) -> Option<PropertyValue>;

    /// Write a sampled value. Errors propagate to the tick driver unchanged.
    fn apply(&mut self, property: &str, value: &PropertyValue) -> Result<(), TargetError>;
}

impl<T: AnimationTarget + ?Sized> AnimationTarget for &mut T {
    fn current_value(&self, property: &str) -> Option<PropertyValue> {
        (**self).current_value(property)
    }

    fn apply(&mut self, property: &str, value: &PropertyValue) -> Result<(), TargetError> {
        (**self).apply(property, value)
    }
}

impl<T: AnimationTarget + ?Sized> AnimationTarget for Box<T> {
    fn current_value(&self, property: &str) -> Option<PropertyValue> {
        (**self).current_value(property)
    }

    fn apply(&mut self, property: &str, value: &PropertyValue) -> Result<(), TargetError> {
        (**self).apply(property, value)
    }
}

/// In-memory property bag; the simplest possible target.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap {
    values: BTreeMap<String, PropertyValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.values.get(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AnimationTarget for PropertyMap {
    fn current_value(&self, property: &str) -> Option<PropertyValue> {
        self.values.get(property).cloned()
    }

    fn apply(&mut self, property: &str, value: &PropertyValue) -> Result<(), TargetError> {
        self.values.insert(property.to_string(), value.clone());
        Ok(())
    }
}

/// Target backed by a mutation callback `(property, value)`, with an optional
/// set of base values reported at arm time.
pub struct CallbackTarget<F> {
    base: PropertyMap,
    callback: F,
}

impl<F> CallbackTarget<F>
where
    F: FnMut(&str, &PropertyValue) -> Result<(), TargetError>,
{
    pub fn new(callback: F) -> Self {
        Self {
            base: PropertyMap::new(),
            callback,
        }
    }

    pub fn with_base(mut self, base: PropertyMap) -> Self {
        self.base = base;
        self
    }
}

impl<F> std::fmt::Debug for CallbackTarget<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackTarget")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl<F> AnimationTarget for CallbackTarget<F>
where
    F: FnMut(&str, &PropertyValue) -> Result<(), TargetError>,
{
    fn current_value(&self, property: &str) -> Option<PropertyValue> {
        self.base.get(property).cloned()
    }

    fn apply(&mut self, property: &str, value: &PropertyValue) -> Result<(), TargetError> {
        (self.callback)(property, value)
    }
}
