//! Entry point: compose a sequence, timeline and controller for one target.

use std::fmt;

use crate::config::AnimationConfig;
use crate::data::AnimationDefinition;
use crate::error::AnimationError;
use crate::outputs::{PlaybackEvent, TickOutcome};
use crate::playback::{PlaybackController, PlaybackStatus};
use crate::sequence::KeyframeSequence;
use crate::target::AnimationTarget;
use crate::timeline::Timeline;

type CompletionCallback = Box<dyn FnOnce()>;

/// Validate a definition and build an idle handle bound to `target`.
///
/// Nothing is armed and no playback state exists until [`AnimationHandle::play`].
pub fn construct<T: AnimationTarget>(
    target: T,
    definition: AnimationDefinition,
) -> Result<AnimationHandle<T>, AnimationError> {
    definition.config.validate()?;
    let sequence = KeyframeSequence::from_descriptors(definition.keyframes)?;
    construct_with_sequence(target, definition.config, sequence)
}

/// Like [`construct`], reusing an already validated (and possibly shared) sequence.
pub fn construct_with_sequence<T: AnimationTarget>(
    target: T,
    config: AnimationConfig,
    sequence: KeyframeSequence,
) -> Result<AnimationHandle<T>, AnimationError> {
    config.validate()?;
    log::debug!(
        "constructing animation: {} keyframes, duration={}s",
        sequence.len(),
        config.duration
    );
    Ok(AnimationHandle {
        target,
        controller: PlaybackController::new(Timeline::new(sequence, config)),
        on_complete: Vec::new(),
    })
}

/// A constructed animation: owns its target and playback controller.
///
/// Pass `&mut element` as the target to keep ownership on the host side.
pub struct AnimationHandle<T: AnimationTarget> {
    target: T,
    controller: PlaybackController,
    on_complete: Vec<CompletionCallback>,
}

impl<T: AnimationTarget> AnimationHandle<T> {
    pub fn play(&mut self) -> Option<PlaybackEvent> {
        self.controller.play(&self.target)
    }

    pub fn pause(&mut self) -> Option<PlaybackEvent> {
        self.controller.pause()
    }

    pub fn resume(&mut self) -> Option<PlaybackEvent> {
        self.controller.resume()
    }

    /// Cancel playback. Pending completion callbacks are dropped without running.
    pub fn cancel(&mut self) -> Option<PlaybackEvent> {
        let event = self.controller.cancel();
        if event.is_some() {
            self.on_complete.clear();
        }
        event
    }

    /// Advance by `dt` seconds. Runs completion callbacks when the last cycle ends.
    pub fn tick(&mut self, dt: f64) -> Result<TickOutcome, AnimationError> {
        let outcome = self.controller.tick(dt, &mut self.target)?;
        if outcome.completed() {
            for callback in self.on_complete.drain(..) {
                callback();
            }
        }
        Ok(outcome)
    }

    /// Register a callback for completion. Runs immediately if already complete.
    pub fn on_complete(&mut self, callback: impl FnOnce() + 'static) {
        match self.controller.status() {
            PlaybackStatus::Completed => callback(),
            PlaybackStatus::Cancelled => {}
            _ => self.on_complete.push(Box::new(callback)),
        }
    }

    #[inline]
    pub fn status(&self) -> PlaybackStatus {
        self.controller.status()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.controller.status() == PlaybackStatus::Completed
    }

    #[inline]
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut PlaybackController {
        &mut self.controller
    }

    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }

    #[inline]
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }
}

impl<T: AnimationTarget + fmt::Debug> fmt::Debug for AnimationHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("target", &self.target)
            .field("controller", &self.controller)
            .field("on_complete", &self.on_complete.len())
            .finish()
    }
}
