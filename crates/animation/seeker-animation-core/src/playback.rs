//! Playback controller: drives a [`Timeline`] across externally supplied ticks.
//!
//! States: `Idle -> Running -> {Paused <-> Running} -> {Completed, Cancelled}`.
//!
//! Per running tick:
//! 1. consume any pending delay (start delay or repeat delay), sampling nothing;
//! 2. advance `elapsed` by `dt * speed`;
//! 3. on reaching the cycle end either wrap into the next cycle (carrying the
//!    remainder, loading the repeat delay, flipping direction for yoyo) or
//!    clamp and complete. Whole `duration + repeat_delay` periods inside one
//!    delta are counted arithmetically, so a tick never loops per cycle;
//! 4. sample the timeline at the direction-adjusted local time and apply every
//!    property to the target.
//!
//! Target errors propagate out of `tick` and leave the controller running.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::outputs::{PlaybackEvent, TickOutcome};
use crate::target::AnimationTarget;
use crate::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Idle,
    Running,
    Paused,
    Completed,
    Cancelled,
}

impl PlaybackStatus {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Completed or cancelled; no transition leaves a terminal state.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Local time at which a cycle played in this direction ends.
    #[inline]
    fn end_local_time(self, cycle: f64) -> f64 {
        match self {
            Self::Forward => cycle,
            Self::Reverse => 0.0,
        }
    }
}

/// Mutable cursor of one running instance. Exists from `play()` until
/// completion or cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Seconds since the current cycle started.
    pub elapsed: f64,
    /// 0-based cycle number.
    pub cycle_index: u64,
    pub direction: Direction,
    /// Delay still to wait before sampling resumes.
    pub delay_remaining: f64,
}

impl PlaybackState {
    fn new(delay: f64) -> Self {
        Self {
            elapsed: 0.0,
            cycle_index: 0,
            direction: Direction::Forward,
            delay_remaining: delay,
        }
    }

    /// Direction-adjusted time within the cycle.
    #[inline]
    pub fn local_time(&self, cycle: f64) -> f64 {
        let elapsed = self.elapsed.clamp(0.0, cycle);
        match self.direction {
            Direction::Forward => elapsed,
            Direction::Reverse => cycle - elapsed,
        }
    }
}

fn apply_frame<T: AnimationTarget + ?Sized>(
    timeline: &Timeline,
    local_time: f64,
    target: &mut T,
) -> Result<usize, AnimationError> {
    let frame = timeline.sample(local_time)?;
    for (property, value) in &frame {
        target.apply(property, value)?;
    }
    log::trace!("applied {} properties at t={local_time}", frame.len());
    Ok(frame.len())
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    timeline: Timeline,
    status: PlaybackStatus,
    state: Option<PlaybackState>,
    speed: f64,
}

impl PlaybackController {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            status: PlaybackStatus::Idle,
            state: None,
            speed: 1.0,
        }
    }

    #[inline]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Live cursor; `None` before `play()` and after completion or cancellation.
    #[inline]
    pub fn state(&self) -> Option<&PlaybackState> {
        self.state.as_ref()
    }

    #[inline]
    pub fn cycle_index(&self) -> Option<u64> {
        self.state.as_ref().map(|s| s.cycle_index)
    }

    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.state.as_ref().map(|s| s.direction)
    }

    #[inline]
    pub fn elapsed(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.elapsed)
    }

    #[inline]
    pub fn local_time(&self) -> Option<f64> {
        let cycle = self.timeline.cycle_duration();
        self.state.as_ref().map(|s| s.local_time(cycle))
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Time-scale multiplier applied to every tick delta.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), AnimationError> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(AnimationError::InvalidSpeed { speed });
        }
        self.speed = speed;
        Ok(())
    }

    /// Animation time from start to completion, `None` when repeating forever.
    #[inline]
    pub fn total_duration(&self) -> Option<f64> {
        self.timeline.config().total_duration()
    }

    /// Progress in `[0, 1]` over the whole run including delays. For infinite
    /// repeats this is the progress through the current cycle.
    pub fn progress(&self) -> f64 {
        match self.status {
            PlaybackStatus::Idle => return 0.0,
            PlaybackStatus::Completed => return 1.0,
            _ => {}
        }
        let Some(state) = self.state.as_ref() else {
            return 0.0;
        };
        let config = self.timeline.config();
        match config.total_duration() {
            Some(total) => {
                let done = config.delay
                    + state.cycle_index as f64 * (config.duration + config.repeat_delay)
                    + state.elapsed
                    - state.delay_remaining;
                (done / total).clamp(0.0, 1.0)
            }
            None => (state.elapsed / config.duration).clamp(0.0, 1.0),
        }
    }

    /// Start from idle (arming the timeline against `target`), or resume when
    /// paused. No-op otherwise.
    pub fn play<T: AnimationTarget + ?Sized>(&mut self, target: &T) -> Option<PlaybackEvent> {
        match self.status {
            PlaybackStatus::Idle => {
                self.timeline.arm(target);
                self.state = Some(PlaybackState::new(self.timeline.config().delay));
                self.status = PlaybackStatus::Running;
                log::debug!(
                    "playback started: cycle={}s repeat={:?} yoyo={}",
                    self.timeline.cycle_duration(),
                    self.timeline.config().repeat,
                    self.timeline.config().yoyo
                );
                Some(PlaybackEvent::Started)
            }
            PlaybackStatus::Paused => self.resume(),
            _ => None,
        }
    }

    /// Freeze tick advancement. Idempotent; only valid while running.
    pub fn pause(&mut self) -> Option<PlaybackEvent> {
        if self.status != PlaybackStatus::Running {
            return None;
        }
        self.status = PlaybackStatus::Paused;
        let elapsed = self.elapsed().unwrap_or(0.0);
        log::debug!("playback paused at elapsed={elapsed}");
        Some(PlaybackEvent::Paused { elapsed })
    }

    /// Continue from the frozen point.
    pub fn resume(&mut self) -> Option<PlaybackEvent> {
        if self.status != PlaybackStatus::Paused {
            return None;
        }
        self.status = PlaybackStatus::Running;
        log::debug!("playback resumed");
        Some(PlaybackEvent::Resumed)
    }

    /// Stop for good. Applied values are left in place. Idempotent.
    pub fn cancel(&mut self) -> Option<PlaybackEvent> {
        if self.status.is_terminal() {
            return None;
        }
        self.status = PlaybackStatus::Cancelled;
        self.state = None;
        log::debug!("playback cancelled");
        Some(PlaybackEvent::Cancelled)
    }

    /// Advance by `dt` seconds and apply the sampled frame to `target`.
    /// Does nothing unless running.
    pub fn tick<T: AnimationTarget + ?Sized>(
        &mut self,
        dt: f64,
        target: &mut T,
    ) -> Result<TickOutcome, AnimationError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(AnimationError::InvalidTick { dt });
        }
        let mut outcome = TickOutcome::idle(self.status);
        if self.status != PlaybackStatus::Running {
            return Ok(outcome);
        }
        let Some(state) = self.state.as_mut() else {
            return Ok(outcome);
        };

        let config = *self.timeline.config();
        let cycle = config.duration;
        let period = cycle + config.repeat_delay;
        let mut remaining = dt * self.speed;
        // Direction of a cycle finished during this tick, if a repeat delay followed it.
        let mut finished: Option<Direction> = None;

        loop {
            if state.delay_remaining > 0.0 {
                if remaining < state.delay_remaining {
                    state.delay_remaining -= remaining;
                    if let Some(direction) = finished {
                        let end = direction.end_local_time(cycle);
                        outcome.applied += apply_frame(&self.timeline, end, target)?;
                    }
                    return Ok(outcome);
                }
                remaining -= state.delay_remaining;
                state.delay_remaining = 0.0;
            }

            state.elapsed += remaining;
            remaining = 0.0;
            if state.elapsed < cycle {
                break;
            }

            // Cycle ends fall at `elapsed + repeat_delay = k * period`; count
            // them in one step so a tick costs the same for any `dt`.
            let shifted = state.elapsed + config.repeat_delay;
            let carry = shifted % period;
            let ends = ((shifted - carry) / period).round().max(1.0) as u64;
            let budget = config.repeat.cycles_after(state.cycle_index);
            let wraps = budget.map_or(ends, |left| ends.min(left));

            if wraps > 0 {
                outcome.events.push(PlaybackEvent::CycleCompleted {
                    cycle_index: state.cycle_index,
                });
                if wraps > 1 {
                    outcome.events.push(PlaybackEvent::CyclesSkipped {
                        first: state.cycle_index.saturating_add(1),
                        count: wraps - 1,
                    });
                }
                log::trace!("{wraps} cycle(s) completed from {}", state.cycle_index);
                state.cycle_index = state.cycle_index.saturating_add(wraps);
                if config.yoyo && wraps % 2 == 1 {
                    state.direction = state.direction.flip();
                }
            }

            if wraps == ends {
                // Still inside the run: the next cycle starts after the repeat delay.
                finished = Some(if config.yoyo {
                    state.direction.flip()
                } else {
                    state.direction
                });
                state.elapsed = 0.0;
                state.delay_remaining = config.repeat_delay;
                remaining = carry;
                continue;
            }

            state.elapsed = cycle;
            let end = state.local_time(cycle);
            outcome.applied += apply_frame(&self.timeline, end, target)?;
            log::debug!(
                "playback {} after {} cycles",
                PlaybackStatus::Completed.name(),
                state.cycle_index.saturating_add(1)
            );
            self.state = None;
            self.status = PlaybackStatus::Completed;
            outcome.status = PlaybackStatus::Completed;
            outcome.events.push(PlaybackEvent::Completed);
            return Ok(outcome);
        }

        let local = state.local_time(cycle);
        outcome.applied += apply_frame(&self.timeline, local, target)?;
        Ok(outcome)
    }
}
