//! Output contracts from playback.
//!
//! Each tick reports how many property values were written to the target and
//! the lifecycle events that happened while advancing.

use serde::{Deserialize, Serialize};

use crate::playback::PlaybackStatus;

/// Discrete lifecycle signals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackEvent {
    Started,
    Paused { elapsed: f64 },
    Resumed,
    Cancelled,
    /// A cycle finished and another one follows.
    CycleCompleted { cycle_index: u64 },
    /// `count` whole cycles starting at `first` elapsed within one tick and
    /// were never sampled.
    CyclesSkipped { first: u64, count: u64 },
    /// The final cycle finished; no more values will be applied.
    Completed,
}

/// Result of one `tick`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Status after the tick.
    pub status: PlaybackStatus,
    /// Property writes performed on the target.
    pub applied: usize,
    #[serde(default)]
    pub events: Vec<PlaybackEvent>,
}

impl TickOutcome {
    #[inline]
    pub fn idle(status: PlaybackStatus) -> Self {
        Self {
            status,
            applied: 0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn completed(&self) -> bool {
        self.events.contains(&PlaybackEvent::Completed)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.applied == 0 && self.events.is_empty()
    }
}
