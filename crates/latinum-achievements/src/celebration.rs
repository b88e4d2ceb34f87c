//! One-at-a-time unlock celebrations.
//!
//! The queue does not own a timer. Callers pass the current [`Instant`] to
//! [`CelebrationQueue::poll`], which makes the timing testable. Frontends
//! that announce everything at once, like a command line run, call
//! [`CelebrationQueue::drain`] instead.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::definition::Achievement;

/// Timing for unlock celebrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelebrationConfig {
    /// How long a celebration stays up before it dismisses itself.
    pub display_for: Duration,
    /// Pause between one celebration closing and the next opening.
    pub gap: Duration,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            display_for: Duration::from_secs(4),
            gap: Duration::from_millis(500),
        }
    }
}

impl CelebrationConfig {
    /// Set the display time.
    pub fn with_display_for(mut self, display_for: Duration) -> Self {
        self.display_for = display_for;
        self
    }

    /// Set the gap between celebrations.
    pub fn with_gap(mut self, gap: Duration) -> Self {
        self.gap = gap;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Showing {
    achievement: &'static Achievement,
    until: Instant,
}

/// Queue of celebrations waiting to be shown.
#[derive(Debug, Clone, Default)]
pub struct CelebrationQueue {
    config: CelebrationConfig,
    waiting: VecDeque<&'static Achievement>,
    showing: Option<Showing>,
    next_at: Option<Instant>,
}

impl CelebrationQueue {
    /// Create an empty queue.
    pub fn new(config: CelebrationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Queue achievements, in order.
    pub fn push(&mut self, achievements: impl IntoIterator<Item = &'static Achievement>) {
        self.waiting.extend(achievements);
    }

    /// The celebration on screen, if any.
    pub fn current(&self) -> Option<&'static Achievement> {
        self.showing.map(|s| s.achievement)
    }

    /// Celebrations waiting behind the current one.
    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    /// Whether nothing is showing or waiting.
    pub fn is_idle(&self) -> bool {
        self.showing.is_none() && self.waiting.is_empty()
    }

    /// Advance to `now`. Expires the current celebration when its time is up
    /// and opens the next one once the gap has passed. Returns the
    /// celebration that opened during this call, if any.
    pub fn poll(&mut self, now: Instant) -> Option<&'static Achievement> {
        if let Some(showing) = self.showing.filter(|s| now >= s.until) {
            self.showing = None;
            self.next_at = Some(showing.until + self.config.gap);
        }
        if self.showing.is_some() || self.next_at.is_some_and(|at| now < at) {
            return None;
        }

        let achievement = self.waiting.pop_front()?;
        self.showing = Some(Showing {
            achievement,
            until: now + self.config.display_for,
        });
        self.next_at = None;
        Some(achievement)
    }

    /// Close the current celebration early.
    pub fn dismiss(&mut self, now: Instant) {
        if self.showing.take().is_some() {
            self.next_at = Some(now + self.config.gap);
        }
    }

    /// Take the current celebration and everything waiting, in order, and
    /// leave the queue idle.
    pub fn drain(&mut self) -> Vec<&'static Achievement> {
        self.next_at = None;
        self.showing
            .take()
            .map(|s| s.achievement)
            .into_iter()
            .chain(self.waiting.drain(..))
            .collect()
    }
}
