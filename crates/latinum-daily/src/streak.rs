//! Day-streak tracking with a one-day grace period.
//!
//! The record moves through `NoHistory -> Active(n) -> GraceUsed(n) ->
//! Broken`. [`StreakRecord::refresh`] runs once per day before the challenge
//! is shown; [`StreakRecord::complete`] runs when the challenge is finished.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use latinum_core::store::{self, Store, keys};
use latinum_core::lenient;

use crate::config::{DailyConfig, GracePolicy};
use crate::error::{DailyError, DailyResult};

/// Persisted streak state (`ferengiStreak`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakRecord {
    /// Consecutive days completed, counting forgiven gaps.
    #[serde(deserialize_with = "lenient::count")]
    pub current_streak: u32,
    /// Longest streak ever reached.
    #[serde(deserialize_with = "lenient::count")]
    pub longest_streak: u32,
    /// Last day a challenge was completed.
    #[serde(deserialize_with = "lenient::optional_date")]
    pub last_completed_date: Option<NaiveDate>,
    /// Whether this streak cycle's grace period has been spent.
    #[serde(deserialize_with = "lenient::flag")]
    pub grace_period_used: bool,
    /// The day the grace period was spent, so repeated checks that day agree.
    #[serde(
        deserialize_with = "lenient::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub grace_applied_on: Option<NaiveDate>,
    /// Challenges completed over all time.
    #[serde(deserialize_with = "lenient::count")]
    pub total_completions: u32,
    /// Milestones already rewarded.
    #[serde(deserialize_with = "lenient::number_set")]
    pub rewards: BTreeSet<u32>,
}

/// Coarse state of a streak record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakState {
    /// Never completed a challenge.
    NoHistory,
    /// Streak of `n` days, grace still available.
    Active(u32),
    /// Streak of `n` days, grace already spent this cycle.
    GraceUsed(u32),
    /// Streak reset to zero.
    Broken,
}

/// What the daily check found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// No completion on record yet.
    NoHistory,
    /// Today's challenge is already done.
    CompletedToday,
    /// Last completion was yesterday.
    Continues,
    /// One day was missed and the grace period can still cover it.
    GracePending,
    /// One day was missed and the grace period covers it.
    GraceApplied,
    /// The streak was reset. `lost` is the length it had.
    Broken {
        /// Streak length before the reset.
        lost: u32,
    },
    /// The last completion is dated after today.
    ClockSkew,
}

impl StreakTransition {
    /// Stable key, used in events.
    pub fn key(self) -> &'static str {
        match self {
            Self::NoHistory => "no-history",
            Self::CompletedToday => "completed-today",
            Self::Continues => "continues",
            Self::GracePending => "grace-pending",
            Self::GraceApplied => "grace-applied",
            Self::Broken { .. } => "broken",
            Self::ClockSkew => "clock-skew",
        }
    }
}

/// Outcome of recording a completed challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCompletion {
    /// What the daily check found before the completion was applied.
    pub transition: StreakTransition,
    /// Streak length after the completion.
    pub streak: u32,
    /// Whether this completion was carried over a missed day by the grace period.
    pub grace_consumed: bool,
    /// Milestone newly reached, if any.
    pub milestone: Option<u32>,
}

/// Reward title for a streak milestone.
pub fn milestone_title(days: u32) -> &'static str {
    match days {
        7 => "Dedicated Trader",
        14 => "Profit Seeker",
        30 => "Ferengi Apprentice",
        50 => "Commerce Master",
        100 => "Grand Nagus",
        _ => "Streak Milestone",
    }
}

impl StreakRecord {
    /// Load from the store, defaulting on missing or malformed data.
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        store::load(store, keys::STREAK)
    }

    /// Persist to the store.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        store::save(store, keys::STREAK, self);
    }

    /// Coarse state.
    pub fn state(&self) -> StreakState {
        match (self.last_completed_date, self.current_streak) {
            (None, 0) => StreakState::NoHistory,
            (_, 0) => StreakState::Broken,
            (_, n) if self.grace_period_used => StreakState::GraceUsed(n),
            (_, n) => StreakState::Active(n),
        }
    }

    /// Whole days between the last completion and `today`.
    pub fn days_since_last(&self, today: NaiveDate) -> Option<i64> {
        self.last_completed_date
            .map(|last| today.signed_duration_since(last).num_days())
    }

    /// Daily freshness check. Mutates the record when the streak breaks, and
    /// under [`GracePolicy::OnDetection`] when the grace period is spent.
    pub fn refresh(&mut self, today: NaiveDate, policy: GracePolicy) -> StreakTransition {
        let transition = match self.days_since_last(today) {
            None => StreakTransition::NoHistory,
            Some(gap) if gap < 0 => {
                warn!(%today, last = ?self.last_completed_date, "last completion is in the future");
                StreakTransition::ClockSkew
            }
            Some(0) => StreakTransition::CompletedToday,
            Some(1) => StreakTransition::Continues,
            Some(2) if self.grace_applied_on == Some(today) => StreakTransition::GraceApplied,
            Some(2) if !self.grace_period_used => match policy {
                GracePolicy::OnCompletion => StreakTransition::GracePending,
                GracePolicy::OnDetection => {
                    self.spend_grace(today);
                    StreakTransition::GraceApplied
                }
            },
            Some(_) => {
                let lost = self.current_streak;
                self.longest_streak = self.longest_streak.max(self.current_streak);
                self.current_streak = 0;
                self.grace_period_used = false;
                self.grace_applied_on = None;
                if lost > 0 {
                    info!(lost, "streak broken");
                }
                StreakTransition::Broken { lost }
            }
        };
        debug!(%today, transition = transition.key(), "streak refreshed");
        transition
    }

    /// Record a completed challenge on `today`.
    ///
    /// Runs [`refresh`](Self::refresh) first, so callers need not. Fails if a
    /// challenge was already completed today or on a later date; the record
    /// is left unchanged then.
    pub fn complete(
        &mut self,
        today: NaiveDate,
        config: &DailyConfig,
    ) -> DailyResult<StreakCompletion> {
        let transition = self.refresh(today, config.grace_policy);
        let grace_consumed = match transition {
            StreakTransition::CompletedToday => return Err(DailyError::AlreadyCompleted(today)),
            StreakTransition::ClockSkew => {
                return Err(DailyError::OutOfOrder {
                    date: today,
                    last: self.last_completed_date.unwrap_or(today),
                });
            }
            StreakTransition::GracePending => {
                self.spend_grace(today);
                true
            }
            StreakTransition::GraceApplied => true,
            _ => false,
        };

        self.current_streak = self.current_streak.saturating_add(1);
        self.last_completed_date = Some(today);
        self.total_completions = self.total_completions.saturating_add(1);
        self.longest_streak = self.longest_streak.max(self.current_streak);

        let streak = self.current_streak;
        let milestone = (config.milestones.contains(&streak) && self.rewards.insert(streak))
            .then_some(streak);
        if let Some(days) = milestone {
            info!(days, title = milestone_title(days), "streak milestone reached");
        }

        Ok(StreakCompletion {
            transition,
            streak,
            grace_consumed,
            milestone,
        })
    }

    fn spend_grace(&mut self, today: NaiveDate) {
        self.grace_period_used = true;
        self.grace_applied_on = Some(today);
        info!(%today, streak = self.current_streak, "grace period used");
    }
}
