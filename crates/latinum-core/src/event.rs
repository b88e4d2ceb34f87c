//! Domain events emitted by the engines.
//!
//! The engines never render anything. They report what happened through an
//! [`EventSink`], and a presentation layer decides how to show it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum OracleEvent {
    /// A rule was drawn from the oracle.
    RuleConsulted {
        /// Rule number.
        number: u32,
    },
    /// The daily challenge for a date was generated.
    ChallengeGenerated {
        /// Calendar date of the challenge.
        date: NaiveDate,
        /// Challenge kind label.
        kind: String,
        /// Number of questions.
        questions: usize,
    },
    /// A daily challenge was finished and recorded.
    ChallengeCompleted {
        /// Calendar date of the challenge.
        date: NaiveDate,
        /// Final score including time bonus.
        score: u32,
    },
    /// The streak record changed.
    StreakUpdated {
        /// Current streak length in days.
        current: u32,
        /// Longest streak ever reached.
        longest: u32,
        /// Short description of the transition.
        transition: String,
    },
    /// A streak milestone reward was granted.
    StreakMilestone {
        /// Streak length that triggered the reward.
        days: u32,
        /// Reward title.
        title: String,
    },
    /// An achievement was unlocked.
    AchievementUnlocked {
        /// Achievement id.
        id: String,
        /// Display name.
        name: String,
        /// Rarity label.
        rarity: String,
        /// Points added to the total score.
        points: u32,
    },
}

/// Receiver of domain events.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: OracleEvent);
}

impl EventSink for Vec<OracleEvent> {
    fn emit(&mut self, event: OracleEvent) {
        self.push(event);
    }
}

/// A sink that drops every event.
impl EventSink for () {
    fn emit(&mut self, _event: OracleEvent) {}
}
