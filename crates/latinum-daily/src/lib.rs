//! Daily challenges and day streaks for Latinum.
//!
//! [`generate_challenge`] builds the same challenge for a given date on every
//! run. [`StreakRecord`] tracks consecutive days with a one-day grace period,
//! and [`DailyEngine`] ties both to a [`latinum_core::Store`] together with
//! the [`ChallengeHistory`] log.

pub mod challenge;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod history;
pub mod prng;
pub mod run;
pub mod streak;

pub use challenge::{Challenge, ChallengeKind, OPTION_COUNT, Question};
pub use config::{DEFAULT_MILESTONES, DailyConfig, GracePolicy};
pub use engine::{DailyEngine, DailyOutlook};
pub use error::{DailyError, DailyResult};
pub use generator::{fallback_challenge, generate_challenge};
pub use history::{ChallengeHistory, ChallengeResult};
pub use run::{AnswerOutcome, ChallengeRun, SECONDS_PER_BONUS_POINT};
pub use streak::{
    StreakCompletion, StreakRecord, StreakState, StreakTransition, milestone_title,
};
