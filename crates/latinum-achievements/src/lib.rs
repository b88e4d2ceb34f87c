//! Achievements for Latinum.
//!
//! A fixed table of [`Achievement`]s, each unlocked when one statistic of a
//! [`latinum_core::StatsSnapshot`] reaches its threshold. [`evaluate`] is the
//! pure decision; [`AchievementTracker`] applies it to a store, keeps the
//! score in step with the unlocked set, and emits unlock events.
//! [`CelebrationQueue`] paces the announcements.

pub mod celebration;
pub mod definition;
pub mod error;
pub mod evaluator;
pub mod progress;
pub mod tracker;

pub use celebration::{CelebrationConfig, CelebrationQueue};
pub use definition::{
    ACHIEVEMENTS, Achievement, AchievementCategory, MASTERY_ID, Rarity, Reward, find, max_score,
    require,
};
pub use error::{AchievementError, AchievementResult};
pub use evaluator::{evaluate, evaluate_in, progress_percent};
pub use progress::UserProgress;
pub use tracker::{AchievementStatus, AchievementTracker};
