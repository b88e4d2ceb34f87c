//! Error types for the achievements crate.

use thiserror::Error;

/// Result type for achievement lookups.
pub type AchievementResult<T> = Result<T, AchievementError>;

/// Errors raised when resolving achievements by name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AchievementError {
    /// No achievement has this id.
    #[error("unknown achievement: {0}")]
    UnknownAchievement(String),

    /// No achievement category has this name.
    #[error("unknown achievement category: {0} (expected one of: discovery, gaming, collection, streak, special, ultimate)")]
    UnknownCategory(String),
}
