//! Error types for the daily crate.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for daily challenge operations.
pub type DailyResult<T> = Result<T, DailyError>;

/// Errors raised while playing or recording a daily challenge.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DailyError {
    /// A challenge was already completed on this date.
    #[error("daily challenge for {0} already completed")]
    AlreadyCompleted(NaiveDate),

    /// The date is before the last completed challenge.
    #[error("cannot complete the challenge for {date}: a later challenge ({last}) is already completed")]
    OutOfOrder {
        /// The date being completed.
        date: NaiveDate,
        /// The last completed date.
        last: NaiveDate,
    },

    /// An answer was given after the last question.
    #[error("challenge run is already finished")]
    RunFinished,

    /// The chosen option does not exist.
    #[error("option {option} out of range (question has {count} options)")]
    InvalidOption {
        /// The option index given.
        option: usize,
        /// Options the question offers.
        count: usize,
    },
}
