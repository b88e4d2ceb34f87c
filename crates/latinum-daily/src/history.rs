//! The append-only log of finished daily challenges (`challengeHistory`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use latinum_core::lenient;
use latinum_core::store::{self, Store, keys};

use crate::challenge::ChallengeKind;

/// One finished challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResult {
    /// Date the challenge belongs to.
    #[serde(deserialize_with = "lenient::date")]
    pub date: NaiveDate,
    /// Challenge kind.
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    /// Final score including time bonus.
    #[serde(default, deserialize_with = "lenient::count")]
    pub score: u32,
    /// Number of questions in the challenge.
    #[serde(default, alias = "questionCount", deserialize_with = "lenient::count")]
    pub questions: u32,
    /// Seconds left on the clock at the end.
    #[serde(default, deserialize_with = "lenient::count")]
    pub time_left: u32,
    /// Whether every question was answered before time ran out.
    #[serde(default = "answered_all", deserialize_with = "lenient::flag")]
    pub completed: bool,
}

fn answered_all() -> bool {
    true
}

/// Ordered challenge history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeHistory {
    entries: Vec<ChallengeResult>,
}

impl ChallengeHistory {
    /// Load from the store. Entries that cannot be decoded are skipped.
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        let entries = match store::load::<Value, _>(store, keys::CHALLENGE_HISTORY) {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .filter_map(|(i, item)| match serde_json::from_value(item) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!(index = i, error = %e, "skipping malformed history entry");
                        None
                    }
                })
                .collect(),
            Value::Null => Vec::new(),
            other => {
                warn!(found = %kind_of(&other), "challenge history is not a list, starting fresh");
                Vec::new()
            }
        };
        Self { entries }
    }

    /// Persist to the store.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        store::save(store, keys::CHALLENGE_HISTORY, &self.entries);
    }

    /// Append a result.
    pub fn append(&mut self, result: ChallengeResult) {
        self.entries.push(result);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[ChallengeResult] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for a date, if one was recorded.
    pub fn for_date(&self, date: NaiveDate) -> Option<&ChallengeResult> {
        self.entries.iter().rev().find(|e| e.date == date)
    }

    /// Highest-scoring entry. Ties go to the earliest.
    pub fn best(&self) -> Option<&ChallengeResult> {
        self.entries
            .iter()
            .rev()
            .max_by_key(|e| e.score)
    }

    /// Mean score over all entries.
    pub fn average_score(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: u64 = self.entries.iter().map(|e| u64::from(e.score)).sum();
        Some(total as f64 / self.entries.len() as f64)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
