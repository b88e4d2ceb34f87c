//! Persisted achievement progress (`achievementProgress`).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use latinum_core::lenient;
use latinum_core::store::{self, Store, keys};

use crate::definition::{ACHIEVEMENTS, Achievement, find};

/// Unlocked achievements and the score they are worth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    /// Ids of unlocked achievements.
    #[serde(deserialize_with = "lenient::id_set")]
    pub unlocked_achievements: BTreeSet<String>,
    /// Ids whose unlock celebration has been shown.
    #[serde(deserialize_with = "lenient::id_set")]
    pub notification_shown: BTreeSet<String>,
    /// Sum of the rarity points of every unlocked achievement.
    #[serde(deserialize_with = "lenient::count")]
    pub total_score: u32,
    /// Fields this version does not use, kept so saving does not drop them.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl UserProgress {
    /// Load from the store. The score is re-derived from the unlocked set.
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        let mut progress: Self = store::load(store, keys::ACHIEVEMENT_PROGRESS);
        let stored = progress.total_score;
        progress.recompute_score();
        if stored != progress.total_score {
            debug!(stored, derived = progress.total_score, "achievement score re-derived");
        }
        progress
    }

    /// Persist to the store.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        store::save(store, keys::ACHIEVEMENT_PROGRESS, self);
    }

    /// Whether `id` is unlocked.
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked_achievements.contains(id)
    }

    /// Mark `achievement` unlocked and add its points. Returns `false` if it
    /// was already unlocked.
    pub fn unlock(&mut self, achievement: &Achievement) -> bool {
        if !self.unlocked_achievements.insert(achievement.id.to_string()) {
            return false;
        }
        self.total_score += achievement.points();
        true
    }

    /// Record that the celebration for `id` was shown.
    pub fn mark_shown(&mut self, id: &str) {
        self.notification_shown.insert(id.to_string());
    }

    /// Unlocked achievements whose celebration has not been shown, in table order.
    pub fn pending_celebrations(&self) -> Vec<&'static Achievement> {
        ACHIEVEMENTS
            .iter()
            .filter(|a| self.is_unlocked(a.id) && !self.notification_shown.contains(a.id))
            .collect()
    }

    /// Set the score to the sum of the known unlocked achievements' points.
    pub fn recompute_score(&mut self) {
        self.total_score = self
            .unlocked_achievements
            .iter()
            .filter_map(|id| find(id))
            .map(Achievement::points)
            .sum();
    }

    /// Known achievements unlocked.
    pub fn unlocked_count(&self) -> usize {
        ACHIEVEMENTS.iter().filter(|a| self.is_unlocked(a.id)).count()
    }

    /// Share of the table unlocked, rounded to a whole percent.
    pub fn completion_percent(&self) -> u32 {
        let total = ACHIEVEMENTS.len();
        if total == 0 {
            return 0;
        }
        let percent = (self.unlocked_count() * 100 + total / 2) / total;
        u32::try_from(percent).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::require;
    use latinum_core::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn unlock_adds_points_once() {
        let mut progress = UserProgress::default();
        let a = require("rule-explorer").unwrap();
        assert!(progress.unlock(a));
        assert!(!progress.unlock(a));
        assert_eq!(progress.total_score, 25);
    }

    #[test]
    fn load_rederives_score_and_keeps_unknown_fields() {
        let store = MemoryStore::new().with_raw(
            keys::ACHIEVEMENT_PROGRESS,
            r#"{"unlockedAchievements":["first-rule","high-scorer","retired-badge"],
                "notificationShown":["first-rule"],"totalScore":9999,"lastChecked":1704067200000}"#,
        );
        let progress = UserProgress::load(&store);
        assert_eq!(progress.total_score, 60);
        assert!(progress.is_unlocked("retired-badge"));
        assert_eq!(progress.unlocked_count(), 2);
        assert_eq!(progress.other["lastChecked"], serde_json::json!(1704067200000u64));

        let pending: Vec<_> = progress.pending_celebrations().iter().map(|a| a.id).collect();
        assert_eq!(pending, vec!["high-scorer"]);
    }

    #[test]
    fn save_round_trips_extras() {
        let mut store = MemoryStore::new().with_raw(
            keys::ACHIEVEMENT_PROGRESS,
            r#"{"unlockedAchievements":[],"lastChecked":5}"#,
        );
        let mut progress = UserProgress::load(&store);
        progress.unlock(require("first-rule").unwrap());
        progress.save(&mut store);
        let raw = store.get(keys::ACHIEVEMENT_PROGRESS).unwrap();
        assert!(raw.contains("\"lastChecked\":5"));
        assert!(raw.contains("\"totalScore\":10"));
    }

    #[test]
    fn completion_percent_rounds() {
        let mut progress = UserProgress::default();
        assert_eq!(progress.completion_percent(), 0);
        progress.unlock(require("first-rule").unwrap());
        // 1 of 14 is 7.14%
        assert_eq!(progress.completion_percent(), 7);
        for a in ACHIEVEMENTS {
            progress.unlock(a);
        }
        assert_eq!(progress.completion_percent(), 100);
    }

    proptest! {
        #[test]
        fn score_matches_unlocked_set(picks in proptest::collection::vec(0usize..14, 0..30)) {
            let mut progress = UserProgress::default();
            for i in picks {
                progress.unlock(&ACHIEVEMENTS[i]);
            }
            let expected: u32 = ACHIEVEMENTS
                .iter()
                .filter(|a| progress.is_unlocked(a.id))
                .map(|a| a.points())
                .sum();
            prop_assert_eq!(progress.total_score, expected);
        }
    }
}
