//! Checking achievements against the store.

use tracing::info;

use latinum_core::{EventSink, OracleEvent, StatsSnapshot, Store};

use crate::definition::{ACHIEVEMENTS, Achievement, AchievementCategory};
use crate::evaluator::{evaluate, progress_percent};
use crate::progress::UserProgress;

/// One row of the progress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementStatus {
    /// The achievement.
    pub achievement: &'static Achievement,
    /// Whether it is unlocked.
    pub unlocked: bool,
    /// Current value of its statistic.
    pub value: u32,
    /// Progress toward it, 0 to 100. Always 100 once unlocked.
    pub percent: u32,
}

/// Loads progress, runs the evaluator and records unlocks.
#[derive(Debug, Clone, Default)]
pub struct AchievementTracker {
    progress: UserProgress,
}

impl AchievementTracker {
    /// Load progress from the store.
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        Self {
            progress: UserProgress::load(store),
        }
    }

    /// Current progress.
    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    /// Mutable progress, for marking celebrations shown.
    pub fn progress_mut(&mut self) -> &mut UserProgress {
        &mut self.progress
    }

    /// Evaluate against the store's current statistics and record any
    /// unlocks. Progress is saved only when something unlocked.
    pub fn check<S: Store + ?Sized>(
        &mut self,
        store: &mut S,
        sink: &mut dyn EventSink,
    ) -> Vec<&'static Achievement> {
        let snapshot = StatsSnapshot::collect(store);
        let newly = evaluate(&snapshot, &self.progress.unlocked_achievements);
        for achievement in &newly {
            self.progress.unlock(achievement);
            info!(
                id = achievement.id,
                rarity = %achievement.rarity,
                score = self.progress.total_score,
                "achievement unlocked"
            );
            sink.emit(OracleEvent::AchievementUnlocked {
                id: achievement.id.to_string(),
                name: achievement.name.to_string(),
                rarity: achievement.rarity.label().to_string(),
                points: achievement.points(),
            });
        }
        if !newly.is_empty() {
            self.progress.save(store);
        }
        newly
    }

    /// Persist progress, e.g. after marking celebrations shown.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        self.progress.save(store);
    }

    /// Status of every achievement, optionally limited to one category.
    pub fn report(
        &self,
        snapshot: &StatsSnapshot,
        category: Option<AchievementCategory>,
    ) -> Vec<AchievementStatus> {
        let mastered = ACHIEVEMENTS
            .iter()
            .filter(|a| !a.is_mastery())
            .all(|a| self.progress.is_unlocked(a.id));
        let snapshot = snapshot.with_mastery(mastered);

        ACHIEVEMENTS
            .iter()
            .filter(|a| category.is_none_or(|c| a.category == c))
            .map(|achievement| {
                let unlocked = self.progress.is_unlocked(achievement.id);
                AchievementStatus {
                    achievement,
                    unlocked,
                    value: snapshot.get(achievement.property),
                    percent: if unlocked {
                        100
                    } else {
                        progress_percent(achievement, &snapshot)
                    },
                }
            })
            .collect()
    }
}
