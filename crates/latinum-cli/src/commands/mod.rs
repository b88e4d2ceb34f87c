pub mod achievements;
pub mod daily;
pub mod game;
pub mod history;
pub mod rule;
pub mod stats;
pub mod streak;
pub mod track;

use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;
use tracing::debug;

use latinum_achievements::{AchievementTracker, CelebrationQueue};
use latinum_core::{EventSink, FileStore, OracleEvent, RuleCorpus};
use latinum_daily::{DailyConfig, GracePolicy};

/// Settings shared by every command.
pub struct Context {
    pub store: PathBuf,
    pub corpus: Option<PathBuf>,
    pub date: NaiveDate,
    pub grace: GracePolicy,
}

impl Context {
    pub fn open_store(&self) -> Result<FileStore, String> {
        FileStore::open(&self.store)
            .map_err(|e| format!("cannot open store {}: {e}", self.store.display()))
    }

    pub fn load_corpus(&self) -> Result<RuleCorpus, String> {
        match &self.corpus {
            Some(path) => RuleCorpus::from_file(path)
                .map_err(|e| format!("cannot load corpus {}: {e}", path.display())),
            None => Ok(RuleCorpus::builtin()),
        }
    }

    pub fn daily_config(&self) -> DailyConfig {
        DailyConfig::default().with_grace_policy(self.grace)
    }
}

/// Prints the events a player should see; the rest go to the debug log.
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: OracleEvent) {
        match event {
            OracleEvent::StreakMilestone { days, title } => {
                println!(
                    "  {} {days}-day streak! Title earned: {}",
                    "MILESTONE".yellow().bold(),
                    title.bold()
                );
            }
            other => debug!(event = ?other, "event"),
        }
    }
}

/// Re-run the achievement check and announce anything not yet celebrated.
pub fn check_achievements(store: &mut FileStore) {
    let mut tracker = AchievementTracker::load(store);
    tracker.check(store, &mut ConsoleSink);

    let mut queue = CelebrationQueue::default();
    queue.push(tracker.progress().pending_celebrations());
    if queue.is_idle() {
        return;
    }
    println!();
    for achievement in queue.drain() {
        println!(
            "  {} {} {} ({}, +{} pts)",
            "UNLOCKED".green().bold(),
            achievement.icon,
            achievement.name.bold(),
            achievement.rarity,
            achievement.points()
        );
        println!("    {}", achievement.description.dimmed());
        println!("    {}", achievement.reward.text());
        tracker.progress_mut().mark_shown(achievement.id);
    }
    tracker.save(store);
}
