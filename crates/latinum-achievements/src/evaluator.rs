//! Deciding which achievements unlock.

use std::collections::BTreeSet;

use tracing::debug;

use latinum_core::StatsSnapshot;

use crate::definition::{ACHIEVEMENTS, Achievement};

/// Achievements in `table` newly satisfied by `snapshot`.
///
/// Runs two passes. The first checks every ordinary achievement against its
/// statistic. The second sets the mastery flag when all ordinary achievements
/// are unlocked (counting those from the first pass) and checks the mastery
/// achievements. Already-unlocked ids are never returned.
pub fn evaluate_in<'t>(
    table: &'t [Achievement],
    snapshot: &StatsSnapshot,
    unlocked: &BTreeSet<String>,
) -> Vec<&'t Achievement> {
    let mut newly: Vec<&Achievement> = table
        .iter()
        .filter(|a| !a.is_mastery() && !unlocked.contains(a.id))
        .filter(|a| snapshot.get(a.property) >= a.requirement)
        .collect();

    let mastered = table
        .iter()
        .filter(|a| !a.is_mastery())
        .all(|a| unlocked.contains(a.id) || newly.iter().any(|n| n.id == a.id));
    let with_mastery = snapshot.with_mastery(mastered);
    newly.extend(
        table
            .iter()
            .filter(|a| a.is_mastery() && !unlocked.contains(a.id))
            .filter(|a| with_mastery.get(a.property) >= a.requirement),
    );

    debug!(count = newly.len(), mastered, "achievements evaluated");
    newly
}

/// [`evaluate_in`] over the built-in table.
pub fn evaluate(snapshot: &StatsSnapshot, unlocked: &BTreeSet<String>) -> Vec<&'static Achievement> {
    evaluate_in(ACHIEVEMENTS, snapshot, unlocked)
}

/// How close `snapshot` is to unlocking `achievement`, 0 to 100.
pub fn progress_percent(achievement: &Achievement, snapshot: &StatsSnapshot) -> u32 {
    if achievement.requirement == 0 {
        return 100;
    }
    let value = u64::from(snapshot.get(achievement.property));
    let percent = value * 100 / u64::from(achievement.requirement);
    u32::try_from(percent.min(100)).unwrap_or(100)
}
