//! Integration tests for the `latinum` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ALL_ZERO: &str = "0,0,0,0,0,0,0,0";

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("store.json")
}

fn latinum(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("latinum").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args(["--store", store.to_str().unwrap()]);
    cmd
}

fn read_store(store: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(store).unwrap()).unwrap()
}

/// Decode the JSON blob stored under `key`.
fn stored(store: &Path, key: &str) -> serde_json::Value {
    let outer = read_store(store);
    serde_json::from_str(outer[key].as_str().unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// rule
// ---------------------------------------------------------------------------

#[test]
fn rule_by_number() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .args(["rule", "--number", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Rule of Acquisition #1")
                .and(predicate::str::contains("never give it back")),
        );
}

#[test]
fn first_rule_view_unlocks_achievement() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .args(["rule", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ferengi Apprentice"));

    let stats = stored(&store, "ferengiStats");
    assert_eq!(stats["totalViews"], 1);
    let progress = stored(&store, "achievementProgress");
    assert_eq!(progress["totalScore"], 10);

    // Already celebrated: not announced again.
    latinum(&store)
        .args(["rule", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UNLOCKED").not());
}

#[test]
fn unknown_rule_number_fails() {
    let dir = TempDir::new().unwrap();
    latinum(&store_path(&dir))
        .args(["rule", "--number", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the corpus"));
}

#[test]
fn custom_corpus_is_used() {
    let dir = TempDir::new().unwrap();
    let corpus = dir.path().join("rules.json");
    fs::write(
        &corpus,
        r#"[{"number": 62, "text": "The riskier the road, the greater the profit.", "category": "business"}]"#,
    )
    .unwrap();
    latinum(&store_path(&dir))
        .args(["--corpus", corpus.to_str().unwrap(), "rule"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#62").and(predicate::str::contains("riskier")));
}

// ---------------------------------------------------------------------------
// daily
// ---------------------------------------------------------------------------

#[test]
fn daily_shows_questions_without_answers() {
    let dir = TempDir::new().unwrap();
    latinum(&store_path(&dir))
        .args(["--date", "2024-01-01", "daily"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0]").and(predicate::str::contains("--answers")));
}

#[test]
fn daily_challenge_is_stable_for_a_date() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    let first = latinum(&store)
        .args(["--date", "2024-01-01", "daily"])
        .output()
        .unwrap();
    let second = latinum(&store)
        .args(["--date", "2024-01-01", "daily"])
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn daily_completion_starts_streak() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .args(["--date", "2024-01-01", "daily", "--answers", ALL_ZERO, "--time-left", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 1 day(s)"));

    let streak = stored(&store, "ferengiStreak");
    assert_eq!(streak["currentStreak"], 1);
    assert_eq!(streak["lastCompletedDate"], "2024-01-01");
    let history = stored(&store, "challengeHistory");
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[test]
fn daily_twice_same_day_fails() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .args(["--date", "2024-01-01", "daily", "--answers", ALL_ZERO])
        .assert()
        .success();
    latinum(&store)
        .args(["--date", "2024-01-01", "daily", "--answers", ALL_ZERO])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already completed"));
    latinum(&store)
        .args(["--date", "2024-01-01", "daily"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("already completed with a score of")
                .and(predicate::str::contains("Streak: 1 day(s)")),
        );
}

#[test]
fn daily_for_an_earlier_date_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .args(["--date", "2024-01-05", "daily", "--answers", ALL_ZERO])
        .assert()
        .success();
    latinum(&store)
        .args(["--date", "2024-01-04", "daily", "--answers", ALL_ZERO])
        .assert()
        .failure()
        .stderr(predicate::str::contains("a later challenge (2024-01-05) is already completed"));
    latinum(&store)
        .args(["--date", "2024-01-04", "daily"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("later challenge"));
    latinum(&store)
        .args(["--date", "2024-01-05", "daily", "--answers", ALL_ZERO])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already completed"));

    let streak = stored(&store, "ferengiStreak");
    assert_eq!(streak["currentStreak"], 1);
    assert_eq!(streak["totalCompletions"], 1);
    assert_eq!(streak["lastCompletedDate"], "2024-01-05");
    let history = stored(&store, "challengeHistory");
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[test]
fn daily_rejects_bad_option() {
    let dir = TempDir::new().unwrap();
    latinum(&store_path(&dir))
        .args(["--date", "2024-01-01", "daily", "--answers", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn grace_period_bridges_one_missed_day() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    for date in ["2024-01-01", "2024-01-02"] {
        latinum(&store)
            .args(["--date", date, "daily", "--answers", ALL_ZERO])
            .assert()
            .success();
    }
    latinum(&store)
        .args(["--date", "2024-01-04", "daily", "--answers", ALL_ZERO])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Streak: 3 day(s)")
                .and(predicate::str::contains("Grace period used")),
        );
}

#[test]
fn three_day_streak_unlocks_daily_devotee() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    for date in ["2024-03-01", "2024-03-02", "2024-03-03"] {
        latinum(&store)
            .args(["--date", date, "daily", "--answers", ALL_ZERO])
            .assert()
            .success();
    }
    let progress = stored(&store, "achievementProgress");
    let unlocked = progress["unlockedAchievements"].as_array().unwrap();
    assert!(unlocked.iter().any(|id| id == "streak-starter"));
}

// ---------------------------------------------------------------------------
// streak / history
// ---------------------------------------------------------------------------

#[test]
fn streak_on_fresh_store() {
    let dir = TempDir::new().unwrap();
    latinum(&store_path(&dir))
        .arg("streak")
        .assert()
        .success()
        .stdout(predicate::str::contains("no challenges yet").and(predicate::str::contains("never")));
}

#[test]
fn streak_preview_does_not_save() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .args(["--date", "2024-01-01", "daily", "--answers", ALL_ZERO])
        .assert()
        .success();
    latinum(&store)
        .args(["--date", "2024-02-01", "streak"])
        .assert()
        .success()
        .stdout(predicate::str::contains("broken"));
    assert_eq!(stored(&store, "ferengiStreak")["currentStreak"], 1);
}

#[test]
fn history_lists_results() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No challenges completed yet"));
    latinum(&store)
        .args(["--date", "2024-01-01", "daily", "--answers", ALL_ZERO])
        .assert()
        .success();
    latinum(&store)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01").and(predicate::str::contains("1 challenges")));
}

// ---------------------------------------------------------------------------
// achievements / stats / tracking
// ---------------------------------------------------------------------------

#[test]
fn achievements_table_and_filter() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .arg("achievements")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grand Nagus").and(predicate::str::contains("0/14 unlocked")));
    latinum(&store)
        .args(["achievements", "--category", "streak"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Streak Champion")
                .and(predicate::str::contains("Rule Explorer").not()),
        );
}

#[test]
fn achievements_unknown_category_fails() {
    let dir = TempDir::new().unwrap();
    latinum(&store_path(&dir))
        .args(["achievements", "--category", "hidden"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown achievement category"));
}

#[test]
fn favorites_are_deduplicated() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .args(["favorite", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added to favorites"));
    latinum(&store)
        .args(["favorite", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already a favorite"));
    assert_eq!(stored(&store, "ferengiStats")["favorites"], serde_json::json!([1]));
}

#[test]
fn themes_are_capped_and_unlock_style_master() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    for _ in 0..3 {
        latinum(&store).arg("theme").assert().success();
    }
    latinum(&store)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Style Master"));
    latinum(&store).arg("theme").assert().success();
    assert_eq!(stored(&store, "ferengiStats")["themesUsed"], 4);
    latinum(&store)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("4/4"));
}

#[test]
fn share_and_egg_are_counted() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store).arg("share").assert().success();
    latinum(&store)
        .arg("egg")
        .assert()
        .success()
        .stdout(predicate::str::contains("Secret Seeker"));
    let stats = stored(&store, "ferengiStats");
    assert_eq!(stats["shares"], 1);
    assert_eq!(stats["easterEggs"], 1);
}

#[test]
fn game_scores_track_high_scores() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    latinum(&store)
        .args(["game", "trivia", "--score", "120"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("New high score")
                .and(predicate::str::contains("High Profit Scorer")),
        );
    latinum(&store)
        .args(["game", "trivia", "--score", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("best: 120"));
    assert_eq!(stored(&store, "gamesPlayed"), 2);
    assert_eq!(stored(&store, "gameHighScores")["trivia"], 120);
}

#[test]
fn corrupt_store_values_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    fs::write(
        &store,
        r#"{"ferengiStats": "{not json", "ferengiStreak": "{\"currentStreak\": -4, \"rewards\": {}}"}"#,
    )
    .unwrap();
    latinum(&store)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("rules viewed"));
    latinum(&store).arg("streak").assert().success();
}
