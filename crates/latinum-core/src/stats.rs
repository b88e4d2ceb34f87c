//! Usage counters and the snapshot the achievement evaluator reads.
//!
//! Counters live under several independent keys, each owned by a different
//! part of the application. [`StatsSnapshot::collect`] reassembles them on
//! demand; nothing caches a snapshot between checks.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::lenient;
use crate::store::{self, Store, keys};

/// Number of selectable themes. `themesUsed` never exceeds this.
pub const THEME_COUNT: u32 = 4;

/// Rule views, favorites, shares and other page counters (`ferengiStats`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    /// Total rule consultations, repeats included.
    #[serde(deserialize_with = "lenient::count")]
    pub total_views: u32,
    /// Distinct rule numbers ever viewed.
    #[serde(deserialize_with = "lenient::number_set")]
    pub rules_viewed: BTreeSet<u32>,
    /// Favorited rule numbers, in the order they were added.
    #[serde(deserialize_with = "lenient::number_list")]
    pub favorites: Vec<u32>,
    /// Times a rule was shared.
    #[serde(deserialize_with = "lenient::count")]
    pub shares: u32,
    /// Easter eggs discovered.
    #[serde(deserialize_with = "lenient::count")]
    pub easter_eggs: u32,
    /// Distinct themes tried, capped at [`THEME_COUNT`].
    #[serde(deserialize_with = "lenient::count")]
    pub themes_used: u32,
    /// Fields written by other owners of this key, kept as-is.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl StatsRecord {
    /// Load from the store, defaulting on missing or malformed data.
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        let mut record: Self = store::load(store, keys::STATS);
        record.themes_used = record.themes_used.min(THEME_COUNT);
        record
    }

    /// Persist to the store.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        store::save(store, keys::STATS, self);
    }

    /// Load, apply `f`, persist, and return whatever `f` returned.
    pub fn update<S, R>(store: &mut S, f: impl FnOnce(&mut Self) -> R) -> R
    where
        S: Store + ?Sized,
    {
        let mut record = Self::load(store);
        let out = f(&mut record);
        record.save(store);
        out
    }

    /// Record a view of rule `number`.
    pub fn view_rule(&mut self, number: u32) {
        self.total_views = self.total_views.saturating_add(1);
        self.rules_viewed.insert(number);
    }

    /// Favorite rule `number`. Returns false if it already was one.
    pub fn add_favorite(&mut self, number: u32) -> bool {
        if self.favorites.contains(&number) {
            return false;
        }
        self.favorites.push(number);
        true
    }

    /// Record a share.
    pub fn add_share(&mut self) {
        self.shares = self.shares.saturating_add(1);
    }

    /// Record a discovered easter egg.
    pub fn add_easter_egg(&mut self) {
        self.easter_eggs = self.easter_eggs.saturating_add(1);
    }

    /// Record a theme switch; the count saturates at [`THEME_COUNT`].
    pub fn add_theme_used(&mut self) {
        self.themes_used = (self.themes_used + 1).min(THEME_COUNT);
    }
}

/// Mini-game counters (`gamesPlayed`, `gameHighScores`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    /// Games started.
    pub games_played: u32,
    /// Best score per game name.
    pub high_scores: BTreeMap<String, u32>,
}

impl GameRecord {
    /// Load both keys from the store.
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        let played: Value = store::load(store, keys::GAMES_PLAYED);
        let scores: Value = store::load(store, keys::GAME_HIGH_SCORES);
        Self {
            games_played: lenient::count(played).unwrap_or(0),
            high_scores: lenient::score_map(scores).unwrap_or_default(),
        }
    }

    /// Persist both keys.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S) {
        store::save(store, keys::GAMES_PLAYED, &self.games_played);
        store::save(store, keys::GAME_HIGH_SCORES, &self.high_scores);
    }

    /// Record that a game was started.
    pub fn record_game_played(&mut self) {
        self.games_played = self.games_played.saturating_add(1);
    }

    /// Record a finished game's score. Returns true if it beat the previous
    /// best for that game.
    pub fn record_score(&mut self, game: &str, score: u32) -> bool {
        let best = self.high_scores.get(game).copied().unwrap_or(0);
        if score > best {
            self.high_scores.insert(game.to_string(), score);
            true
        } else {
            false
        }
    }
}

/// A statistic an achievement can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    /// Distinct rules viewed.
    RulesViewed,
    /// Mini-games started.
    GamesPlayed,
    /// Favorited rules.
    Favorites,
    /// Shares.
    Shares,
    /// Longest daily-challenge streak.
    MaxStreak,
    /// Games with a recorded high score.
    HighScores,
    /// Easter eggs found.
    EasterEggs,
    /// Themes tried.
    ThemesUsed,
    /// 1 once every other achievement is unlocked.
    GrandNagusUnlocked,
}

impl StatKey {
    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::RulesViewed => "rules viewed",
            Self::GamesPlayed => "games played",
            Self::Favorites => "favorites",
            Self::Shares => "shares",
            Self::MaxStreak => "longest streak",
            Self::HighScores => "high scores",
            Self::EasterEggs => "easter eggs",
            Self::ThemesUsed => "themes used",
            Self::GrandNagusUnlocked => "mastery",
        }
    }
}

/// A point-in-time view of every counter an achievement can depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Distinct rules viewed.
    pub rules_viewed: u32,
    /// Mini-games started.
    pub games_played: u32,
    /// Favorited rules.
    pub favorites: u32,
    /// Shares.
    pub shares: u32,
    /// Longest daily-challenge streak.
    pub max_streak: u32,
    /// Games with a recorded high score.
    pub high_scores: u32,
    /// Easter eggs found.
    pub easter_eggs: u32,
    /// Themes tried (at most [`THEME_COUNT`]).
    pub themes_used: u32,
    /// 1 once every other achievement is unlocked, else 0.
    pub grand_nagus_unlocked: u32,
}

impl StatsSnapshot {
    /// Assemble a snapshot from the persisted counters.
    pub fn collect<S: Store + ?Sized>(store: &S) -> Self {
        let stats = StatsRecord::load(store);
        let games = GameRecord::load(store);
        let streak: Value = store::load(store, keys::STREAK);
        let max_streak = streak
            .get("longestStreak")
            .and_then(lenient::count_value)
            .unwrap_or(0);

        let snapshot = Self {
            rules_viewed: len_u32(stats.rules_viewed.len()),
            games_played: games.games_played,
            favorites: len_u32(stats.favorites.len()),
            shares: stats.shares,
            max_streak,
            high_scores: len_u32(games.high_scores.len()),
            easter_eggs: stats.easter_eggs,
            themes_used: stats.themes_used.min(THEME_COUNT),
            grand_nagus_unlocked: 0,
        };
        debug!(?snapshot, "stats snapshot collected");
        snapshot
    }

    /// Value of one statistic.
    pub fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::RulesViewed => self.rules_viewed,
            StatKey::GamesPlayed => self.games_played,
            StatKey::Favorites => self.favorites,
            StatKey::Shares => self.shares,
            StatKey::MaxStreak => self.max_streak,
            StatKey::HighScores => self.high_scores,
            StatKey::EasterEggs => self.easter_eggs,
            StatKey::ThemesUsed => self.themes_used,
            StatKey::GrandNagusUnlocked => self.grand_nagus_unlocked,
        }
    }

    /// Set the mastery flag.
    pub fn with_mastery(mut self, mastered: bool) -> Self {
        self.grand_nagus_unlocked = u32::from(mastered);
        self
    }
}

fn len_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
