//! The achievement table.
//!
//! Every achievement compares one [`StatKey`] against a threshold. The table
//! is fixed at compile time; progress is kept separately in
//! [`UserProgress`](crate::UserProgress).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use latinum_core::StatKey;

use crate::error::{AchievementError, AchievementResult};

/// How rare an achievement is. Determines its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// 10 points.
    Common,
    /// 25 points.
    Uncommon,
    /// 50 points.
    Rare,
    /// 100 points.
    Epic,
    /// 250 points.
    Legendary,
    /// 500 points.
    Mythic,
}

impl Rarity {
    /// Score awarded when an achievement of this rarity unlocks.
    pub fn points(self) -> u32 {
        match self {
            Self::Common => 10,
            Self::Uncommon => 25,
            Self::Rare => 50,
            Self::Epic => 100,
            Self::Legendary => 250,
            Self::Mythic => 500,
        }
    }

    /// Lowercase name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Mythic => "mythic",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What an unlock celebration announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reward {
    /// Profit.
    Profit,
    /// Gold-pressed latinum.
    Latinum,
    /// Wisdom.
    Wisdom,
    /// A special celebration.
    Celebration,
    /// Grand Nagus powers.
    GrandNagus,
    /// Ultimate mastery.
    Ultimate,
}

impl Reward {
    /// Celebration text.
    pub fn text(self) -> &'static str {
        match self {
            Self::Profit => "💰 Profit gained!",
            Self::Latinum => "✨ Gold-pressed latinum earned!",
            Self::Wisdom => "🧠 Wisdom increases!",
            Self::Celebration => "🎉 Special celebration unlocked!",
            Self::GrandNagus => "👑 Grand Nagus powers activated!",
            Self::Ultimate => "🌟 Ultimate mastery achieved!",
        }
    }
}

/// Achievement grouping used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    /// Viewing rules.
    Discovery,
    /// Playing mini-games.
    Gaming,
    /// Favorites and shares.
    Collection,
    /// Daily challenge streaks.
    Streak,
    /// Easter eggs and themes.
    Special,
    /// Mastery of everything else.
    Ultimate,
}

impl AchievementCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 6] = [
        Self::Discovery,
        Self::Gaming,
        Self::Collection,
        Self::Streak,
        Self::Special,
        Self::Ultimate,
    ];

    /// Lowercase name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Gaming => "gaming",
            Self::Collection => "collection",
            Self::Streak => "streak",
            Self::Special => "special",
            Self::Ultimate => "ultimate",
        }
    }
}

impl fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AchievementCategory {
    type Err = AchievementError;

    fn from_str(s: &str) -> AchievementResult<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == wanted)
            .ok_or_else(|| AchievementError::UnknownCategory(s.to_string()))
    }
}

/// One achievement definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    /// Stable id, as stored in progress.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// What it takes.
    pub description: &'static str,
    /// Emoji shown with it.
    pub icon: &'static str,
    /// Filter group.
    pub category: AchievementCategory,
    /// Threshold the statistic must reach.
    pub requirement: u32,
    /// Statistic compared against the threshold.
    pub property: StatKey,
    /// Rarity, which sets the score.
    pub rarity: Rarity,
    /// Celebration reward.
    pub reward: Reward,
}

impl Achievement {
    /// Whether this is satisfied by unlocking every other achievement.
    pub fn is_mastery(&self) -> bool {
        self.property == StatKey::GrandNagusUnlocked
    }

    /// Score awarded on unlock.
    pub fn points(&self) -> u32 {
        self.rarity.points()
    }
}

/// Id of the mastery achievement.
pub const MASTERY_ID: &str = "grand-nagus";

macro_rules! achievement {
    ($id:literal, $name:literal, $desc:literal, $icon:literal, $cat:ident, $req:literal, $prop:ident, $rarity:ident, $reward:ident) => {
        Achievement {
            id: $id,
            name: $name,
            description: $desc,
            icon: $icon,
            category: AchievementCategory::$cat,
            requirement: $req,
            property: StatKey::$prop,
            rarity: Rarity::$rarity,
            reward: Reward::$reward,
        }
    };
}

/// Every achievement, in display order.
pub const ACHIEVEMENTS: &[Achievement] = &[
    // Discovery
    achievement!("first-rule", "Ferengi Apprentice", "Consult your first Rule of Acquisition", "🌟", Discovery, 1, RulesViewed, Common, Profit),
    achievement!("rule-explorer", "Rule Explorer", "View 25 different Rules of Acquisition", "🧭", Discovery, 25, RulesViewed, Uncommon, Latinum),
    achievement!("rule-scholar", "Rule Scholar", "Study 100 Rules of Acquisition", "📚", Discovery, 100, RulesViewed, Rare, Wisdom),
    achievement!("rule-master", "Rule Master", "Discover all 286 Rules of Acquisition", "👑", Discovery, 286, RulesViewed, Legendary, GrandNagus),
    // Gaming
    achievement!("game-starter", "Profit Trainee", "Play your first mini-game", "🎮", Gaming, 1, GamesPlayed, Common, Profit),
    achievement!("game-enthusiast", "Profit Enthusiast", "Play 10 mini-games", "🎯", Gaming, 10, GamesPlayed, Uncommon, Latinum),
    achievement!("high-scorer", "High Profit Scorer", "Achieve a high score in any game", "🏆", Gaming, 1, HighScores, Rare, Celebration),
    // Collection
    achievement!("favorite-collector", "Rule Collector", "Save 10 favorite rules", "💖", Collection, 10, Favorites, Uncommon, Latinum),
    achievement!("sharing-master", "Wisdom Spreader", "Share 5 rules with others", "🌍", Collection, 5, Shares, Rare, Wisdom),
    // Streak
    achievement!("streak-starter", "Daily Devotee", "Complete a 3-day challenge streak", "🔥", Streak, 3, MaxStreak, Common, Profit),
    achievement!("streak-champion", "Streak Champion", "Achieve a 30-day challenge streak", "⚡", Streak, 30, MaxStreak, Legendary, GrandNagus),
    // Special
    achievement!("easter-egg-hunter", "Secret Seeker", "Discover a hidden easter egg", "🥚", Special, 1, EasterEggs, Rare, Celebration),
    achievement!("theme-explorer", "Style Master", "Try all available themes", "🎨", Special, 4, ThemesUsed, Uncommon, Latinum),
    // Ultimate
    achievement!("grand-nagus", "Grand Nagus", "Achieve mastery in all areas of the Oracle", "👑✨", Ultimate, 1, GrandNagusUnlocked, Mythic, Ultimate),
];

/// Look up an achievement by id.
pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Look up an achievement by id, failing if it does not exist.
pub fn require(id: &str) -> AchievementResult<&'static Achievement> {
    find(id).ok_or_else(|| AchievementError::UnknownAchievement(id.to_string()))
}

/// Sum of every achievement's score.
pub fn max_score() -> u32 {
    ACHIEVEMENTS.iter().map(Achievement::points).sum()
}
