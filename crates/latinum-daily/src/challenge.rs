//! Daily challenge types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use latinum_core::Rule;

/// Number of options every question offers.
pub const OPTION_COUNT: usize = 4;

/// The four kinds of daily challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeKind {
    /// Identify rule numbers from their text.
    #[serde(alias = "rule-quiz")]
    Quiz,
    /// Identify the category of rules.
    CategoryMatch,
    /// Rapid-fire: match rule numbers to their sayings.
    SpeedRound,
    /// Two questions about one featured rule.
    RuleOfDay,
}

impl ChallengeKind {
    /// All kinds, in the order the generator draws from.
    pub const ALL: [Self; 4] = [
        Self::Quiz,
        Self::CategoryMatch,
        Self::SpeedRound,
        Self::RuleOfDay,
    ];

    /// Stable key, as stored in challenge history.
    pub fn key(self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::CategoryMatch => "category-match",
            Self::SpeedRound => "speed-round",
            Self::RuleOfDay => "rule-of-day",
        }
    }

    /// Seconds allowed to answer every question.
    pub fn time_limit(self) -> u32 {
        match self {
            Self::Quiz => 60,
            Self::CategoryMatch => 45,
            Self::SpeedRound => 40,
            Self::RuleOfDay => 50,
        }
    }

    /// Points per correct answer.
    pub fn points_per_question(self) -> u32 {
        match self {
            Self::Quiz => 20,
            Self::CategoryMatch => 25,
            Self::SpeedRound => 15,
            Self::RuleOfDay => 30,
        }
    }
}

impl std::fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quiz => write!(f, "Rule Quiz"),
            Self::CategoryMatch => write!(f, "Category Match"),
            Self::SpeedRound => write!(f, "Speed Round"),
            Self::RuleOfDay => write!(f, "Rule of the Day"),
        }
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub prompt: String,
    /// Exactly [`OPTION_COUNT`] distinct options.
    pub options: Vec<String>,
    /// Index of the correct option.
    pub correct: usize,
    /// The rule the question is about.
    pub rule: Rule,
}

impl Question {
    /// The correct option text.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }
}

/// One day's challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// Calendar date the challenge belongs to.
    pub date: NaiveDate,
    /// Challenge kind.
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Questions in play order.
    pub questions: Vec<Question>,
    /// Seconds allowed.
    pub time_limit: u32,
    /// Points per correct answer.
    pub points_per_question: u32,
    /// The featured rule, for rule-of-day challenges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_rule: Option<Rule>,
}

impl Challenge {
    /// Points for answering everything correctly, before time bonus.
    pub fn max_points(&self) -> u32 {
        self.points_per_question * u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }
}
