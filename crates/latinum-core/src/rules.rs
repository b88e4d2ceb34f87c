//! The Rules of Acquisition corpus.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Highest rule number in the canon. Distractor numbers are drawn from
/// `1..=MAX_RULE_NUMBER`.
pub const MAX_RULE_NUMBER: u32 = 286;

/// Thematic category of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Money and its accumulation.
    Profit,
    /// Trade, customers and commerce.
    Business,
    /// Deals and bargaining.
    Negotiation,
    /// What passes for morality.
    Ethics,
    /// Family, friends and health.
    Personal,
    /// General observations.
    Wisdom,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 6] = [
        Self::Profit,
        Self::Business,
        Self::Negotiation,
        Self::Ethics,
        Self::Personal,
        Self::Wisdom,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Profit => "Profit & Finance",
            Self::Business => "Business & Commerce",
            Self::Negotiation => "Negotiation & Deals",
            Self::Ethics => "Ethics & Morality",
            Self::Personal => "Personal Life",
            Self::Wisdom => "General Wisdom",
        }
    }

    /// Parse a category key such as `"profit"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "profit" => Some(Self::Profit),
            "business" => Some(Self::Business),
            "negotiation" => Some(Self::Negotiation),
            "ethics" => Some(Self::Ethics),
            "personal" => Some(Self::Personal),
            "wisdom" => Some(Self::Wisdom),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single Rule of Acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule number.
    pub number: u32,
    /// The saying itself.
    pub text: String,
    /// Thematic category.
    pub category: Category,
}

impl Rule {
    /// Create a rule.
    pub fn new(number: u32, text: impl Into<String>, category: Category) -> Self {
        Self {
            number,
            text: text.into(),
            category,
        }
    }
}

/// An ordered collection of rules with unique numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleCorpus {
    rules: Vec<Rule>,
}

impl RuleCorpus {
    /// Build a corpus, rejecting duplicate rule numbers.
    pub fn new(rules: Vec<Rule>) -> CoreResult<Self> {
        let mut seen = BTreeSet::new();
        for rule in &rules {
            if !seen.insert(rule.number) {
                return Err(CoreError::InvalidCorpus(format!(
                    "duplicate rule number {}",
                    rule.number
                )));
            }
        }
        Ok(Self { rules })
    }

    /// An empty corpus.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a corpus from a JSON array of `{number, text, category}`.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let rules: Vec<Rule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    /// Read a corpus from a JSON file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The corpus shipped with Latinum.
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN
                .iter()
                .map(|&(number, text, category)| Rule::new(number, text, category))
                .collect(),
        }
    }

    /// All rules in corpus order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by number.
    pub fn get(&self, number: u32) -> Option<&Rule> {
        self.rules.iter().find(|r| r.number == number)
    }

    /// Rules belonging to `category`, in corpus order.
    pub fn by_category(&self, category: Category) -> Vec<&Rule> {
        self.rules.iter().filter(|r| r.category == category).collect()
    }

    /// Categories that have at least one rule, in [`Category::ALL`] order.
    pub fn categories_present(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.rules.iter().any(|r| r.category == *c))
            .collect()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the corpus has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

const BUILTIN: &[(u32, &str, Category)] = &[
    (1, "Once you have their money, you never give it back.", Category::Profit),
    (3, "Never spend more for an acquisition than you have to.", Category::Business),
    (6, "Never allow family to stand in the way of opportunity.", Category::Personal),
    (7, "Keep your ears open.", Category::Wisdom),
    (9, "Opportunity plus instinct equals profit.", Category::Profit),
    (10, "Greed is eternal.", Category::Profit),
    (16, "A deal is a deal.", Category::Negotiation),
    (17, "A contract is a contract is a contract... but only between Ferengi.", Category::Negotiation),
    (18, "A Ferengi without profit is no Ferengi at all.", Category::Profit),
    (21, "Never place friendship above profit.", Category::Personal),
    (22, "A wise man can hear profit in the wind.", Category::Wisdom),
    (23, "Nothing is more important than your health... except for your money.", Category::Personal),
    (31, "Never make fun of a Ferengi's mother.", Category::Personal),
    (33, "It never hurts to suck up to the boss.", Category::Business),
    (34, "War is good for business.", Category::Business),
    (35, "Peace is good for business.", Category::Business),
    (45, "Expand or die.", Category::Business),
    (47, "Don't trust a man wearing a better suit than your own.", Category::Wisdom),
    (48, "The bigger the smile, the sharper the knife.", Category::Wisdom),
    (57, "Good customers are as rare as latinum. Treasure them.", Category::Business),
    (59, "Free advice is seldom cheap.", Category::Wisdom),
    (62, "The riskier the road, the greater the profit.", Category::Profit),
    (74, "Knowledge equals profit.", Category::Profit),
    (75, "Home is where the heart is, but the stars are made of latinum.", Category::Personal),
    (76, "Every once in a while, declare peace. It confuses the hell out of your enemies.", Category::Negotiation),
    (98, "Every man has his price.", Category::Negotiation),
    (102, "Nature decays, but latinum lasts forever.", Category::Profit),
    (109, "Dignity and an empty sack is worth the sack.", Category::Ethics),
    (111, "Treat people in your debt like family... exploit them.", Category::Ethics),
    (125, "You can't make a deal if you're dead.", Category::Negotiation),
    (168, "Whisper your way to success.", Category::Business),
    (190, "Hear all, trust nothing.", Category::Wisdom),
    (194, "It's always good business to know about new customers before they walk in your door.", Category::Business),
    (208, "Sometimes the only thing more dangerous than a question is an answer.", Category::Wisdom),
    (211, "Employees are the rungs on the ladder of success. Don't hesitate to step on them.", Category::Ethics),
    (214, "Never begin a business negotiation on an empty stomach.", Category::Negotiation),
    (217, "You can't free a fish from water.", Category::Wisdom),
    (239, "Never be afraid to mislabel a product.", Category::Ethics),
    (263, "Never allow doubt to tarnish your lust for latinum.", Category::Profit),
    (285, "No good deed ever goes unpunished.", Category::Ethics),
];
