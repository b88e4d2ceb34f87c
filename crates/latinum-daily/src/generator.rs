//! Deterministic daily challenge generation.
//!
//! The date string seeds a [`SineRng`]; every draw (kind, rule order, option
//! order, distractors) comes from that one generator in a fixed sequence, so
//! a given date and corpus always produce the same challenge.

use chrono::NaiveDate;
use tracing::{debug, warn};

use latinum_core::lenient::DATE_FORMAT;
use latinum_core::{Category, MAX_RULE_NUMBER, Rule, RuleCorpus};

use crate::challenge::{Challenge, ChallengeKind, OPTION_COUNT, Question};
use crate::prng::{SineRng, shuffle, string_seed};

/// Questions in a rule quiz.
pub const QUIZ_QUESTIONS: usize = 5;
/// Maximum questions in a category match.
pub const CATEGORY_QUESTIONS: usize = 5;
/// Questions in a speed round.
pub const SPEED_QUESTIONS: usize = 8;

struct Draft {
    title: String,
    description: String,
    questions: Vec<Question>,
    featured_rule: Option<Rule>,
}

/// Generate the challenge for `date` from `corpus`.
///
/// An empty corpus yields [`fallback_challenge`] rather than an error.
pub fn generate_challenge(date: NaiveDate, corpus: &RuleCorpus) -> Challenge {
    if corpus.is_empty() {
        warn!(%date, "rule corpus is empty, using fallback challenge");
        return fallback_challenge(date);
    }

    let key = date.format(DATE_FORMAT).to_string();
    let seed = string_seed(&key);
    let mut rng = SineRng::new(seed);
    let kind = ChallengeKind::ALL[rng.index(ChallengeKind::ALL.len())];

    let draft = match kind {
        ChallengeKind::Quiz => rule_quiz(corpus, &mut rng),
        ChallengeKind::CategoryMatch => category_match(corpus, &mut rng),
        ChallengeKind::SpeedRound => speed_round(corpus, &mut rng),
        ChallengeKind::RuleOfDay => rule_of_day(corpus, &mut rng),
    };
    debug!(%date, seed, kind = kind.key(), questions = draft.questions.len(), "daily challenge generated");

    Challenge {
        date,
        kind,
        title: draft.title,
        description: draft.description,
        questions: draft.questions,
        time_limit: kind.time_limit(),
        points_per_question: kind.points_per_question(),
        featured_rule: draft.featured_rule,
    }
}

/// The fixed single-question challenge used when no rules are available.
pub fn fallback_challenge(date: NaiveDate) -> Challenge {
    let rule = Rule::new(
        1,
        "Once you have their money, you never give it back.",
        Category::Profit,
    );
    let question = Question {
        prompt: format!("What is the number of the Rule of the Day: \"{}\"?", rule.text),
        options: ["1", "34", "62", "285"].map(String::from).to_vec(),
        correct: 0,
        rule: rule.clone(),
    };
    let kind = ChallengeKind::RuleOfDay;
    Challenge {
        date,
        kind,
        title: "Rule of the Day Challenge".to_string(),
        description: "The rule that started it all.".to_string(),
        questions: vec![question],
        time_limit: kind.time_limit(),
        points_per_question: kind.points_per_question(),
        featured_rule: Some(rule),
    }
}

fn rule_quiz(corpus: &RuleCorpus, rng: &mut SineRng) -> Draft {
    let questions = shuffled(corpus, rng)
        .into_iter()
        .take(QUIZ_QUESTIONS)
        .map(|rule| {
            let prompt = format!("Which rule says: \"{}\"?", rule.text);
            number_question(rule, prompt, rng)
        })
        .collect();
    Draft {
        title: "Rule Identification Quiz".to_string(),
        description: "Identify the correct rule numbers for these famous Ferengi sayings."
            .to_string(),
        questions,
        featured_rule: None,
    }
}

fn category_match(corpus: &RuleCorpus, rng: &mut SineRng) -> Draft {
    let present = corpus.categories_present();
    let category = present[rng.index(present.len())];
    let rules: Vec<&Rule> = shuffled(corpus, rng)
        .into_iter()
        .filter(|r| r.category == category)
        .take(CATEGORY_QUESTIONS)
        .collect();
    let questions = rules
        .into_iter()
        .map(|rule| {
            let prompt = format!("Which category does Rule {} belong to?", rule.number);
            category_question(rule, prompt, rng)
        })
        .collect();
    Draft {
        title: format!("{} Category Challenge", category.label()),
        description: format!(
            "Test your knowledge of {} rules!",
            category.label().to_lowercase()
        ),
        questions,
        featured_rule: None,
    }
}

fn speed_round(corpus: &RuleCorpus, rng: &mut SineRng) -> Draft {
    let questions = shuffled(corpus, rng)
        .into_iter()
        .take(SPEED_QUESTIONS)
        .map(|rule| text_question(rule, corpus, rng))
        .collect();
    Draft {
        title: "Speed Round".to_string(),
        description: "Quick-fire questions! Match each rule number to its saying.".to_string(),
        questions,
        featured_rule: None,
    }
}

fn rule_of_day(corpus: &RuleCorpus, rng: &mut SineRng) -> Draft {
    let rule = &corpus.rules()[rng.index(corpus.len())];
    let by_number = number_question(
        rule,
        format!("What is the number of the Rule of the Day: \"{}\"?", rule.text),
        rng,
    );
    let by_category = category_question(
        rule,
        "Which category does the Rule of the Day belong to?".to_string(),
        rng,
    );
    Draft {
        title: "Rule of the Day Challenge".to_string(),
        description: "Special focus on today's featured Ferengi rule!".to_string(),
        questions: vec![by_number, by_category],
        featured_rule: Some(rule.clone()),
    }
}

fn shuffled<'c>(corpus: &'c RuleCorpus, rng: &mut SineRng) -> Vec<&'c Rule> {
    let mut rules: Vec<&Rule> = corpus.rules().iter().collect();
    shuffle(&mut rules, rng);
    rules
}

/// Build a question from the correct option and distinct distractors, then
/// shuffle the options.
fn assemble<T: PartialEq + Clone>(
    correct: T,
    distractors: impl IntoIterator<Item = T>,
    rng: &mut SineRng,
) -> (Vec<T>, usize) {
    let mut options = vec![correct.clone()];
    options.extend(distractors);
    shuffle(&mut options, rng);
    let index = options.iter().position(|o| *o == correct).unwrap_or(0);
    (options, index)
}

fn number_question(rule: &Rule, prompt: String, rng: &mut SineRng) -> Question {
    let mut distractors = Vec::with_capacity(OPTION_COUNT - 1);
    while distractors.len() < OPTION_COUNT - 1 {
        let n = rng.one_to(MAX_RULE_NUMBER);
        if n != rule.number && !distractors.contains(&n) {
            distractors.push(n);
        }
    }
    let (options, correct) = assemble(rule.number, distractors, rng);
    Question {
        prompt,
        options: options.iter().map(ToString::to_string).collect(),
        correct,
        rule: rule.clone(),
    }
}

fn category_question(rule: &Rule, prompt: String, rng: &mut SineRng) -> Question {
    let mut others: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|c| *c != rule.category)
        .collect();
    shuffle(&mut others, rng);
    let (options, correct) = assemble(
        rule.category,
        others.into_iter().take(OPTION_COUNT - 1),
        rng,
    );
    Question {
        prompt,
        options: options.iter().map(|c| c.label().to_string()).collect(),
        correct,
        rule: rule.clone(),
    }
}

fn text_question(rule: &Rule, corpus: &RuleCorpus, rng: &mut SineRng) -> Question {
    let mut pool: Vec<&str> = Vec::new();
    for other in corpus.rules() {
        let text = other.text.as_str();
        if other.number != rule.number && text != rule.text && !pool.contains(&text) {
            pool.push(text);
        }
    }
    if pool.len() < OPTION_COUNT - 1 {
        let prompt = format!("Which rule says: \"{}\"?", rule.text);
        return number_question(rule, prompt, rng);
    }
    shuffle(&mut pool, rng);
    let (options, correct) = assemble(
        rule.text.as_str(),
        pool.into_iter().take(OPTION_COUNT - 1),
        rng,
    );
    Question {
        prompt: format!("Rule {}: which saying is it?", rule.number),
        options: options.into_iter().map(str::to_string).collect(),
        correct,
        rule: rule.clone(),
    }
}
