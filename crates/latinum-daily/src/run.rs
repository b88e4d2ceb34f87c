//! Playing through a challenge and scoring it.

use tracing::debug;

use crate::challenge::{Challenge, Question};
use crate::error::{DailyError, DailyResult};
use crate::history::ChallengeResult;

/// Seconds of remaining time worth one bonus point.
pub const SECONDS_PER_BONUS_POINT: u32 = 6;

/// Result of answering one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Whether the chosen option was right.
    pub correct: bool,
    /// Index of the correct option.
    pub correct_index: usize,
    /// Points earned by this answer.
    pub points: u32,
}

/// An in-progress playthrough of a [`Challenge`].
#[derive(Debug, Clone)]
pub struct ChallengeRun<'c> {
    challenge: &'c Challenge,
    position: usize,
    correct: u32,
    score: u32,
}

impl<'c> ChallengeRun<'c> {
    /// Start a run at the first question.
    pub fn new(challenge: &'c Challenge) -> Self {
        Self {
            challenge,
            position: 0,
            correct: 0,
            score: 0,
        }
    }

    /// The challenge being played.
    pub fn challenge(&self) -> &'c Challenge {
        self.challenge
    }

    /// The question awaiting an answer, or `None` once every question is answered.
    pub fn current_question(&self) -> Option<&'c Question> {
        self.challenge.questions.get(self.position)
    }

    /// Questions answered so far.
    pub fn answered(&self) -> usize {
        self.position
    }

    /// Correct answers so far.
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    /// Points so far, without time bonus.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether every question has been answered.
    pub fn is_finished(&self) -> bool {
        self.position >= self.challenge.questions.len()
    }

    /// Answer the current question with the option at `option`.
    pub fn answer(&mut self, option: usize) -> DailyResult<AnswerOutcome> {
        let question = self.current_question().ok_or(DailyError::RunFinished)?;
        if option >= question.options.len() {
            return Err(DailyError::InvalidOption {
                option,
                count: question.options.len(),
            });
        }

        let correct = option == question.correct;
        let points = if correct {
            self.challenge.points_per_question
        } else {
            0
        };
        self.score += points;
        self.correct += u32::from(correct);
        self.position += 1;
        debug!(question = self.position, correct, points, "answered");

        Ok(AnswerOutcome {
            correct,
            correct_index: question.correct,
            points,
        })
    }

    /// End the run with `time_left` seconds on the clock.
    ///
    /// Adds one bonus point per [`SECONDS_PER_BONUS_POINT`] seconds left.
    /// Time beyond the challenge's limit is ignored. A run ended early (time
    /// ran out) is still a result, just not a completed one.
    pub fn finish(self, time_left: u32) -> ChallengeResult {
        let time_left = time_left.min(self.challenge.time_limit);
        let completed = self.is_finished();
        let bonus = time_left / SECONDS_PER_BONUS_POINT;
        ChallengeResult {
            date: self.challenge.date,
            kind: self.challenge.kind,
            score: self.score + bonus,
            questions: u32::try_from(self.challenge.questions.len()).unwrap_or(u32::MAX),
            time_left,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::ChallengeKind;
    use crate::generator::{fallback_challenge, generate_challenge};
    use chrono::NaiveDate;
    use latinum_core::RuleCorpus;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn perfect_run_with_bonus() {
        let corpus = RuleCorpus::builtin();
        let challenge = generate_challenge(day("2024-01-01"), &corpus);
        let mut run = ChallengeRun::new(&challenge);
        while let Some(q) = run.current_question() {
            let outcome = run.answer(q.correct).unwrap();
            assert!(outcome.correct);
        }
        assert!(run.is_finished());
        let result = run.finish(30);
        assert!(result.completed);
        assert_eq!(result.score, challenge.max_points() + 5);
        assert_eq!(result.kind, challenge.kind);
    }

    #[test]
    fn wrong_answers_score_nothing() {
        let challenge = fallback_challenge(day("2024-03-01"));
        let mut run = ChallengeRun::new(&challenge);
        let wrong = (challenge.questions[0].correct + 1) % 4;
        let outcome = run.answer(wrong).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_index, 0);
        assert_eq!(outcome.points, 0);
        assert_eq!(run.finish(0).score, 0);
    }

    #[test]
    fn answering_past_the_end_fails() {
        let challenge = fallback_challenge(day("2024-03-01"));
        let mut run = ChallengeRun::new(&challenge);
        run.answer(0).unwrap();
        assert_eq!(run.answer(0), Err(DailyError::RunFinished));
    }

    #[test]
    fn out_of_range_option_is_rejected_without_advancing() {
        let challenge = fallback_challenge(day("2024-03-01"));
        let mut run = ChallengeRun::new(&challenge);
        assert_eq!(
            run.answer(4),
            Err(DailyError::InvalidOption { option: 4, count: 4 })
        );
        assert_eq!(run.answered(), 0);
    }

    #[test]
    fn timed_out_run_is_not_completed() {
        let corpus = RuleCorpus::builtin();
        let challenge = generate_challenge(day("2024-01-01"), &corpus);
        let mut run = ChallengeRun::new(&challenge);
        let first = run.current_question().unwrap().correct;
        run.answer(first).unwrap();
        let result = run.finish(0);
        assert!(!result.completed);
        assert_eq!(result.score, challenge.points_per_question);
    }

    #[test]
    fn bonus_is_capped_by_time_limit() {
        let challenge = fallback_challenge(day("2024-03-01"));
        assert_eq!(challenge.kind, ChallengeKind::RuleOfDay);
        let result = ChallengeRun::new(&challenge).finish(10_000);
        assert_eq!(result.time_left, challenge.time_limit);
        assert_eq!(result.score, challenge.time_limit / 6);
    }
}
