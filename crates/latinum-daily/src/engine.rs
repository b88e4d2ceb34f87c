//! Wires the generator, streak and history to a store.

use chrono::NaiveDate;
use tracing::info;

use latinum_core::{EventSink, OracleEvent, RuleCorpus, Store};

use crate::challenge::Challenge;
use crate::config::DailyConfig;
use crate::error::{DailyError, DailyResult};
use crate::generator::generate_challenge;
use crate::history::{ChallengeHistory, ChallengeResult};
use crate::streak::{StreakCompletion, StreakRecord, StreakTransition, milestone_title};

/// What the daily check produced for a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyOutlook {
    /// A challenge is ready to play.
    Available {
        /// The day's challenge.
        challenge: Challenge,
        /// What the streak check found.
        transition: StreakTransition,
    },
    /// Today's challenge has already been completed.
    CompletedToday {
        /// The streak as it stands.
        streak: StreakRecord,
    },
    /// A challenge on a later date is already completed, so this date can
    /// no longer be played.
    OutOfOrder {
        /// The last completed date.
        last: NaiveDate,
    },
}

/// Daily challenge engine over a rule corpus.
#[derive(Debug, Clone)]
pub struct DailyEngine<'c> {
    corpus: &'c RuleCorpus,
    config: DailyConfig,
}

impl<'c> DailyEngine<'c> {
    /// Create an engine.
    pub fn new(corpus: &'c RuleCorpus, config: DailyConfig) -> Self {
        Self { corpus, config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &DailyConfig {
        &self.config
    }

    /// The challenge for `date`, without touching any state.
    pub fn challenge_for(&self, date: NaiveDate) -> Challenge {
        generate_challenge(date, self.corpus)
    }

    /// Run the streak check for `date` and produce the day's challenge.
    ///
    /// The streak record is saved only if the check changed it.
    pub fn today<S: Store + ?Sized>(
        &self,
        store: &mut S,
        date: NaiveDate,
        sink: &mut dyn EventSink,
    ) -> DailyOutlook {
        let mut streak = StreakRecord::load(store);
        let before = streak.clone();
        let transition = streak.refresh(date, self.config.grace_policy);
        if streak != before {
            streak.save(store);
            emit_streak(sink, &streak, transition);
        }

        match (transition, streak.last_completed_date) {
            (StreakTransition::CompletedToday, _) => {
                return DailyOutlook::CompletedToday { streak };
            }
            (StreakTransition::ClockSkew, Some(last)) => {
                return DailyOutlook::OutOfOrder { last };
            }
            _ => {}
        }

        let challenge = self.challenge_for(date);
        sink.emit(OracleEvent::ChallengeGenerated {
            date,
            kind: challenge.kind.key().to_string(),
            questions: challenge.questions.len(),
        });
        DailyOutlook::Available {
            challenge,
            transition,
        }
    }

    /// Record a finished challenge: update the streak, grant any milestone,
    /// append to history and persist.
    pub fn complete<S: Store + ?Sized>(
        &self,
        store: &mut S,
        result: ChallengeResult,
        sink: &mut dyn EventSink,
    ) -> DailyResult<StreakCompletion> {
        let date = result.date;
        let mut streak = StreakRecord::load(store);
        let completion = streak.complete(date, &self.config)?;
        streak.save(store);

        let score = result.score;
        let mut history = ChallengeHistory::load(store);
        history.append(result);
        history.save(store);
        info!(%date, score, streak = completion.streak, "daily challenge completed");

        sink.emit(OracleEvent::ChallengeCompleted { date, score });
        emit_streak(sink, &streak, completion.transition);
        if let Some(days) = completion.milestone {
            sink.emit(OracleEvent::StreakMilestone {
                days,
                title: milestone_title(days).to_string(),
            });
        }
        Ok(completion)
    }

    /// Whether `date` already has a completed challenge.
    pub fn is_completed<S: Store + ?Sized>(&self, store: &S, date: NaiveDate) -> bool {
        StreakRecord::load(store).last_completed_date == Some(date)
    }

    /// Fail with [`DailyError::AlreadyCompleted`] if `date` is done.
    pub fn ensure_open<S: Store + ?Sized>(&self, store: &S, date: NaiveDate) -> DailyResult<()> {
        if self.is_completed(store, date) {
            Err(DailyError::AlreadyCompleted(date))
        } else {
            Ok(())
        }
    }
}

fn emit_streak(sink: &mut dyn EventSink, streak: &StreakRecord, transition: StreakTransition) {
    sink.emit(OracleEvent::StreakUpdated {
        current: streak.current_streak,
        longest: streak.longest_streak,
        transition: transition.key().to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GracePolicy;
    use crate::run::ChallengeRun;
    use latinum_core::{MemoryStore, keys};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn play_perfect(challenge: &Challenge) -> ChallengeResult {
        let mut run = ChallengeRun::new(challenge);
        while let Some(q) = run.current_question() {
            run.answer(q.correct).unwrap();
        }
        run.finish(12)
    }

    fn available(outlook: DailyOutlook) -> Challenge {
        match outlook {
            DailyOutlook::Available { challenge, .. } => challenge,
            other => panic!("expected a challenge, got {other:?}"),
        }
    }

    #[test]
    fn first_day_flow() {
        let corpus = RuleCorpus::builtin();
        let engine = DailyEngine::new(&corpus, DailyConfig::default());
        let mut store = MemoryStore::new();
        let mut events: Vec<OracleEvent> = Vec::new();

        let outlook = engine.today(&mut store, day("2024-01-01"), &mut events);
        let DailyOutlook::Available { challenge, transition } = outlook else {
            panic!("expected a challenge");
        };
        assert_eq!(transition, StreakTransition::NoHistory);
        assert!(store.get(keys::STREAK).is_none(), "nothing changed, nothing saved");
        assert!(matches!(events[0], OracleEvent::ChallengeGenerated { .. }));

        let result = play_perfect(&challenge);
        let done = engine.complete(&mut store, result, &mut events).unwrap();
        assert_eq!(done.streak, 1);
        assert_eq!(ChallengeHistory::load(&store).len(), 1);
        assert!(events.iter().any(|e| matches!(e, OracleEvent::ChallengeCompleted { .. })));
        assert!(events.iter().any(|e| matches!(
            e,
            OracleEvent::StreakUpdated { current: 1, .. }
        )));
    }

    #[test]
    fn second_visit_same_day_is_completed() {
        let corpus = RuleCorpus::builtin();
        let engine = DailyEngine::new(&corpus, DailyConfig::default());
        let mut store = MemoryStore::new();
        let challenge = available(engine.today(&mut store, day("2024-01-01"), &mut ()));
        engine.complete(&mut store, play_perfect(&challenge), &mut ()).unwrap();

        let outlook = engine.today(&mut store, day("2024-01-01"), &mut ());
        assert!(matches!(outlook, DailyOutlook::CompletedToday { .. }));
        assert!(engine.is_completed(&store, day("2024-01-01")));
        assert_eq!(
            engine.ensure_open(&store, day("2024-01-01")),
            Err(DailyError::AlreadyCompleted(day("2024-01-01")))
        );

        let again = engine.complete(&mut store, play_perfect(&challenge), &mut ());
        assert_eq!(again, Err(DailyError::AlreadyCompleted(day("2024-01-01"))));
        assert_eq!(ChallengeHistory::load(&store).len(), 1);
    }

    #[test]
    fn earlier_date_is_not_playable() {
        let corpus = RuleCorpus::builtin();
        let engine = DailyEngine::new(&corpus, DailyConfig::default());
        let mut store = MemoryStore::new();
        let challenge = available(engine.today(&mut store, day("2024-01-05"), &mut ()));
        engine.complete(&mut store, play_perfect(&challenge), &mut ()).unwrap();

        let outlook = engine.today(&mut store, day("2024-01-04"), &mut ());
        assert_eq!(outlook, DailyOutlook::OutOfOrder { last: day("2024-01-05") });

        let stale = play_perfect(&engine.challenge_for(day("2024-01-04")));
        assert!(matches!(
            engine.complete(&mut store, stale, &mut ()),
            Err(DailyError::OutOfOrder { .. })
        ));
        assert_eq!(ChallengeHistory::load(&store).len(), 1);
        assert_eq!(StreakRecord::load(&store).current_streak, 1);
    }

    #[test]
    fn broken_streak_is_saved_on_check() {
        let corpus = RuleCorpus::builtin();
        let engine = DailyEngine::new(&corpus, DailyConfig::default());
        let mut store = MemoryStore::new().with_raw(
            keys::STREAK,
            r#"{"currentStreak":6,"longestStreak":6,"lastCompletedDate":"2024-01-01","gracePeriodUsed":false}"#,
        );
        let mut events: Vec<OracleEvent> = Vec::new();
        engine.today(&mut store, day("2024-01-10"), &mut events);

        let streak = StreakRecord::load(&store);
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 6);
        assert!(events.iter().any(|e| matches!(
            e,
            OracleEvent::StreakUpdated { transition, .. } if transition == "broken"
        )));
    }

    #[test]
    fn detection_policy_spends_grace_on_check() {
        let corpus = RuleCorpus::builtin();
        let config = DailyConfig::default().with_grace_policy(GracePolicy::OnDetection);
        let engine = DailyEngine::new(&corpus, config);
        let mut store = MemoryStore::new().with_raw(
            keys::STREAK,
            r#"{"currentStreak":4,"longestStreak":4,"lastCompletedDate":"2024-01-01","gracePeriodUsed":false}"#,
        );
        let outlook = engine.today(&mut store, day("2024-01-03"), &mut ());
        assert!(matches!(
            outlook,
            DailyOutlook::Available { transition: StreakTransition::GraceApplied, .. }
        ));
        let streak = StreakRecord::load(&store);
        assert!(streak.grace_period_used);
        assert_eq!(streak.current_streak, 4);
    }

    #[test]
    fn milestone_event_is_emitted() {
        let corpus = RuleCorpus::builtin();
        let engine = DailyEngine::new(&corpus, DailyConfig::default());
        let mut store = MemoryStore::new();
        let mut events: Vec<OracleEvent> = Vec::new();
        for d in day("2024-01-01").iter_days().take(7) {
            let challenge = available(engine.today(&mut store, d, &mut ()));
            engine.complete(&mut store, play_perfect(&challenge), &mut events).unwrap();
        }
        assert!(events.contains(&OracleEvent::StreakMilestone {
            days: 7,
            title: "Dedicated Trader".to_string(),
        }));
    }
}
