//! The rule oracle: consult a Rule of Acquisition at random.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::event::{EventSink, OracleEvent};
use crate::rules::{Rule, RuleCorpus};

/// Configuration for the rule oracle.
#[derive(Debug, Clone, Default)]
pub struct OracleConfig {
    /// RNG seed for reproducible consultations. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl OracleConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Draws rules from a corpus.
pub struct RuleOracle<'c> {
    corpus: &'c RuleCorpus,
    rng: StdRng,
}

impl<'c> RuleOracle<'c> {
    /// Create an oracle over `corpus`.
    pub fn new(corpus: &'c RuleCorpus, config: OracleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { corpus, rng }
    }

    /// Draw a uniformly random rule. Returns `None` for an empty corpus.
    pub fn consult(&mut self, sink: &mut dyn EventSink) -> Option<&'c Rule> {
        let rules = self.corpus.rules();
        if rules.is_empty() {
            return None;
        }
        let rule = &rules[self.rng.random_range(0..rules.len())];
        debug!(number = rule.number, "rule consulted");
        sink.emit(OracleEvent::RuleConsulted { number: rule.number });
        Some(rule)
    }

    /// Look up a specific rule by number.
    pub fn lookup(&self, number: u32, sink: &mut dyn EventSink) -> Option<&'c Rule> {
        let rule = self.corpus.get(number)?;
        sink.emit(OracleEvent::RuleConsulted { number });
        Some(rule)
    }
}
