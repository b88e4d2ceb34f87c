//! Core types for Latinum.
//!
//! Provides the Rules of Acquisition corpus and oracle, a minimal key-value
//! [`Store`] abstraction with lenient JSON decoding, stats tracking and the
//! [`StatsSnapshot`] consumed by the achievement evaluator, and the domain
//! events emitted to a presentation layer.

pub mod error;
pub mod event;
pub mod lenient;
pub mod oracle;
pub mod rules;
pub mod stats;
pub mod store;

pub use error::{CoreError, CoreResult};
pub use event::{EventSink, OracleEvent};
pub use oracle::{OracleConfig, RuleOracle};
pub use rules::{Category, MAX_RULE_NUMBER, Rule, RuleCorpus};
pub use stats::{GameRecord, StatKey, StatsRecord, StatsSnapshot, THEME_COUNT};
pub use store::{FileStore, MemoryStore, Store, keys};
