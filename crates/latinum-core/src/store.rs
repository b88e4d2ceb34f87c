//! Minimal key-value persistence.
//!
//! Every piece of state lives under its own key as a JSON document, the same
//! flat layout the browser's local storage used. Reads never fail: a missing
//! or malformed value decodes to the type's default and the problem is logged.
//! Writes report errors, but [`save`] only logs them so callers keep working
//! with their in-memory state.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};

/// Well-known store keys.
pub mod keys {
    /// Streak record.
    pub const STREAK: &str = "ferengiStreak";
    /// Append-only list of challenge results.
    pub const CHALLENGE_HISTORY: &str = "challengeHistory";
    /// Rule views, favorites, shares, easter eggs, themes.
    pub const STATS: &str = "ferengiStats";
    /// Unlocked achievements and score.
    pub const ACHIEVEMENT_PROGRESS: &str = "achievementProgress";
    /// Number of mini-games started.
    pub const GAMES_PLAYED: &str = "gamesPlayed";
    /// Best score per mini-game.
    pub const GAME_HIGH_SCORES: &str = "gameHighScores";
}

/// A key-value store holding JSON text blobs.
pub trait Store {
    /// Fetch the raw blob stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous blob.
    fn set(&mut self, key: &str, value: String) -> CoreResult<()>;
}

/// Load and decode the value under `key`, falling back to `T::default()`.
pub fn load<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: Store + ?Sized,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "malformed stored value, using defaults");
            T::default()
        }
    }
}

/// Encode and store `value` under `key`. Failures are logged, not returned.
pub fn save<T, S>(store: &mut S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(CoreError::from)
        .and_then(|json| store.set(key, json));
    if let Err(e) = result {
        warn!(key, error = %e, "failed to persist value");
    }
}

/// In-memory store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw blob, bypassing encoding. Handy for simulating old data.
    pub fn with_raw(mut self, key: &str, raw: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), raw.into());
        self
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> CoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A store backed by one JSON file mapping keys to blobs.
///
/// The whole file is rewritten on every `set`, via a sibling temp file and a
/// rename. Concurrent writers are not coordinated; the last write wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable document is logged and
    /// also treated as empty; it is replaced on the next write.
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "store file is not a key map, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> CoreResult<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}
