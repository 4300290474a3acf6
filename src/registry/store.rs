//! The logger registry.
//!
//! # Responsibilities
//! - Track every known logger name with its configured level
//! - Keep each entry's effective level consistent with its ancestor chain
//! - Push configured levels to the attached [`LevelSink`] after each change
//!
//! # Design Decisions
//! - One `RwLock` around the whole map: a subtree recomputation and the sink
//!   push happen inside a single write section, so readers never see a
//!   half-updated subtree
//! - Entries are created lazily and never removed
//! - Intermediate ancestors are not materialized; inheritance walks names,
//!   not entries
//! - No logging while the lock is held

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::level::Level;
use crate::registry::name::{self, ROOT};
use crate::registry::sink::{LevelSink, SinkError};

/// Configured and effective level of one logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerEntry {
    /// Level set explicitly for this logger, if any.
    pub configured_level: Option<Level>,
    /// Level in force after inheritance.
    pub effective_level: Level,
}

/// Outcome of a configured-level update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelChange {
    pub logger: String,
    pub previous: Option<Level>,
    pub current: Option<Level>,
    /// Entries whose effective level was recomputed, the target included.
    pub recomputed: usize,
}

type Entries = BTreeMap<String, LoggerEntry>;

/// Hierarchical registry of logger levels.
pub struct LoggerRegistry {
    entries: RwLock<Entries>,
    default_level: Level,
    sink: Option<Arc<dyn LevelSink>>,
}

impl LoggerRegistry {
    /// Create a registry holding only `ROOT`, which falls back to `default_level`.
    pub fn new(default_level: Level) -> Self {
        let mut entries = Entries::new();
        entries.insert(
            ROOT.to_string(),
            LoggerEntry {
                configured_level: None,
                effective_level: default_level,
            },
        );
        Self {
            entries: RwLock::new(entries),
            default_level,
            sink: None,
        }
    }

    /// Attach the backend that receives configured levels.
    pub fn with_sink(mut self, sink: Arc<dyn LevelSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Level used when nothing in a logger's chain is configured.
    pub fn default_level(&self) -> Level {
        self.default_level
    }

    /// Return the entry for `name`, creating it if it is not known yet.
    pub fn resolve(&self, name: &str) -> LoggerEntry {
        let name = name::canonical(name);

        let existing = self.read().get(name).copied();
        if let Some(entry) = existing {
            return entry;
        }

        let mut entries = self.write();
        if let Some(entry) = entries.get(name) {
            return *entry;
        }
        let entry = LoggerEntry {
            configured_level: None,
            effective_level: inherited_level(&entries, name, self.default_level),
        };
        entries.insert(name.to_string(), entry);
        entry
    }

    /// Make `names` known without touching any configured level.
    ///
    /// Returns how many names were new.
    pub fn register<I, S>(&self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = self.write();
        let mut added = 0;
        for raw in names {
            let name = name::canonical(raw.as_ref());
            if entries.contains_key(name) {
                continue;
            }
            let entry = LoggerEntry {
                configured_level: None,
                effective_level: inherited_level(&entries, name, self.default_level),
            };
            entries.insert(name.to_string(), entry);
            added += 1;
        }
        added
    }

    /// Snapshot of every known logger.
    pub fn list_all(&self) -> BTreeMap<String, LoggerEntry> {
        self.read().clone()
    }

    /// Number of known loggers.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Always false: `ROOT` is known from construction.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Every logger that has an explicit level, in name order.
    pub fn configured_levels(&self) -> Vec<(String, Level)> {
        collect_configured(&self.read())
    }

    /// Set the configured level of `name` and recompute its subtree.
    pub fn set_configured_level(&self, name: &str, level: Level) -> LevelChange {
        self.update(name, Some(level))
    }

    /// Remove the configured level of `name` so it inherits again.
    pub fn clear_configured_level(&self, name: &str) -> LevelChange {
        self.update(name, None)
    }

    /// Push the current configured levels to the sink without changing anything.
    pub fn sync_sink(&self) -> Result<(), SinkError> {
        let entries = self.read();
        self.push_to_sink(&entries)
    }

    fn update(&self, name: &str, level: Option<Level>) -> LevelChange {
        let name = name::canonical(name);

        let (change, pushed) = {
            let mut entries = self.write();
            let entry = entries.entry(name.to_string()).or_insert(LoggerEntry {
                configured_level: None,
                effective_level: self.default_level,
            });
            let previous = std::mem::replace(&mut entry.configured_level, level);
            let recomputed = recompute_subtree(&mut entries, name, self.default_level);
            let pushed = self.push_to_sink(&entries);

            let change = LevelChange {
                logger: name.to_string(),
                previous,
                current: level,
                recomputed,
            };
            (change, pushed)
        };

        if let Err(e) = pushed {
            tracing::warn!(logger = %name, error = %e, "Level recorded but not applied to the logging backend");
        }
        change
    }

    fn push_to_sink(&self, entries: &Entries) -> Result<(), SinkError> {
        match &self.sink {
            Some(sink) => sink.apply(self.default_level, &collect_configured(entries)),
            None => Ok(()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("default_level", &self.default_level)
            .field("loggers", &self.len())
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

/// Nearest configured level along `name`'s lineage, else `default`.
fn inherited_level(entries: &Entries, name: &str, default: Level) -> Level {
    name::lineage(name)
        .find_map(|ancestor| entries.get(ancestor).and_then(|e| e.configured_level))
        .unwrap_or(default)
}

fn recompute_subtree(entries: &mut Entries, subtree: &str, default: Level) -> usize {
    let current: &Entries = entries;
    let updates: Vec<(String, Level)> = current
        .keys()
        .filter(|known| known.as_str() == subtree || name::is_descendant(known, subtree))
        .map(|known| (known.clone(), inherited_level(current, known, default)))
        .collect();

    let count = updates.len();
    for (known, level) in updates {
        if let Some(entry) = entries.get_mut(&known) {
            entry.effective_level = level;
        }
    }
    count
}

fn collect_configured(entries: &Entries) -> Vec<(String, Level)> {
    entries
        .iter()
        .filter_map(|(name, entry)| entry.configured_level.map(|level| (name.clone(), level)))
        .collect()
}
