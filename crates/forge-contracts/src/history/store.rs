use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;
use similar::TextDiff;
use uuid::Uuid;

use super::record::{HistoryEntry, HistoryRecord};
use crate::clock::now_utc_iso;
use crate::error::ForgeError;
use crate::schema::SchemaRegistry;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

pub const HISTORY_STORAGE_KEY: &str = "prompt_history";
pub const DEFAULT_HISTORY_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    pub favorites: usize,
}

/// Capped, most-recent-first record list persisted under
/// [`HISTORY_STORAGE_KEY`] after every mutation.
///
/// Loading skips records whose model is not listed for their modality and
/// any older copy of a fingerprint already seen.
///
/// A storage failure on load or save switches the store to memory-only for
/// the rest of its life; callers can check [`HistoryStore::is_degraded`].
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
    cap: usize,
    backend: Option<Box<dyn KeyValueStore>>,
    degraded: bool,
}

impl HistoryStore {
    pub fn open(backend: Box<dyn KeyValueStore>, cap: usize) -> Self {
        let mut store = Self {
            records: Vec::new(),
            cap: cap.max(1),
            backend: Some(backend),
            degraded: false,
        };
        store.load();
        store
    }

    pub fn open_file(path: impl Into<PathBuf>, cap: usize) -> Self {
        Self::open(Box::new(FileStore::new(path)), cap)
    }

    pub fn in_memory(cap: usize) -> Self {
        Self::open(Box::new(MemoryStore::new()), cap)
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn list(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter().filter(|record| record.favorite)
    }

    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            total: self.records.len(),
            favorites: self.favorites().count(),
        }
    }

    /// Stores a new record at the top. A record with the same fingerprint is
    /// replaced and passes on its favorite flag. On overflow the oldest
    /// non-favorite among the earlier records goes first, then the oldest
    /// favorite.
    pub fn add(&mut self, entry: HistoryEntry) -> HistoryRecord {
        let fingerprint = entry.fingerprint();
        let mut favorite = false;
        if let Some(index) = self
            .records
            .iter()
            .position(|record| record.fingerprint() == fingerprint)
        {
            let replaced = self.records.remove(index);
            tracing::debug!(id = %replaced.id, "replacing duplicate history record");
            favorite = replaced.favorite;
        }

        let record = HistoryRecord {
            id: Uuid::new_v4().to_string(),
            modality: entry.modality,
            model: entry.model,
            values: entry.values,
            prompt: entry.prompt,
            created_at: now_utc_iso(),
            favorite,
        };
        self.records.insert(0, record.clone());
        self.evict_overflow(1);
        self.persist();
        record
    }

    /// Returns whether a record was removed; unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Returns the new flag, or `None` when the id is unknown.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let record = self.records.iter_mut().find(|record| record.id == id)?;
        record.favorite = !record.favorite;
        let favorite = record.favorite;
        self.persist();
        Some(favorite)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    /// Unified line diff from the first record's prompt to the second's.
    pub fn diff(&self, from_id: &str, to_id: &str) -> Result<Vec<String>, ForgeError> {
        let from = self
            .get(from_id)
            .ok_or_else(|| ForgeError::UnknownRecord(from_id.to_string()))?;
        let to = self
            .get(to_id)
            .ok_or_else(|| ForgeError::UnknownRecord(to_id.to_string()))?;
        let from_text = format!("{}\n", from.prompt);
        let to_text = format!("{}\n", to.prompt);
        let diff = TextDiff::from_lines(&from_text, &to_text);
        let rendered = diff
            .unified_diff()
            .header(&from.id, &to.id)
            .to_string();
        Ok(rendered.lines().map(str::to_string).collect())
    }

    /// Drops records past the cap. The first `protected` records are never
    /// candidates.
    fn evict_overflow(&mut self, protected: usize) {
        while self.records.len() > self.cap {
            let candidates = protected.min(self.records.len())..self.records.len();
            let victim = candidates
                .clone()
                .rev()
                .find(|index| !self.records[*index].favorite)
                .or_else(|| candidates.rev().next());
            let Some(index) = victim else {
                break;
            };
            let evicted = self.records.remove(index);
            tracing::debug!(
                id = %evicted.id,
                favorite = evicted.favorite,
                "evicted history record"
            );
        }
    }

    fn load(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        let payload = match backend.get(HISTORY_STORAGE_KEY) {
            Ok(payload) => payload,
            Err(err) => {
                self.degrade(&err);
                return;
            }
        };

        match payload {
            None => {}
            Some(Value::Array(items)) => {
                let registry = SchemaRegistry::global();
                let mut seen: HashMap<String, usize> = HashMap::new();
                for item in items {
                    let record = match serde_json::from_value::<HistoryRecord>(item) {
                        Ok(record) => record,
                        Err(err) => {
                            tracing::warn!(%err, "skipping unreadable history record");
                            continue;
                        }
                    };
                    if registry.model(record.modality, &record.model).is_err() {
                        tracing::warn!(
                            id = %record.id,
                            modality = %record.modality,
                            model = %record.model,
                            "skipping history record with a model outside its modality"
                        );
                        continue;
                    }
                    // Stored newest first, so the first copy of a fingerprint wins.
                    let fingerprint = record.fingerprint();
                    if let Some(&kept) = seen.get(&fingerprint) {
                        tracing::warn!(id = %record.id, "skipping duplicate history record");
                        if record.favorite {
                            self.records[kept].favorite = true;
                        }
                        continue;
                    }
                    seen.insert(fingerprint, self.records.len());
                    self.records.push(record);
                }
            }
            Some(_) => tracing::warn!("stored history is not a list; starting empty"),
        }
        self.evict_overflow(0);
        tracing::debug!(records = self.records.len(), "history loaded");
    }

    fn persist(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        let result = serde_json::to_value(&self.records)
            .map_err(anyhow::Error::from)
            .and_then(|payload| backend.set(HISTORY_STORAGE_KEY, payload));
        if let Err(err) = result {
            self.degrade(&err);
        }
    }

    fn degrade(&mut self, err: &anyhow::Error) {
        let reason = format!("{err:#}");
        tracing::warn!(
            error = %reason,
            "history storage unavailable; keeping history in memory for this session"
        );
        self.backend = None;
        self.degraded = true;
    }
}
