mod record;
mod store;

pub use record::{HistoryEntry, HistoryRecord};
pub use store::{HistoryStats, HistoryStore, DEFAULT_HISTORY_CAP, HISTORY_STORAGE_KEY};
