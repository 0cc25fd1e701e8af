use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};

/// Synchronous key-value persistence used by the history store.
pub trait KeyValueStore: Send {
    fn get(&mut self, key: &str) -> anyhow::Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> anyhow::Result<()>;
}

/// JSON object on disk, one entry per key. Writes merge the touched key into
/// whatever is on disk so two stores sharing a file do not clobber each other.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&mut self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(read_json_object(&self.path)?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut on_disk = read_json_object(&self.path)?;
        on_disk.insert(key.to_string(), value);
        write_json_object(&self.path, on_disk)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Map<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&mut self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Missing file reads as empty; so does a file that is not a JSON object.
fn read_json_object(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()))
        }
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => {
            tracing::warn!(path = %path.display(), "storage file is corrupt; starting empty");
            Ok(Map::new())
        }
    }
}

fn write_json_object(path: &Path, payload: Map<String, Value>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(
        path,
        serde_json::to_string_pretty(&Value::Object(payload))?,
    )
    .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FileStore, KeyValueStore, MemoryStore};

    #[test]
    fn file_store_basic() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let mut store = FileStore::new(temp.path().join("nested").join("storage.json"));
        assert_eq!(store.get("key")?, None);
        store.set("key", json!([{"value": 1}]))?;
        assert_eq!(store.get("key")?, Some(json!([{"value": 1}])));
        Ok(())
    }

    #[test]
    fn file_store_merges_with_concurrent_writer() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("storage.json");
        let mut store_a = FileStore::new(&path);
        let mut store_b = FileStore::new(&path);

        store_a.set("a", json!(1))?;
        store_b.set("b", json!(2))?;
        store_a.set("c", json!(3))?;

        let mut reloaded = FileStore::new(path);
        assert_eq!(reloaded.get("a")?, Some(json!(1)));
        assert_eq!(reloaded.get("b")?, Some(json!(2)));
        assert_eq!(reloaded.get("c")?, Some(json!(3)));
        Ok(())
    }

    #[test]
    fn file_store_reads_refresh_between_instances() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("storage.json");
        let mut store_a = FileStore::new(&path);
        let mut store_b = FileStore::new(&path);

        store_a.set("key", json!("one"))?;
        assert_eq!(store_b.get("key")?, Some(json!("one")));
        store_b.set("key", json!("two"))?;
        assert_eq!(store_a.get("key")?, Some(json!("two")));
        Ok(())
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced_on_write() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("storage.json");
        std::fs::write(&path, "{not json")?;

        let mut store = FileStore::new(&path);
        assert_eq!(store.get("key")?, None);
        store.set("key", json!(true))?;
        assert_eq!(FileStore::new(&path).get("key")?, Some(json!(true)));
        Ok(())
    }

    #[test]
    fn unreadable_path_is_an_error() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let mut store = FileStore::new(temp.path());
        assert!(store.get("key").is_err());
        assert!(store.set("key", json!(1)).is_err());
        Ok(())
    }

    #[test]
    fn memory_store_round_trips() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        store.set("key", json!({"a": 1}))?;
        assert_eq!(store.get("key")?, Some(json!({"a": 1})));
        assert_eq!(store.get("other")?, None);
        Ok(())
    }
}
