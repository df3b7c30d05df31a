//! Device-local store: one UTF-8 file per key under a root directory.

use crate::storage::{KeyValueStore, StoreError};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers, not user input, but keep them filename
        // safe anyway.
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        // Write to a sibling temp file and rename so a crash mid-write cannot
        // leave a truncated blob behind.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("inventory").await.unwrap(), None);
        store.set("inventory", r#"[{"x":1}]"#).await.unwrap();
        assert_eq!(
            store.get("inventory").await.unwrap().as_deref(),
            Some(r#"[{"x":1}]"#)
        );
    }

    #[tokio::test]
    async fn keys_map_to_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("inventory", "a").await.unwrap();
        store.set("wastePreventionStats", "b").await.unwrap();

        assert_eq!(store.get("inventory").await.unwrap().as_deref(), Some("a"));
        assert_eq!(
            store.get("wastePreventionStats").await.unwrap().as_deref(),
            Some("b")
        );
    }
}
