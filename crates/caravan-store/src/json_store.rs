//! The [`JsonFileStore`] and its [`RecordKey`] space.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Record keys
// ---------------------------------------------------------------------------

/// The fixed set of documents the simulation persists.
///
/// Keys map one-to-one onto file names under the store root; there is no
/// open-ended key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    /// The city graph document.
    Cities,
    /// The goods catalog document.
    Goods,
    /// The player document (gold, merchants, cargo).
    Player,
    /// The rolling global news feed.
    News,
}

impl RecordKey {
    /// File name of this record under the store root.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Cities => "cities.json",
            Self::Goods => "goods.json",
            Self::Player => "player.json",
            Self::News => "news.json",
        }
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// A record store keeping each document as one JSON file on disk.
///
/// Writes are atomic at the document level: the new content is written to a
/// sibling `.tmp` file and renamed over the target, so concurrent readers
/// and crash recovery only ever see a complete old or complete new document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory holding all record files.
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!(root = %root.display(), "Record store opened");
        Ok(Self { root })
    }

    /// Directory holding all record files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record file for `key`.
    fn record_path(&self, key: RecordKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// Whether a document exists for `key`.
    pub async fn exists(&self, key: RecordKey) -> bool {
        tokio::fs::try_exists(self.record_path(key))
            .await
            .unwrap_or(false)
    }

    /// Load and deserialize the document stored under `key`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file is missing or unreadable.
    /// - [`StoreError::Serde`] if the content is not valid JSON for `T`.
    pub async fn load<T: DeserializeOwned>(&self, key: RecordKey) -> Result<T, StoreError> {
        let bytes = tokio::fs::read(self.record_path(key)).await?;
        let value = serde_json::from_slice(&bytes)?;
        tracing::trace!(%key, bytes = bytes.len(), "Record loaded");
        Ok(value)
    }

    /// Serialize `value` and replace the document stored under `key`.
    ///
    /// Last write wins; there is no versioning or merge.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Serde`] if `value` cannot be serialized.
    /// - [`StoreError::Io`] if the temp write or rename fails.
    pub async fn save<T: Serialize>(&self, key: RecordKey, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let target = self.record_path(key);
        let tmp = self.root.join(format!("{}.tmp", key.file_name()));

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &target).await?;

        tracing::trace!(%key, bytes = bytes.len(), "Record saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        gold: u64,
    }

    fn doc(gold: u64) -> Doc {
        Doc {
            name: "Guildmaster".to_owned(),
            gold,
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        store.save(RecordKey::Player, &doc(1000)).await.unwrap();
        let loaded: Doc = store.load(RecordKey::Player).await.unwrap();

        assert_eq!(loaded, doc(1000));
    }

    #[tokio::test]
    async fn last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        store.save(RecordKey::Player, &doc(1000)).await.unwrap();
        store.save(RecordKey::Player, &doc(250)).await.unwrap();

        let loaded: Doc = store.load(RecordKey::Player).await.unwrap();
        assert_eq!(loaded.gold, 250);
    }

    #[tokio::test]
    async fn missing_record_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        let result: Result<Doc, _> = store.load(RecordKey::News).await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn corrupt_record_is_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        tokio::fs::write(dir.path().join("goods.json"), b"{ not json")
            .await
            .unwrap();

        let result: Result<Doc, _> = store.load(RecordKey::Goods).await;
        assert!(matches!(result, Err(StoreError::Serde { .. })));
    }

    #[tokio::test]
    async fn exists_reflects_saved_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        assert!(!store.exists(RecordKey::Cities).await);
        store.save(RecordKey::Cities, &doc(0)).await.unwrap();
        assert!(store.exists(RecordKey::Cities).await);
    }

    #[tokio::test]
    async fn records_use_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        store.save(RecordKey::Player, &doc(1)).await.unwrap();
        store.save(RecordKey::Goods, &doc(2)).await.unwrap();

        let player: Doc = store.load(RecordKey::Player).await.unwrap();
        let goods: Doc = store.load(RecordKey::Goods).await.unwrap();
        assert_eq!(player.gold, 1);
        assert_eq!(goods.gold, 2);
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        store.save(RecordKey::News, &doc(0)).await.unwrap();
        assert!(!dir.path().join("news.json.tmp").exists());
    }
}
