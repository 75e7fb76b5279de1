use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{RemoteBoardStore, RemoteRecord, UserId};
use chrono::{DateTime, Utc};
use goalboard_core::{GoalboardError, GoalboardResult};
use goalboard_domain::Board;
use std::path::{Path, PathBuf};

/// Remote store backed by a directory holding one `<user>.json` record per user.
#[derive(Debug, Clone)]
pub struct JsonDirRemoteStore {
    dir: PathBuf,
}

impl JsonDirRemoteStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, user: &UserId) -> PathBuf {
        self.dir.join(format!("{}.json", user.as_str()))
    }

    async fn write_record(&self, record: &RemoteRecord) -> GoalboardResult<()> {
        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| GoalboardError::Serialization(e.to_string()))?;
        let path = self.record_path(&record.user_id);
        AtomicWriter::write_atomic(&path, &bytes).await?;
        tracing::info!("Saved board for {} to {}", record.user_id, path.display());
        Ok(())
    }
}

#[async_trait::async_trait]
impl RemoteBoardStore for JsonDirRemoteStore {
    async fn fetch(&self, user: &UserId) -> GoalboardResult<Option<RemoteRecord>> {
        let path = self.record_path(user);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = AtomicWriter::read_all(&path).await?;
        let record: RemoteRecord = serde_json::from_slice(&bytes)
            .map_err(|e| GoalboardError::Serialization(e.to_string()))?;
        Ok(Some(record))
    }

    async fn insert(&self, user: &UserId, board: &Board) -> GoalboardResult<()> {
        if self.record_path(user).exists() {
            return Err(GoalboardError::Validation(format!(
                "A board already exists for {}",
                user
            )));
        }
        let record = RemoteRecord::new(user.clone(), board, Utc::now())?;
        self.write_record(&record).await
    }

    async fn upsert(
        &self,
        user: &UserId,
        board: &Board,
        updated_at: DateTime<Utc>,
    ) -> GoalboardResult<()> {
        let record = RemoteRecord::new(user.clone(), board, updated_at)?;
        self.write_record(&record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalboard_domain::default_board;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fetch_missing_record() {
        let dir = tempdir().unwrap();
        let store = JsonDirRemoteStore::new(dir.path());
        let user = UserId::new("nobody").unwrap();

        assert!(store.fetch(&user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_then_fetch() {
        let dir = tempdir().unwrap();
        let store = JsonDirRemoteStore::new(dir.path().join("remote"));
        let user = UserId::new("alice").unwrap();
        let board = default_board();

        store.insert(&user, &board).await.unwrap();
        let record = store.fetch(&user).await.unwrap().unwrap();

        assert_eq!(record.user_id, user);
        let stored: Board = serde_json::from_value(record.columns).unwrap();
        assert_eq!(stored, board);
    }

    #[tokio::test]
    async fn test_insert_refuses_existing_record() {
        let dir = tempdir().unwrap();
        let store = JsonDirRemoteStore::new(dir.path());
        let user = UserId::new("alice").unwrap();

        store.insert(&user, &default_board()).await.unwrap();
        assert!(store.insert(&user, &default_board()).await.is_err());
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_stamps() {
        let dir = tempdir().unwrap();
        let store = JsonDirRemoteStore::new(dir.path());
        let user = UserId::new("alice").unwrap();

        store.insert(&user, &default_board()).await.unwrap();

        let updated_at = Utc::now();
        let empty = Board::default();
        store.upsert(&user, &empty, updated_at).await.unwrap();

        let record = store.fetch(&user).await.unwrap().unwrap();
        assert_eq!(record.updated_at, updated_at);
        assert_eq!(record.columns, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error() {
        let dir = tempdir().unwrap();
        let store = JsonDirRemoteStore::new(dir.path());
        let user = UserId::new("alice").unwrap();
        tokio::fs::write(dir.path().join("alice.json"), b"{ broken")
            .await
            .unwrap();

        assert!(matches!(
            store.fetch(&user).await,
            Err(GoalboardError::Serialization(_))
        ));
    }
}
