use crate::traits::{LocalStorage, Notice, RemoteBoardStore, UserId};
use goalboard_domain::{default_board, Board, PersistedBoard};

/// Where a loaded board came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The user's existing remote record
    Remote,
    /// No remote record existed; the default board was created for the user
    Seeded,
    /// Remote was unavailable; the local slot was used
    LocalCache,
    /// Nothing usable anywhere; the default board was used
    Default,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub board: Board,
    pub source: LoadSource,
    pub notice: Option<Notice>,
    /// False when the remote record exists but could not be decoded. Saves
    /// must not replace a record this session never managed to read.
    pub remote_writable: bool,
}

enum RemoteFailure {
    Unreachable(String),
    Unreadable(String),
}

/// Resolves the board for an identity: remote first, then local slot, then defaults.
pub struct BoardLoader<'a> {
    remote: &'a dyn RemoteBoardStore,
    local: &'a dyn LocalStorage,
    local_key: &'a str,
}

impl<'a> BoardLoader<'a> {
    pub fn new(
        remote: &'a dyn RemoteBoardStore,
        local: &'a dyn LocalStorage,
        local_key: &'a str,
    ) -> Self {
        Self {
            remote,
            local,
            local_key,
        }
    }

    /// Never fails; every remote problem degrades to an offline load.
    pub async fn load(&self, identity: Option<&UserId>) -> LoadOutcome {
        let Some(user) = identity else {
            let (board, source) = self.load_local();
            return LoadOutcome {
                board,
                source,
                notice: None,
                remote_writable: true,
            };
        };

        let (reason, remote_writable) = match self.load_remote(user).await {
            Ok(outcome) => return outcome,
            Err(RemoteFailure::Unreachable(reason)) => {
                tracing::warn!("Failed to load board for {} remotely: {}", user, reason);
                (reason, true)
            }
            Err(RemoteFailure::Unreadable(reason)) => {
                tracing::error!(
                    "Remote board for {} is unreadable, leaving it untouched: {}",
                    user,
                    reason
                );
                (reason, false)
            }
        };

        let (board, source) = self.load_local();
        LoadOutcome {
            board,
            source,
            notice: Some(Notice::UsingOfflineCopy { reason }),
            remote_writable,
        }
    }

    async fn load_remote(&self, user: &UserId) -> Result<LoadOutcome, RemoteFailure> {
        let record = self
            .remote
            .fetch(user)
            .await
            .map_err(|e| RemoteFailure::Unreachable(e.to_string()))?;

        match record {
            Some(record) => {
                let persisted = PersistedBoard::decode(record.columns)
                    .map_err(|e| RemoteFailure::Unreadable(e.to_string()))?;
                if persisted.is_legacy() {
                    tracing::info!("Remote board for {} uses the legacy layout", user);
                }
                tracing::info!("Loaded board for {} from remote store", user);
                Ok(LoadOutcome {
                    board: persisted.into_board(),
                    source: LoadSource::Remote,
                    notice: None,
                    remote_writable: true,
                })
            }
            None => {
                let board = default_board();
                if let Err(e) = self.remote.insert(user, &board).await {
                    tracing::error!("Error creating default board for {}: {}", user, e);
                }
                tracing::info!("Seeded default board for {}", user);
                Ok(LoadOutcome {
                    board,
                    source: LoadSource::Seeded,
                    notice: None,
                    remote_writable: true,
                })
            }
        }
    }

    fn load_local(&self) -> (Board, LoadSource) {
        let saved = match self.local.get_item(self.local_key) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Failed to read local board: {}", e);
                None
            }
        };

        let Some(json) = saved else {
            return (default_board(), LoadSource::Default);
        };

        match PersistedBoard::from_json_str(&json) {
            Ok(persisted) => {
                tracing::info!(
                    "Loaded board from local storage (legacy layout: {})",
                    persisted.is_legacy()
                );
                (persisted.into_board(), LoadSource::LocalCache)
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable local board: {}", e);
                (default_board(), LoadSource::Default)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryLocalStorage;
    use crate::traits::{MockRemoteBoardStore, RemoteRecord};
    use chrono::Utc;
    use goalboard_core::GoalboardError;
    use goalboard_domain::{ColumnId, ParkingStatus};
    use serde_json::json;

    const KEY: &str = "kanbanColumns";

    fn alice() -> UserId {
        UserId::new("alice").unwrap()
    }

    fn legacy_json() -> serde_json::Value {
        json!([
            {"id": "family", "title": "Family", "icon": "heart", "themeColor": "blue", "cards": []},
            {"id": "future", "title": "Future", "cards": [
                {"id": "00000000-0000-4000-8000-00000000000a", "title": "Learn to sail", "column": "future"}
            ]}
        ])
    }

    #[tokio::test]
    async fn test_existing_remote_record_is_used() {
        let board = default_board();
        let record = RemoteRecord::new(alice(), &board, Utc::now()).unwrap();

        let mut remote = MockRemoteBoardStore::new();
        remote
            .expect_fetch()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        remote.expect_insert().never();
        let local = MemoryLocalStorage::new();

        let outcome = BoardLoader::new(&remote, &local, KEY)
            .load(Some(&alice()))
            .await;

        assert_eq!(outcome.source, LoadSource::Remote);
        assert_eq!(outcome.board, board);
        assert!(outcome.notice.is_none());
    }

    #[tokio::test]
    async fn test_legacy_remote_record_is_migrated() {
        let record = RemoteRecord {
            user_id: alice(),
            columns: legacy_json(),
            updated_at: Utc::now(),
        };
        let mut remote = MockRemoteBoardStore::new();
        remote
            .expect_fetch()
            .returning(move |_| Ok(Some(record.clone())));
        let local = MemoryLocalStorage::new();

        let outcome = BoardLoader::new(&remote, &local, KEY)
            .load(Some(&alice()))
            .await;

        let parking = outcome.board.column(ColumnId::Parking).unwrap();
        assert_eq!(parking.cards[0].parking_status(), ParkingStatus::Future);
        assert_eq!(outcome.source, LoadSource::Remote);
    }

    #[tokio::test]
    async fn test_missing_record_seeds_default() {
        let mut remote = MockRemoteBoardStore::new();
        remote.expect_fetch().returning(|_| Ok(None));
        remote
            .expect_insert()
            .times(1)
            .withf(|user, board| user.as_str() == "alice" && board.columns.len() == 4)
            .returning(|_, _| Ok(()));
        let local = MemoryLocalStorage::new();

        let outcome = BoardLoader::new(&remote, &local, KEY)
            .load(Some(&alice()))
            .await;

        assert_eq!(outcome.source, LoadSource::Seeded);
        assert!(outcome.notice.is_none());
        assert_eq!(outcome.board.card_count(), 9);
    }

    #[tokio::test]
    async fn test_failed_seed_insert_still_installs_default() {
        let mut remote = MockRemoteBoardStore::new();
        remote.expect_fetch().returning(|_| Ok(None));
        remote
            .expect_insert()
            .returning(|_, _| Err(GoalboardError::Connection("timeout".to_string())));
        let local = MemoryLocalStorage::new();

        let outcome = BoardLoader::new(&remote, &local, KEY)
            .load(Some(&alice()))
            .await;

        assert_eq!(outcome.source, LoadSource::Seeded);
        assert!(outcome.notice.is_none());
    }

    #[tokio::test]
    async fn test_remote_failure_uses_migrated_local_copy() {
        let mut remote = MockRemoteBoardStore::new();
        remote
            .expect_fetch()
            .returning(|_| Err(GoalboardError::Connection("offline".to_string())));
        let local = MemoryLocalStorage::new();
        local.set_item(KEY, &legacy_json().to_string()).unwrap();

        let outcome = BoardLoader::new(&remote, &local, KEY)
            .load(Some(&alice()))
            .await;

        assert_eq!(outcome.source, LoadSource::LocalCache);
        assert!(matches!(outcome.notice, Some(Notice::UsingOfflineCopy { .. })));
        assert!(outcome.board.column(ColumnId::Parking).is_some());
        assert!(outcome.board.is_consistent());
    }

    #[tokio::test]
    async fn test_remote_failure_without_local_copy_uses_default() {
        let mut remote = MockRemoteBoardStore::new();
        remote
            .expect_fetch()
            .returning(|_| Err(GoalboardError::Connection("offline".to_string())));
        let local = MemoryLocalStorage::new();

        let outcome = BoardLoader::new(&remote, &local, KEY)
            .load(Some(&alice()))
            .await;

        assert_eq!(outcome.source, LoadSource::Default);
        assert!(matches!(outcome.notice, Some(Notice::UsingOfflineCopy { .. })));
        assert!(outcome.remote_writable);
    }

    #[tokio::test]
    async fn test_undecodable_remote_record_falls_back() {
        let record = RemoteRecord {
            user_id: alice(),
            columns: json!({"not": "an array"}),
            updated_at: Utc::now(),
        };
        let mut remote = MockRemoteBoardStore::new();
        remote
            .expect_fetch()
            .returning(move |_| Ok(Some(record.clone())));
        let local = MemoryLocalStorage::new();

        let outcome = BoardLoader::new(&remote, &local, KEY)
            .load(Some(&alice()))
            .await;

        assert_eq!(outcome.source, LoadSource::Default);
        assert!(outcome.notice.is_some());
        assert!(!outcome.remote_writable);
    }

    #[tokio::test]
    async fn test_opaque_card_ids_load_from_remote() {
        let record = RemoteRecord {
            user_id: alice(),
            columns: json!([
                {"id": "health", "title": "Health", "icon": "lotus", "themeColor": "green", "cards": [
                    {"id": "card-1", "title": "My precious goal", "column": "health"}
                ]}
            ]),
            updated_at: Utc::now(),
        };
        let mut remote = MockRemoteBoardStore::new();
        remote
            .expect_fetch()
            .returning(move |_| Ok(Some(record.clone())));
        remote.expect_insert().never();
        let local = MemoryLocalStorage::new();

        let outcome = BoardLoader::new(&remote, &local, KEY)
            .load(Some(&alice()))
            .await;

        assert_eq!(outcome.source, LoadSource::Remote);
        assert!(outcome.remote_writable);
        let card = outcome.board.cards().next().unwrap();
        assert_eq!(card.id.as_str(), "card-1");
        assert_eq!(card.title, "My precious goal");
    }

    #[tokio::test]
    async fn test_no_identity_skips_remote() {
        let mut remote = MockRemoteBoardStore::new();
        remote.expect_fetch().never();
        let local = MemoryLocalStorage::new();

        let outcome = BoardLoader::new(&remote, &local, KEY).load(None).await;

        assert_eq!(outcome.source, LoadSource::Default);
        assert!(outcome.notice.is_none());
    }
}
