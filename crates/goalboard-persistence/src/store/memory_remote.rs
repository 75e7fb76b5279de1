use crate::traits::{RemoteBoardStore, RemoteRecord, UserId};
use chrono::{DateTime, Utc};
use goalboard_core::{GoalboardError, GoalboardResult};
use goalboard_domain::Board;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// In-process remote store with switches for simulating outages.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    records: Mutex<HashMap<UserId, RemoteRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw record as if another device had written it.
    pub fn put_record(&self, record: RemoteRecord) -> GoalboardResult<()> {
        self.lock()?.insert(record.user_id.clone(), record);
        Ok(())
    }

    pub fn record(&self, user: &UserId) -> Option<RemoteRecord> {
        self.lock().ok().and_then(|records| records.get(user).cloned())
    }

    pub fn set_offline(&self, offline: bool) {
        self.fail_reads.store(offline, Ordering::SeqCst);
        self.fail_writes.store(offline, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful inserts and upserts.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> GoalboardResult<MutexGuard<'_, HashMap<UserId, RemoteRecord>>> {
        self.records
            .lock()
            .map_err(|_| GoalboardError::Internal("remote store lock poisoned".to_string()))
    }

    fn check_writable(&self) -> GoalboardResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GoalboardError::Connection("remote store unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RemoteBoardStore for MemoryRemoteStore {
    async fn fetch(&self, user: &UserId) -> GoalboardResult<Option<RemoteRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(GoalboardError::Connection("remote store unreachable".to_string()));
        }
        Ok(self.lock()?.get(user).cloned())
    }

    async fn insert(&self, user: &UserId, board: &Board) -> GoalboardResult<()> {
        self.check_writable()?;
        let mut records = self.lock()?;
        if records.contains_key(user) {
            return Err(GoalboardError::Validation(format!(
                "A board already exists for {}",
                user
            )));
        }
        records.insert(user.clone(), RemoteRecord::new(user.clone(), board, Utc::now())?);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn upsert(
        &self,
        user: &UserId,
        board: &Board,
        updated_at: DateTime<Utc>,
    ) -> GoalboardResult<()> {
        self.check_writable()?;
        let record = RemoteRecord::new(user.clone(), board, updated_at)?;
        self.lock()?.insert(user.clone(), record);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
