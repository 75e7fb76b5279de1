//! Board store wired to persistence.
//!
//! A [`BoardSession`] owns the in-memory store for the current identity,
//! loads it through [`BoardLoader`] and writes every change back through a
//! debounced [`BoardWriter`].

use crate::sync::{BoardLoader, BoardWriter, LoadSource, SaveOutcome, SaveScheduler};
use crate::traits::{LocalStorage, Notice, RemoteBoardStore, UserId};
use goalboard_core::config::{DEFAULT_LOCAL_STORAGE_KEY, DEFAULT_SAVE_DEBOUNCE_MS};
use goalboard_core::{AppConfig, GoalboardResult};
use goalboard_domain::{
    Board, BoardOperations, BoardStore, Card, CardId, CardUpdate, Column, ColumnId,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

const NOTICE_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub save_debounce: Duration,
    pub local_storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_debounce: Duration::from_millis(DEFAULT_SAVE_DEBOUNCE_MS),
            local_storage_key: DEFAULT_LOCAL_STORAGE_KEY.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            save_debounce: config.effective_save_debounce(),
            local_storage_key: config.effective_local_storage_key().to_string(),
        }
    }
}

pub struct BoardSession {
    store: BoardStore,
    identity: Option<UserId>,
    remote_writable: bool,
    remote: Arc<dyn RemoteBoardStore>,
    local: Arc<dyn LocalStorage>,
    local_key: String,
    writer: BoardWriter,
    scheduler: SaveScheduler,
    notices: broadcast::Sender<Notice>,
}

impl BoardSession {
    /// Create a session with no identity. The store stays loading until
    /// [`load`](Self::load) or [`set_identity`](Self::set_identity) runs.
    pub fn new(
        remote: Arc<dyn RemoteBoardStore>,
        local: Arc<dyn LocalStorage>,
        config: SessionConfig,
    ) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        let writer = BoardWriter::new(
            remote.clone(),
            local.clone(),
            config.local_storage_key.clone(),
            notices.clone(),
        );
        Self {
            store: BoardStore::new(),
            identity: None,
            remote_writable: true,
            remote,
            local,
            local_key: config.local_storage_key,
            writer,
            scheduler: SaveScheduler::new(config.save_debounce),
            notices,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub fn identity(&self) -> Option<&UserId> {
        self.identity.as_ref()
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<Board> {
        self.store.snapshot()
    }

    /// Load the board for `identity`, discarding any save still pending for
    /// the previous one.
    pub async fn load(&mut self, identity: Option<UserId>) -> LoadSource {
        if self.scheduler.cancel() {
            tracing::debug!("Dropped pending save for previous identity");
        }
        self.identity = identity;
        self.store.begin_loading();

        let outcome = BoardLoader::new(self.remote.as_ref(), self.local.as_ref(), &self.local_key)
            .load(self.identity.as_ref())
            .await;

        if let Some(notice) = outcome.notice {
            let _ = self.notices.send(notice);
        }
        self.remote_writable = outcome.remote_writable;
        self.store.install(outcome.board);
        tracing::info!("Board ready ({:?})", outcome.source);
        outcome.source
    }

    /// Reload only when the identity actually changed.
    pub async fn set_identity(&mut self, identity: Option<UserId>) -> Option<LoadSource> {
        if self.identity == identity && !self.store.is_loading() {
            return None;
        }
        Some(self.load(identity).await)
    }

    /// False after the remote record turned out to be unreadable; saves then
    /// go to the local slot only until the next load.
    pub fn is_remote_writable(&self) -> bool {
        self.remote_writable
    }

    fn save_target(&self) -> Option<UserId> {
        self.identity.clone().filter(|_| self.remote_writable)
    }

    pub fn has_pending_save(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Run a pending save immediately instead of waiting out the window.
    pub async fn flush(&mut self) -> Option<SaveOutcome> {
        if !self.scheduler.cancel() {
            return None;
        }
        let board = self.store.snapshot();
        let target = self.save_target();
        Some(self.writer.save(target.as_ref(), &board).await)
    }

    fn schedule_save(&mut self) {
        if self.store.is_loading() || self.store.board().is_empty() {
            return;
        }
        let writer = self.writer.clone();
        let identity = self.save_target();
        let board = self.store.snapshot();
        self.scheduler.schedule(async move {
            writer.save(identity.as_ref(), &board).await;
        });
    }

    fn after<T>(&mut self, result: GoalboardResult<T>) -> GoalboardResult<T> {
        if result.is_ok() {
            self.schedule_save();
        }
        result
    }
}

impl BoardOperations for BoardSession {
    fn columns(&self) -> &[Column] {
        self.store.columns()
    }

    fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    fn add_card(&mut self, column: ColumnId, title: String) -> GoalboardResult<Card> {
        let result = self.store.add_card(column, title);
        self.after(result)
    }

    fn get_card(&self, id: &CardId) -> Option<&Card> {
        self.store.get_card(id)
    }

    fn update_card(&mut self, id: CardId, updates: CardUpdate) -> GoalboardResult<()> {
        let result = self.store.update_card(id, updates);
        self.after(result)
    }

    fn delete_card(&mut self, id: CardId) -> GoalboardResult<()> {
        let result = self.store.delete_card(id);
        self.after(result)
    }

    fn move_card(
        &mut self,
        id: CardId,
        source: ColumnId,
        destination: ColumnId,
    ) -> GoalboardResult<()> {
        let result = self.store.move_card(id, source, destination);
        self.after(result)
    }

    fn update_card_order(
        &mut self,
        column: ColumnId,
        card_ids: Vec<CardId>,
    ) -> GoalboardResult<()> {
        let result = self.store.update_card_order(column, card_ids);
        self.after(result)
    }

    fn import_board(&mut self, columns: Vec<Column>) -> GoalboardResult<()> {
        let result = self.store.import_board(columns);
        self.after(result)
    }
}
