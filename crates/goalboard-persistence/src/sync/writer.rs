use crate::traits::{LocalStorage, Notice, RemoteBoardStore, UserId};
use chrono::Utc;
use goalboard_domain::Board;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Remote,
    LocalOnly,
    Failed,
}

/// Writes a board snapshot remotely, falling back to the local slot.
#[derive(Clone)]
pub struct BoardWriter {
    remote: Arc<dyn RemoteBoardStore>,
    local: Arc<dyn LocalStorage>,
    local_key: String,
    notices: broadcast::Sender<Notice>,
}

impl BoardWriter {
    pub fn new(
        remote: Arc<dyn RemoteBoardStore>,
        local: Arc<dyn LocalStorage>,
        local_key: String,
        notices: broadcast::Sender<Notice>,
    ) -> Self {
        Self {
            remote,
            local,
            local_key,
            notices,
        }
    }

    /// Persist the board. Without an identity only the local slot is written.
    pub async fn save(&self, identity: Option<&UserId>, board: &Board) -> SaveOutcome {
        let Some(user) = identity else {
            return match self.write_local(board) {
                Ok(()) => SaveOutcome::LocalOnly,
                Err(reason) => self.fail(reason),
            };
        };

        match self.remote.upsert(user, board, Utc::now()).await {
            Ok(()) => {
                tracing::debug!("Saved board for {} remotely", user);
                SaveOutcome::Remote
            }
            Err(e) => {
                tracing::error!("Error saving board for {}: {}", user, e);
                match self.write_local(board) {
                    Ok(()) => {
                        self.notify(Notice::SavedLocallyOnly {
                            reason: e.to_string(),
                        });
                        SaveOutcome::LocalOnly
                    }
                    Err(reason) => self.fail(reason),
                }
            }
        }
    }

    fn write_local(&self, board: &Board) -> Result<(), String> {
        let json = serde_json::to_string(board).map_err(|e| e.to_string())?;
        self.local
            .set_item(&self.local_key, &json)
            .map_err(|e| e.to_string())
    }

    fn fail(&self, reason: String) -> SaveOutcome {
        tracing::error!("Failed to save board locally: {}", reason);
        self.notify(Notice::SaveFailed { reason });
        SaveOutcome::Failed
    }

    fn notify(&self, notice: Notice) {
        // No subscribers is fine; notices are advisory
        let _ = self.notices.send(notice);
    }
}
