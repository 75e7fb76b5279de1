use async_trait::async_trait;
use chrono::{DateTime, Utc};
use goalboard_core::{GoalboardError, GoalboardResult};
use goalboard_domain::Board;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity that owns one board in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Ids double as record keys, so they are limited to
    /// `[A-Za-z0-9._@-]` and may not start with a dot.
    pub fn new(id: impl Into<String>) -> GoalboardResult<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && !id.starts_with('.')
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '@' | '-'));
        if valid {
            Ok(Self(id))
        } else {
            Err(GoalboardError::Validation(format!("Invalid user id '{}'", id)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One user's board as held by the remote store.
///
/// `columns` stays raw JSON because remote payloads may predate the current
/// layout; it is decoded through the schema module on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub user_id: UserId,
    pub columns: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl RemoteRecord {
    pub fn new(user_id: UserId, board: &Board, updated_at: DateTime<Utc>) -> GoalboardResult<Self> {
        let columns = serde_json::to_value(board)
            .map_err(|e| GoalboardError::Serialization(e.to_string()))?;
        Ok(Self {
            user_id,
            columns,
            updated_at,
        })
    }
}

/// Keyed record store holding one board per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteBoardStore: Send + Sync {
    /// Fetch the user's record; `Ok(None)` when the user has none yet.
    async fn fetch(&self, user: &UserId) -> GoalboardResult<Option<RemoteRecord>>;

    /// Create the user's first record.
    async fn insert(&self, user: &UserId, board: &Board) -> GoalboardResult<()>;

    /// Create or replace the user's record.
    async fn upsert(
        &self,
        user: &UserId,
        board: &Board,
        updated_at: DateTime<Utc>,
    ) -> GoalboardResult<()>;
}

/// String-keyed on-device slots used when the remote store is unreachable.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> GoalboardResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> GoalboardResult<()>;
}

/// Non-fatal conditions surfaced to whoever renders the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Remote load failed; the board came from the local slot or defaults.
    UsingOfflineCopy { reason: String },
    /// Remote save failed; the board was written to the local slot.
    SavedLocallyOnly { reason: String },
    /// Neither the remote nor the local write succeeded.
    SaveFailed { reason: String },
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::UsingOfflineCopy { .. } => "Failed to load your board from the cloud",
            Notice::SavedLocallyOnly { .. } => "Failed to save to the cloud",
            Notice::SaveFailed { .. } => "Failed to save your board",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::UsingOfflineCopy { .. } => {
                "Using local data instead. Your changes may not be saved to the cloud."
            }
            Notice::SavedLocallyOnly { .. } => {
                "Your board was saved locally, but not to the cloud."
            }
            Notice::SaveFailed { .. } => "Your latest changes could not be stored anywhere.",
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Notice::UsingOfflineCopy { reason }
            | Notice::SavedLocallyOnly { reason }
            | Notice::SaveFailed { reason } => reason,
        }
    }
}
