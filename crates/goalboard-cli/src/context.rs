use crate::output;
use goalboard_core::AppConfig;
use goalboard_persistence::{
    BoardSession, FileLocalStorage, JsonDirRemoteStore, Notice, SessionConfig, UserId,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;

/// One CLI invocation: a loaded session plus the notices it produces.
pub struct CliContext {
    pub session: BoardSession,
    notices: broadcast::Receiver<Notice>,
}

impl CliContext {
    /// Remote records live under `<data_dir>/remote`, the local slot under
    /// `<data_dir>/local`.
    pub async fn open(data_dir: &Path, identity: Option<UserId>, config: &AppConfig) -> Self {
        let remote = Arc::new(JsonDirRemoteStore::new(data_dir.join("remote")));
        let local = Arc::new(FileLocalStorage::new(data_dir.join("local")));

        let mut session = BoardSession::new(remote, local, SessionConfig::from_app_config(config));
        let notices = session.subscribe();
        let source = session.load(identity).await;
        tracing::debug!("Opened board in {} ({:?})", data_dir.display(), source);

        Self {
            session,
            notices,
        }
    }

    /// Commit any pending save and report notices raised along the way.
    pub async fn finish(&mut self) {
        self.session.flush().await;
        while let Ok(notice) = self.notices.try_recv() {
            output::output_notice(&notice);
        }
    }
}
