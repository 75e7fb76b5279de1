use goalboard_domain::{BoardOperations, ColumnId, ParkingStatus};
use goalboard_persistence::{
    BoardSession, FileLocalStorage, JsonDirRemoteStore, LoadSource, LocalStorage, SessionConfig,
    UserId,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn session(dir: &TempDir) -> BoardSession {
    let remote = Arc::new(JsonDirRemoteStore::new(dir.path().join("remote")));
    let local = Arc::new(FileLocalStorage::new(dir.path().join("local")));
    let config = SessionConfig {
        save_debounce: Duration::from_millis(10),
        ..SessionConfig::default()
    };
    BoardSession::new(remote, local, config)
}

#[tokio::test]
async fn test_board_survives_restart() {
    let dir = TempDir::new().unwrap();
    let alice = UserId::new("alice").unwrap();

    let mut first = session(&dir);
    assert_eq!(first.load(Some(alice.clone())).await, LoadSource::Seeded);
    let card = first
        .add_card(ColumnId::Health, "Run 5k".to_string())
        .unwrap();
    first
        .move_card(card.id.clone(), ColumnId::Health, ColumnId::Parking)
        .unwrap();
    assert!(first.flush().await.is_some());
    drop(first);

    let mut second = session(&dir);
    assert_eq!(second.load(Some(alice)).await, LoadSource::Remote);
    let reloaded = second.get_card(&card.id).unwrap();
    assert_eq!(reloaded.column, ColumnId::Parking);
    assert_eq!(reloaded.parking_status(), ParkingStatus::Future);
}

#[tokio::test]
async fn test_legacy_local_slot_is_migrated_without_identity() {
    let dir = TempDir::new().unwrap();
    let local = FileLocalStorage::new(dir.path().join("local"));
    let legacy = r#"[
        {"id": "health", "title": "Health", "icon": "heart-pulse", "themeColor": "green", "cards": []},
        {"id": "completed", "title": "Completed", "cards": [
            {"id": "6f1c2d1e-0c1b-4a57-9d55-3c2f0d7c1a11", "title": "Finish marathon"}
        ]}
    ]"#;
    local.set_item("kanbanColumns", legacy).unwrap();

    let mut session = session(&dir);
    assert_eq!(session.load(None).await, LoadSource::LocalCache);

    let ids: Vec<ColumnId> = session.columns().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![ColumnId::Health, ColumnId::Parking]);
    let parked = &session.columns()[1].cards[0];
    assert_eq!(parked.parking_status(), ParkingStatus::Completed);
}
