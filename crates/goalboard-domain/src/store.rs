//! Authoritative in-memory board.

use std::sync::Arc;

use goalboard_core::GoalboardResult;

use crate::commands::{AddCard, Command, DeleteCard, ImportBoard, MoveCard, ReorderCards, UpdateCard};
use crate::{Board, BoardOperations, Card, CardId, CardUpdate, Column, ColumnId};

/// Owns the board and publishes an immutable snapshot after every mutation.
///
/// A fresh store is empty and loading until a board is installed. Mutations
/// made while loading apply to the empty board and are replaced on install.
#[derive(Debug)]
pub struct BoardStore {
    board: Arc<Board>,
    loading: bool,
    revision: u64,
}

impl BoardStore {
    pub fn new() -> Self {
        Self {
            board: Arc::new(Board::default()),
            loading: true,
            revision: 0,
        }
    }

    pub fn with_board(board: Board) -> Self {
        Self {
            board: Arc::new(board),
            loading: false,
            revision: 0,
        }
    }

    /// Run a command against a copy of the board and publish the copy.
    pub fn execute(&mut self, command: &dyn Command) -> GoalboardResult<Arc<Board>> {
        let description = command.description();
        tracing::debug!("Executing: {}", description);

        let mut next = Board::clone(&self.board);
        command.execute(&mut next)?;

        self.board = Arc::new(next);
        self.revision += 1;
        Ok(self.snapshot())
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Replace the board with a freshly loaded one and mark the store ready.
    pub fn install(&mut self, board: Board) -> Arc<Board> {
        self.board = Arc::new(board);
        self.loading = false;
        self.revision += 1;
        self.snapshot()
    }

    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardOperations for BoardStore {
    fn columns(&self) -> &[Column] {
        &self.board.columns
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn add_card(&mut self, column: ColumnId, title: String) -> GoalboardResult<Card> {
        let card = Card::new(column, title);
        self.execute(&AddCard { card: card.clone() })?;
        Ok(card)
    }

    fn get_card(&self, id: &CardId) -> Option<&Card> {
        self.board.find_card(id)
    }

    fn update_card(&mut self, id: CardId, updates: CardUpdate) -> GoalboardResult<()> {
        self.execute(&UpdateCard {
            card_id: id,
            updates,
        })
        .map(|_| ())
    }

    fn delete_card(&mut self, id: CardId) -> GoalboardResult<()> {
        self.execute(&DeleteCard { card_id: id }).map(|_| ())
    }

    fn move_card(
        &mut self,
        id: CardId,
        source: ColumnId,
        destination: ColumnId,
    ) -> GoalboardResult<()> {
        self.execute(&MoveCard {
            card_id: id,
            source,
            destination,
        })
        .map(|_| ())
    }

    fn update_card_order(
        &mut self,
        column: ColumnId,
        card_ids: Vec<CardId>,
    ) -> GoalboardResult<()> {
        self.execute(&ReorderCards { column, card_ids }).map(|_| ())
    }

    fn import_board(&mut self, columns: Vec<Column>) -> GoalboardResult<()> {
        self.execute(&ImportBoard { columns }).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_board, FieldUpdate, ParkingStatus};

    fn loaded_store() -> BoardStore {
        BoardStore::with_board(default_board())
    }

    fn first_id(store: &BoardStore, column: ColumnId) -> CardId {
        store.board().column(column).unwrap().cards[0].id.clone()
    }

    #[test]
    fn test_new_store_is_loading_and_empty() {
        let store = BoardStore::new();
        assert!(store.is_loading());
        assert!(store.columns().is_empty());
    }

    #[test]
    fn test_install_marks_ready() {
        let mut store = BoardStore::new();
        store.install(default_board());
        assert!(!store.is_loading());
        assert_eq!(store.columns().len(), 4);
    }

    #[test]
    fn test_add_card_appends_to_column() {
        let mut store = loaded_store();
        let card = store.add_card(ColumnId::Health, "Run 5k".to_string()).unwrap();

        let health = store.board().column(ColumnId::Health).unwrap();
        assert_eq!(health.cards.len(), 3);
        let last = health.cards.last().unwrap();
        assert_eq!(last.id, card.id);
        assert_eq!(last.title, "Run 5k");
        assert_eq!(last.description, "");
    }

    #[test]
    fn test_failed_command_leaves_snapshot_untouched() {
        let mut store = BoardStore::with_board(Board::default());
        let before = store.snapshot();
        let revision = store.revision();

        assert!(store.add_card(ColumnId::Health, "Orphan".to_string()).is_err());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let mut store = loaded_store();
        let before = store.snapshot();
        let id = first_id(&store, ColumnId::Create);

        store.delete_card(id.clone()).unwrap();

        assert!(before.find_card(&id).is_some());
        assert!(store.get_card(&id).is_none());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_update_card_keeps_position() {
        let mut store = loaded_store();
        let id = store.board().column(ColumnId::Family).unwrap().cards[1].id.clone();

        store
            .update_card(
                id.clone(),
                CardUpdate {
                    title: Some("Call parents on Sunday".to_string()),
                    progress: FieldUpdate::Set(40),
                    ..Default::default()
                },
            )
            .unwrap();

        let family = store.board().column(ColumnId::Family).unwrap();
        assert_eq!(family.cards[1].id, id);
        assert_eq!(family.cards[1].title, "Call parents on Sunday");
        assert_eq!(family.cards[1].progress, Some(40));
        assert_eq!(family.cards[1].column, ColumnId::Family);
    }

    #[test]
    fn test_unknown_ids_are_silent_noops() {
        let mut store = loaded_store();
        let before = store.board().clone();
        let ghost = CardId::from("no-such-card");

        store.update_card(ghost.clone(), CardUpdate::default()).unwrap();
        store.delete_card(ghost.clone()).unwrap();
        store
            .move_card(ghost, ColumnId::Health, ColumnId::Parking)
            .unwrap();

        assert_eq!(store.board(), &before);
    }

    #[test]
    fn test_parking_cycle() {
        let mut store = loaded_store();
        let id = first_id(&store, ColumnId::Health);

        store
            .move_card(id.clone(), ColumnId::Health, ColumnId::Parking)
            .unwrap();
        let card = store.get_card(&id).unwrap();
        assert_eq!(card.column, ColumnId::Parking);
        assert_eq!(card.is_future, Some(true));
        assert_eq!(card.is_completed, Some(false));

        store
            .move_card(id.clone(), ColumnId::Parking, ColumnId::Parking)
            .unwrap();
        let card = store.get_card(&id).unwrap();
        assert_eq!(card.is_future, Some(false));
        assert_eq!(card.is_completed, Some(true));

        store
            .move_card(id.clone(), ColumnId::Parking, ColumnId::Parking)
            .unwrap();
        let card = store.get_card(&id).unwrap();
        assert_eq!(card.parking_status(), ParkingStatus::Future);
        assert_eq!(card.is_completed, Some(false));

        store
            .move_card(id.clone(), ColumnId::Parking, ColumnId::Health)
            .unwrap();
        let card = store.get_card(&id).unwrap();
        assert_eq!(card.column, ColumnId::Health);
        assert_eq!(card.is_future, None);
        assert_eq!(card.is_completed, None);
        assert!(store.board().is_consistent());
    }

    #[test]
    fn test_redrop_keeps_untagged_parked_card_untagged() {
        let mut store = loaded_store();
        let card = store
            .add_card(ColumnId::Parking, "Plain".to_string())
            .unwrap();

        store
            .move_card(card.id.clone(), ColumnId::Parking, ColumnId::Parking)
            .unwrap();

        let card = store.get_card(&card.id).unwrap();
        assert_eq!(card.is_future, Some(false));
        assert_eq!(card.is_completed, Some(false));
        assert!(store.board().is_consistent());
    }

    #[test]
    fn test_reorder_changes_only_order() {
        let mut store = loaded_store();
        let mut ids = store.board().column(ColumnId::Family).unwrap().card_ids();
        ids.reverse();

        store
            .update_card_order(ColumnId::Family, ids.clone())
            .unwrap();

        let family = store.board().column(ColumnId::Family).unwrap();
        assert_eq!(family.card_ids(), ids);
        assert_eq!(store.board().card_count(), 9);
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let mut store = loaded_store();
        let id = first_id(&store, ColumnId::Create);

        store.delete_card(id.clone()).unwrap();
        assert!(store.get_card(&id).is_none());
        assert_eq!(store.board().column(ColumnId::Create).unwrap().cards.len(), 1);
    }

    #[test]
    fn test_add_and_delete_sequences_stay_consistent() {
        let mut store = loaded_store();
        let mut added = Vec::new();

        for (i, column) in ColumnId::ALL.iter().cycle().take(12).enumerate() {
            let card = store.add_card(*column, format!("Goal {}", i)).unwrap();
            added.push(card.id);
            if i % 3 == 0 {
                store.delete_card(added[i / 2].clone()).unwrap();
            }
            assert!(store.board().is_consistent());
        }

        for id in added.iter().step_by(2) {
            store.delete_card(id.clone()).unwrap();
            assert!(store.board().is_consistent());
        }
    }
}
