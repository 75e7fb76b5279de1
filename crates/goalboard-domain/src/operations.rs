use crate::{Card, CardId, CardUpdate, Column, ColumnId};
use goalboard_core::GoalboardResult;

/// The command interface offered to whatever renders the board.
///
/// Unknown card ids make `update_card`, `delete_card` and `move_card` silent
/// no-ops; a closed edit dialog racing a delete is not an error.
pub trait BoardOperations {
    fn columns(&self) -> &[Column];
    fn is_loading(&self) -> bool;

    fn add_card(&mut self, column: ColumnId, title: String) -> GoalboardResult<Card>;
    fn get_card(&self, id: &CardId) -> Option<&Card>;
    fn update_card(&mut self, id: CardId, updates: CardUpdate) -> GoalboardResult<()>;
    fn delete_card(&mut self, id: CardId) -> GoalboardResult<()>;
    fn move_card(
        &mut self,
        id: CardId,
        source: ColumnId,
        destination: ColumnId,
    ) -> GoalboardResult<()>;
    fn update_card_order(&mut self, column: ColumnId, card_ids: Vec<CardId>)
        -> GoalboardResult<()>;
    fn import_board(&mut self, columns: Vec<Column>) -> GoalboardResult<()>;
}
