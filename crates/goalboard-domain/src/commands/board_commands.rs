use super::Command;
use crate::{Board, Column};
use goalboard_core::GoalboardResult;

/// Replace every column with an externally supplied set.
///
/// Card `column` fields are rewritten to match the column that holds them.
/// Parking tags are dropped outside the parking lot, and a parked card
/// tagged both future and completed keeps only completed.
pub struct ImportBoard {
    pub columns: Vec<Column>,
}

impl Command for ImportBoard {
    fn execute(&self, board: &mut Board) -> GoalboardResult<()> {
        let mut imported = Board::new(self.columns.clone());
        imported.normalize();
        *board = imported;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Import board with {} columns", self.columns.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_board, Card, ColumnId, ParkingStatus};

    #[test]
    fn test_import_replaces_columns() {
        let mut board = default_board();
        let imported = vec![Column::new(ColumnId::Health, "Body", "lotus", "green")];

        ImportBoard {
            columns: imported.clone(),
        }
        .execute(&mut board)
        .unwrap();

        assert_eq!(board.columns, imported);
    }

    #[test]
    fn test_import_normalizes_card_placement() {
        let mut stray = Card::new(ColumnId::Parking, "Misfiled".to_string());
        stray.is_future = Some(true);
        let column = Column::new(ColumnId::Family, "Family", "heart", "blue").with_cards(vec![stray]);

        let mut board = Board::default();
        ImportBoard {
            columns: vec![column],
        }
        .execute(&mut board)
        .unwrap();

        let card = &board.columns[0].cards[0];
        assert_eq!(card.column, ColumnId::Family);
        assert!(!card.has_parking_tags());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_import_resolves_double_tagged_parking_card() {
        let mut both = Card::new(ColumnId::Parking, "Finish course".to_string());
        both.is_future = Some(true);
        both.is_completed = Some(true);
        let mut plain = Card::new(ColumnId::Parking, "Someday".to_string());
        plain.is_future = Some(false);
        let parking = Column::parking_lot().with_cards(vec![both, plain]);

        let mut board = default_board();
        ImportBoard {
            columns: vec![parking],
        }
        .execute(&mut board)
        .unwrap();

        let cards = &board.columns[0].cards;
        assert_eq!(cards[0].parking_status(), ParkingStatus::Completed);
        assert_eq!(cards[0].is_future, Some(false));
        assert_eq!(cards[1].parking_status(), ParkingStatus::Untagged);
        assert!(board.is_consistent());
    }
}
