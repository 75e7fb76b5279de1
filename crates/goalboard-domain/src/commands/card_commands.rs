use super::Command;
use crate::{Board, Card, CardId, CardUpdate, ColumnId, ParkingStatus};
use goalboard_core::{GoalboardError, GoalboardResult};
use std::collections::HashSet;

/// Append a prepared card to the end of its column
pub struct AddCard {
    pub card: Card,
}

impl Command for AddCard {
    fn execute(&self, board: &mut Board) -> GoalboardResult<()> {
        let column = board.column_mut(self.card.column).ok_or_else(|| {
            GoalboardError::NotFound(format!("column '{}'", self.card.column))
        })?;
        column.cards.push(self.card.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add card '{}' to {}", self.card.title, self.card.column)
    }
}

/// Merge content fields into a card, keeping its place
pub struct UpdateCard {
    pub card_id: CardId,
    pub updates: CardUpdate,
}

impl Command for UpdateCard {
    fn execute(&self, board: &mut Board) -> GoalboardResult<()> {
        if let Some(card) = board.find_card_mut(&self.card_id) {
            card.update(self.updates.clone());
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Update card {}", self.card_id)
    }
}

pub struct DeleteCard {
    pub card_id: CardId,
}

impl Command for DeleteCard {
    fn execute(&self, board: &mut Board) -> GoalboardResult<()> {
        for column in board.columns.iter_mut() {
            column.cards.retain(|c| c.id != self.card_id);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete card {}", self.card_id)
    }
}

/// Move a card to the end of another column, re-tagging it for the parking lot
pub struct MoveCard {
    pub card_id: CardId,
    pub source: ColumnId,
    pub destination: ColumnId,
}

impl MoveCard {
    fn retag(&self, card: &mut Card) {
        if self.destination.is_parking() {
            let status = if self.source.is_parking() {
                card.parking_status().toggled()
            } else {
                ParkingStatus::Future
            };
            card.set_parking_status(status);
        } else {
            card.set_parking_status(ParkingStatus::Unparked);
        }
    }
}

impl Command for MoveCard {
    fn execute(&self, board: &mut Board) -> GoalboardResult<()> {
        if board.column(self.destination).is_none() {
            tracing::debug!("Move target column '{}' does not exist", self.destination);
            return Ok(());
        }

        let Some(source) = board.column_mut(self.source) else {
            return Ok(());
        };
        let Some(position) = source.position_of(&self.card_id) else {
            return Ok(());
        };

        let mut card = source.cards.remove(position);
        self.retag(&mut card);
        card.column = self.destination;

        if let Some(destination) = board.column_mut(self.destination) {
            destination.cards.push(card);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Move card {} from {} to {}",
            self.card_id, self.source, self.destination
        )
    }
}

/// Reorder a column's cards. The ids must be a permutation of the column's
/// current cards; anything else is ignored.
pub struct ReorderCards {
    pub column: ColumnId,
    pub card_ids: Vec<CardId>,
}

impl ReorderCards {
    fn is_permutation_of(&self, current: &[Card]) -> bool {
        if self.card_ids.len() != current.len() {
            return false;
        }
        let requested: HashSet<&CardId> = self.card_ids.iter().collect();
        requested.len() == self.card_ids.len() && current.iter().all(|c| requested.contains(&c.id))
    }
}

impl Command for ReorderCards {
    fn execute(&self, board: &mut Board) -> GoalboardResult<()> {
        let Some(column) = board.column_mut(self.column) else {
            return Ok(());
        };

        if !self.is_permutation_of(&column.cards) {
            tracing::warn!(
                "Ignoring reorder of '{}': {} ids given for {} cards, not a permutation",
                self.column,
                self.card_ids.len(),
                column.cards.len()
            );
            return Ok(());
        }

        let mut remaining = std::mem::take(&mut column.cards);
        for id in &self.card_ids {
            if let Some(pos) = remaining.iter().position(|c| &c.id == id) {
                column.cards.push(remaining.swap_remove(pos));
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Reorder {} cards in {}", self.card_ids.len(), self.column)
    }
}
