use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::card::{Card, CardId};
use crate::column::{Column, ColumnId};

/// The full ordered set of columns for one identity.
///
/// Serializes as a bare JSON array of columns, which is the format used by
/// the remote record, the local fallback slot, and export files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    pub fn find_card(&self, card_id: &CardId) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|col| col.cards.iter())
            .find(|card| &card.id == card_id)
    }

    pub fn find_card_mut(&mut self, card_id: &CardId) -> Option<&mut Card> {
        self.columns
            .iter_mut()
            .flat_map(|col| col.cards.iter_mut())
            .find(|card| &card.id == card_id)
    }

    /// Returns (column index, card index) of the card.
    pub fn locate_card(&self, card_id: &CardId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(col_idx, col)| {
            col.position_of(card_id).map(|card_idx| (col_idx, card_idx))
        })
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.columns.iter().flat_map(|col| col.cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|col| col.cards.len()).sum()
    }

    /// Describes every placement or tagging rule the board breaks.
    pub fn integrity_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let mut seen_columns = HashSet::new();
        let mut seen_cards = HashSet::new();

        for column in &self.columns {
            if !seen_columns.insert(column.id) {
                violations.push(format!("column '{}' appears more than once", column.id));
            }
            for card in &column.cards {
                if !seen_cards.insert(&card.id) {
                    violations.push(format!("card {} appears more than once", card.id));
                }
                if card.column != column.id {
                    violations.push(format!(
                        "card {} is in '{}' but records '{}'",
                        card.id, column.id, card.column
                    ));
                }
                if column.id.is_parking() {
                    if card.is_future == Some(true) && card.is_completed == Some(true) {
                        violations.push(format!("card {} is both future and completed", card.id));
                    }
                } else if card.has_parking_tags() {
                    violations.push(format!(
                        "card {} carries parking tags outside the parking lot",
                        card.id
                    ));
                }
            }
        }

        violations
    }

    pub fn is_consistent(&self) -> bool {
        self.integrity_violations().is_empty()
    }

    /// Rewrite every card's `column` field to the column that holds it and
    /// normalize its parking tags.
    pub fn normalize(&mut self) {
        for column in self.columns.iter_mut() {
            for card in column.cards.iter_mut() {
                card.column = column.id;
                card.normalize_tags();
            }
        }
    }
}
