//! Decoding of persisted boards, including the legacy two-column layout.
//!
//! Older boards kept parked cards in separate "future" and "completed"
//! columns. Those payloads decode as [`PersistedBoard::Legacy`] and convert
//! one way into the single tagged parking column.

use goalboard_core::{GoalboardError, GoalboardResult};
use serde::Deserialize;
use serde_json::Value;

use crate::board::Board;
use crate::card::{lenient_progress, Card, CardId, ParkingStatus};
use crate::column::{Column, ColumnId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyColumnId {
    Health,
    Family,
    Create,
    Parking,
    Future,
    Completed,
}

impl LegacyColumnId {
    pub fn is_retired(id: &str) -> bool {
        matches!(id, "future" | "completed")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCard {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub youtube_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_progress")]
    pub progress: Option<u8>,
    #[serde(default)]
    pub is_future: Option<bool>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

impl LegacyCard {
    fn into_card(self, column: ColumnId) -> Card {
        let (is_future, is_completed) = if column.is_parking() {
            (self.is_future, self.is_completed)
        } else {
            (None, None)
        };
        Card {
            id: self.id,
            title: self.title,
            description: self.description,
            youtube_link: self.youtube_link,
            progress: self.progress,
            column,
            is_future,
            is_completed,
        }
    }

    fn into_parked(self, status: ParkingStatus) -> Card {
        let mut card = self.into_card(ColumnId::Parking);
        match status {
            ParkingStatus::Future => {
                card.is_future = Some(true);
                card.is_completed = None;
            }
            ParkingStatus::Completed => {
                card.is_future = None;
                card.is_completed = Some(true);
            }
            ParkingStatus::Unparked | ParkingStatus::Untagged => {}
        }
        card
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyColumn {
    pub id: LegacyColumnId,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub theme_color: String,
    #[serde(default)]
    pub cards: Vec<LegacyCard>,
}

impl LegacyColumn {
    fn into_column(self, id: ColumnId) -> Column {
        Column {
            id,
            title: self.title,
            icon: self.icon,
            theme_color: self.theme_color,
            cards: self.cards.into_iter().map(|c| c.into_card(id)).collect(),
        }
    }
}

/// A persisted board payload, classified by the category ids it contains.
#[derive(Debug, Clone)]
pub enum PersistedBoard {
    Legacy(Vec<LegacyColumn>),
    Current(Vec<Column>),
}

impl PersistedBoard {
    /// Classify and decode a JSON array of columns.
    pub fn decode(value: Value) -> GoalboardResult<Self> {
        let entries = value.as_array().ok_or_else(|| {
            GoalboardError::Serialization("Board payload must be an array of columns".to_string())
        })?;

        let is_legacy = entries.iter().any(|col| {
            col.get("id")
                .and_then(Value::as_str)
                .is_some_and(LegacyColumnId::is_retired)
        });

        if is_legacy {
            let columns: Vec<LegacyColumn> = serde_json::from_value(value)
                .map_err(|e| GoalboardError::Serialization(e.to_string()))?;
            Ok(PersistedBoard::Legacy(columns))
        } else {
            let columns: Vec<Column> = serde_json::from_value(value)
                .map_err(|e| GoalboardError::Serialization(e.to_string()))?;
            Ok(PersistedBoard::Current(columns))
        }
    }

    pub fn from_json_str(json: &str) -> GoalboardResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| GoalboardError::Serialization(e.to_string()))?;
        Self::decode(value)
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, PersistedBoard::Legacy(_))
    }

    /// Convert to the current layout with placement and tags normalized.
    pub fn into_board(self) -> Board {
        let mut board = match self {
            PersistedBoard::Current(columns) => Board::new(columns),
            PersistedBoard::Legacy(columns) => Self::convert_legacy(columns),
        };
        board.normalize();
        board
    }

    fn convert_legacy(legacy: Vec<LegacyColumn>) -> Board {
        let mut columns = Vec::new();
        let mut parking: Option<Column> = None;
        let mut future = Vec::new();
        let mut completed = Vec::new();

        for column in legacy {
            match column.id {
                LegacyColumnId::Health => columns.push(column.into_column(ColumnId::Health)),
                LegacyColumnId::Family => columns.push(column.into_column(ColumnId::Family)),
                LegacyColumnId::Create => columns.push(column.into_column(ColumnId::Create)),
                LegacyColumnId::Parking => {
                    let existing = column.into_column(ColumnId::Parking);
                    match parking.as_mut() {
                        Some(lot) => lot.cards.extend(existing.cards),
                        None => parking = Some(existing),
                    }
                }
                LegacyColumnId::Future => future.extend(
                    column
                        .cards
                        .into_iter()
                        .map(|c| c.into_parked(ParkingStatus::Future)),
                ),
                LegacyColumnId::Completed => completed.extend(
                    column
                        .cards
                        .into_iter()
                        .map(|c| c.into_parked(ParkingStatus::Completed)),
                ),
            }
        }

        let mut cards = parking.map(|lot| lot.cards).unwrap_or_default();
        cards.extend(future);
        cards.extend(completed);
        columns.push(Column::parking_lot().with_cards(cards));

        tracing::info!(
            "Converted legacy board layout into {} columns",
            columns.len()
        );
        Board::new(columns)
    }
}

/// Decode a persisted payload and bring it to the current layout.
pub fn migrate(value: Value) -> GoalboardResult<Board> {
    PersistedBoard::decode(value).map(PersistedBoard::into_board)
}
