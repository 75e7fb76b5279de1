use goalboard_core::GoalboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::card::{Card, CardId};

/// Closed set of categories a card can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Health,
    Family,
    Create,
    Parking,
}

impl ColumnId {
    pub const ALL: [ColumnId; 4] = [
        ColumnId::Health,
        ColumnId::Family,
        ColumnId::Create,
        ColumnId::Parking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Health => "health",
            ColumnId::Family => "family",
            ColumnId::Create => "create",
            ColumnId::Parking => "parking",
        }
    }

    pub fn is_parking(self) -> bool {
        self == ColumnId::Parking
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = GoalboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "health" => Ok(ColumnId::Health),
            "family" => Ok(ColumnId::Family),
            "create" => Ok(ColumnId::Create),
            "parking" => Ok(ColumnId::Parking),
            other => Err(GoalboardError::Validation(format!(
                "Unknown column '{}'. Expected one of: health, family, create, parking",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub theme_color: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: ColumnId, title: &str, icon: &str, theme_color: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            icon: icon.to_string(),
            theme_color: theme_color.to_string(),
            cards: Vec::new(),
        }
    }

    /// The parking lot column with its fixed presentation metadata.
    pub fn parking_lot() -> Self {
        Self::new(ColumnId::Parking, "Parking Lot", "circle-parking", "slate")
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == card_id)
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.position_of(card_id).is_some()
    }

    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_id_round_trips_through_str() {
        for id in ColumnId::ALL {
            assert_eq!(id.as_str().parse::<ColumnId>().unwrap(), id);
        }
        assert_eq!(" Parking ".parse::<ColumnId>().unwrap(), ColumnId::Parking);
    }

    #[test]
    fn test_unknown_column_id_is_rejected() {
        let err = "future".parse::<ColumnId>().unwrap_err();
        assert!(matches!(err, GoalboardError::Validation(_)));
    }

    #[test]
    fn test_column_serializes_camel_case() {
        let column = Column::parking_lot();
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["id"], "parking");
        assert_eq!(json["themeColor"], "slate");
        assert!(json["cards"].as_array().unwrap().is_empty());
    }
}
