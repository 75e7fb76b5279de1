use crate::schema::PersistedBoard;
use crate::Board;
use goalboard_core::{GoalboardError, GoalboardResult};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

const INVALID_DATA: &str = "The selected file contains invalid data";

pub struct BoardImporter;

impl BoardImporter {
    /// Parse and validate an import document.
    ///
    /// The document must be an array whose elements each have a truthy `id`,
    /// a truthy `title` and an array `cards`. Legacy layouts are converted.
    pub fn import_from_json(json: &str) -> GoalboardResult<Board> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| GoalboardError::Validation(format!("{}: {}", INVALID_DATA, e)))?;

        Self::validate_structure(&value)?;

        let board = PersistedBoard::decode(value)
            .map_err(|e| GoalboardError::Validation(format!("{}: {}", INVALID_DATA, e)))?
            .into_board();

        Self::validate_uniqueness(&board)?;
        Ok(board)
    }

    pub fn import_from_file(path: &Path) -> GoalboardResult<Board> {
        let content = std::fs::read_to_string(path)?;
        Self::import_from_json(&content)
    }

    fn validate_structure(value: &Value) -> GoalboardResult<()> {
        let columns = value.as_array().ok_or_else(|| {
            GoalboardError::Validation(format!("{}: expected an array of columns", INVALID_DATA))
        })?;

        for (index, column) in columns.iter().enumerate() {
            let has_id = column.get("id").is_some_and(is_truthy);
            let has_title = column.get("title").is_some_and(is_truthy);
            let has_cards = column.get("cards").is_some_and(Value::is_array);
            if !(has_id && has_title && has_cards) {
                return Err(GoalboardError::Validation(format!(
                    "{}: column {} needs an id, a title and a cards array",
                    INVALID_DATA, index
                )));
            }
        }
        Ok(())
    }

    fn validate_uniqueness(board: &Board) -> GoalboardResult<()> {
        let mut column_ids = HashSet::new();
        if let Some(dup) = board.columns.iter().find(|c| !column_ids.insert(c.id)) {
            return Err(GoalboardError::Validation(format!(
                "{}: column '{}' appears more than once",
                INVALID_DATA, dup.id
            )));
        }

        let mut card_ids = HashSet::new();
        if let Some(dup) = board.cards().find(|c| !card_ids.insert(&c.id)) {
            return Err(GoalboardError::Validation(format!(
                "{}: card {} appears more than once",
                INVALID_DATA, dup.id
            )));
        }
        Ok(())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
