use crate::Board;
use chrono::{NaiveDate, Utc};
use goalboard_core::{GoalboardError, GoalboardResult};
use std::path::{Path, PathBuf};

pub struct BoardExporter;

impl BoardExporter {
    /// Serialize the column list as pretty-printed JSON.
    pub fn export_to_json(board: &Board) -> GoalboardResult<String> {
        serde_json::to_string_pretty(board)
            .map_err(|e| GoalboardError::Serialization(e.to_string()))
    }

    pub fn export_filename(date: NaiveDate) -> String {
        format!("kanban-board-{}.json", date.format("%Y-%m-%d"))
    }

    /// Write today's export into `dir` and return the file path.
    pub fn export_to_dir(board: &Board, dir: &Path) -> GoalboardResult<PathBuf> {
        let path = dir.join(Self::export_filename(Utc::now().date_naive()));
        let json = Self::export_to_json(board)?;
        std::fs::write(&path, json)?;
        tracing::info!("Exported board to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_board;
    use tempfile::tempdir;

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            BoardExporter::export_filename(date),
            "kanban-board-2024-03-09.json"
        );
    }

    #[test]
    fn test_export_is_pretty_array() {
        let json = BoardExporter::export_to_json(&default_board()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains('\n'));
        assert!(json.contains("\"themeColor\": \"green\""));
    }

    #[test]
    fn test_export_to_dir() {
        let dir = tempdir().unwrap();
        let path = BoardExporter::export_to_dir(&default_board(), dir.path()).unwrap();

        assert!(path.exists());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("kanban-board-"));
        assert!(name.ends_with(".json"));
    }
}
