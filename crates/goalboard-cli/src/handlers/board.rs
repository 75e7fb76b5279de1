use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use goalboard_domain::{BoardExporter, BoardImporter, BoardOperations};
use std::path::PathBuf;

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Show => {
            output::output_list(ctx.session.columns().to_vec());
        }
        BoardAction::Export { output } => {
            let dir = output.unwrap_or_else(|| PathBuf::from("."));
            let board = ctx.session.snapshot();
            let path = BoardExporter::export_to_dir(&board, &dir)?;
            output::output_success(serde_json::json!({
                "path": path.display().to_string(),
                "columns": board.columns.len(),
            }));
        }
        BoardAction::Import { file } => {
            let board = BoardImporter::import_from_file(&file)
                .map_err(|e| anyhow::anyhow!("Failed to import {}: {}", file.display(), e))?;
            ctx.session.import_board(board.columns)?;
            output::output_list(ctx.session.columns().to_vec());
        }
    }
    Ok(())
}
