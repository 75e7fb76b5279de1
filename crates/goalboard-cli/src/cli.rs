use clap::{Args, Parser, Subcommand};
use goalboard_domain::{CardId, ColumnId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "goalboard")]
#[command(about = "A personal goal board with a parking lot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the board store (or set GOALBOARD_DATA_DIR)
    #[arg(long, value_name = "DIR", env = "GOALBOARD_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Identity whose board to open; without one only the local copy is used
    #[arg(long, value_name = "ID", env = "GOALBOARD_USER", global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Card operations
    Card(CardCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Print every column with its cards
    Show,
    /// Write the board to kanban-board-YYYY-MM-DD.json
    Export {
        /// Target directory (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Replace the board with the contents of an export file
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a card to the end of a column
    Add {
        /// health, family or create
        #[arg(long)]
        column: ColumnId,
        #[arg(long)]
        title: String,
    },
    /// Get a specific card
    Get {
        #[arg(long)]
        id: CardId,
    },
    /// Update a card
    Update(CardUpdateArgs),
    /// Delete a card
    Delete {
        #[arg(long)]
        id: CardId,
    },
    /// Move a card to another column; moving within the parking lot toggles its tag
    Move {
        #[arg(long)]
        id: CardId,
        /// Column the card is in (defaults to its current column)
        #[arg(long)]
        from: Option<ColumnId>,
        #[arg(long)]
        to: ColumnId,
    },
    /// Reorder the cards of a column
    Reorder {
        #[arg(long)]
        column: ColumnId,
        /// Every card id of the column, comma separated, in the new order
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<CardId>,
    },
    /// Print the embed URL for the card's YouTube link
    Embed {
        #[arg(long)]
        id: CardId,
    },
}

#[derive(Args)]
pub struct CardUpdateArgs {
    #[arg(long)]
    pub id: CardId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "clear_youtube_link")]
    pub youtube_link: Option<String>,
    #[arg(long)]
    pub clear_youtube_link: bool,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100), conflicts_with = "clear_progress")]
    pub progress: Option<u8>,
    #[arg(long)]
    pub clear_progress: bool,
}
