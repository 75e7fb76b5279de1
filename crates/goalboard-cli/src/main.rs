mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use goalboard_core::AppConfig;
use goalboard_persistence::UserId;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("GOALBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "goalboard", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load();
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.effective_data_dir());
    let identity = match cli.user {
        Some(user) => match UserId::new(user) {
            Ok(id) => Some(id),
            Err(e) => output::output_error(&e.to_string()),
        },
        None => None,
    };

    let mut ctx = CliContext::open(&data_dir, identity, &config).await;

    let result = match cli.command {
        Commands::Board(board_cmd) => handlers::board::handle(&mut ctx, board_cmd.action).await,
        Commands::Card(card_cmd) => handlers::card::handle(&mut ctx, card_cmd.action).await,
        Commands::Completions { .. } => Ok(()),
    };

    ctx.finish().await;

    if let Err(e) = result {
        output::output_error(&e.to_string());
    }
    Ok(())
}
