use crate::Board;
use goalboard_core::GoalboardResult;

pub mod board_commands;
pub mod card_commands;

pub use board_commands::*;
pub use card_commands::*;

/// A mutation of the board.
///
/// Commands run against a working copy; the store only publishes the copy
/// when `execute` returns `Ok`, so a failing command leaves no trace.
pub trait Command: Send + Sync {
    fn execute(&self, board: &mut Board) -> GoalboardResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}
