pub mod board;
pub mod card;
