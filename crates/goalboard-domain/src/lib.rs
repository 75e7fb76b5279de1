pub mod board;
pub mod card;
pub mod column;
pub mod commands;
pub mod defaults;
pub mod export;
pub mod field_update;
pub mod media;
pub mod operations;
pub mod schema;
pub mod store;

pub use board::Board;
pub use card::{Card, CardId, CardUpdate, ParkingStatus};
pub use column::{Column, ColumnId};
pub use defaults::default_board;
pub use export::{BoardExporter, BoardImporter};
pub use field_update::FieldUpdate;
pub use operations::BoardOperations;
pub use schema::{migrate, LegacyCard, LegacyColumn, LegacyColumnId, PersistedBoard};
pub use store::BoardStore;
