pub mod debounce;
pub mod loader;
pub mod writer;

pub use debounce::SaveScheduler;
pub use loader::{BoardLoader, LoadOutcome, LoadSource};
pub use writer::{BoardWriter, SaveOutcome};
