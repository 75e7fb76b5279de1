pub mod atomic_writer;
pub mod json_dir_remote;
pub mod local_storage;
pub mod memory_remote;

pub use atomic_writer::AtomicWriter;
pub use json_dir_remote::JsonDirRemoteStore;
pub use local_storage::{FileLocalStorage, MemoryLocalStorage};
pub use memory_remote::MemoryRemoteStore;
