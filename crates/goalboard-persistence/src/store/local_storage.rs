use crate::store::atomic_writer::AtomicWriter;
use crate::traits::LocalStorage;
use goalboard_core::{GoalboardError, GoalboardResult};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// On-device slots stored as `<key>.json` files in one directory.
#[derive(Debug, Clone)]
pub struct FileLocalStorage {
    dir: PathBuf,
}

impl FileLocalStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl LocalStorage for FileLocalStorage {
    fn get_item(&self, key: &str) -> GoalboardResult<Option<String>> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> GoalboardResult<()> {
        AtomicWriter::write_atomic_blocking(&self.slot_path(key), value.as_bytes())
    }
}

/// In-process slots, with an optional switch that makes every write fail.
#[derive(Debug, Default)]
pub struct MemoryLocalStorage {
    items: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> GoalboardResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| GoalboardError::Internal("local storage lock poisoned".to_string()))
    }
}

impl LocalStorage for MemoryLocalStorage {
    fn get_item(&self, key: &str) -> GoalboardResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> GoalboardResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GoalboardError::Io(std::io::Error::new(
                ErrorKind::Other,
                "local storage quota exceeded",
            )));
        }
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
