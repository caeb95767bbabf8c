use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::HandoffError;

/// Named string entries that survive a page navigation.
pub trait DraftStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError>;
    fn set(&self, key: &str, value: String) -> Result<(), HandoffError>;
    fn remove(&self, key: &str) -> Result<(), HandoffError>;
}

#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.is_empty())
            .unwrap_or(true)
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        let guard = self.entries.lock().map_err(|_| HandoffError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), HandoffError> {
        let mut guard = self.entries.lock().map_err(|_| HandoffError::Poisoned)?;
        guard.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), HandoffError> {
        let mut guard = self.entries.lock().map_err(|_| HandoffError::Poisoned)?;
        guard.remove(key);
        Ok(())
    }
}

/// One file per key under a directory, `<key>.json`.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    root: PathBuf,
}

impl FileDraftStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, HandoffError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, HandoffError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if !valid {
            return Err(HandoffError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl DraftStore for FileDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        match fs::read_to_string(self.entry_path(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), HandoffError> {
        fs::write(self.entry_path(key)?, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), HandoffError> {
        match fs::remove_file(self.entry_path(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
