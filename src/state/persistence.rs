use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::history::EditStack;
use crate::serializer::Serializer;
use crate::util::time;

/// Version of the save envelope written by this build.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Errors that can occur during state persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access state: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No saved state under key {0:?}")]
    MissingSave(String),

    #[error("Invalid state data: {0}")]
    InvalidState(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Envelope around a serialized edit stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    /// Identity of the document, stable across saves
    pub id: Uuid,
    /// Save format version
    pub version: u32,
    /// Seconds since the UNIX epoch when the snapshot was taken
    pub timestamp: u64,
    /// The tagged `EditStack` tree
    pub tree: Value,
}

impl SaveSnapshot {
    pub fn new(id: Uuid, tree: Value) -> Self {
        Self {
            id,
            version: SAVE_FORMAT_VERSION,
            timestamp: time::timestamp_secs(),
            tree,
        }
    }
}

/// Key-value storage transport for serialized saves.
pub trait SaveStore {
    fn write(&mut self, key: &str, json: &str) -> PersistenceResult<()>;

    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> PersistenceResult<Option<String>>;
}

/// Stores each key as `<key>.json` in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory where state files are stored
    state_dir: PathBuf,
}

impl FileStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.state_dir.join(format!("{}.json", key))
    }
}

impl SaveStore for FileStore {
    fn write(&mut self, key: &str, json: &str) -> PersistenceResult<()> {
        // Create state directory if it doesn't exist
        fs::create_dir_all(&self.state_dir)?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }

    fn read(&self, key: &str) -> PersistenceResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }
}

/// In-process store, for tests and headless sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn write(&mut self, key: &str, json: &str) -> PersistenceResult<()> {
        self.entries.insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}

/// Saves and restores the edit stack through a [`SaveStore`].
#[derive(Debug)]
pub struct StatePersistence<S: SaveStore> {
    store: S,
    key: String,
    serializer: Serializer,
    /// Document identity carried from save to save
    document_id: Uuid,
    /// Timestamp of the last successful save
    last_saved: Option<u64>,
}

impl<S: SaveStore> StatePersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            serializer: Serializer::new(),
            document_id: Uuid::new_v4(),
            last_saved: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn last_saved(&self) -> Option<u64> {
        self.last_saved
    }

    /// Start a fresh document identity, e.g. after the user starts over.
    pub fn reset_document(&mut self) {
        self.document_id = Uuid::new_v4();
    }

    pub fn save(&mut self, stack: &EditStack) -> PersistenceResult<()> {
        let snapshot = SaveSnapshot::new(self.document_id, self.serializer.serialize_edit_stack(stack));
        let json = serde_json::to_string_pretty(&snapshot)?;
        self.store.write(&self.key, &json)?;
        self.last_saved = Some(snapshot.timestamp);
        log::info!(
            "Saved {} edits under {:?} ({} bytes)",
            stack.edits().len(),
            self.key,
            json.len()
        );
        Ok(())
    }

    /// Save, logging instead of returning a failure.
    pub fn try_save(&mut self, stack: &EditStack) -> bool {
        match self.save(stack) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save: {}", e);
                false
            }
        }
    }

    pub fn load_snapshot(&self) -> PersistenceResult<SaveSnapshot> {
        let json = self
            .store
            .read(&self.key)?
            .ok_or_else(|| PersistenceError::MissingSave(self.key.clone()))?;
        let snapshot: SaveSnapshot = serde_json::from_str(&json)?;
        if snapshot.version > SAVE_FORMAT_VERSION {
            log::warn!(
                "Save version {} is newer than supported version {}",
                snapshot.version,
                SAVE_FORMAT_VERSION
            );
        }
        Ok(snapshot)
    }

    /// Load and rebuild the stack, or report why that was not possible.
    pub fn try_restore(&mut self) -> PersistenceResult<EditStack> {
        let snapshot = self.load_snapshot()?;
        let stack = self
            .serializer
            .deserialize_edit_stack(&snapshot.tree)
            .ok_or_else(|| PersistenceError::InvalidState("save holds no EditStack".to_string()))?;
        self.document_id = snapshot.id;
        log::info!(
            "Restored {} edits from save taken {}s ago",
            stack.edits().len(),
            time::age_of(snapshot.timestamp).as_secs()
        );
        Ok(stack)
    }

    /// Restore the saved stack. Any failure is logged and yields an empty
    /// stack that still asks for a full redraw.
    pub fn restore(&mut self) -> EditStack {
        match self.try_restore() {
            Ok(stack) => stack,
            Err(PersistenceError::MissingSave(key)) => {
                log::info!("No saved state under {:?}, starting empty", key);
                Self::empty_stack()
            }
            Err(e) => {
                log::warn!("Failed to restore save: {}", e);
                Self::empty_stack()
            }
        }
    }

    fn empty_stack() -> EditStack {
        EditStack::from_parts(Vec::new(), None, Vec::new(), Vec::new())
    }
}

/// Frame-driven save trigger: work queued on dirty frames is released on
/// the first clean frame after it, so a burst of edits saves once.
#[derive(Debug, Clone, Default)]
pub struct SaveDebouncer {
    queued: bool,
}

impl SaveDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&mut self) {
        self.queued = true;
    }

    pub fn is_queued(&self) -> bool {
        self.queued
    }

    /// Report a clean frame. True exactly once per queued burst.
    pub fn poll_idle(&mut self) -> bool {
        std::mem::take(&mut self.queued)
    }
}
