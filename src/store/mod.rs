//! Persistence boundary for flow documents.
//!
//! The core never performs I/O itself; everything goes through the
//! [`FlowStore`] contract. Saves are full-document replacements with no
//! optimistic-concurrency check — the last writer wins — and deletion lives
//! here, never inside the editing core.

use crate::error::StoreError;
use crate::flow::{FlowDocument, wire};
use ahash::AHashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load/save contract consumed by the editing session.
pub trait FlowStore {
    /// Loads the document stored under `id`, or [`StoreError::NotFound`].
    fn load(&self, id: &str) -> Result<FlowDocument, StoreError>;

    /// Persists `document` under `id`, replacing any previous value.
    fn save(&mut self, id: &str, document: &FlowDocument) -> Result<(), StoreError>;

    /// All stored document ids, sorted.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Removes the document stored under `id`, or [`StoreError::NotFound`].
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and unsaved drafts. Documents are held in
/// their wire encoding so loads exercise the same normalization path as the
/// on-disk store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlowStore for MemoryStore {
    fn load(&self, id: &str) -> Result<FlowDocument, StoreError> {
        let json = self
            .documents
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(wire::decode(json)?)
    }

    fn save(&mut self, id: &str, document: &FlowDocument) -> Result<(), StoreError> {
        let json = wire::encode(document)?;
        self.documents.insert(id.to_string(), json);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids: Vec<String> = self.documents.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Directory-backed store: one pretty-printed `<id>.json` file per flow.
#[derive(Debug)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens (and creates, if needed) the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::Io(format!("could not create '{}': {}", root.display(), e)))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        // Ids become file names; path separators must not escape the root.
        if id.is_empty() || id.contains(['/', '\\']) {
            return Err(StoreError::Io(format!("invalid flow id '{}'", id)));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }
}

impl FlowStore for DirectoryStore {
    fn load(&self, id: &str) -> Result<FlowDocument, StoreError> {
        let path = self.path_for(id)?;
        let json = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(id.to_string()),
            _ => StoreError::Io(format!("could not read '{}': {}", path.display(), e)),
        })?;
        debug!(flow_id = %id, path = %path.display(), "flow document loaded");
        Ok(wire::decode(&json)?)
    }

    fn save(&mut self, id: &str, document: &FlowDocument) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        let json = wire::encode_pretty(document)?;
        fs::write(&path, json)
            .map_err(|e| StoreError::Io(format!("could not write '{}': {}", path.display(), e)))?;
        debug!(flow_id = %id, path = %path.display(), "flow document saved");
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            StoreError::Io(format!("could not list '{}': {}", self.root.display(), e))
        })?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                StoreError::Io(format!("could not list '{}': {}", self.root.display(), e))
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(id.to_string()),
            _ => StoreError::Io(format!("could not delete '{}': {}", path.display(), e)),
        })
    }
}
