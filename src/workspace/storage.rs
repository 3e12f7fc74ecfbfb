//! Persistence of a workspace under a single key of a key-value store.
//!
//! The stored value, the export format and the import format are the same
//! JSON document, so anything exported can be imported or written straight
//! into a store.

use super::{IntoWorkspace, Workspace, WorkspaceDocument};
use crate::error::{StorageError, WorkspaceError};
use crate::schema::BlockRegistry;
use ahash::AHashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The key the editor's workspace is stored under.
pub const STORAGE_KEY: &str = "mainWorkspace";

/// A string key-value store, such as browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// An in-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store keeping each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

fn io_error(path: &Path, error: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| io_error(&path, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(io_error(&path, e)),
            _ => Ok(()),
        }
    }
}

/// Serializes `workspace` as a pretty-printed document.
pub fn export_workspace(workspace: &Workspace) -> Result<String, StorageError> {
    serde_json::to_string_pretty(&WorkspaceDocument::from(workspace))
        .map_err(|e| StorageError::Serialize(e.to_string()))
}

/// Replaces the contents of `workspace` with the parsed document.
///
/// On failure the workspace is left untouched and the error is returned.
pub fn import_workspace(
    workspace: &mut Workspace,
    json: &str,
    registry: &BlockRegistry,
) -> Result<(), WorkspaceError> {
    match json.into_workspace(registry) {
        Ok(imported) => {
            *workspace = imported;
            Ok(())
        }
        Err(e) => {
            warn!("rejected workspace import: {}", e);
            Err(e)
        }
    }
}

/// Stores `workspace` under [`STORAGE_KEY`].
pub fn save(workspace: &Workspace, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
    let json = export_workspace(workspace)?;
    store.set(STORAGE_KEY, &json)?;
    debug!("saved workspace ({} bytes)", json.len());
    Ok(())
}

/// Loads the workspace stored under [`STORAGE_KEY`], or `None` when nothing is stored.
pub fn load(
    store: &impl KeyValueStore,
    registry: &BlockRegistry,
) -> Result<Option<Workspace>, WorkspaceError> {
    let Some(json) = store.get(STORAGE_KEY)? else {
        debug!("no stored workspace under '{}'", STORAGE_KEY);
        return Ok(None);
    };
    json.as_str().into_workspace(registry).map(Some)
}

pub fn export_file(workspace: &Workspace, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let json = export_workspace(workspace)?;
    fs::write(path, json).map_err(|e| io_error(path, e))
}

pub fn import_file(
    workspace: &mut Workspace,
    path: impl AsRef<Path>,
    registry: &BlockRegistry,
) -> Result<(), WorkspaceError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    import_workspace(workspace, &json, registry)
}
