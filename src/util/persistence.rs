use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::{debug, info};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "TariffIQ";
const APP_NAME: &str = "TariffIQ";
const SESSION_FILE: &str = "session.json";

/// Durable slot holding one serialized session record.
pub trait SessionStorage {
    /// Raw persisted text, `None` when nothing (readable) is stored.
    fn load(&self) -> Option<String>;
    fn save(&self, raw: &str) -> Result<(), PersistSaveError>;
    fn clear(&self) -> Result<(), PersistSaveError>;
}

/// Stores the session as a JSON file in the platform config directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: Option<PathBuf>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// `<config dir>/TariffIQ/session.json`, or no storage at all when the
    /// platform has no home directory.
    pub fn in_config_dir() -> Self {
        let path = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().join(SESSION_FILE));
        if let Some(path) = &path {
            info!(path = %path.display(), "session storage");
        }
        Self { path }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        match fs::read_to_string(path) {
            Ok(data) => Some(data),
            Err(err) => {
                debug!(path = %path.display(), "no persisted session: {err}");
                None
            }
        }
    }

    fn save(&self, raw: &str) -> Result<(), PersistSaveError> {
        let path = self
            .path
            .as_ref()
            .ok_or(PersistSaveError::StorageUnavailable)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistSaveError> {
        let path = self
            .path
            .as_ref()
            .ok_or(PersistSaveError::StorageUnavailable)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Page-lifetime storage. Clones share the same slot, which lets tests
/// reopen a store against what a previous one wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.contents()
    }

    fn save(&self, raw: &str) -> Result<(), PersistSaveError> {
        *self.slot.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistSaveError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("session.json"));

        assert_eq!(storage.load(), None);
        storage.save("{\"name\":\"x\"}").unwrap();
        assert_eq!(storage.load().as_deref(), Some("{\"name\":\"x\"}"));

        storage.clear().unwrap();
        assert_eq!(storage.load(), None);
        // clearing twice is fine
        storage.clear().unwrap();
    }

    #[test]
    fn file_storage_without_path_is_unavailable() {
        let storage = FileStorage { path: None };
        assert!(storage.load().is_none());
        assert!(matches!(
            storage.save("{}"),
            Err(PersistSaveError::StorageUnavailable)
        ));
    }

    #[test]
    fn memory_storage_clones_share_slot() {
        let storage = MemoryStorage::default();
        let other = storage.clone();
        storage.save("abc").unwrap();
        assert_eq!(other.load().as_deref(), Some("abc"));
    }
}
