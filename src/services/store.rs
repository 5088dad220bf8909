//! Persistent key/value storage

use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
    sync::Mutex,
};
use tracing::debug;

use crate::error::HostError;

pub type PersistKey = u32;

/// Durable integer storage that survives across app launches
pub trait PersistentStore: Send + Sync {
    fn exists(&self, key: PersistKey) -> bool;

    /// Read an integer value, `None` if the key was never written
    fn read_int(&self, key: PersistKey) -> Option<i32>;

    fn write_int(&self, key: PersistKey, value: i32) -> Result<(), HostError>;

    /// Remove a key; deleting an absent key is not an error
    fn delete(&self, key: PersistKey) -> Result<(), HostError>;
}

/// Store kept in memory and, when opened from a path, mirrored to a JSON file
#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    values: Mutex<BTreeMap<PersistKey, i32>>,
}

impl JsonStore {
    /// Create a store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Mutex::new(BTreeMap::new()),
        }
    }

    /// Open the store file at `path`, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HostError> {
        let path = path.into();
        let values: BTreeMap<PersistKey, i32> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|source| HostError::Serde {
                what: "persistent store",
                source,
            })?
        } else {
            BTreeMap::new()
        };

        debug!("Opened persistent store at {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path: Some(path),
            values: Mutex::new(values),
        })
    }

    fn flush(&self, values: &BTreeMap<PersistKey, i32>) -> Result<(), HostError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(values).map_err(|source| HostError::Serde {
            what: "persistent store",
            source,
        })?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl PersistentStore for JsonStore {
    fn exists(&self, key: PersistKey) -> bool {
        self.values
            .lock()
            .map(|values| values.contains_key(&key))
            .unwrap_or(false)
    }

    fn read_int(&self, key: PersistKey) -> Option<i32> {
        self.values.lock().ok().and_then(|values| values.get(&key).copied())
    }

    fn write_int(&self, key: PersistKey, value: i32) -> Result<(), HostError> {
        let mut values = self.values.lock()?;
        let mut updated = values.clone();
        updated.insert(key, value);
        self.flush(&updated)?;
        *values = updated;
        Ok(())
    }

    fn delete(&self, key: PersistKey) -> Result<(), HostError> {
        let mut values = self.values.lock()?;
        if !values.contains_key(&key) {
            return Ok(());
        }

        let mut updated = values.clone();
        updated.remove(&key);
        self.flush(&updated)?;
        *values = updated;
        Ok(())
    }
}
