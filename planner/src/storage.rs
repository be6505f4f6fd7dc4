//! Map library: saved maps and their index over a key-value store.
//!
//! DESIGN
//! ======
//! Each map is one JSON value under `hex-map-{id}`. A separate index under
//! `hex-map-list` holds a [`MapSummary`] per map so the library can be listed
//! without reading every map. Saving writes the map first and the index
//! second; a crash in between leaves a readable map that is missing from the
//! list, never a list entry without a map.
//!
//! ERROR HANDLING
//! ==============
//! Backend failures propagate. A corrupt index or map entry is logged and
//! treated as absent, so one bad value never locks the user out of the rest
//! of the library.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::PlannerError;
use crate::map::{HexMap, MapSummary};

const MAP_KEY_PREFIX: &str = "hex-map-";
const MAP_LIST_KEY: &str = "hex-map-list";

/// String values by string key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlannerError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PlannerError>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PlannerError>;
}

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlannerError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlannerError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PlannerError> {
        self.values.remove(key);
        Ok(())
    }
}

/// One file per key in a directory, created on first write.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PlannerError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(io::Error::new(ErrorKind::InvalidInput, format!("unusable storage key: {key:?}")).into());
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlannerError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlannerError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Write then rename so readers never see a half-written value.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PlannerError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Saved maps plus their index.
#[derive(Debug, Clone, Default)]
pub struct MapLibrary<S> {
    store: S,
}

impl<S: KeyValueStore> MapLibrary<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save `map` with a fresh `updatedAt` and upsert its index entry.
    /// Returns the entry written to the index.
    pub fn save(&mut self, map: &HexMap) -> Result<MapSummary, PlannerError> {
        let mut list = self.read_index()?;
        let mut saved = map.clone();
        saved.touch();
        self.store.set(&map_key(&saved.id), &serde_json::to_string(&saved)?)?;

        let summary = saved.summary();
        match list.iter_mut().find(|s| s.id == summary.id) {
            Some(entry) => entry.clone_from(&summary),
            None => list.push(summary.clone()),
        }
        self.store.set(MAP_LIST_KEY, &serde_json::to_string(&list)?)?;

        info!(map_id = %saved.id, name = %saved.name, tiles = saved.tiles.len(), "map saved");
        Ok(summary)
    }

    /// The stored map, or `None` if it is missing or unreadable. Empty
    /// palettes are refilled with the defaults.
    pub fn load(&self, id: &str) -> Result<Option<HexMap>, PlannerError> {
        let Some(text) = self.store.get(&map_key(id))? else {
            return Ok(None);
        };
        match serde_json::from_str::<HexMap>(&text) {
            Ok(mut map) => {
                map.fill_missing_palettes();
                Ok(Some(map))
            }
            Err(e) => {
                warn!(map_id = id, error = %e, "stored map unreadable");
                Ok(None)
            }
        }
    }

    /// Like [`Self::load`], but a missing map is an error.
    pub fn open(&self, id: &str) -> Result<HexMap, PlannerError> {
        self.load(id)?.ok_or_else(|| PlannerError::MapNotFound(id.to_owned()))
    }

    /// Index of saved maps in save order. An unreadable index reads as empty.
    #[must_use]
    pub fn list(&self) -> Vec<MapSummary> {
        match self.read_index() {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "map list unavailable");
                Vec::new()
            }
        }
    }

    /// The stored index. Backend failures propagate; a corrupt index reads
    /// as empty so the next write rebuilds it.
    fn read_index(&self) -> Result<Vec<MapSummary>, PlannerError> {
        let Some(text) = self.store.get(MAP_LIST_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&text) {
            Ok(list) => Ok(list),
            Err(e) => {
                warn!(error = %e, "map list unreadable");
                Ok(Vec::new())
            }
        }
    }

    /// Remove a map and its index entry.
    pub fn delete(&mut self, id: &str) -> Result<(), PlannerError> {
        let mut list = self.read_index()?;
        self.store.remove(&map_key(id))?;
        list.retain(|s| s.id != id);
        self.store.set(MAP_LIST_KEY, &serde_json::to_string(&list)?)?;
        info!(map_id = id, "map deleted");
        Ok(())
    }
}

fn map_key(id: &str) -> String {
    format!("{MAP_KEY_PREFIX}{id}")
}
