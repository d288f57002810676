use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::*;

/// Best time stored for a difficulty that has never been won.
pub const UNSET_BEST_TIME: u32 = 999;

/// Storage key used when none is given.
pub const DEFAULT_RECORDS_KEY: &str = "minesweeper_records";

/// Best completion time in seconds per difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BestTimes {
    easy: u32,
    normal: u32,
    hard: u32,
}

impl BestTimes {
    pub const fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn set(&mut self, difficulty: Difficulty, secs: u32) {
        let slot = match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Normal => &mut self.normal,
            Difficulty::Hard => &mut self.hard,
        };
        *slot = secs;
    }

    pub const fn is_set(&self, difficulty: Difficulty) -> bool {
        self.get(difficulty) < UNSET_BEST_TIME
    }

    /// Stores `secs` if it beats the current record. Returns whether it did.
    pub fn offer(&mut self, difficulty: Difficulty, secs: u32) -> bool {
        if secs < self.get(difficulty) {
            self.set(difficulty, secs);
            true
        } else {
            false
        }
    }
}

impl Default for BestTimes {
    fn default() -> Self {
        Self {
            easy: UNSET_BEST_TIME,
            normal: UNSET_BEST_TIME,
            hard: UNSET_BEST_TIME,
        }
    }
}

impl Index<Difficulty> for BestTimes {
    type Output = u32;

    fn index(&self, difficulty: Difficulty) -> &Self::Output {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }
}

/// Persistence for best times.
pub trait RecordStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> core::result::Result<Option<BestTimes>, StoreError>;

    fn save(&mut self, records: &BestTimes) -> core::result::Result<(), StoreError>;
}

/// Loads records, falling back to defaults when the store is empty or unreadable.
pub fn load_or_default<S: RecordStore + ?Sized>(store: &S) -> BestTimes {
    match store.load() {
        Ok(Some(records)) => records,
        Ok(None) => BestTimes::default(),
        Err(err) => {
            log::error!("Could not load records, using defaults: {}", err);
            BestTimes::default()
        }
    }
}

/// Best-effort save. Failures are logged and reported as `false`.
pub fn save_or_log<S: RecordStore + ?Sized>(store: &mut S, records: &BestTimes) -> bool {
    match store.save(records) {
        Ok(()) => true,
        Err(err) => {
            log::error!("Could not save records: {}", err);
            false
        }
    }
}

/// In-memory key-value store holding records as JSON text under a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryStore {
    key: String,
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_RECORDS_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: HashMap::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn raw(&self) -> Option<&str> {
        self.entries.get(&self.key).map(String::as_str)
    }

    pub fn set_raw(&mut self, value: impl Into<String>) {
        self.entries.insert(self.key.clone(), value.into());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> core::result::Result<Option<BestTimes>, StoreError> {
        self.raw()
            .map(|text| serde_json::from_str::<BestTimes>(text))
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&mut self, records: &BestTimes) -> core::result::Result<(), StoreError> {
        let text = serde_json::to_string(records)?;
        self.set_raw(text);
        Ok(())
    }
}

/// Records persisted as a JSON file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> core::result::Result<Option<BestTimes>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, records: &BestTimes) -> core::result::Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(records)?)?;
        log::debug!("Saved records to {}", self.path.display());
        Ok(())
    }
}
