use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DATA_DIR: &str = "touchline";
const DATA_FILE: &str = "data.json";
const STORE_VERSION: u32 = 1;

pub const KEY_PLAYERS: &str = "players";
pub const KEY_EVENTS: &str = "events";
pub const KEY_SKILL_RATINGS: &str = "skill_ratings";
pub const KEY_ATTENDANCE: &str = "attendance";
pub const KEY_CORNER_REPORTS: &str = "corner_reports";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_API_KEY: &str = "api_key";
pub const KEY_SEEDED: &str = "seeded";

/// Every key the store knows about. Backup import ignores anything else.
pub const ALL_KEYS: [&str; 8] = [
    KEY_PLAYERS,
    KEY_EVENTS,
    KEY_SKILL_RATINGS,
    KEY_ATTENDANCE,
    KEY_CORNER_REPORTS,
    KEY_SETTINGS,
    KEY_API_KEY,
    KEY_SEEDED,
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoreFile {
    version: u32,
    keys: BTreeMap<String, Value>,
}

/// Single-writer key/value store. Each key holds the JSON snapshot of one
/// collection; every mutation rewrites the whole file synchronously.
#[derive(Debug)]
pub struct Store {
    path: Option<PathBuf>,
    file: StoreFile,
}

impl Store {
    /// Open the store at the default data path. A missing, unreadable, or
    /// version-mismatched file starts empty rather than failing.
    pub fn open_default() -> Store {
        match data_path() {
            Some(path) => Store::open_at(path),
            None => Store::in_memory(),
        }
    }

    pub fn open_at(path: PathBuf) -> Store {
        let file = load_store_file(&path).unwrap_or_default();
        Store {
            path: Some(path),
            file,
        }
    }

    /// No backing file; everything lives and dies with the process.
    pub fn in_memory() -> Store {
        Store {
            path: None,
            file: StoreFile::default(),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.file.keys.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).context("serialize store value")?;
        self.file.keys.insert(key.to_string(), value);
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.file.keys.remove(key);
        self.save()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.file.keys.contains_key(key)
    }

    /// All currently stored keys and their raw snapshots.
    pub fn snapshot(&self) -> &BTreeMap<String, Value> {
        &self.file.keys
    }

    /// Serialize every named key into one backup document.
    pub fn export_backup(&self) -> Result<String> {
        let doc = StoreFile {
            version: STORE_VERSION,
            keys: self.file.keys.clone(),
        };
        serde_json::to_string_pretty(&doc).context("serialize backup document")
    }

    /// Overwrite every named key present in the backup document. Keys absent
    /// from the document are left untouched; unknown keys are dropped. The
    /// payload is not validated beyond being parseable JSON.
    pub fn import_backup(&mut self, raw: &str) -> Result<()> {
        let doc: StoreFile = serde_json::from_str(raw).context("invalid backup document")?;
        for key in ALL_KEYS {
            if let Some(value) = doc.keys.get(key) {
                self.file.keys.insert(key.to_string(), value.clone());
            }
        }
        self.save()
    }

    fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("create data dir")?;
        }
        self.file.version = STORE_VERSION;
        let json = serde_json::to_string(&self.file).context("serialize store file")?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).context("write store tmp file")?;
        fs::rename(&tmp, path).context("replace store file")?;
        Ok(())
    }
}

fn load_store_file(path: &Path) -> Option<StoreFile> {
    let raw = fs::read_to_string(path).ok()?;
    let file = serde_json::from_str::<StoreFile>(&raw).ok()?;
    if file.version != STORE_VERSION {
        return None;
    }
    Some(file)
}

fn data_path() -> Option<PathBuf> {
    // Prefer XDG data home.
    if let Ok(base) = std::env::var("XDG_DATA_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(DATA_DIR).join(DATA_FILE));
        }
    }
    // Fallback to ~/.local/share on linux-like systems.
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(DATA_DIR)
            .join(DATA_FILE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_missing_or_mismatched_keys() {
        let mut store = Store::in_memory();
        assert_eq!(store.get::<Vec<String>>(KEY_PLAYERS), None);
        store.set(KEY_SEEDED, &true).unwrap();
        assert_eq!(store.get::<Vec<String>>(KEY_SEEDED), None);
        assert_eq!(store.get::<bool>(KEY_SEEDED), Some(true));
    }

    #[test]
    fn import_ignores_unknown_keys() {
        let mut store = Store::in_memory();
        store
            .import_backup(r#"{"version":1,"keys":{"mystery":[1,2,3],"seeded":true}}"#)
            .unwrap();
        assert!(!store.contains("mystery"));
        assert_eq!(store.get::<bool>(KEY_SEEDED), Some(true));
    }

    #[test]
    fn import_rejects_non_json() {
        let mut store = Store::in_memory();
        assert!(store.import_backup("not json at all").is_err());
    }
}
