//! # Device Configuration Store
//!
//! The shared per-device store holding hardware pin mappings and sensor
//! settings, namespaced by section key (`gpio`, `lepton`, ...).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thermal_errors::StoreError;
use toml::{Table, Value};
use tracing::debug;

/// Folder holding the device configuration store.
pub const DEFAULT_STORE_DIR: &str = "/etc/cacophony";

/// File name of the store inside its folder.
pub const STORE_FILE_NAME: &str = "config.toml";

/// A keyed device configuration store.
pub trait ConfigStore {
    /// The raw section stored under `key`, if any.
    fn section(&self, key: &str) -> Result<Option<Table>, StoreError>;

    /// Overlay the section stored under `key` onto `target`.
    ///
    /// `target` is expected to be pre-populated with defaults. Keys present
    /// in the store replace the matching fields; everything else keeps its
    /// current value. Returns whether the section existed.
    fn unmarshal<T>(&self, key: &str, target: &mut T) -> Result<bool, StoreError>
    where
        T: Serialize + DeserializeOwned
    {
        let Some(section) = self.section(key)? else {
            return Ok(false);
        };

        let unmarshal_err = |reason: String| StoreError::Unmarshal {
            key: key.to_string(),
            reason
        };

        let mut merged = match Value::try_from(&*target).map_err(|e| unmarshal_err(e.to_string()))? {
            Value::Table(table) => table,
            other => {
                return Err(unmarshal_err(format!(
                    "target is a {}, not a table",
                    other.type_str()
                )));
            }
        };
        merge_tables(&mut merged, section);

        *target = Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| unmarshal_err(e.to_string()))?;
        Ok(true)
    }
}

fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        if let Value::Table(nested) = value {
            if let Some(Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, nested);
                continue;
            }
            base.insert(key, Value::Table(nested));
        } else {
            base.insert(key, value);
        }
    }
}

/// File-backed store: `<folder>/config.toml`.
#[derive(Debug, Clone)]
pub struct TomlStore {
    path: PathBuf,
    root: Table
}

impl TomlStore {
    /// Open the store in `folder`.
    ///
    /// The folder must exist. A folder without a store file is an empty
    /// store, so every lookup falls back to defaults.
    pub fn open(folder: impl AsRef<Path>) -> Result<Self, StoreError> {
        let folder = folder.as_ref();
        let open_err = |reason: String| StoreError::Open {
            path: folder.display().to_string(),
            reason
        };

        let metadata = std::fs::metadata(folder).map_err(|e| open_err(e.to_string()))?;
        if !metadata.is_dir() {
            return Err(open_err("not a directory".to_string()));
        }

        let path = folder.join(STORE_FILE_NAME);
        let root = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str::<Table>(&contents).map_err(|e| StoreError::Parse {
                path: path.display().to_string(),
                reason: e.to_string()
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config store file, using defaults");
                Table::new()
            }
            Err(e) => return Err(open_err(e.to_string()))
        };

        Ok(Self { path, root })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for TomlStore {
    fn section(&self, key: &str) -> Result<Option<Table>, StoreError> {
        match self.root.get(key) {
            None => Ok(None),
            Some(Value::Table(table)) => Ok(Some(table.clone())),
            Some(other) => Err(StoreError::Unmarshal {
                key: key.to_string(),
                reason: format!("expected a table, found a {}", other.type_str())
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "kebab-case")]
    struct Sample {
        name: String,
        count: u32,
        limits: Limits
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Limits {
        low: i64,
        high: i64
    }

    fn sample() -> Sample {
        Sample {
            name: "default".to_string(),
            count: 1,
            limits: Limits { low: 0, high: 10 }
        }
    }

    fn store_with(contents: &str) -> (TempDir, TomlStore) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STORE_FILE_NAME), contents).unwrap();
        let store = TomlStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_missing_folder() {
        let result = TomlStore::open("/nonexistent/config/folder");
        assert!(matches!(result, Err(StoreError::Open { .. })));
    }

    #[test]
    fn test_open_file_instead_of_folder() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "").unwrap();
        assert!(matches!(TomlStore::open(&file), Err(StoreError::Open { .. })));
    }

    #[test]
    fn test_open_without_store_file() {
        let dir = TempDir::new().unwrap();
        let store = TomlStore::open(dir.path()).unwrap();
        assert_eq!(store.path(), dir.path().join(STORE_FILE_NAME));
        assert_eq!(store.section("gpio").unwrap(), None);
    }

    #[test]
    fn test_open_malformed_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STORE_FILE_NAME), "[gpio\n").unwrap();
        assert!(matches!(
            TomlStore::open(dir.path()),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_unmarshal_absent_section_keeps_target() {
        let (_dir, store) = store_with("[other]\nname = \"x\"\n");
        let mut target = sample();
        assert!(!store.unmarshal("sample", &mut target).unwrap());
        assert_eq!(target, sample());
    }

    #[test]
    fn test_unmarshal_overlays_present_keys() {
        let (_dir, store) = store_with("[sample]\ncount = 7\n\n[sample.limits]\nhigh = 99\n");
        let mut target = sample();
        assert!(store.unmarshal("sample", &mut target).unwrap());
        assert_eq!(target.name, "default");
        assert_eq!(target.count, 7);
        assert_eq!(target.limits, Limits { low: 0, high: 99 });
    }

    #[test]
    fn test_unmarshal_wrong_type() {
        let (_dir, store) = store_with("[sample]\ncount = \"many\"\n");
        let mut target = sample();
        let result = store.unmarshal("sample", &mut target);
        assert!(matches!(result, Err(StoreError::Unmarshal { ref key, .. }) if key == "sample"));
        assert_eq!(target, sample());
    }

    #[test]
    fn test_section_not_a_table() {
        let (_dir, store) = store_with("sample = 3\n");
        assert!(matches!(
            store.section("sample"),
            Err(StoreError::Unmarshal { .. })
        ));
    }
}
