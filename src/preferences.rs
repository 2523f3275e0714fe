//! Namespaced string key-value storage.
//!
//! Each namespace lives in its own JSON object file under the data
//! directory. Values are opaque strings; callers decide how to encode them.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("stored value for `{key}` is unreadable: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize value for `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces any prior value. The write is durable once this returns `Ok`.
    fn put_string(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub struct FilePreferences {
    namespace: String,
    path: PathBuf,
}

impl FilePreferences {
    pub fn open(dir: &Path, namespace: &str) -> Self {
        FilePreferences {
            namespace: namespace.to_string(),
            path: dir.join(format!("{namespace}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let serialized = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&serialized).map_err(|source| StorageError::Corrupt {
            key: self.namespace.clone(),
            source,
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string_pretty(values).map_err(|source| StorageError::Serialize {
                key: self.namespace.clone(),
                source,
            })?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(serialized.as_bytes())?;
        file.sync_all()?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, &self.path) {
            fs::remove_file(&tmp).ok();
            return Err(e.into());
        }
        sync_dir(self.path.parent())?;
        Ok(())
    }
}

/// Makes the rename itself durable. Directories cannot be opened for sync on Windows.
#[cfg(unix)]
fn sync_dir(dir: Option<&Path>) -> io::Result<()> {
    match dir {
        Some(dir) => File::open(dir)?.sync_all(),
        None => Ok(()),
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: Option<&Path>) -> io::Result<()> {
    Ok(())
}

impl KeyValueStore for FilePreferences {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(StorageError::Corrupt { source, .. }) => {
                warn!(
                    path = %self.path.display(),
                    error = %source,
                    "replacing unreadable preferences file"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)?;
        debug!(namespace = %self.namespace, key, bytes = value.len(), "preference written");
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryPreferences {
    values: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryPreferences {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path(), "PREF_TEST");
        assert!(prefs.get_string("anything").unwrap().is_none());
        assert!(!prefs.path().exists());
    }

    #[test]
    fn put_creates_file_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = FilePreferences::open(&dir.path().join("nested"), "PREF_TEST");
        prefs.put_string("k", "first").unwrap();
        prefs.put_string("k", "second").unwrap();
        prefs.put_string("other", "x").unwrap();

        let reopened = FilePreferences::open(&dir.path().join("nested"), "PREF_TEST");
        assert_eq!(reopened.get_string("k").unwrap().as_deref(), Some("second"));
        assert_eq!(reopened.get_string("other").unwrap().as_deref(), Some("x"));
        assert!(!reopened.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path(), "PREF_TEST");
        // A non-empty directory at the target path makes the rename fail.
        fs::create_dir_all(prefs.path().join("blocker")).unwrap();

        let values = BTreeMap::from([("k".to_string(), "v".to_string())]);
        assert!(matches!(prefs.write_all(&values), Err(StorageError::Io(_))));
        assert!(!prefs.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn namespaces_are_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = FilePreferences::open(dir.path(), "A");
        let b = FilePreferences::open(dir.path(), "B");
        a.put_string("k", "v").unwrap();
        assert!(b.get_string("k").unwrap().is_none());
    }

    #[test]
    fn unreadable_namespace_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = FilePreferences::open(dir.path(), "PREF_TEST");
        fs::write(prefs.path(), "not json").unwrap();
        assert!(matches!(prefs.get_string("k"), Err(StorageError::Corrupt { .. })));

        prefs.put_string("k", "v").unwrap();
        assert_eq!(prefs.get_string("k").unwrap().as_deref(), Some("v"));
    }
}
