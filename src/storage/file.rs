//! JSON file store, the native stand-in for browser local storage.
//!
//! The file holds a single JSON object of string keys to string values. Writes
//! go to a sibling temp file that is renamed over the original, so a crash
//! never leaves a half-written token behind. On unix the file is created with
//! mode `0600` because it carries a bearer token.

use super::CredentialStore;
use crate::errors::StoreError;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use tracing::{debug, warn};

type Entries = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Entries {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Entries::new(),
            Err(err) => {
                warn!("Failed to read credential store {}: {err}", self.path.display());
                return Entries::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(
                "Ignoring unreadable credential store {}: {err}",
                self.path.display()
            );
            Entries::new()
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_vec_pretty(entries)?;
        let tmp_path = self
            .path
            .with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));

        write_private(&tmp_path, &payload)?;
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        debug!("credential store updated: {}", self.path.display());
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Entries) -> bool) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries();
        if apply(&mut entries) {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(payload)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    fs::write(path, payload)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{TOKEN_KEY, USER_KEY};

    struct ScratchDir {
        path: PathBuf,
    }

    impl ScratchDir {
        fn new() -> Self {
            let path = std::env::temp_dir().join(format!("scireg-store-{}", uuid::Uuid::new_v4()));
            Self { path }
        }

        fn file(&self) -> PathBuf {
            self.path.join("nested").join("credentials.json")
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn missing_file_is_empty_store() {
        let scratch = ScratchDir::new();
        let store = FileStore::new(scratch.file());
        assert_eq!(store.get(TOKEN_KEY), None);
        assert!(!store.has_token());
        // removing from a missing file must not create it
        store.remove(TOKEN_KEY).unwrap();
        assert!(!scratch.file().exists());
    }

    #[test]
    fn values_survive_a_new_handle() {
        let scratch = ScratchDir::new();
        let store = FileStore::new(scratch.file());
        store.set(TOKEN_KEY, "T").unwrap();
        store.set(USER_KEY, r#"{"name":"Ada"}"#).unwrap();

        let reopened = FileStore::new(scratch.file());
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("T"));
        assert_eq!(reopened.get(USER_KEY).as_deref(), Some(r#"{"name":"Ada"}"#));

        reopened.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
        assert!(store.get(USER_KEY).is_some());
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
        let scratch = ScratchDir::new();
        let path = scratch.file();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(TOKEN_KEY), None);

        store.set(TOKEN_KEY, "fresh").unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let parsed: Entries = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.get(TOKEN_KEY).map(String::as_str), Some("fresh"));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let scratch = ScratchDir::new();
        let store = FileStore::new(scratch.file());
        store.set(TOKEN_KEY, "T").unwrap();
        store.set(USER_KEY, "{}").unwrap();

        let names: Vec<_> = fs::read_dir(scratch.file().parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let scratch = ScratchDir::new();
        let store = FileStore::new(scratch.file());
        store.set(TOKEN_KEY, "T").unwrap();

        let mode = fs::metadata(scratch.file()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
