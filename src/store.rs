//! Flat-file persistence for the user collection.
//!
//! The whole collection lives in one file as a JSON array. Every access reads
//! the file in full and every mutation rewrites it in full; nothing is cached
//! between calls and nothing is locked.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::user::User;

#[cfg(unix)]
const CREATE_MODE: u32 = 0o755;

/// Result of reading the collection file, before errors are folded away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Vec<User>),
    Missing,
    /// The file could not be read or did not hold a user array.
    Corrupt(String),
}

impl LoadOutcome {
    /// Collapse into a collection, treating anything but a clean read as empty.
    pub fn into_users(self) -> Vec<User> {
        match self {
            LoadOutcome::Loaded(users) => users,
            LoadOutcome::Missing | LoadOutcome::Corrupt(_) => Vec::new(),
        }
    }
}

/// Handle on a collection file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file read-write, creating it empty if it does not exist.
    ///
    /// The returned handle is only a guarantee that the file exists; reads and
    /// writes go through the path again.
    pub fn ensure_exists(&self) -> Result<File> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(CREATE_MODE);
        }
        options
            .open(&self.path)
            .map_err(|err| StoreError::io("failed to open", &self.path, err))
    }

    /// Read the file and tell apart a clean read, a missing file and a bad one.
    ///
    /// A zero-byte file is a clean read of an empty collection.
    pub fn load_outcome(&self) -> LoadOutcome {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return LoadOutcome::Missing,
            Err(err) => return LoadOutcome::Corrupt(err.to_string()),
        };
        if data.is_empty() {
            return LoadOutcome::Loaded(Vec::new());
        }
        match serde_json::from_slice::<Option<Vec<Option<User>>>>(&data) {
            Ok(users) => LoadOutcome::Loaded(
                users
                    .unwrap_or_default()
                    .into_iter()
                    .map(Option::unwrap_or_default)
                    .collect(),
            ),
            Err(err) => LoadOutcome::Corrupt(err.to_string()),
        }
    }

    /// Load the collection; any read or parse failure yields an empty one.
    pub fn load(&self) -> Vec<User> {
        let outcome = self.load_outcome();
        match &outcome {
            LoadOutcome::Loaded(users) => {
                tracing::debug!(path = %self.path.display(), records = users.len(), "loaded records");
            }
            LoadOutcome::Missing => {
                tracing::debug!(path = %self.path.display(), "record file missing, starting empty");
            }
            LoadOutcome::Corrupt(reason) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %reason,
                    "record file unreadable, treating as empty"
                );
            }
        }
        outcome.into_users()
    }

    /// Raw file contents, byte for byte.
    pub fn read_raw(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|err| StoreError::io("failed to read", &self.path, err))
    }

    /// Overwrite the file with the full collection as a compact JSON array.
    pub fn save(&self, users: &[User]) -> Result<()> {
        let encoded = serde_json::to_vec(users).map_err(StoreError::Serialize)?;
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|err| StoreError::io("failed to write", &self.path, err))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&encoded)
            .and_then(|_| writer.flush())
            .map_err(|err| StoreError::io("failed to write", &self.path, err))?;
        tracing::debug!(path = %self.path.display(), records = users.len(), "saved records");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> RecordStore {
        RecordStore::new(dir.path().join("users.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load_outcome(), LoadOutcome::Missing);
        assert!(store.load().is_empty());
    }

    #[test]
    fn zero_byte_file_is_an_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.ensure_exists().unwrap();
        assert_eq!(store.load_outcome(), LoadOutcome::Loaded(Vec::new()));
    }

    #[test]
    fn corrupt_file_is_reported_but_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load_outcome(), LoadOutcome::Corrupt(_)));
        assert!(store.load().is_empty());
    }

    #[test]
    fn null_document_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "null").unwrap();
        assert_eq!(store.load_outcome(), LoadOutcome::Loaded(Vec::new()));
    }

    #[test]
    fn null_elements_load_as_zero_records() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"[null,{"id":"1","email":"a","age":1}]"#).unwrap();
        assert_eq!(
            store.load_outcome(),
            LoadOutcome::Loaded(vec![User::default(), User::new("1", "a", 1)])
        );
    }

    #[test]
    fn save_writes_compact_array_and_load_reads_it_back() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let users = vec![User::new("1", "a@x.com", 30), User::new("2", "b@x.com", 41)];
        store.save(&users).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"1","email":"a@x.com","age":30},{"id":"2","email":"b@x.com","age":41}]"#
        );
        assert_eq!(store.load(), users);
    }

    #[test]
    fn ensure_exists_leaves_existing_content_alone() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "[]").unwrap();
        store.ensure_exists().unwrap();
        assert_eq!(store.read_raw().unwrap(), b"[]".to_vec());
    }

    #[test]
    fn read_raw_on_missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(matches!(store.read_raw(), Err(StoreError::Io { .. })));
    }
}
