//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each key as
//! its own small file. It is used on device to retain the session, the launch
//! flag and the last uploaded document URL across app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── kv/
//!     └── <sanitised_key>    # raw string value
//! ```
//!
//! Keys are sanitised into file names by replacing every character outside
//! `[A-Za-z0-9._-]` with `_`.
//!
//! ## Platform data directories
//!
//! [`FileStore::default_base`] uses [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/storefront/` |
//! | Linux | `~/.local/share/storefront/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\storefront\` |
//! | Android | App-internal storage (via `dirs`) |

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// `<data_dir>/storefront`, or `./storefront` when the platform has no data dir.
    pub fn default_base() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("storefront")
    }

    fn kv_dir(&self) -> PathBuf {
        self.base.join("kv")
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.kv_dir().join(file_name_for(key))
    }
}

fn file_name_for(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.value_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.kv_dir())?;
        std::fs::write(self.value_path(key), value)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.value_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::keys;

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::new(dir.path().to_path_buf());
        store
            .set(keys::UPLOADED_URL, "\"https://cdn.example/x.pdf\"")
            .await
            .unwrap();

        // Re-open from same directory
        let reopened = FileStore::new(dir.path().to_path_buf());
        assert_eq!(
            reopened.get(keys::UPLOADED_URL).await.unwrap().as_deref(),
            Some("\"https://cdn.example/x.pdf\"")
        );
    }

    #[tokio::test]
    async fn test_missing_and_removed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        assert!(store.get(keys::SESSION).await.unwrap().is_none());
        // Removing a key that was never written is not an error
        store.remove(keys::SESSION).await.unwrap();

        store.set(keys::SESSION, "{}").await.unwrap();
        store.remove(keys::SESSION).await.unwrap();
        assert!(store.get(keys::SESSION).await.unwrap().is_none());
    }

    #[test]
    fn test_keys_become_safe_file_names() {
        assert_eq!(file_name_for("auth.session"), "auth.session");
        assert_eq!(file_name_for("../etc/passwd"), ".._etc_passwd");
        assert_eq!(file_name_for("a b/c"), "a_b_c");
    }
}
