//! Bearer Token Storage
//!
//! The persistent key/value slot that holds the signed-in user's token. The sign-in
//! flow writes it; the request pipeline only reads it, once per outbound request.

use std::sync::RwLock;
use thiserror::Error;

/// Persistent storage for the bearer token
pub trait TokenStore {
    /// Current token, if one is stored. Blank values count as absent.
    fn read_token(&self) -> Option<String>;

    fn write_token(&self, token: &str) -> Result<(), TokenStoreError>;

    fn clear_token(&self) -> Result<(), TokenStoreError>;
}

/// Token storage errors
#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("Token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token storage unavailable: {0}")]
    Unavailable(String),
}

/// Normalize a stored value: trimmed, and `None` when empty
pub fn normalize_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn read_token(&self) -> Option<String> {
        let guard = self.token.read().ok()?;
        guard.as_deref().and_then(normalize_token)
    }

    fn write_token(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| TokenStoreError::Unavailable(e.to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), TokenStoreError> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| TokenStoreError::Unavailable(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileTokenStore;

#[cfg(feature = "native")]
mod file {
    use super::{normalize_token, TokenStore, TokenStoreError};
    use std::path::{Path, PathBuf};

    /// Token persisted as a single file, one per key
    ///
    /// The file is read on every call so a `login` from another process is seen by
    /// the next request.
    #[derive(Debug, Clone)]
    pub struct FileTokenStore {
        path: PathBuf,
    }

    impl FileTokenStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl TokenStore for FileTokenStore {
        fn read_token(&self) -> Option<String> {
            match std::fs::read_to_string(&self.path) {
                Ok(raw) => normalize_token(&raw),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    tracing::warn!("Failed to read token file {:?}: {}", self.path, e);
                    None
                }
            }
        }

        fn write_token(&self, token: &str) -> Result<(), TokenStoreError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, token)?;
            Ok(())
        }

        fn clear_token(&self) -> Result<(), TokenStoreError> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.read_token(), None);

        store.write_token("abc123").unwrap();
        assert_eq!(store.read_token().as_deref(), Some("abc123"));

        store.clear_token().unwrap();
        assert_eq!(store.read_token(), None);
    }

    #[test]
    fn test_blank_token_is_absent() {
        assert_eq!(MemoryTokenStore::with_token("   ").read_token(), None);
        assert_eq!(normalize_token(" abc \n").as_deref(), Some("abc"));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        assert_eq!(store.read_token(), None);
        store.write_token("eyJhbGciOi").unwrap();
        assert_eq!(store.read_token().as_deref(), Some("eyJhbGciOi"));

        store.clear_token().unwrap();
        assert_eq!(store.read_token(), None);
        // Clearing twice is fine
        store.clear_token().unwrap();
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_sees_external_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let store = FileTokenStore::new(&path);

        std::fs::write(&path, "first\n").unwrap();
        assert_eq!(store.read_token().as_deref(), Some("first"));

        std::fs::write(&path, "second").unwrap();
        assert_eq!(store.read_token().as_deref(), Some("second"));
    }
}
