//! Token store backed by `window.localStorage`.

use clinica::config::DEFAULT_TOKEN_KEY;
use clinica::token::{normalize_token, TokenStore, TokenStoreError};
use web_sys::Storage;

/// Reads and writes the bearer token under a fixed key
#[derive(Debug, Clone)]
pub struct LocalStorageTokenStore {
    key: String,
}

impl Default for LocalStorageTokenStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_KEY)
    }
}

impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<Storage, TokenStoreError> {
        web_sys::window()
            .ok_or_else(|| TokenStoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| TokenStoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| TokenStoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn read_token(&self) -> Option<String> {
        let storage = Self::storage().ok()?;
        let raw = storage.get_item(&self.key).ok()??;
        normalize_token(&raw)
    }

    fn write_token(&self, token: &str) -> Result<(), TokenStoreError> {
        Self::storage()?
            .set_item(&self.key, token)
            .map_err(|e| TokenStoreError::Unavailable(format!("{:?}", e)))
    }

    fn clear_token(&self) -> Result<(), TokenStoreError> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| TokenStoreError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_round_trip_through_local_storage() {
        let store = LocalStorageTokenStore::new("clinica_test_token");
        store.clear_token().unwrap();
        assert_eq!(store.read_token(), None);

        store.write_token("abc123").unwrap();
        assert_eq!(store.read_token().as_deref(), Some("abc123"));

        store.clear_token().unwrap();
        assert_eq!(store.read_token(), None);
    }
}
