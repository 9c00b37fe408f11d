//! Persistent credential storage. Mirrors browser local storage: a flat map of
//! string keys to string values holding the bearer token and the last-known
//! user record. Values stored here are secrets and must never be logged.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::StoreError;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-serialized last-known user record.
pub const USER_KEY: &str = "user";

pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns `StoreError` if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be updated.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Bearer token, treating an empty value as absent.
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    fn has_token(&self) -> bool {
        self.token().is_some()
    }
}
