// Expiring key-value storage.
// Wraps a primitive backend with typed writes and lazily enforced expiry tokens.

use tracing::debug;

use super::backend::{KeyValueStore, Result};
use super::codec::Value;
use super::expiry::{expire_key, is_expired};

/// Key-value storage with per-key expiry tokens.
///
/// A key's expiry token lives next to it under the shadow key `_e_<key>`.
/// Expiry is only checked when the key is read through [`Storage::get`];
/// expired entries that are never read stay on the backend.
///
/// There is no locking: value and token are written separately and a reader
/// may observe one without the other.
#[derive(Debug)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying backend.
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Read `key`, evicting it first if its expiry token has passed.
    ///
    /// Not a pure read: an expired entry and its token are removed from the
    /// backend before `None` is returned.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(token) = self.get_expire(key)? {
            if is_expired(&token) {
                debug!(key, token = %token, "evicting expired entry");
                self.store.remove(key).await?;
                self.store.remove(&expire_key(key)).await?;
                return Ok(None);
            }
        }
        self.store.get(key)
    }

    /// Raw expiry token for `key`. An empty token counts as absent.
    pub fn get_expire(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .store
            .get(&expire_key(key))?
            .filter(|token| !token.is_empty()))
    }

    /// Store `value` under `key`. An existing expiry token is kept.
    pub async fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.store.set(key, value.into().encode()).await
    }

    /// Attach an expiry token to `key`.
    pub async fn expire(&self, key: &str, token: &str) -> Result<()> {
        self.store.set(&expire_key(key), token.to_string()).await
    }

    /// Store `value` and, when `token` is non-empty, its expiry token.
    pub async fn setex(&self, key: &str, value: impl Into<Value>, token: &str) -> Result<()> {
        self.set(key, value).await?;
        if !token.is_empty() {
            self.expire(key, token).await?;
        }
        Ok(())
    }

    /// Remove `key`. Its expiry token, if any, is left in place.
    pub async fn del(&self, key: &str) -> Result<()> {
        self.store.remove(key).await
    }
}
