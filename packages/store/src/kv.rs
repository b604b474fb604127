//! # Key-value persistence
//!
//! The app persists a handful of small string values between launches: the last
//! uploaded document URL, the prior-launch flag and the signed-in session. All of
//! them go through the [`KeyValueStore`] trait so the same controllers work
//! against an in-memory store (tests) or the filesystem (device).
//!
//! Values are plain strings. [`get_json`] / [`set_json`] layer JSON encoding on
//! top, matching how every stored value is written by the app.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Well-known keys.
pub mod keys {
    /// Public URL of the most recently uploaded document.
    pub const UPLOADED_URL: &str = "uploadedUrl";
    /// Set once the user has left onboarding.
    pub const HAS_LAUNCHED: &str = "hasLaunched";
    /// JSON-encoded session of the signed-in user.
    pub const SESSION: &str = "auth.session";
}

/// Async string key-value store.
pub trait KeyValueStore {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>>;
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// Read a JSON-encoded value. Missing keys yield `Ok(None)`.
pub async fn get_json<S, T>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Write a value as JSON.
pub async fn set_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
