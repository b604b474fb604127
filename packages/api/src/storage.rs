//! Object storage on the hosted backend.

use std::future::Future;

use url::Url;

use crate::error::BackendError;

/// One object to store.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub bucket: String,
    pub key: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
    /// When false an existing object under `key` makes the upload fail.
    pub overwrite: bool,
    /// Signed-in user's token. The anon key is used when absent.
    pub access_token: Option<String>,
}

/// Where the backend put the object (`<bucket>/<key>`).
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub path: String,
}

/// Remote object-storage operations.
pub trait ObjectStorage {
    fn upload(
        &self,
        request: UploadRequest,
    ) -> impl Future<Output = Result<StoredObject, BackendError>>;

    /// Durable public link for an object, `None` when the bucket cannot serve one.
    fn public_url(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Url>, BackendError>>;
}
