//! # API crate: the hosted backend as seen by the storefront app
//!
//! Everything the app delegates to the backend-as-a-service goes through this
//! crate: password and OAuth authentication, session refresh, and the object
//! storage behind the admin invoice upload.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`AuthBackend`] trait, [`Session`], [`BackendConfig`] from the environment, OAuth URL building and callback parsing |
//! | [`storage`] | [`ObjectStorage`] trait and the upload request/response types |
//! | [`client`] | [`BackendClient`], the `reqwest` implementation of both traits |
//! | [`models`] | The backend's [`User`] object |
//!
//! The traits are what the `client` crate's controllers are generic over, so
//! tests can swap the HTTP client for in-memory fakes.

pub mod auth;
pub mod client;
mod error;
pub mod models;
pub mod storage;

pub use auth::{AuthBackend, BackendConfig, Session, SignUpOutcome};
pub use client::BackendClient;
pub use error::BackendError;
pub use models::User;
pub use storage::{ObjectStorage, StoredObject, UploadRequest};
pub use url::Url;
