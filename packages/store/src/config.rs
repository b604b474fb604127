//! # Application configuration: `storefront.toml`
//!
//! Defines the TOML file that ships next to the app (filename:
//! [`StorefrontConfig::filename`] = `"storefront.toml"`). It names the hosted
//! backend, the storage bucket used by the admin upload screen, the external
//! document viewer and the store's public website.
//!
//! ## Structure
//!
//! ```toml
//! [backend]
//! url = "https://project.supabase.co"
//! anon_key = "public-anon-key"
//!
//! [storage]
//! bucket = "pdf"
//!
//! [viewer]
//! base_url = "https://docs.google.com/gview"
//!
//! [storefront]
//! website_url = "https://net.usha1960.trade"
//!
//! [auth]
//! oauth_provider = "google"
//! redirect_to = "http://127.0.0.1:54823/auth/callback"
//! ```
//!
//! All sections derive `Default` so that a missing or empty file is equivalent
//! to the default configuration. The backend URL and key are usually supplied
//! through the environment instead (see `api::BackendConfig::from_env`).

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Top-level configuration stored in `storefront.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub viewer: ViewerSection,
    #[serde(default)]
    pub storefront: StorefrontSection,
    #[serde(default)]
    pub auth: AuthSection,
}

/// Hosted backend endpoint. Empty strings mean "take it from the environment".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendSection {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageSection {
    /// Bucket receiving admin uploads. Must allow public reads for the viewer.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerSection {
    #[serde(default = "default_viewer_base")]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorefrontSection {
    #[serde(default = "default_website")]
    pub website_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthSection {
    #[serde(default = "default_oauth_provider")]
    pub oauth_provider: String,
    /// Where the hosted backend sends the browser after an OAuth sign-in. The
    /// app listens on this loopback address while the sign-in is open, so it
    /// must be an `http://127.0.0.1` or `http://localhost` URL allowed by the
    /// backend.
    #[serde(default = "default_redirect_to")]
    pub redirect_to: String,
}

fn default_bucket() -> String {
    "pdf".to_string()
}

fn default_viewer_base() -> String {
    "https://docs.google.com/gview".to_string()
}

fn default_website() -> String {
    "https://net.usha1960.trade".to_string()
}

fn default_oauth_provider() -> String {
    "google".to_string()
}

fn default_redirect_to() -> String {
    "http://127.0.0.1:54823/auth/callback".to_string()
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
        }
    }
}

impl Default for ViewerSection {
    fn default() -> Self {
        Self {
            base_url: default_viewer_base(),
        }
    }
}

impl Default for StorefrontSection {
    fn default() -> Self {
        Self {
            website_url: default_website(),
        }
    }
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            oauth_provider: default_oauth_provider(),
            redirect_to: default_redirect_to(),
        }
    }
}

impl StorefrontConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "storefront.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, StoreError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, StoreError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &std::path::Path) -> Result<Self, StoreError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = StorefrontConfig::from_toml("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.storage.bucket, "pdf");
        assert_eq!(config.viewer.base_url, "https://docs.google.com/gview");
        assert_eq!(config.auth.oauth_provider, "google");
        assert!(config.backend.url.is_empty());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = StorefrontConfig::from_toml(
            r#"
            [backend]
            url = "https://abc.supabase.co"

            [storage]
            bucket = "invoices"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.url, "https://abc.supabase.co");
        assert!(config.backend.anon_key.is_empty());
        assert_eq!(config.storage.bucket, "invoices");
        assert_eq!(config.storefront.website_url, "https://net.usha1960.trade");
        assert_eq!(config.auth.redirect_to, "http://127.0.0.1:54823/auth/callback");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = StorefrontConfig::default();
        config.auth.redirect_to = "http://localhost:9000/cb".to_string();

        let raw = config.to_toml().unwrap();
        assert_eq!(StorefrontConfig::from_toml(&raw).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig::load(&dir.path().join(StorefrontConfig::filename())).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(matches!(
            StorefrontConfig::from_toml("[storage\nbucket = 1"),
            Err(StoreError::Toml(_))
        ));
    }
}
