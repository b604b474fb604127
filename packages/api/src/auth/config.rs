//! Backend configuration from environment variables.

use store::StorefrontConfig;
use url::Url;

use crate::error::BackendError;

pub const BACKEND_URL_VAR: &str = "STOREFRONT_BACKEND_URL";
pub const ANON_KEY_VAR: &str = "STOREFRONT_ANON_KEY";

/// Where the hosted backend lives and the public key every request carries.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub url: Url,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, BackendError> {
        let anon_key = anon_key.into();
        if anon_key.is_empty() {
            return Err(BackendError::Config("anon key is empty".to_string()));
        }
        // A trailing slash keeps Url::join from dropping the last path segment
        let mut url = Url::parse(url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { url, anon_key })
    }

    /// Read the backend from the environment (and `.env`), falling back to the
    /// `[backend]` section of `storefront.toml`.
    pub fn from_env(config: &StorefrontConfig) -> Result<Self, BackendError> {
        dotenvy::dotenv().ok();

        let url = std::env::var(BACKEND_URL_VAR)
            .ok()
            .or_else(|| non_empty(&config.backend.url))
            .ok_or_else(|| BackendError::Config(format!("{BACKEND_URL_VAR} not set")))?;
        let anon_key = std::env::var(ANON_KEY_VAR)
            .ok()
            .or_else(|| non_empty(&config.backend.anon_key))
            .ok_or_else(|| BackendError::Config(format!("{ANON_KEY_VAR} not set")))?;

        Self::new(&url, anon_key)
    }

    /// Resolve an endpoint path (no leading slash) against the backend URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.url.join(path)?)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_keep_base_path() {
        let config = BackendConfig::new("https://example.com/project", "key").unwrap();
        assert_eq!(
            config.endpoint("auth/v1/token").unwrap().as_str(),
            "https://example.com/project/auth/v1/token"
        );
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(matches!(
            BackendConfig::new("not a url", "key"),
            Err(BackendError::Config(_))
        ));
        assert!(matches!(
            BackendConfig::new("https://example.com", ""),
            Err(BackendError::Config(_))
        ));
    }

    #[test]
    fn test_falls_back_to_toml_values() {
        let mut config = StorefrontConfig::default();
        config.backend.url = "https://abc.example.co".to_string();
        config.backend.anon_key = "anon".to_string();

        // Only meaningful when the developer's environment does not set the vars
        if std::env::var(BACKEND_URL_VAR).is_err() && std::env::var(ANON_KEY_VAR).is_err() {
            let backend = BackendConfig::from_env(&config).unwrap();
            assert_eq!(backend.url.as_str(), "https://abc.example.co/");
            assert_eq!(backend.anon_key, "anon");
        }
    }
}
