//! # OAuth redirect flow
//!
//! The hosted backend runs the provider dance itself. The app only needs to:
//!
//! 1. **[`authorize_url`]**: build `<backend>/auth/v1/authorize?provider=..&redirect_to=..`
//!    and open it in an external browser session.
//! 2. **[`parse_callback`]**: when the browser comes back on the redirect URL,
//!    read the tokens out of the URL fragment
//!    (`#access_token=..&refresh_token=..&expires_in=..&token_type=bearer`).
//!    Providers that put the values in the query string are handled too.
//!
//! The returned [`OAuthTokens`] still lack a user; the caller fetches it with the
//! access token before publishing a session.

use url::Url;

use super::config::BackendConfig;
use crate::error::BackendError;

/// Tokens carried by an OAuth callback URL.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
}

/// Authorization URL for `provider`.
pub fn authorize_url(
    config: &BackendConfig,
    provider: &str,
    redirect_to: Option<&str>,
) -> Result<Url, BackendError> {
    let mut url = config.endpoint("auth/v1/authorize")?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("provider", provider);
        if let Some(redirect) = redirect_to {
            query.append_pair("redirect_to", redirect);
        }
    }
    Ok(url)
}

/// Extract tokens (or the provider's error) from a callback URL.
pub fn parse_callback(callback: &Url) -> Result<OAuthTokens, BackendError> {
    let params: Vec<(String, String)> = match callback.fragment() {
        Some(fragment) if !fragment.is_empty() => url::form_urlencoded::parse(fragment.as_bytes())
            .into_owned()
            .collect(),
        _ => callback.query_pairs().into_owned().collect(),
    };
    let get = |name: &str| {
        params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    };

    if let Some(error) = get("error") {
        let description = get("error_description").unwrap_or(error);
        return Err(BackendError::OAuth(description));
    }

    let access_token = get("access_token")
        .ok_or_else(|| BackendError::OAuth("callback has no access token".to_string()))?;
    let refresh_token = get("refresh_token")
        .ok_or_else(|| BackendError::OAuth("callback has no refresh token".to_string()))?;

    Ok(OAuthTokens {
        access_token,
        refresh_token,
        token_type: get("token_type").unwrap_or_else(|| "bearer".to_string()),
        expires_in: get("expires_in").and_then(|v| v.parse().ok()),
        expires_at: get("expires_at").and_then(|v| v.parse().ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BackendConfig {
        BackendConfig::new("https://abc.example.co", "anon").unwrap()
    }

    #[test]
    fn test_authorize_url() {
        let url = authorize_url(&config(), "google", Some("storefront://auth/callback")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://abc.example.co/auth/v1/authorize?provider=google&redirect_to=storefront%3A%2F%2Fauth%2Fcallback"
        );

        let bare = authorize_url(&config(), "google", None).unwrap();
        assert_eq!(bare.query(), Some("provider=google"));
    }

    #[test]
    fn test_tokens_from_fragment() {
        let url = Url::parse(
            "storefront://auth/callback#access_token=at&expires_in=3600&refresh_token=rt&token_type=bearer",
        )
        .unwrap();
        let tokens = parse_callback(&url).unwrap();
        assert_eq!(tokens.access_token, "at");
        assert_eq!(tokens.refresh_token, "rt");
        assert_eq!(tokens.expires_in, Some(3600));
        assert_eq!(tokens.expires_at, None);
    }

    #[test]
    fn test_tokens_from_query() {
        let url = Url::parse("storefront://auth/callback?access_token=at&refresh_token=rt").unwrap();
        let tokens = parse_callback(&url).unwrap();
        assert_eq!(tokens.token_type, "bearer");
    }

    #[test]
    fn test_provider_error_is_reported() {
        let url = Url::parse(
            "storefront://auth/callback#error=access_denied&error_description=User+cancelled",
        )
        .unwrap();
        match parse_callback(&url) {
            Err(BackendError::OAuth(message)) => assert_eq!(message, "User cancelled"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_missing_tokens() {
        let url = Url::parse("storefront://auth/callback").unwrap();
        assert!(matches!(parse_callback(&url), Err(BackendError::OAuth(_))));
    }
}
