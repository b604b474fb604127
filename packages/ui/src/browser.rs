//! Handing URLs to the system: links, phone numbers, map queries and the
//! OAuth authorize page.

use std::time::Duration;

use api::Url;
use client::{AuthBrowser, BrowserOutcome, LoopbackRedirect};

/// How long an OAuth sign-in may stay open before it counts as cancelled.
pub const SIGN_IN_WAIT: Duration = Duration::from_secs(180);

/// Open `url` with whatever the platform registers for it.
pub fn open_external(url: &str) -> Result<(), String> {
    tracing::debug!(url, "opening externally");
    open::that(url).map_err(|e| e.to_string())
}

/// Opens the authorize page in the system browser and waits on the loopback
/// redirect address for the backend to send it back.
#[derive(Clone, Copy, Debug)]
pub struct SystemBrowser {
    opener: fn(&str) -> Result<(), String>,
    wait: Duration,
}

impl Default for SystemBrowser {
    fn default() -> Self {
        Self {
            opener: open_external,
            wait: SIGN_IN_WAIT,
        }
    }
}

impl SystemBrowser {
    pub fn with_opener(opener: fn(&str) -> Result<(), String>, wait: Duration) -> Self {
        Self { opener, wait }
    }
}

impl AuthBrowser for SystemBrowser {
    async fn open_auth_session(&self, url: &Url, return_to: Option<&str>) -> BrowserOutcome {
        let Some(return_to) = return_to else {
            return BrowserOutcome::Failed("No sign-in redirect is configured.".to_string());
        };
        let redirect = match Url::parse(return_to) {
            Ok(redirect) => redirect,
            Err(e) => return BrowserOutcome::Failed(format!("Invalid redirect URL: {e}")),
        };
        let listener = match LoopbackRedirect::bind(&redirect).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!("cannot receive sign-in redirect: {e}");
                return BrowserOutcome::Failed(e.to_string());
            }
        };

        tracing::info!(redirect = %listener.url(), "opening sign-in page");
        if let Err(e) = (self.opener)(url.as_str()) {
            tracing::error!("Failed to open browser: {e}");
            return BrowserOutcome::Failed(e);
        }

        match tokio::time::timeout(self.wait, listener.accept_callback()).await {
            Ok(Ok(callback)) => BrowserOutcome::Completed(callback),
            Ok(Err(e)) => BrowserOutcome::Failed(e.to_string()),
            Err(_) => {
                tracing::info!("sign-in page never came back");
                BrowserOutcome::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn free_port() -> u16 {
        std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port()
    }

    fn authorize_url(redirect: &str) -> Url {
        Url::parse_with_params(
            "https://backend.test/auth/v1/authorize",
            &[("provider", "google"), ("redirect_to", redirect)],
        )
        .unwrap()
    }

    async fn get(port: u16, target: &str) {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        let request = format!("GET {target} HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
    }

    /// Plays the browser: follows the authorize URL back to `redirect_to` the
    /// way the hosted backend does, tokens in the fragment.
    fn browser_that_signs_in(url: &str) -> Result<(), String> {
        let url = Url::parse(url).map_err(|e| e.to_string())?;
        let redirect = url
            .query_pairs()
            .find(|(k, _)| k == "redirect_to")
            .map(|(_, v)| Url::parse(&v))
            .ok_or("no redirect")?
            .map_err(|e| e.to_string())?;
        let port = redirect.port().ok_or("no port")?;
        let path = redirect.path().to_string();
        tokio::spawn(async move {
            // Fragment stays in the browser; the relay page then resends it
            get(port, &path).await;
            get(port, &format!("{path}?access_token=token-gina&refresh_token=refresh-gina")).await;
        });
        Ok(())
    }

    fn browser_that_is_closed(_url: &str) -> Result<(), String> {
        Ok(())
    }

    fn browser_that_fails(_url: &str) -> Result<(), String> {
        Err("no browser installed".to_string())
    }

    #[tokio::test]
    async fn test_redirect_completes_session() {
        let redirect = format!("http://127.0.0.1:{}/auth/callback", free_port());
        let browser = SystemBrowser::with_opener(browser_that_signs_in, Duration::from_secs(5));

        let outcome = browser
            .open_auth_session(&authorize_url(&redirect), Some(&redirect))
            .await;
        let BrowserOutcome::Completed(callback) = outcome else {
            panic!("expected a callback, got {outcome:?}");
        };
        assert_eq!(callback.path(), "/auth/callback");
        let tokens = api::auth::oauth::parse_callback(&callback).unwrap();
        assert_eq!(tokens.access_token, "token-gina");
    }

    #[tokio::test]
    async fn test_browser_that_never_returns_is_cancelled() {
        let redirect = format!("http://127.0.0.1:{}/auth/callback", free_port());
        let browser = SystemBrowser::with_opener(browser_that_is_closed, Duration::from_millis(50));

        let outcome = browser
            .open_auth_session(&authorize_url(&redirect), Some(&redirect))
            .await;
        assert_eq!(outcome, BrowserOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_open_failures_are_reported() {
        let redirect = format!("http://127.0.0.1:{}/auth/callback", free_port());
        let browser = SystemBrowser::with_opener(browser_that_fails, Duration::from_secs(1));
        let outcome = browser
            .open_auth_session(&authorize_url(&redirect), Some(&redirect))
            .await;
        assert_eq!(outcome, BrowserOutcome::Failed("no browser installed".to_string()));

        let outcome = browser
            .open_auth_session(&authorize_url("storefront://auth"), Some("storefront://auth"))
            .await;
        assert!(matches!(outcome, BrowserOutcome::Failed(_)));
        let outcome = browser.open_auth_session(&authorize_url(""), None).await;
        assert!(matches!(outcome, BrowserOutcome::Failed(_)));
    }
}
