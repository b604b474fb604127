//! # Auth service
//!
//! [`Auth`] ties the remote [`AuthBackend`], the key-value store and the
//! [`SessionStore`] together. Every successful sign-in path ends in
//! [`adopt`](Auth::adopt): persist under `auth.session`, then publish. Screens
//! never navigate on success themselves; the navigation controller reacts to the
//! published session.
//!
//! | Operation | Backend calls | On success |
//! |-----------|---------------|------------|
//! | [`restore`](Auth::restore) | `get_user`, or `refresh_session` when expired | publish restored session |
//! | [`sign_in`](Auth::sign_in) | `sign_in_with_password` | publish |
//! | [`sign_up`](Auth::sign_up) | `sign_up` | publish when a session was created |
//! | [`start_oauth`](Auth::start_oauth) | `sign_in_with_oauth` | URL for the browser |
//! | [`complete_oauth`](Auth::complete_oauth) | `get_user` | publish |
//! | [`refresh`](Auth::refresh) | `refresh_session` | publish |
//! | [`sign_out`](Auth::sign_out) | `sign_out` | publish `None` |

use std::future::Future;

use api::auth::{now_unix, oauth};
use api::{AuthBackend, BackendError, Session, SignUpOutcome, Url};
use store::{keys, kv, KeyValueStore};

use crate::forms::Credentials;
use crate::session::SessionStore;

/// How an external browser sign-in session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserOutcome {
    /// The browser came back on the redirect URL.
    Completed(Url),
    /// The user gave up: the browser was closed or never came back.
    Cancelled,
    Failed(String),
}

/// Opens the OAuth authorize page.
pub trait AuthBrowser {
    fn open_auth_session(
        &self,
        url: &Url,
        return_to: Option<&str>,
    ) -> impl Future<Output = BrowserOutcome>;
}

#[derive(Clone, Debug)]
pub struct Auth<B, K> {
    backend: B,
    kv: K,
    sessions: SessionStore,
    redirect_to: Option<String>,
}

impl<B: AuthBackend, K: KeyValueStore> Auth<B, K> {
    pub fn new(backend: B, kv: K, sessions: SessionStore) -> Self {
        Self {
            backend,
            kv,
            sessions,
            redirect_to: None,
        }
    }

    /// Where the backend should send the browser after an OAuth sign-in.
    pub fn with_redirect(mut self, redirect_to: Option<String>) -> Self {
        self.redirect_to = redirect_to;
        self
    }

    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Bring back the session from the last run. Any failure means "no session".
    pub async fn restore(&self) -> Option<Session> {
        let stored: Option<Session> = match kv::get_json(&self.kv, keys::SESSION).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("stored session unreadable, ignoring: {e}");
                None
            }
        };
        let Some(mut session) = stored else {
            tracing::debug!("no stored session");
            return None;
        };

        if session.is_expired(now_unix()) {
            tracing::debug!("stored session expired, refreshing");
            return self.refresh_from(&session.refresh_token).await.ok();
        }

        match self.backend.get_user(&session.access_token).await {
            Ok(user) => {
                session.user = user;
                self.adopt(session.clone()).await;
                Some(session)
            }
            Err(BackendError::Api {
                status: status @ (401 | 403),
                message,
            }) => {
                tracing::debug!(status, "stored session rejected ({message}), refreshing");
                self.refresh_from(&session.refresh_token).await.ok()
            }
            Err(e) => {
                // Outage or transport failure: keep the stored session so the
                // next launch can retry
                tracing::warn!("could not validate stored session: {e}");
                None
            }
        }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        tracing::info!(email = %credentials.email, "signing in");
        let session = self
            .backend
            .sign_in_with_password(&credentials.email, &credentials.password)
            .await?;
        self.adopt(session.clone()).await;
        Ok(session)
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, BackendError> {
        tracing::info!(email = %credentials.email, "signing up");
        let outcome = self
            .backend
            .sign_up(&credentials.email, &credentials.password)
            .await?;
        if let SignUpOutcome::SessionCreated(session) = &outcome {
            self.adopt(session.clone()).await;
        }
        Ok(outcome)
    }

    /// Authorize URL for `provider`, or `None` when there is nothing to open.
    pub async fn start_oauth(&self, provider: &str) -> Result<Option<Url>, BackendError> {
        tracing::info!(provider, "starting oauth sign-in");
        self.backend
            .sign_in_with_oauth(provider, self.redirect_to.as_deref())
            .await
    }

    /// Turn the redirect the browser came back with into a session.
    pub async fn complete_oauth(&self, callback: &Url) -> Result<Session, BackendError> {
        let tokens = oauth::parse_callback(callback)?;
        let user = self.backend.get_user(&tokens.access_token).await?;
        let session = Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_at: tokens
                .expires_at
                .or(tokens.expires_in.map(|secs| now_unix() + secs)),
            user,
        };
        self.adopt(session.clone()).await;
        Ok(session)
    }

    pub async fn refresh(&self) -> Result<Session, BackendError> {
        let session = self.sessions.current().ok_or(BackendError::NotSignedIn)?;
        self.refresh_from(&session.refresh_token).await
    }

    async fn refresh_from(&self, refresh_token: &str) -> Result<Session, BackendError> {
        match self.backend.refresh_session(refresh_token).await {
            Ok(session) => {
                self.adopt(session.clone()).await;
                Ok(session)
            }
            Err(e) => {
                tracing::warn!("session refresh failed: {e}");
                // Only a rejected refresh token ends the session
                if matches!(e, BackendError::Api { status: 400 | 401, .. }) {
                    self.forget().await;
                }
                Err(e)
            }
        }
    }

    /// Revoke the session remotely, then drop it locally. A remote failure
    /// keeps the user signed in.
    pub async fn sign_out(&self) -> Result<(), BackendError> {
        let Some(session) = self.sessions.current() else {
            self.forget().await;
            return Ok(());
        };
        match self.backend.sign_out(&session.access_token).await {
            Ok(()) => {}
            // Token already invalid remotely
            Err(BackendError::Api { status: 401 | 404, .. }) => {
                tracing::debug!("session already gone remotely");
            }
            Err(e) => {
                tracing::error!("sign out failed: {e}");
                return Err(e);
            }
        }
        self.forget().await;
        Ok(())
    }

    async fn adopt(&self, session: Session) {
        if let Err(e) = kv::set_json(&self.kv, keys::SESSION, &session).await {
            tracing::warn!("could not persist session: {e}");
        }
        self.sessions.publish(Some(session));
    }

    async fn forget(&self) {
        if let Err(e) = self.kv.remove(keys::SESSION).await {
            tracing::warn!("could not clear stored session: {e}");
        }
        if self.sessions.is_signed_in() {
            self.sessions.publish(None);
        }
    }
}
