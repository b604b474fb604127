//! Authentication against the hosted backend.

mod config;
pub mod oauth;
mod session;

use std::future::Future;

use url::Url;

pub use config::{BackendConfig, ANON_KEY_VAR, BACKEND_URL_VAR};
pub(crate) use session::TokenResponse;
pub use session::{now_unix, Session};

use crate::error::BackendError;
use crate::models::User;

/// What a successful sign-up call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// The project auto-confirms addresses: the user is signed in right away.
    SessionCreated(Session),
    /// A confirmation email was sent.
    ConfirmationRequired { email: String },
    /// The address is already registered but unconfirmed.
    AlreadyRegistered { email: String },
}

/// Remote authentication operations.
pub trait AuthBackend {
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, BackendError>>;

    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<SignUpOutcome, BackendError>>;

    /// URL to open in an external browser session, or `None` when the backend
    /// has nothing for the browser to do.
    fn sign_in_with_oauth(
        &self,
        provider: &str,
        redirect_to: Option<&str>,
    ) -> impl Future<Output = Result<Option<Url>, BackendError>>;

    /// Look up the user an access token belongs to. Fails for expired tokens.
    fn get_user(&self, access_token: &str) -> impl Future<Output = Result<User, BackendError>>;

    fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<Session, BackendError>>;

    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), BackendError>>;
}
