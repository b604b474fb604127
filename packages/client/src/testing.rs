//! In-memory fakes of the backend, picker and browser collaborators.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use api::auth::now_unix;
use api::{
    AuthBackend, BackendError, ObjectStorage, Session, SignUpOutcome, StoredObject,
    UploadRequest, Url, User,
};

use crate::auth::{AuthBrowser, BrowserOutcome};
use crate::upload::{FilePicker, PickError, PickOutcome, SelectedFile, PDF_MIME};

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        identities: None,
    }
}

pub fn session(id: &str) -> Session {
    Session {
        access_token: format!("token-{id}"),
        refresh_token: format!("refresh-{id}"),
        token_type: "bearer".to_string(),
        expires_at: Some(now_unix() + 3600),
        user: user(id),
    }
}

pub fn expired_session(id: &str) -> Session {
    Session {
        expires_at: Some(now_unix() - 100),
        ..session(id)
    }
}

pub fn pdf(name: &str) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        uri: format!("file:///tmp/{name}"),
        mime_type: Some(PDF_MIME.to_string()),
        size_bytes: Some(1024),
    }
}

fn api_error(status: u16, message: &str) -> BackendError {
    BackendError::Api {
        status,
        message: message.to_string(),
    }
}

#[derive(Default)]
struct FakeAuthState {
    calls: Vec<&'static str>,
    failure: Option<String>,
    revoked: bool,
    sign_up: Option<SignUpOutcome>,
    oauth_url: Option<Url>,
}

/// Auth backend that accepts any password except `"wrong"`. Tokens are
/// `token-<id>` / `refresh-<id>`.
#[derive(Clone, Default)]
pub struct FakeAuth {
    state: Arc<Mutex<FakeAuthState>>,
}

impl FakeAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sign_up(self, outcome: SignUpOutcome) -> Self {
        self.state.lock().unwrap().sign_up = Some(outcome);
        self
    }

    pub fn with_oauth_url(self, url: Url) -> Self {
        self.state.lock().unwrap().oauth_url = Some(url);
        self
    }

    /// Every following call fails with `message`.
    pub fn fail_with(&self, message: &str) {
        self.state.lock().unwrap().failure = Some(message.to_string());
    }

    /// Reject every access and refresh token.
    pub fn revoke_tokens(&self) {
        self.state.lock().unwrap().revoked = true;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: &'static str) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match &state.failure {
            Some(message) => Err(api_error(500, message)),
            None => Ok(()),
        }
    }

    fn revoked(&self) -> bool {
        self.state.lock().unwrap().revoked
    }
}

impl AuthBackend for FakeAuth {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        self.record("sign_in_with_password")?;
        if password == "wrong" {
            return Err(api_error(400, "Invalid login credentials"));
        }
        Ok(session(email))
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<SignUpOutcome, BackendError> {
        self.record("sign_up")?;
        let configured = self.state.lock().unwrap().sign_up.clone();
        Ok(configured.unwrap_or_else(|| SignUpOutcome::SessionCreated(session(email))))
    }

    async fn sign_in_with_oauth(
        &self,
        _provider: &str,
        _redirect_to: Option<&str>,
    ) -> Result<Option<Url>, BackendError> {
        self.record("sign_in_with_oauth")?;
        Ok(self.state.lock().unwrap().oauth_url.clone())
    }

    async fn get_user(&self, access_token: &str) -> Result<User, BackendError> {
        self.record("get_user")?;
        match access_token.strip_prefix("token-") {
            Some(id) if !self.revoked() => Ok(user(id)),
            _ => Err(api_error(401, "invalid JWT")),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        self.record("refresh_session")?;
        match refresh_token.strip_prefix("refresh-") {
            Some(id) if !self.revoked() => Ok(session(id)),
            _ => Err(api_error(400, "Invalid Refresh Token")),
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), BackendError> {
        self.record("sign_out")
    }
}

#[derive(Default)]
struct FakeStorageState {
    uploads: Vec<UploadRequest>,
    failure: Option<String>,
    no_public_urls: bool,
}

/// Object storage that keeps uploads in memory and refuses to overwrite.
#[derive(Clone, Default)]
pub struct FakeStorage {
    state: Arc<Mutex<FakeStorageState>>,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(self, message: &str) -> Self {
        self.state.lock().unwrap().failure = Some(message.to_string());
        self
    }

    pub fn without_public_urls(self) -> Self {
        self.state.lock().unwrap().no_public_urls = true;
        self
    }

    pub fn uploads(&self) -> Vec<UploadRequest> {
        self.state.lock().unwrap().uploads.clone()
    }
}

impl ObjectStorage for FakeStorage {
    async fn upload(&self, request: UploadRequest) -> Result<StoredObject, BackendError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.failure {
            return Err(api_error(400, message));
        }
        let exists = state
            .uploads
            .iter()
            .any(|u| u.bucket == request.bucket && u.key == request.key);
        if exists && !request.overwrite {
            return Err(api_error(409, "The resource already exists"));
        }
        let path = format!("{}/{}", request.bucket, request.key);
        state.uploads.push(request);
        Ok(StoredObject { path })
    }

    async fn public_url(&self, bucket: &str, key: &str) -> Result<Option<Url>, BackendError> {
        if self.state.lock().unwrap().no_public_urls {
            return Ok(None);
        }
        let url = Url::parse(&format!(
            "https://cdn.test/storage/v1/object/public/{bucket}/{key}"
        ))?;
        Ok(Some(url))
    }
}

/// Picker that replays scripted outcomes, then reports cancellation.
#[derive(Clone)]
pub struct FakePicker {
    outcomes: Arc<Mutex<VecDeque<Result<PickOutcome, PickError>>>>,
    readable: bool,
}

impl FakePicker {
    pub fn new(outcomes: Vec<Result<PickOutcome, PickError>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into())),
            readable: true,
        }
    }

    pub fn unreadable(mut self) -> Self {
        self.readable = false;
        self
    }
}

impl FilePicker for FakePicker {
    async fn pick(&self, _mime_filter: &str) -> Result<PickOutcome, PickError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PickOutcome::Cancelled))
    }

    async fn read(&self, file: &SelectedFile) -> Result<Vec<u8>, PickError> {
        if !self.readable {
            return Err(PickError::Read {
                name: file.name.clone(),
                reason: "file no longer exists".to_string(),
            });
        }
        Ok(b"%PDF-1.4 test".to_vec())
    }
}

/// Browser that always ends the same way and remembers what it opened.
#[derive(Clone)]
pub struct FakeBrowser {
    outcome: BrowserOutcome,
    opened: Arc<Mutex<Vec<Url>>>,
}

impl FakeBrowser {
    pub fn new(outcome: BrowserOutcome) -> Self {
        Self {
            outcome,
            opened: Arc::default(),
        }
    }

    pub fn opened(&self) -> Vec<Url> {
        self.opened.lock().unwrap().clone()
    }
}

impl AuthBrowser for FakeBrowser {
    async fn open_auth_session(&self, url: &Url, _return_to: Option<&str>) -> BrowserOutcome {
        self.opened.lock().unwrap().push(url.clone());
        self.outcome.clone()
    }
}
