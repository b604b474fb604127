//! # REST client for the hosted backend
//!
//! [`BackendClient`] implements [`AuthBackend`] and [`ObjectStorage`] over the
//! backend's HTTP API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | sign in | `POST auth/v1/token?grant_type=password` |
//! | refresh | `POST auth/v1/token?grant_type=refresh_token` |
//! | sign up | `POST auth/v1/signup` |
//! | current user | `GET auth/v1/user` |
//! | sign out | `POST auth/v1/logout` |
//! | OAuth | no request, see [`crate::auth::oauth::authorize_url`] |
//! | upload | `POST storage/v1/object/<bucket>/<key>` with `x-upsert` |
//! | public URL | no request, `storage/v1/object/public/<bucket>/<key>` |
//!
//! Every request carries the `apikey` header. Non-success responses become
//! [`BackendError::Api`] with the most specific message found in the JSON body
//! (`msg`, `error_description`, `message`, then `error`).

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::auth::{
    now_unix, oauth, AuthBackend, BackendConfig, Session, SignUpOutcome, TokenResponse,
};
use crate::error::BackendError;
use crate::models::User;
use crate::storage::{ObjectStorage, StoredObject, UploadRequest};

/// HTTP client bound to one backend project.
#[derive(Clone, Debug)]
pub struct BackendClient {
    config: BackendConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key", default)]
    key: Option<String>,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, BackendError> {
        let url = self.config.endpoint(path)?;
        Ok(self
            .http
            .request(method, url)
            .header("apikey", &self.config.anon_key))
    }

    fn storage_url(&self, prefix: &str, bucket: &str, key: &str) -> Result<Url, BackendError> {
        let mut url = self.config.endpoint(prefix)?;
        url.path_segments_mut()
            .map_err(|()| BackendError::Config("backend url cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(bucket)
            .push(key);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let body = read_body(request.send().await?).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn token(&self, grant_type: &str, body: Value) -> Result<Session, BackendError> {
        let request = self
            .request(Method::POST, "auth/v1/token")?
            .query(&[("grant_type", grant_type)])
            .json(&body);
        let token: TokenResponse = self.send_json(request).await?;
        Ok(token.into_session(now_unix()))
    }
}

async fn read_body(response: Response) -> Result<String, BackendError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(api_error(status.as_u16(), &body))
    }
}

fn api_error(status: u16, body: &str) -> BackendError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|value| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|field| value.get(*field).and_then(Value::as_str))
                .map(str::to_string)
        })
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| format!("request failed with status {status}"));
    BackendError::Api { status, message }
}

impl AuthBackend for BackendClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        tracing::debug!(email, "signing in with password");
        self.token("password", json!({ "email": email, "password": password }))
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, BackendError> {
        let request = self
            .request(Method::POST, "auth/v1/signup")?
            .json(&json!({ "email": email, "password": password }));
        let body: Value = self.send_json(request).await?;

        if body.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(body)?;
            return Ok(SignUpOutcome::SessionCreated(token.into_session(now_unix())));
        }

        // Unconfirmed sign-ups answer with the bare user (older servers) or
        // `{ user, session: null }`
        let user_value = if body.get("user").is_some_and(Value::is_object) {
            body["user"].clone()
        } else {
            body
        };
        let user: User = serde_json::from_value(user_value)?;
        let email = user.email.clone().unwrap_or_else(|| email.to_string());
        if user.has_no_identities() {
            tracing::warn!(email = %email, "sign-up for an address that is already registered");
            Ok(SignUpOutcome::AlreadyRegistered { email })
        } else {
            Ok(SignUpOutcome::ConfirmationRequired { email })
        }
    }

    async fn sign_in_with_oauth(
        &self,
        provider: &str,
        redirect_to: Option<&str>,
    ) -> Result<Option<Url>, BackendError> {
        oauth::authorize_url(&self.config, provider, redirect_to).map(Some)
    }

    async fn get_user(&self, access_token: &str) -> Result<User, BackendError> {
        let request = self
            .request(Method::GET, "auth/v1/user")?
            .bearer_auth(access_token);
        self.send_json(request).await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        self.token("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let request = self
            .request(Method::POST, "auth/v1/logout")?
            .bearer_auth(access_token);
        read_body(request.send().await?).await?;
        Ok(())
    }
}

impl ObjectStorage for BackendClient {
    async fn upload(&self, request: UploadRequest) -> Result<StoredObject, BackendError> {
        let url = self.storage_url("storage/v1/object", &request.bucket, &request.key)?;
        let token = request
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);
        tracing::debug!(bucket = %request.bucket, key = %request.key, size = request.bytes.len(), "uploading object");

        let http = self
            .http
            .post(url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, &request.content_type)
            .header("cache-control", "max-age=3600")
            .header("x-upsert", if request.overwrite { "true" } else { "false" })
            .body(request.bytes);

        let body = read_body(http.send().await?).await?;
        let stored = serde_json::from_str::<UploadResponse>(&body)
            .ok()
            .and_then(|r| r.key)
            .unwrap_or_else(|| format!("{}/{}", request.bucket, request.key));
        Ok(StoredObject { path: stored })
    }

    async fn public_url(&self, bucket: &str, key: &str) -> Result<Option<Url>, BackendError> {
        if bucket.is_empty() || key.is_empty() {
            return Ok(None);
        }
        self.storage_url("storage/v1/object/public", bucket, key)
            .map(Some)
    }
}
