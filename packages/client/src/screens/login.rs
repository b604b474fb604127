use api::{BackendError, Session};
#[cfg(test)]
use api::AuthBackend;
#[cfg(test)]
use store::KeyValueStore;

use crate::action::{AsyncAction, Ticket};
#[cfg(test)]
use crate::auth::Auth;
use crate::errors::UserAlert;
use crate::forms::{Credentials, LoginForm};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginScreen {
    pub form: LoginForm,
    pub action: AsyncAction<()>,
    alert: Option<UserAlert>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.action.is_pending()
    }

    /// Guest and sign-up links are disabled while signing in.
    pub fn links_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn alert(&self) -> Option<&UserAlert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Validate and start. `None` when invalid (alert set) or already running.
    pub fn begin(&mut self) -> Option<(Ticket, Credentials)> {
        if self.is_busy() {
            return None;
        }
        match self.form.validate() {
            Ok(credentials) => {
                self.alert = None;
                let ticket = self.action.start()?;
                Some((ticket, credentials))
            }
            Err(e) => {
                self.alert = Some(UserAlert::new("Error", e.to_string()));
                None
            }
        }
    }

    pub fn finish(&mut self, ticket: &Ticket, outcome: Result<Session, BackendError>) {
        match outcome {
            Ok(_) => {
                self.action.resolve_success(ticket, ());
            }
            Err(e) => {
                let message = e.user_message();
                if self.action.resolve_failure(ticket, message.clone()) {
                    self.alert = Some(UserAlert::failure("Login Failed", &message));
                }
            }
        }
    }

    #[cfg(test)]
    pub async fn submit<B: AuthBackend, K: KeyValueStore>(&mut self, auth: &Auth<B, K>) -> bool {
        let Some((ticket, credentials)) = self.begin() else {
            return false;
        };
        let outcome = auth.sign_in(&credentials).await;
        self.finish(&ticket, outcome);
        true
    }
}
