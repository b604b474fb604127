use api::{BackendError, SignUpOutcome};
#[cfg(test)]
use api::AuthBackend;
#[cfg(test)]
use store::KeyValueStore;

use crate::action::{AsyncAction, Ticket};
#[cfg(test)]
use crate::auth::Auth;
use crate::errors::UserAlert;
use crate::forms::{Credentials, SignUpForm};
use crate::navigation::Screen;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpScreen {
    pub form: SignUpForm,
    pub action: AsyncAction<()>,
    alert: Option<UserAlert>,
}

impl SignUpScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.action.is_pending()
    }

    pub fn links_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn alert(&self) -> Option<&UserAlert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

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

    /// Record the outcome. Returns the screen to go to when the user still has
    /// to confirm their address.
    pub fn finish(
        &mut self,
        ticket: &Ticket,
        outcome: Result<SignUpOutcome, BackendError>,
    ) -> Option<Screen> {
        match outcome {
            Ok(SignUpOutcome::SessionCreated(_)) => {
                self.action.resolve_success(ticket, ());
                None
            }
            Ok(SignUpOutcome::ConfirmationRequired { email }) => {
                if !self.action.resolve_success(ticket, ()) {
                    return None;
                }
                tracing::info!(email = %email, "sign-up awaiting confirmation");
                self.alert = Some(UserAlert::new(
                    "Sign Up Successful",
                    "Please check your email for a confirmation link to complete the registration.",
                ));
                Some(Screen::Login)
            }
            Ok(SignUpOutcome::AlreadyRegistered { email }) => {
                if !self.action.resolve_success(ticket, ()) {
                    return None;
                }
                tracing::warn!(email = %email, "sign-up for existing address");
                self.alert = Some(UserAlert::new(
                    "Sign Up Info",
                    "User may already exist. Please check your email to confirm or try logging in.",
                ));
                Some(Screen::Login)
            }
            Err(e) => {
                let message = e.user_message();
                if self.action.resolve_failure(ticket, message.clone()) {
                    self.alert = Some(UserAlert::failure("Sign Up Failed", &message));
                }
                None
            }
        }
    }

    #[cfg(test)]
    pub async fn submit<B: AuthBackend, K: KeyValueStore>(
        &mut self,
        auth: &Auth<B, K>,
    ) -> Option<Screen> {
        let (ticket, credentials) = self.begin()?;
        let outcome = auth.sign_up(&credentials).await;
        self.finish(&ticket, outcome)
    }
}
