use api::BackendError;
#[cfg(test)]
use api::AuthBackend;
use store::KeyValueStore;

use crate::action::{AsyncAction, Ticket};
#[cfg(test)]
use crate::auth::Auth;
use crate::errors::UserAlert;
use crate::navigation::Screen;
use crate::upload::last_uploaded_url;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeScreen {
    pub logout: AsyncAction<()>,
    alert: Option<UserAlert>,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert(&self) -> Option<&UserAlert> {
        self.alert.as_ref()
    }

    pub fn show_alert(&mut self, alert: UserAlert) {
        self.alert = Some(alert);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn begin_logout(&mut self) -> Option<Ticket> {
        self.alert = None;
        self.logout.start()
    }

    /// Sign-out keeps the user on this screen either way.
    pub fn finish_logout(&mut self, ticket: &Ticket, outcome: Result<(), BackendError>) {
        match outcome {
            Ok(()) => {
                self.logout.resolve_success(ticket, ());
            }
            Err(e) => {
                let message = e.user_message();
                if self.logout.resolve_failure(ticket, message.clone()) {
                    self.alert = Some(UserAlert::failure("Logout Failed", &message));
                }
            }
        }
    }

    #[cfg(test)]
    pub async fn sign_out<B: AuthBackend, K: KeyValueStore>(&mut self, auth: &Auth<B, K>) -> bool {
        let Some(ticket) = self.begin_logout() else {
            return false;
        };
        let outcome = auth.sign_out().await;
        self.finish_logout(&ticket, outcome);
        true
    }
}

/// Viewer for the last uploaded document, or the alert explaining there is none.
pub async fn shared_document<K: KeyValueStore>(kv: &K) -> Result<Screen, UserAlert> {
    match last_uploaded_url(kv).await {
        Some(url) => Ok(Screen::view_document(url)),
        None => Err(UserAlert::new(
            "No Document Available",
            "Please upload a document first.",
        )),
    }
}
