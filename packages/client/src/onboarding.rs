//! Onboarding carousel and the auth-choice prompt it ends in.

use api::{AuthBackend, BackendError};
use store::KeyValueStore;

use crate::action::{AsyncAction, Ticket};
use crate::auth::{Auth, AuthBrowser, BrowserOutcome};
use crate::errors::UserAlert;
use crate::navigation::Screen;

/// What the primary button should do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselStep {
    /// Scroll the pager; the active index follows through [`OnboardingCarousel::on_scroll`].
    ScrollTo { page: usize, offset_x: f64 },
    OpenAuthPrompt,
}

/// Paged intro slides. The active page is derived from the scroll position.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingCarousel {
    page_count: usize,
    active_index: usize,
    page_width: f64,
}

impl OnboardingCarousel {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count: page_count.max(1),
            active_index: 0,
            page_width: 0.0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_last_page(&self) -> bool {
        self.active_index == self.page_count - 1
    }

    pub fn set_page_width(&mut self, width: f64) {
        self.page_width = width;
    }

    /// Recompute the active page from the horizontal offset.
    pub fn on_scroll(&mut self, offset_x: f64) {
        if self.page_width <= 0.0 || !offset_x.is_finite() {
            return;
        }
        let page = (offset_x / self.page_width).round();
        let last = (self.page_count - 1) as f64;
        self.active_index = page.clamp(0.0, last) as usize;
    }

    pub fn advance(&self) -> CarouselStep {
        if self.is_last_page() {
            return CarouselStep::OpenAuthPrompt;
        }
        let page = self.active_index + 1;
        CarouselStep::ScrollTo {
            page,
            offset_x: page as f64 * self.page_width,
        }
    }

    pub fn primary_label(&self) -> &'static str {
        if self.is_last_page() {
            "Get Started"
        } else {
            "Next"
        }
    }

    /// One entry per page, true for the highlighted dot.
    pub fn dots(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.page_count).map(move |i| i == self.active_index)
    }
}

/// Options in the auth-choice prompt that lead straight to a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChoice {
    Login,
    SignUp,
    Guest,
}

impl AuthChoice {
    pub fn target(self) -> Screen {
        match self {
            AuthChoice::Login => Screen::Login,
            AuthChoice::SignUp => Screen::SignUp,
            AuthChoice::Guest => Screen::Home,
        }
    }
}

/// Modal that asks how to continue after onboarding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthPrompt {
    visible: bool,
    pub oauth: AsyncAction<()>,
    alert: Option<UserAlert>,
}

impl AuthPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_busy(&self) -> bool {
        self.oauth.is_pending()
    }

    pub fn alert(&self) -> Option<&UserAlert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Backdrop tap. Ignored while an OAuth sign-in is running.
    pub fn dismiss(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.visible = false;
        true
    }

    /// Close the prompt and return the screen to replace the current one with.
    pub fn choose(&mut self, choice: AuthChoice) -> Option<Screen> {
        if !self.visible || self.is_busy() {
            return None;
        }
        tracing::debug!(?choice, "auth prompt choice");
        self.visible = false;
        Some(choice.target())
    }

    pub fn begin_oauth(&mut self) -> Option<Ticket> {
        if !self.visible {
            return None;
        }
        self.alert = None;
        self.oauth.start()
    }

    /// Record how the browser flow ended. The prompt closes either way.
    pub fn finish_oauth(
        &mut self,
        ticket: &Ticket,
        provider: &str,
        outcome: Result<(), OAuthFailure>,
    ) {
        let accepted = match outcome {
            Ok(()) => self.oauth.resolve_success(ticket, ()),
            Err(failure) => {
                let message = failure.to_string();
                let alert = failure.alert(provider);
                let accepted = self.oauth.resolve_failure(ticket, message);
                if accepted {
                    self.alert = Some(alert);
                }
                accepted
            }
        };
        if accepted {
            self.visible = false;
        }
    }

    /// Full OAuth round trip: authorize URL, browser, callback.
    #[cfg(test)]
    pub async fn sign_in_with_oauth<B, K, W>(
        &mut self,
        auth: &Auth<B, K>,
        browser: &W,
        provider: &str,
    ) -> bool
    where
        B: AuthBackend,
        K: KeyValueStore,
        W: AuthBrowser,
    {
        let Some(ticket) = self.begin_oauth() else {
            return false;
        };
        let outcome = run_oauth(auth, browser, provider).await;
        self.finish_oauth(&ticket, provider, outcome);
        true
    }
}

/// Why an OAuth sign-in did not complete.
#[derive(Debug, thiserror::Error)]
pub enum OAuthFailure {
    #[error("The sign-in process was not completed.")]
    Cancelled,
    #[error("{0}")]
    Browser(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl OAuthFailure {
    pub fn alert(&self, provider: &str) -> UserAlert {
        let provider = provider_label(provider);
        match self {
            OAuthFailure::Cancelled => UserAlert::new(
                format!("{provider} Sign-In Cancelled"),
                "The sign-in process was not completed.",
            ),
            OAuthFailure::Browser(message) => {
                UserAlert::failure(&format!("{provider} Sign-In Failed"), message)
            }
            OAuthFailure::Backend(e) => {
                UserAlert::failure(&format!("{provider} Sign-In Failed"), &e.user_message())
            }
        }
    }
}

/// Drive the browser part of an OAuth sign-in. Success publishes the session
/// through `auth`; cancellation and browser failures become [`OAuthFailure`]s.
pub async fn run_oauth<B, K, W>(
    auth: &Auth<B, K>,
    browser: &W,
    provider: &str,
) -> Result<(), OAuthFailure>
where
    B: AuthBackend,
    K: KeyValueStore,
    W: AuthBrowser,
{
    let Some(url) = auth.start_oauth(provider).await? else {
        return Ok(());
    };
    match browser.open_auth_session(&url, auth.redirect_to()).await {
        BrowserOutcome::Completed(callback) => {
            auth.complete_oauth(&callback).await?;
            Ok(())
        }
        BrowserOutcome::Cancelled => Err(OAuthFailure::Cancelled),
        BrowserOutcome::Failed(message) => Err(OAuthFailure::Browser(message)),
    }
}

fn provider_label(provider: &str) -> String {
    let mut chars = provider.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "OAuth".to_string(),
    }
}
