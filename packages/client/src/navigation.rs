//! # Navigation
//!
//! [`NavigationController`] owns the screen stack. The initial screen is picked
//! once from the prior-launch flag; afterwards the stack only changes through
//! [`push`](NavigationController::push), [`replace`](NavigationController::replace),
//! [`navigate`](NavigationController::navigate), [`back`](NavigationController::back)
//! and the session observer.
//!
//! ## Session redirect
//!
//! [`observe_session`](NavigationController::observe_session) is fed every
//! [`SessionSnapshot`]. A snapshot whose revision was already seen is ignored,
//! and only a signed-out to signed-in transition replaces the active screen
//! with [`Screen::Home`]. Token refreshes leave the stack alone.

use store::{keys, KeyValueStore};

use crate::session::SessionSnapshot;

/// Every screen in the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    Home,
    AuthListener,
    ContactLocation,
    AboutUs,
    AdminUpload,
    ViewDocument {
        document_url: Option<String>,
        message: Option<String>,
    },
    Login,
    SignUp,
}

/// Header shown above a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub visible: bool,
    pub title: Option<&'static str>,
}

impl Header {
    const HIDDEN: Header = Header {
        visible: false,
        title: None,
    };

    const fn titled(title: &'static str) -> Header {
        Header {
            visible: true,
            title: Some(title),
        }
    }
}

impl Screen {
    pub fn view_document(url: impl Into<String>) -> Screen {
        Screen::ViewDocument {
            document_url: Some(url.into()),
            message: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Onboarding => "Onboarding",
            Screen::Home => "Home",
            Screen::AuthListener => "AuthListener",
            Screen::ContactLocation => "ContactLocation",
            Screen::AboutUs => "AboutUs",
            Screen::AdminUpload => "AdminUpload",
            Screen::ViewDocument { .. } => "ViewDocument",
            Screen::Login => "Login",
            Screen::SignUp => "SignUp",
        }
    }

    pub fn header(&self) -> Header {
        match self {
            Screen::Onboarding | Screen::Home | Screen::AuthListener => Header::HIDDEN,
            Screen::ContactLocation => Header::titled("Contact & Location"),
            Screen::AboutUs => Header::titled("About Us"),
            Screen::AdminUpload => Header::titled("Admin - Upload Invoice"),
            Screen::ViewDocument { .. } => Header::titled("View Document"),
            Screen::Login => Header::titled("Sign in"),
            Screen::SignUp => Header::titled("Sign up"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationController {
    stack: Vec<Screen>,
    seen_revision: u64,
    seen_sign_ins: u64,
}

impl NavigationController {
    pub fn new(has_prior_launch: bool) -> Self {
        let initial = Self::initial_screen(has_prior_launch);
        tracing::debug!(screen = initial.name(), "initial screen");
        Self {
            stack: vec![initial],
            seen_revision: 0,
            seen_sign_ins: 0,
        }
    }

    pub fn initial_screen(has_prior_launch: bool) -> Screen {
        if has_prior_launch {
            Screen::Home
        } else {
            Screen::Onboarding
        }
    }

    pub fn active(&self) -> &Screen {
        // The stack is never empty: back() refuses to pop the root
        &self.stack[self.stack.len() - 1]
    }

    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn push(&mut self, screen: Screen) {
        tracing::debug!(screen = screen.name(), "push");
        self.stack.push(screen);
    }

    /// Swap the active screen; it is gone from the back-stack.
    pub fn replace(&mut self, screen: Screen) {
        tracing::debug!(screen = screen.name(), "replace");
        if let Some(top) = self.stack.last_mut() {
            *top = screen;
        }
    }

    /// Go to `screen`, popping back to an existing entry of the same kind
    /// instead of stacking a duplicate.
    pub fn navigate(&mut self, screen: Screen) {
        match self.stack.iter().rposition(|s| s.name() == screen.name()) {
            Some(index) => {
                tracing::debug!(screen = screen.name(), "navigate back to existing entry");
                self.stack.truncate(index + 1);
                self.replace(screen);
            }
            None => self.push(screen),
        }
    }

    /// Pop the active screen. False at the root.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.stack.pop();
        tracing::debug!(screen = self.active().name(), "back");
        true
    }

    /// React to a published session. Returns true when it redirected to Home.
    pub fn observe_session(&mut self, snapshot: &SessionSnapshot) -> bool {
        if snapshot.revision <= self.seen_revision {
            return false;
        }
        self.seen_revision = snapshot.revision;

        let signed_in_again = snapshot.sign_ins > self.seen_sign_ins;
        self.seen_sign_ins = snapshot.sign_ins;
        if signed_in_again && snapshot.session.is_some() {
            tracing::info!(from = self.active().name(), "session started, redirecting home");
            self.replace(Screen::Home);
            return true;
        }
        false
    }
}

/// The persisted prior-launch flag.
pub struct LaunchState;

impl LaunchState {
    /// Whether onboarding was completed on an earlier run. Unreadable means no.
    pub async fn load<K: KeyValueStore>(kv: &K) -> bool {
        match store::kv::get_json::<_, bool>(kv, keys::HAS_LAUNCHED).await {
            Ok(flag) => flag.unwrap_or(false),
            Err(e) => {
                tracing::warn!("launch flag unreadable: {e}");
                false
            }
        }
    }

    pub async fn mark_launched<K: KeyValueStore>(kv: &K) {
        if let Err(e) = store::kv::set_json(kv, keys::HAS_LAUNCHED, &true).await {
            tracing::warn!("could not persist launch flag: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::testing::session;
    use store::MemoryStore;

    #[test]
    fn test_initial_screen() {
        assert_eq!(NavigationController::new(false).active(), &Screen::Onboarding);
        assert_eq!(NavigationController::new(true).active(), &Screen::Home);
    }

    #[test]
    fn test_push_replace_back() {
        let mut nav = NavigationController::new(true);
        nav.push(Screen::AdminUpload);
        nav.push(Screen::view_document("https://x/doc.pdf"));
        assert_eq!(nav.active().name(), "ViewDocument");

        assert!(nav.back());
        assert_eq!(nav.active(), &Screen::AdminUpload);

        nav.replace(Screen::AboutUs);
        assert_eq!(nav.stack(), &[Screen::Home, Screen::AboutUs]);

        assert!(nav.back());
        assert!(!nav.back());
        assert_eq!(nav.active(), &Screen::Home);
    }

    #[test]
    fn test_navigate_reuses_existing_entry() {
        let mut nav = NavigationController::new(false);
        nav.replace(Screen::Login);
        nav.navigate(Screen::SignUp);
        nav.navigate(Screen::Login);
        assert_eq!(nav.stack(), &[Screen::Login]);
    }

    #[test]
    fn test_headers() {
        assert!(!Screen::Home.header().visible);
        assert!(!Screen::AuthListener.header().visible);
        assert_eq!(Screen::Login.header().title, Some("Sign in"));
        assert_eq!(Screen::SignUp.header().title, Some("Sign up"));
        assert_eq!(
            Screen::AdminUpload.header().title,
            Some("Admin - Upload Invoice")
        );
        assert_eq!(
            Screen::ContactLocation.header().title,
            Some("Contact & Location")
        );
    }

    #[test]
    fn test_sign_in_redirects_home_from_any_screen() {
        for start in [Screen::Login, Screen::SignUp, Screen::Onboarding, Screen::AdminUpload] {
            let sessions = SessionStore::new();
            let mut nav = NavigationController::new(false);
            nav.replace(start.clone());

            sessions.publish(Some(session("ann")));
            assert!(nav.observe_session(&sessions.snapshot()), "from {start:?}");
            assert_eq!(nav.active(), &Screen::Home);
            assert!(!nav.can_go_back());
        }
    }

    #[test]
    fn test_same_snapshot_redirects_once() {
        let sessions = SessionStore::new();
        let mut nav = NavigationController::new(true);
        sessions.publish(Some(session("ann")));
        let snapshot = sessions.snapshot();

        assert!(nav.observe_session(&snapshot));
        nav.push(Screen::AboutUs);
        assert!(!nav.observe_session(&snapshot));
        assert_eq!(nav.active(), &Screen::AboutUs);
    }

    #[test]
    fn test_refresh_and_sign_out_leave_stack_alone() {
        let sessions = SessionStore::new();
        let mut nav = NavigationController::new(true);
        sessions.publish(Some(session("ann")));
        nav.observe_session(&sessions.snapshot());
        nav.push(Screen::AdminUpload);

        sessions.publish(Some(session("ann")));
        assert!(!nav.observe_session(&sessions.snapshot()));
        sessions.publish(None);
        assert!(!nav.observe_session(&sessions.snapshot()));
        assert_eq!(nav.active(), &Screen::AdminUpload);

        // Signing in again redirects again
        sessions.publish(Some(session("ann")));
        assert!(nav.observe_session(&sessions.snapshot()));
        assert_eq!(nav.active(), &Screen::Home);
    }

    #[test]
    fn test_sign_in_hidden_by_coalescing_still_redirects() {
        let sessions = SessionStore::new();
        let mut nav = NavigationController::new(true);
        sessions.publish(Some(session("ann")));
        nav.observe_session(&sessions.snapshot());
        nav.push(Screen::ContactLocation);

        // Observer misses the signed-out snapshot in between
        sessions.publish(None);
        sessions.publish(Some(session("bob")));
        assert!(nav.observe_session(&sessions.snapshot()));
        assert_eq!(nav.active(), &Screen::Home);
    }

    #[tokio::test]
    async fn test_launch_flag_round_trip() {
        let kv = MemoryStore::new();
        assert!(!LaunchState::load(&kv).await);
        LaunchState::mark_launched(&kv).await;
        assert!(LaunchState::load(&kv).await);
        assert_eq!(
            NavigationController::new(LaunchState::load(&kv).await).active(),
            &Screen::Home
        );
    }
}
