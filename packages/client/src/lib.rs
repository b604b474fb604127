//! # Client crate: headless app logic
//!
//! The screens' behaviour without any UI: which screen is shown, how sign-in
//! drives navigation, and how each remote action moves through
//! `Idle → Pending → Success | Failure`. The Dioxus views in `ui` and `mobile`
//! hold these types in signals and render them.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`action`] | [`AsyncAction<T>`], tickets and screen lifetimes |
//! | [`session`] | [`SessionStore`], the observable current session |
//! | [`auth`] | [`Auth`] service: restore, sign-in/up, OAuth, refresh, sign-out |
//! | [`redirect`] | Loopback receiver for the OAuth redirect |
//! | [`navigation`] | [`NavigationController`], [`Screen`] catalog, launch flag |
//! | [`onboarding`] | [`OnboardingCarousel`] and the [`AuthPrompt`] |
//! | [`forms`] | Login and sign-up validation |
//! | [`screens`] | Login, sign-up and home screen state |
//! | [`upload`] | [`UploadFlow`], storage keys, the [`FilePicker`] trait |
//! | [`viewer`] | Viewer URL and [`DocumentViewer`] states |
//! | [`errors`] | Remote error classification and alert wording |

pub mod action;
pub mod auth;
pub mod errors;
pub mod forms;
pub mod navigation;
pub mod onboarding;
pub mod redirect;
pub mod screens;
pub mod session;
pub mod upload;
pub mod viewer;

#[cfg(test)]
mod testing;

pub use action::{AsyncAction, AsyncStatus, ScreenLifetime, Ticket};
pub use auth::{Auth, AuthBrowser, BrowserOutcome};
pub use errors::{classify, classify_backend, user_alert, ErrorKind, UserAlert};
pub use forms::{Credentials, LoginForm, SignUpForm, ValidationError};
pub use navigation::{Header, LaunchState, NavigationController, Screen};
pub use onboarding::{AuthChoice, AuthPrompt, CarouselStep, OnboardingCarousel};
pub use redirect::{LoopbackRedirect, RedirectError};
pub use session::{SessionSnapshot, SessionStore};
pub use upload::{
    FilePicker, KeyClock, PickError, PickOutcome, SelectedFile, UploadFlow, UploadOutcome,
    UploadTarget,
};
pub use viewer::{viewer_url, DocumentViewer, ViewerState};
