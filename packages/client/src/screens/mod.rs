//! Per-screen state for the screens that submit something.
//!
//! Each keeps its own [`AsyncAction`](crate::action::AsyncAction) and an
//! optional alert. Nothing here navigates on a successful sign-in; the session
//! observer does.

mod home;
mod login;
mod sign_up;

pub use home::{shared_document, HomeScreen};
pub use login::LoginScreen;
pub use sign_up::SignUpScreen;
