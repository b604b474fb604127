use client::NavigationController;
use dioxus::prelude::*;

use crate::session::use_session;

pub fn use_navigation() -> Signal<NavigationController> {
    use_context::<Signal<NavigationController>>()
}

/// Owns the screen stack and feeds it every published session, so a sign-in
/// from any screen lands on Home. Must sit inside [`crate::SessionProvider`].
#[component]
pub fn NavigationProvider(has_prior_launch: bool, children: Element) -> Element {
    let session = use_session();
    let mut nav = use_context_provider(|| Signal::new(NavigationController::new(has_prior_launch)));

    use_effect(move || {
        let snapshot = session();
        nav.write().observe_session(&snapshot);
    });

    rsx! {
        {children}
    }
}
