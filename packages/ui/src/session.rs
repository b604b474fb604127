//! Session context and hooks for the UI.

use client::SessionSnapshot;
use dioxus::prelude::*;

use crate::services::Services;

pub fn use_services() -> Services {
    use_context::<Services>()
}

/// The latest published session. Updates on sign-in, refresh and sign-out.
pub fn use_session() -> Signal<SessionSnapshot> {
    use_context::<Signal<SessionSnapshot>>()
}

/// Provider component that mirrors the session store into a signal.
///
/// It owns the only subscription to the store for the lifetime of the app and
/// restores the previous run's session once on mount. Wrap the app with it,
/// inside the [`Services`] context.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let services = use_services();
    let mut snapshot = use_signal(|| services.sessions().snapshot());

    let sessions = services.sessions().clone();
    use_future(move || {
        let mut rx = sessions.subscribe();
        async move {
            loop {
                let latest = rx.borrow_and_update().clone();
                if snapshot.peek().revision != latest.revision {
                    snapshot.set(latest);
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let auth = services.auth.clone();
    use_future(move || {
        let auth = auth.clone();
        async move {
            if auth.restore().await.is_none() {
                tracing::debug!("starting signed out");
            }
        }
    });

    use_context_provider(|| snapshot);

    rsx! {
        {children}
    }
}
