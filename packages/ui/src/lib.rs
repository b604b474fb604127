//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod services;
pub use services::{make_kv, make_services, AppAuth, AppStore, Services};

mod session;
pub use session::{use_services, use_session, SessionProvider};

mod navigation;
pub use navigation::{use_navigation, NavigationProvider};

mod header;
pub use header::ScreenHeader;

mod alert;
pub use alert::{AlertDialog, Modal};

mod picker;
pub use picker::FileEnginePicker;

mod browser;
pub use browser::{open_external, SystemBrowser};

mod products;
pub use products::ProductList;

/// Liveness token for the calling component, ended when it unmounts.
pub fn use_screen_lifetime() -> client::ScreenLifetime {
    let lifetime = use_hook(client::ScreenLifetime::new);
    let on_drop = lifetime.clone();
    use_drop(move || on_drop.end());
    lifetime
}

/// Shared look for full-width action buttons.
pub const BUTTON_CLASS: &str =
    "w-full rounded-lg px-4 py-3 text-white bg-neutral-700 disabled:bg-neutral-400";

/// Spinner shown in place of a button label while an action is pending.
#[component]
pub fn Spinner() -> Element {
    rsx! {
        span {
            class: "inline-block animate-spin",
            Icon { icon: icons::FaSpinner, width: 16, height: 16 }
        }
    }
}
