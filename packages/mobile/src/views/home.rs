use client::screens::{shared_document, HomeScreen};
use client::Screen;
use dioxus::prelude::*;
use ui::{
    open_external, use_navigation, use_screen_lifetime, use_services, use_session, AlertDialog,
    ProductList,
};

#[component]
fn NavCard(title: String, description: String, onclick: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: "block w-full mb-4 rounded-lg bg-white p-4 text-left shadow-sm",
            onclick: move |_| onclick.call(()),
            div { class: "text-lg font-medium text-neutral-700", "{title}" }
            div { class: "mt-1 text-sm text-neutral-500", "{description}" }
        }
    }
}

#[component]
pub fn Home() -> Element {
    let services = use_services();
    let session = use_session();
    let mut nav = use_navigation();
    let lifetime = use_screen_lifetime();
    let mut screen = use_signal(HomeScreen::new);

    let signed_in_as = session
        .read()
        .session
        .as_ref()
        .map(|s| s.user.display_name().to_string());

    let website = services.config.storefront.website_url.clone();
    let open_website = move |_| {
        if let Err(e) = open_external(&website) {
            tracing::error!("Couldn't load page: {e}");
        }
    };

    let kv = services.kv.clone();
    let alive = lifetime.clone();
    let view_shared = move |_| {
        let kv = kv.clone();
        let alive = alive.clone();
        spawn(async move {
            let target = shared_document(&kv).await;
            if !alive.is_active() {
                return;
            }
            match target {
                Ok(target) => nav.write().navigate(target),
                Err(alert) => screen.write().show_alert(alert),
            }
        });
    };

    let auth = services.auth.clone();
    let logout = move |_| {
        let Some(ticket) = screen.write().begin_logout() else {
            return;
        };
        let ticket = ticket.within(&lifetime);
        let auth = auth.clone();
        spawn(async move {
            let outcome = auth.sign_out().await;
            if ticket.is_live() {
                screen.write().finish_logout(&ticket, outcome);
            }
        });
    };

    let logging_out = screen.read().logout.is_pending();
    let alert = screen.read().alert().cloned();

    rsx! {
        div {
            class: "px-6 py-8",
            if let Some(name) = signed_in_as {
                p { class: "m-0 mb-6 text-sm text-neutral-500", "Signed in as {name}" }
            }
            NavCard {
                title: "Contact & Location",
                description: "Find our store address and contact details.",
                onclick: move |_| nav.write().navigate(Screen::ContactLocation),
            }
            NavCard {
                title: "About Us",
                description: "Learn more about our story.",
                onclick: move |_| nav.write().navigate(Screen::AboutUs),
            }
            NavCard {
                title: "Visit Our Website",
                description: "Explore more products online.",
                onclick: open_website,
            }

            ProductList {}

            div {
                class: "mt-10 pt-6 border-t border-neutral-300",
                h2 { class: "m-0 mb-3 text-xl font-semibold text-neutral-700", "Admin Area" }
                button {
                    class: ui::BUTTON_CLASS,
                    onclick: move |_| nav.write().navigate(Screen::AdminUpload),
                    "Upload Invoice (Admin)"
                }
            }

            div {
                class: "mt-6 pt-6 border-t border-neutral-300",
                button {
                    class: ui::BUTTON_CLASS,
                    onclick: view_shared,
                    "View Shared Document"
                }
            }

            div {
                class: "flex justify-center mt-10 pt-6 border-t border-neutral-300",
                button {
                    class: "rounded-lg px-12 py-4 font-semibold text-white bg-neutral-600 disabled:bg-neutral-400",
                    disabled: logging_out,
                    onclick: logout,
                    if logging_out {
                        ui::Spinner {}
                    } else {
                        "Logout"
                    }
                }
            }
        }

        if let Some(alert) = alert {
            AlertDialog {
                alert,
                on_dismiss: move |_| screen.write().dismiss_alert(),
            }
        }
    }
}
