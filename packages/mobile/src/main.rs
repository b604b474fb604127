use client::{LaunchState, Screen};
use dioxus::prelude::*;
use ui::Services;
use views::{
    AboutUs, AdminUpload, ContactLocation, Home, Login, Onboarding, SignUp, ViewDocument,
};

mod views;

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let services = use_hook(|| ui::make_services().map_err(|e| e.to_string()));

    match services {
        Ok(services) => rsx! {
            Storefront { services }
        },
        Err(message) => {
            tracing::error!("cannot start: {message}");
            rsx! {
                div {
                    class: "flex items-center justify-center min-h-screen p-6 text-center text-red-700",
                    "{message}"
                }
            }
        }
    }
}

/// Resolves the launch flag before the first screen is shown.
#[component]
fn Storefront(services: Services) -> Element {
    use_context_provider(|| services.clone());
    let kv = services.kv.clone();
    let launch = use_resource(move || {
        let kv = kv.clone();
        async move { LaunchState::load(&kv).await }
    });

    let Some(has_prior_launch) = launch() else {
        return rsx! {
            div {
                class: "flex items-center justify-center min-h-screen",
                ui::Spinner {}
            }
        };
    };

    rsx! {
        ui::SessionProvider {
            ui::NavigationProvider { has_prior_launch,
                Shell {}
            }
        }
    }
}

/// Header and active screen.
#[component]
fn Shell() -> Element {
    let nav = ui::use_navigation();
    let screen = nav.read().active().clone();

    rsx! {
        div {
            class: "flex flex-col min-h-screen bg-neutral-100",
            ui::ScreenHeader { screen: screen.clone() }
            div {
                class: "flex-1 overflow-y-auto",
                {render_screen(screen)}
            }
        }
    }
}

fn render_screen(screen: Screen) -> Element {
    match screen {
        Screen::Onboarding => rsx! { Onboarding {} },
        Screen::Home => rsx! { Home {} },
        Screen::AuthListener => rsx! {},
        Screen::ContactLocation => rsx! { ContactLocation {} },
        Screen::AboutUs => rsx! { AboutUs {} },
        Screen::AdminUpload => rsx! { AdminUpload {} },
        Screen::ViewDocument { document_url, message } => rsx! {
            ViewDocument { document_url, message }
        },
        Screen::Login => rsx! { Login {} },
        Screen::SignUp => rsx! { SignUp {} },
    }
}
