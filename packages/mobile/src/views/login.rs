use client::screens::LoginScreen;
use client::Screen;
use dioxus::prelude::*;
use ui::{use_navigation, use_screen_lifetime, use_services, AlertDialog};

const INPUT_CLASS: &str = "w-full mb-4 rounded-lg border border-neutral-300 bg-white px-3 py-3";

#[component]
pub fn Login() -> Element {
    let services = use_services();
    let mut nav = use_navigation();
    let lifetime = use_screen_lifetime();
    let mut screen = use_signal(LoginScreen::new);

    let submit = move |_| {
        let Some((ticket, credentials)) = screen.write().begin() else {
            return;
        };
        let ticket = ticket.within(&lifetime);
        let auth = services.auth.clone();
        spawn(async move {
            let outcome = auth.sign_in(&credentials).await;
            if ticket.is_live() {
                screen.write().finish(&ticket, outcome);
            }
        });
    };

    let state = screen.read();
    let busy = state.is_busy();
    let links = state.links_enabled();
    let email = state.form.email.clone();
    let password = state.form.password.clone();
    let alert = state.alert().cloned();
    drop(state);

    rsx! {
        div {
            class: "px-6 py-10",
            h1 { class: "m-0 mb-8 text-3xl font-bold text-neutral-800", "Welcome Back!" }
            input {
                class: INPUT_CLASS,
                r#type: "email",
                placeholder: "Email",
                autocomplete: "email",
                value: email,
                oninput: move |evt: FormEvent| screen.write().form.email = evt.value(),
            }
            input {
                class: INPUT_CLASS,
                r#type: "password",
                placeholder: "Password",
                value: password,
                oninput: move |evt: FormEvent| screen.write().form.password = evt.value(),
            }
            button {
                class: ui::BUTTON_CLASS,
                disabled: busy,
                onclick: submit,
                if busy {
                    ui::Spinner {}
                } else {
                    "Login"
                }
            }
            div {
                class: "flex justify-between mt-6 text-sm",
                button {
                    class: "text-neutral-600 underline disabled:text-neutral-300",
                    disabled: !links,
                    onclick: move |_| nav.write().navigate(Screen::SignUp),
                    "Don't have an account? Sign Up"
                }
                button {
                    class: "text-neutral-600 underline disabled:text-neutral-300",
                    disabled: !links,
                    onclick: move |_| nav.write().replace(Screen::Home),
                    "Continue as Guest"
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
