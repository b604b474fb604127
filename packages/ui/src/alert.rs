use client::UserAlert;
use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn Modal(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 flex items-center justify-center bg-black/40",
            style: "z-index: 2000",
            onclick: move |_| on_close.call(()),
            div {
                class: "bg-white rounded-xl shadow-lg max-w-sm w-full mx-6 p-6",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Title, message and an OK button.
#[component]
pub fn AlertDialog(alert: UserAlert, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        Modal {
            on_close: on_dismiss,
            h2 { class: "m-0 mb-2 text-lg font-semibold text-neutral-800", "{alert.title}" }
            p { class: "m-0 mb-5 text-sm text-neutral-600 whitespace-pre-line", "{alert.body}" }
            button {
                class: "float-right px-4 py-2 font-semibold text-neutral-700",
                onclick: move |_| on_dismiss.call(()),
                "OK"
            }
        }
    }
}
