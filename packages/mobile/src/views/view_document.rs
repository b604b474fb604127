use client::{DocumentViewer, ViewerState};
use dioxus::prelude::*;
use ui::use_services;

#[component]
pub fn ViewDocument(
    #[props(!optional)] document_url: Option<String>,
    #[props(!optional)] message: Option<String>,
) -> Element {
    let services = use_services();
    let mut viewer = use_signal(|| {
        DocumentViewer::open(
            &services.config.viewer.base_url,
            document_url.as_deref(),
            message.as_deref(),
        )
    });

    let state = viewer.read().state().clone();
    let source = viewer.read().source().map(|url| url.to_string());

    match (state, source) {
        (ViewerState::Empty(text) | ViewerState::Failed(text), _) => rsx! {
            div {
                class: "flex items-center justify-center min-h-[60vh] p-6 text-center text-neutral-600",
                "{text}"
            }
        },
        (state, Some(src)) => rsx! {
            div {
                class: "relative w-full h-[calc(100vh-56px)]",
                iframe {
                    class: "w-full h-full border-0",
                    src: "{src}",
                    onload: move |_| viewer.write().load_finished(),
                    onerror: move |_| viewer.write().load_failed(None, None),
                }
                if state == ViewerState::Loading {
                    div {
                        class: "absolute inset-0 flex items-center justify-center bg-white/70",
                        ui::Spinner {}
                    }
                }
            }
        },
        (_, None) => rsx! {},
    }
}
