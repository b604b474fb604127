use client::Screen;
use dioxus::prelude::*;

use crate::icons::FaArrowLeft;
use crate::navigation::use_navigation;
use crate::Icon;

/// Title bar for screens that declare a visible header.
#[component]
pub fn ScreenHeader(screen: Screen) -> Element {
    let mut nav = use_navigation();
    let header = screen.header();
    if !header.visible {
        return rsx! {};
    }
    let can_go_back = nav.read().can_go_back();

    rsx! {
        div {
            class: "flex items-center gap-3 px-4 py-3 bg-white border-b border-neutral-300",
            if can_go_back {
                button {
                    class: "text-neutral-700",
                    title: "Back",
                    onclick: move |_| {
                        nav.write().back();
                    },
                    Icon { icon: FaArrowLeft, width: 16, height: 16 }
                }
            }
            if let Some(title) = header.title {
                h1 { class: "m-0 text-lg font-semibold text-neutral-800", "{title}" }
            }
        }
    }
}
