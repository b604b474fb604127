use dioxus::prelude::*;
use store::STOREFRONT;

#[component]
pub fn AboutUs() -> Element {
    rsx! {
        div {
            class: "px-6 py-8",
            h2 { class: "m-0 mb-4 text-2xl font-bold text-neutral-800", "{STOREFRONT.name}" }
            for (i, paragraph) in STOREFRONT.about.split("\n\n").enumerate() {
                p { key: "{i}", class: "m-0 mb-4 text-neutral-600 leading-relaxed", "{paragraph}" }
            }
        }
    }
}
