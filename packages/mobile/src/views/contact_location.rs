use dioxus::prelude::*;
use store::{Platform, STOREFRONT};
use ui::icons::{FaLocationDot, FaPhone};
use ui::{open_external, Icon};

#[component]
pub fn ContactLocation() -> Element {
    let open_map = move |_| {
        let native = STOREFRONT.map_url(Platform::current());
        if let Err(e) = open_external(&native) {
            tracing::warn!("native maps unavailable ({e}), using web maps");
            if let Err(e) = open_external(&STOREFRONT.web_map_url()) {
                tracing::error!("could not open maps: {e}");
            }
        }
    };
    let call = move |_| {
        if let Err(e) = open_external(&STOREFRONT.tel_url()) {
            tracing::error!("could not start call: {e}");
        }
    };

    rsx! {
        div {
            class: "px-6 py-8",
            div {
                class: "mb-6 rounded-lg bg-white p-5 shadow-sm",
                h2 { class: "m-0 mb-3 text-lg font-semibold text-neutral-800", "Our Location" }
                p { class: "m-0 mb-4 text-neutral-600", "{STOREFRONT.address}" }
                button {
                    class: ui::BUTTON_CLASS,
                    onclick: open_map,
                    Icon { icon: FaLocationDot, width: 14, height: 14 }
                    " Open in Maps"
                }
            }
            div {
                class: "rounded-lg bg-white p-5 shadow-sm",
                h2 { class: "m-0 mb-3 text-lg font-semibold text-neutral-800", "Contact Us" }
                p { class: "m-0 mb-4 text-neutral-600", "Phone: {STOREFRONT.phone}" }
                button {
                    class: ui::BUTTON_CLASS,
                    onclick: call,
                    Icon { icon: FaPhone, width: 14, height: 14 }
                    " Call Us"
                }
            }
        }
    }
}
