use dioxus::prelude::*;
use store::{Product, ProductQuery};

/// Catalog section with search and popular/deal filters.
#[component]
pub fn ProductList() -> Element {
    let mut search = use_signal(String::new);
    let mut popular = use_signal(|| false);
    let mut deals = use_signal(|| false);

    let query = ProductQuery {
        product_id: None,
        popular: popular(),
        deal: deals(),
        search: Some(search()),
    };
    let items: Vec<&'static Product> = query.run();

    rsx! {
        div {
            class: "mt-6",
            h2 { class: "m-0 mb-3 text-xl font-semibold text-neutral-700", "Our Products" }
            input {
                class: "w-full mb-3 rounded-lg border border-neutral-300 px-3 py-2",
                r#type: "search",
                placeholder: "Search products",
                value: search(),
                oninput: move |evt: FormEvent| search.set(evt.value()),
            }
            div {
                class: "flex gap-4 mb-3 text-sm text-neutral-700",
                label {
                    input {
                        r#type: "checkbox",
                        checked: popular(),
                        onchange: move |evt: FormEvent| popular.set(evt.checked()),
                    }
                    " Popular"
                }
                label {
                    input {
                        r#type: "checkbox",
                        checked: deals(),
                        onchange: move |evt: FormEvent| deals.set(evt.checked()),
                    }
                    " Deals"
                }
            }
            if items.is_empty() {
                p { class: "text-sm text-neutral-500", "No products match." }
            }
            for product in items {
                div {
                    key: "{product.id}",
                    class: "mb-3 rounded-lg bg-white p-4 shadow-sm",
                    div { class: "font-medium text-neutral-800", "{product.name}" }
                    div {
                        class: "text-xs text-neutral-500",
                        "{product.brand} · {product.category}"
                        if let Some(capacity) = product.capacity {
                            " · {capacity}"
                        }
                    }
                    div {
                        class: "mt-1 text-sm",
                        span { class: "line-through text-neutral-400 mr-2", "{product.currency}{product.price}" }
                        span { class: "font-semibold text-neutral-800", "{product.currency}{product.offer_price}" }
                    }
                    p { class: "m-0 mt-1 text-sm text-neutral-600", "{product.description}" }
                }
            }
        }
    }
}
