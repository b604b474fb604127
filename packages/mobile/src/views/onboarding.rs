use client::onboarding::run_oauth;
use client::{AuthChoice, AuthPrompt, CarouselStep, LaunchState, OnboardingCarousel};
use dioxus::prelude::*;
use store::ONBOARDING_SLIDES;
use ui::{use_navigation, use_screen_lifetime, use_services, AlertDialog, Modal, SystemBrowser};

/// The pager advances by whole pages, so offsets are measured in pages.
const PAGE_WIDTH: f64 = 1.0;

#[component]
pub fn Onboarding() -> Element {
    let services = use_services();
    let mut nav = use_navigation();
    let lifetime = use_screen_lifetime();
    let mut carousel = use_signal(|| {
        let mut carousel = OnboardingCarousel::new(ONBOARDING_SLIDES.len());
        carousel.set_page_width(PAGE_WIDTH);
        carousel
    });
    let mut prompt = use_signal(AuthPrompt::new);

    let slide = ONBOARDING_SLIDES[carousel.read().active_index()];
    let label = carousel.read().primary_label();
    let dots: Vec<bool> = carousel.read().dots().collect();

    let advance = move |_| {
        let step = carousel.read().advance();
        match step {
            CarouselStep::ScrollTo { offset_x, .. } => carousel.write().on_scroll(offset_x),
            CarouselStep::OpenAuthPrompt => prompt.write().open(),
        }
    };

    let kv = services.kv.clone();
    let choose = use_callback(move |choice: AuthChoice| {
        let Some(target) = prompt.write().choose(choice) else {
            return;
        };
        let kv = kv.clone();
        spawn(async move { LaunchState::mark_launched(&kv).await });
        nav.write().replace(target);
    });

    let oauth_services = services.clone();
    let sign_in_with_provider = move |_| {
        let Some(ticket) = prompt.write().begin_oauth() else {
            return;
        };
        let ticket = ticket.within(&lifetime);
        let services = oauth_services.clone();
        spawn(async move {
            LaunchState::mark_launched(&services.kv).await;
            let provider = services.config.auth.oauth_provider.clone();
            let outcome = run_oauth(&services.auth, &SystemBrowser::default(), &provider).await;
            if ticket.is_live() {
                prompt.write().finish_oauth(&ticket, &provider, outcome);
            }
        });
    };

    let busy = prompt.read().is_busy();
    let visible = prompt.read().is_visible();
    let alert = prompt.read().alert().cloned();

    rsx! {
        div {
            class: "flex flex-col justify-between min-h-screen px-8 py-16 bg-white",
            div {
                class: "flex-1 flex flex-col items-center justify-center text-center",
                h1 { class: "m-0 mb-4 text-3xl font-bold text-neutral-800", "{slide.title}" }
                p { class: "m-0 text-base text-neutral-600", "{slide.description}" }
            }
            div {
                class: "flex justify-center gap-2 mb-8",
                for (i, active) in dots.into_iter().enumerate() {
                    span {
                        key: "{i}",
                        class: if active { "w-6 h-2 rounded-full bg-neutral-700" } else { "w-2 h-2 rounded-full bg-neutral-300" },
                    }
                }
            }
            button {
                class: ui::BUTTON_CLASS,
                onclick: advance,
                "{label}"
            }
        }

        if visible {
            Modal {
                on_close: move |_| {
                    prompt.write().dismiss();
                },
                h2 { class: "m-0 mb-5 text-xl font-semibold text-neutral-800 text-center", "Join Us!" }
                div {
                    class: "flex flex-col gap-3",
                    button {
                        class: ui::BUTTON_CLASS,
                        disabled: busy,
                        onclick: sign_in_with_provider,
                        if busy {
                            ui::Spinner {}
                        } else {
                            "Continue with Google"
                        }
                    }
                    button {
                        class: ui::BUTTON_CLASS,
                        disabled: busy,
                        onclick: move |_| choose.call(AuthChoice::Login),
                        "Login"
                    }
                    button {
                        class: ui::BUTTON_CLASS,
                        disabled: busy,
                        onclick: move |_| choose.call(AuthChoice::SignUp),
                        "Sign Up"
                    }
                    button {
                        class: "w-full py-2 text-neutral-600 underline disabled:text-neutral-300",
                        disabled: busy,
                        onclick: move |_| choose.call(AuthChoice::Guest),
                        "Continue as Guest"
                    }
                }
            }
        }

        if let Some(alert) = alert {
            AlertDialog {
                alert,
                on_dismiss: move |_| prompt.write().dismiss_alert(),
            }
        }
    }
}
