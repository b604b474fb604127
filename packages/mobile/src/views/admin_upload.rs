use client::upload::{UploadTarget, PDF_MIME};
use client::{FilePicker, UploadFlow};
use dioxus::prelude::*;
use ui::icons::FaFilePdf;
use ui::{
    use_navigation, use_screen_lifetime, use_services, use_session, AlertDialog, FileEnginePicker,
    Icon,
};

#[component]
pub fn AdminUpload() -> Element {
    let services = use_services();
    let session = use_session();
    let mut nav = use_navigation();
    let lifetime = use_screen_lifetime();
    let mut flow = use_signal(UploadFlow::new);
    let mut picker = use_signal(|| FileEnginePicker::new(None));

    let pick_lifetime = lifetime.clone();
    let on_pick = move |evt: FormEvent| {
        let Some(ticket) = flow.write().begin_pick() else {
            return;
        };
        let ticket = ticket.within(&pick_lifetime);
        let chosen = FileEnginePicker::new(evt.files());
        picker.set(chosen.clone());
        spawn(async move {
            let outcome = chosen.pick(PDF_MIME).await;
            if ticket.is_live() {
                flow.write().finish_pick(&ticket, outcome);
            }
        });
    };

    let on_upload = move |_| {
        let job = match flow.write().begin_upload(&services.clock) {
            Ok(job) => job,
            Err(blocked) => {
                tracing::debug!(?blocked, "upload not started");
                return;
            }
        };
        let ticket = job.ticket.clone().within(&lifetime);
        let services = services.clone();
        let picker = picker.peek().clone();
        let access_token = session.peek().session.as_ref().map(|s| s.access_token.clone());
        spawn(async move {
            let target = UploadTarget {
                storage: &services.storage,
                picker: &picker,
                kv: &services.kv,
                bucket: &services.config.storage.bucket,
                access_token,
            };
            let outcome = target.run(&job).await;
            if ticket.is_live() {
                flow.write().finish_upload(&ticket, outcome);
            }
        });
    };

    let state = flow.read();
    let can_pick = state.can_pick();
    let can_upload = state.can_upload();
    let uploading = state.is_uploading();
    let selected = state.selected().cloned();
    let message = state.message().map(str::to_string);
    let view_target = state.view_document_target();
    let alert = state.alert().cloned();
    drop(state);

    rsx! {
        div {
            class: "px-6 py-8",
            p { class: "m-0 mb-6 text-neutral-600", "Select a PDF invoice to upload. Customers can view the most recent upload from the home screen." }

            label {
                class: "block w-full mb-4 rounded-lg border-2 border-dashed border-neutral-300 bg-white p-6 text-center text-neutral-700",
                Icon { icon: FaFilePdf, width: 28, height: 28 }
                div { class: "mt-2 font-medium", "Select PDF Document" }
                input {
                    class: "hidden",
                    r#type: "file",
                    accept: ".pdf,{PDF_MIME}",
                    multiple: false,
                    disabled: !can_pick,
                    onchange: on_pick,
                }
            }

            if let Some(file) = selected {
                div {
                    class: "mb-4 rounded-lg bg-white p-4 shadow-sm",
                    div { class: "font-medium text-neutral-800", "Selected: {file.name}" }
                    if let Some(size) = file.size_label() {
                        div { class: "mt-1 text-sm text-neutral-500", "{size}" }
                    }
                }
            }

            button {
                class: ui::BUTTON_CLASS,
                disabled: !can_upload,
                onclick: on_upload,
                if uploading {
                    ui::Spinner {}
                } else {
                    "Upload Document"
                }
            }

            if let Some(message) = message {
                p { class: "mt-4 text-sm text-neutral-700 whitespace-pre-line break-all", "{message}" }
            }

            if let Some(target) = view_target {
                button {
                    class: "w-full mt-4 rounded-lg px-4 py-3 text-neutral-700 border border-neutral-400",
                    onclick: move |_| nav.write().push(target.clone()),
                    "View Document"
                }
            }
        }

        if let Some(alert) = alert {
            AlertDialog {
                alert,
                on_dismiss: move |_| flow.write().dismiss_alert(),
            }
        }
    }
}
