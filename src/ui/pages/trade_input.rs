use std::path::PathBuf;

use dioxus::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    app::Route,
    domain::{
        catalog::{self, CATEGORIES, CURRENCIES, TRANSPORTS},
        SessionStore, TradeSessionPatch,
    },
    infra::api::TariffClient,
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
    util::request::RequestTracker,
};

#[component]
pub fn TradeInputPage() -> Element {
    let store = use_context::<Signal<SessionStore>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let client = use_context::<Option<TariffClient>>();

    let session = store.with(|s| s.read());
    let missing = session.missing_inputs();
    let missing_text = missing.join(", ");

    let mut document_path = use_signal(String::new);
    let mut parse_tracker = use_signal(RequestTracker::default);
    let parsing = parse_tracker.read().in_flight();

    let on_extract = move |_| {
        let Some(client) = client.clone() else {
            push_toast(toasts, ToastKind::Error, "Backend client unavailable.");
            return;
        };
        let raw = document_path();
        let path = PathBuf::from(raw.trim());
        if raw.trim().is_empty() {
            push_toast(toasts, ToastKind::Warning, "Enter the path to a PDF first.");
            return;
        }

        let token = parse_tracker.write().begin();
        let mut store = store;
        spawn(async move {
            let outcome = client.parse_document(&path).await;
            if !parse_tracker.write().finish(token) {
                debug!("[parse-document] discarding stale response");
                return;
            }
            match outcome {
                Ok(document) => {
                    let patch = TradeSessionPatch::from(document);
                    if patch.is_empty() {
                        push_toast(
                            toasts,
                            ToastKind::Warning,
                            "No trade details found in that document.",
                        );
                        return;
                    }
                    info!("filled trade input from {}", path.display());
                    store.with_mut(|s| s.update(patch));
                    push_toast(toasts, ToastKind::Success, "Trade details filled from document.");
                }
                Err(err) => {
                    warn!("[parse-document] {err}");
                    let message = if err.is_timeout() {
                        "Document parsing timed out.".to_string()
                    } else {
                        format!("Failed to parse document: {err}")
                    };
                    push_toast(toasts, ToastKind::Error, message);
                }
            }
        });
    };

    let on_clear = move |_| {
        parse_tracker.write().cancel();
        let mut store = store;
        store.with_mut(|s| s.reset());
        document_path.set(String::new());
        push_toast(toasts, ToastKind::Info, "Session cleared.");
    };

    rsx! {
        div { class: "page",
            header { class: "page-header",
                div {
                    h2 { "Core Trade Input & Setup" }
                    p { class: "text-muted", "Enter your product and trade details for analysis." }
                }
                button { class: "btn btn-ghost", onclick: on_clear, "Clear session" }
            }

            section { class: "card",
                h3 { class: "section-title", "Auto-fill from document" }
                p { class: "text-muted", "Path to a commercial invoice or packing list (PDF)." }
                div { class: "row",
                    input {
                        class: "input grow",
                        placeholder: "/path/to/invoice.pdf",
                        value: "{document_path}",
                        oninput: move |evt| document_path.set(evt.value()),
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: parsing,
                        onclick: on_extract,
                        if parsing { "Extracting…" } else { "Extract" }
                    }
                }
            }

            section { class: "card",
                h3 { class: "section-title", "Product Information" }
                div { class: "grid-2",
                    TextField {
                        label: "Product Name",
                        required: true,
                        placeholder: "e.g., Cotton T-Shirts",
                        value: session.name.clone(),
                        on_input: move |v: String| write(store, TradeSessionPatch::default().name(v)),
                    }
                    SelectField {
                        label: "Product Category",
                        required: true,
                        options: options(CATEGORIES.iter().copied(), &session.category),
                        value: session.category.clone(),
                        on_change: move |v: String| write(store, TradeSessionPatch::default().category(v)),
                    }
                }
                div { class: "field",
                    label { class: "label", "Product Description" span { class: "required", " *" } }
                    textarea {
                        class: "input",
                        rows: "4",
                        placeholder: "Detailed description including textures, specifications and characteristics…",
                        value: "{session.description}",
                        oninput: move |evt| write(store, TradeSessionPatch::default().description(evt.value())),
                    }
                }
                div { class: "grid-2",
                    TextField {
                        label: "Material / Composition",
                        placeholder: "e.g., 100% Cotton",
                        value: session.material.clone(),
                        on_input: move |v: String| write(store, TradeSessionPatch::default().material(v)),
                    }
                    TextField {
                        label: "Intended Use / End Application",
                        placeholder: "e.g., Casual wear, retail distribution",
                        value: session.intended_use.clone(),
                        on_input: move |v: String| write(store, TradeSessionPatch::default().intended_use(v)),
                    }
                }
            }

            section { class: "card",
                h3 { class: "section-title", "Value & Quantity" }
                div { class: "grid-3",
                    TextField {
                        label: "Product Value",
                        required: true,
                        placeholder: "0.00",
                        value: session.value.clone(),
                        on_input: move |v: String| write(store, TradeSessionPatch::default().value(v)),
                    }
                    SelectField {
                        label: "Currency",
                        required: true,
                        options: options(CURRENCIES.iter().copied(), &session.currency),
                        value: session.currency.clone(),
                        on_change: move |v: String| write(store, TradeSessionPatch::default().currency(v)),
                    }
                    TextField {
                        label: "Quantity (units)",
                        required: true,
                        placeholder: "0",
                        value: session.qty.clone(),
                        on_input: move |v: String| write(store, TradeSessionPatch::default().qty(v)),
                    }
                }
                div { class: "grid-2",
                    TextField {
                        label: "Total Weight (kg)",
                        required: true,
                        placeholder: "0.0",
                        value: session.weight.clone(),
                        on_input: move |v: String| write(store, TradeSessionPatch::default().weight(v)),
                    }
                    TextField {
                        label: "Dimensions (L × W × H cm)",
                        placeholder: "e.g., 50 × 40 × 30",
                        value: session.dimensions.clone(),
                        on_input: move |v: String| write(store, TradeSessionPatch::default().dimensions(v)),
                    }
                }
            }

            section { class: "card",
                h3 { class: "section-title", "Routing & Logistics" }
                div { class: "grid-3",
                    SelectField {
                        label: "Country of Origin",
                        required: true,
                        options: options(catalog::origins(), &session.origin),
                        value: session.origin.clone(),
                        on_change: move |v: String| write(store, TradeSessionPatch::default().origin(v)),
                    }
                    SelectField {
                        label: "Destination Country",
                        required: true,
                        options: options(catalog::destinations(), &session.dest),
                        value: session.dest.clone(),
                        on_change: move |v: String| write(store, TradeSessionPatch::default().dest(v)),
                    }
                    SelectField {
                        label: "Mode of Transport",
                        required: true,
                        options: options(TRANSPORTS.iter().copied(), &session.transport),
                        value: session.transport.clone(),
                        on_change: move |v: String| write(store, TradeSessionPatch::default().transport(v)),
                    }
                }
            }

            section { class: "card",
                if missing.is_empty() {
                    div { class: "row spread",
                        p { class: "text-good", "All required details are in place." }
                        Link { class: "btn btn-primary", to: Route::HsCode {}, "Continue to HS Code" }
                    }
                } else {
                    p { class: "text-muted", "Still needed: {missing_text}" }
                }
            }
        }
    }
}

fn write(mut store: Signal<SessionStore>, patch: TradeSessionPatch) {
    store.with_mut(|s| s.update(patch));
}

fn options(list: impl Iterator<Item = &'static str>, current: &str) -> Vec<String> {
    catalog::with_current(list, current)
}

#[component]
fn TextField(
    label: &'static str,
    #[props(default)] required: bool,
    placeholder: &'static str,
    value: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "field",
            label { class: "label",
                "{label}"
                if required {
                    span { class: "required", " *" }
                }
            }
            input {
                class: "input",
                placeholder: placeholder,
                value: "{value}",
                oninput: move |evt| on_input.call(evt.value()),
            }
        }
    }
}

#[component]
fn SelectField(
    label: &'static str,
    #[props(default)] required: bool,
    options: Vec<String>,
    value: String,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "field",
            label { class: "label",
                "{label}"
                if required {
                    span { class: "required", " *" }
                }
            }
            select {
                class: "input",
                value: "{value}",
                onchange: move |evt| on_change.call(evt.value()),
                for choice in options {
                    option {
                        value: "{choice}",
                        selected: choice == value,
                        "{choice}"
                    }
                }
            }
        }
    }
}
