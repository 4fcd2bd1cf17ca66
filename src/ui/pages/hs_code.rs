use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::{
        Classification, ClassifyRequest, HsCandidate, RequestState, SessionStore,
        TradeSessionPatch,
    },
    infra::api::{humanize_key, TariffClient},
    ui::{
        components::{
            confidence_badge::ConfidenceBadge,
            status_banner::{Banner, StatusBanner},
            step_prompt::StepPrompt,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        pages::{spawn_tracked, stand_down},
    },
    util::request::RequestTracker,
};

#[component]
pub fn HsCodePage() -> Element {
    let store = use_context::<Signal<SessionStore>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let client = use_context::<Option<TariffClient>>();

    let state = use_signal(RequestState::<Classification>::default);
    let tracker = use_signal(RequestTracker::default);
    let mut attempt = use_signal(|| 0u32);
    let mut manual_code = use_signal(String::new);

    // Re-derived on every session write; only a changed product text re-runs the effect.
    let request = use_memo(move || ClassifyRequest::from_session(store.read().session()));

    use_effect(move || {
        let _ = attempt();
        match request() {
            Ok(body) => {
                let Some(client) = client.clone() else {
                    let mut state = state;
                    state.set(RequestState::Failed("backend client unavailable".into()));
                    return;
                };
                spawn_tracked(
                    "classify",
                    tracker,
                    state,
                    async move { client.classify(&body).await },
                    move |result: &Classification| adopt_primary(store, result),
                );
            }
            Err(_) => stand_down(tracker, state),
        }
    });

    let selected = store.with(|s| s.session().hs_code().map(str::to_string));
    let current = state();
    let banner = Banner::of(&current);

    let select_code = move |code: String| {
        let mut store = store;
        store.with_mut(|s| s.update(TradeSessionPatch::default().hs_code(Some(code.clone()))));
        push_toast(toasts, ToastKind::Success, format!("HS code set to {code}."));
    };

    let on_apply_manual = move |_| {
        let code = manual_code().trim().to_string();
        if code.is_empty() {
            push_toast(toasts, ToastKind::Warning, "Enter an HS code first.");
            return;
        }
        select_code(code);
        manual_code.set(String::new());
    };

    let on_clear_code = move |_| {
        let mut store = store;
        store.with_mut(|s| s.update(TradeSessionPatch::default().hs_code(None)));
    };

    let step = match request() {
        Ok(_) => None,
        Err(step) => Some(step),
    };

    rsx! {
        div { class: "page",
            header { class: "page-header",
                div {
                    h2 { "HS Code Classification" }
                    p { class: "text-muted", "Harmonized System code suggested from your product description." }
                }
                if let Some(code) = selected.clone() {
                    div { class: "row",
                        span { class: "badge badge-info", "Selected: {code}" }
                        button { class: "btn btn-small", onclick: on_clear_code, "Clear" }
                    }
                }
            }

            if let Some(step) = step {
                StepPrompt { step }
            } else {
                StatusBanner {
                    banner,
                    loading_text: "Classifying product…".to_string(),
                    on_retry: move |_| attempt += 1,
                }

                if let RequestState::Ready(result) = current {
                    if result.primary().is_some() {
                        PrimaryResult {
                            result: result.clone(),
                            selected: selected.clone(),
                            on_select: select_code,
                        }
                    } else if result.candidates.is_empty() {
                        p { class: "text-muted", "No HS code could be suggested. Enter one manually below." }
                    }
                    if !result.candidates.is_empty() {
                        section { class: "card",
                            h3 { class: "section-title", "Alternative candidates" }
                            ul { class: "list",
                                for candidate in result.candidates.clone() {
                                    CandidateRow {
                                        candidate: candidate.clone(),
                                        selected: selected.as_deref() == Some(candidate.hs_code.as_str()),
                                        on_select: select_code,
                                    }
                                }
                            }
                        }
                    }
                }

                section { class: "card",
                    h3 { class: "section-title", "Manual override" }
                    div { class: "row",
                        input {
                            class: "input grow",
                            placeholder: "e.g., 6109.10",
                            value: "{manual_code}",
                            oninput: move |evt| manual_code.set(evt.value()),
                        }
                        button { class: "btn btn-primary", onclick: on_apply_manual, "Apply" }
                    }
                }

                if selected.is_some() {
                    div { class: "row spread",
                        span { class: "text-muted", "Next: check what the destination requires." }
                        Link { class: "btn btn-primary", to: Route::Compliance {}, "Continue to Compliance" }
                    }
                }
            }
        }
    }
}

/// The classifier's pick becomes the session code unless the user already chose one.
fn adopt_primary(mut store: Signal<SessionStore>, result: &Classification) {
    let Some(primary) = result.primary() else {
        return;
    };
    let has_code = store.with(|s| s.session().hs_code().is_some());
    if !has_code {
        store.with_mut(|s| s.update(TradeSessionPatch::default().hs_code(Some(primary.to_string()))));
    }
}

#[component]
fn PrimaryResult(
    result: Classification,
    selected: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    let is_selected = selected.as_deref() == Some(result.primary_hs.as_str());
    let code = result.primary_hs.clone();
    let features: Vec<(String, String)> = result
        .extracted_features
        .iter()
        .map(|(key, value)| (humanize_key(key), value.clone()))
        .collect();

    rsx! {
        section { class: "card",
            div { class: "row spread",
                div {
                    p { class: "label", "Primary HS code" }
                    p { class: "hs-code", "{result.primary_hs}" }
                }
                ConfidenceBadge { value: result.confidence }
            }
            if !result.reasoning.is_empty() {
                p { class: "reasoning", "{result.reasoning}" }
            }
            if !features.is_empty() {
                h4 { class: "label", "Extracted features" }
                dl { class: "features",
                    for (key, value) in features {
                        dt { "{key}" }
                        dd { "{value}" }
                    }
                }
            }
            if !is_selected {
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_select.call(code.clone()),
                    "Use this code"
                }
            }
        }
    }
}

#[component]
fn CandidateRow(candidate: HsCandidate, selected: bool, on_select: EventHandler<String>) -> Element {
    let code = candidate.hs_code.clone();
    let class = if selected { "list-item selected" } else { "list-item" };
    rsx! {
        li { class: class,
            div { class: "grow",
                p { class: "hs-code small", "{candidate.hs_code}" }
                p { "{candidate.description}" }
                if let Some(explanation) = candidate.explanation.clone() {
                    p { class: "text-muted", "{explanation}" }
                }
            }
            if !selected {
                button {
                    class: "btn btn-small",
                    onclick: move |_| on_select.call(code.clone()),
                    "Select"
                }
            }
        }
    }
}
