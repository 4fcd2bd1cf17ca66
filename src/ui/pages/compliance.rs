use std::collections::BTreeSet;

use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::{ComplianceReport, ComplianceRequest, ComplianceRequirement, RequestState, SessionStore},
    infra::api::TariffClient,
    ui::{
        components::{
            kpi_card::KpiCard,
            status_banner::{Banner, StatusBanner},
            step_prompt::StepPrompt,
        },
        pages::{spawn_tracked, stand_down},
        theme,
    },
    util::request::RequestTracker,
};

#[component]
pub fn CompliancePage() -> Element {
    let store = use_context::<Signal<SessionStore>>();
    let client = use_context::<Option<TariffClient>>();

    let state = use_signal(RequestState::<ComplianceReport>::default);
    let tracker = use_signal(RequestTracker::default);
    let mut attempt = use_signal(|| 0u32);
    // Indices of checklist items the user ticked off; page-local.
    let mut done = use_signal(BTreeSet::<usize>::new);

    let request = use_memo(move || ComplianceRequest::from_session(store.read().session()));

    use_effect(move || {
        let _ = attempt();
        match request() {
            Ok(body) => {
                let Some(client) = client.clone() else {
                    let mut state = state;
                    state.set(RequestState::Failed("backend client unavailable".into()));
                    return;
                };
                let mut done = done;
                spawn_tracked(
                    "compliance",
                    tracker,
                    state,
                    async move { client.compliance(&body).await },
                    move |_: &ComplianceReport| done.set(BTreeSet::new()),
                );
            }
            Err(_) => stand_down(tracker, state),
        }
    });

    let current = state();
    let banner = Banner::of(&current);
    let destination = request()
        .map(|body| body.destination)
        .unwrap_or_default();

    let body = match request() {
        Err(step) => rsx! { StepPrompt { step } },
        Ok(_) => {
            let report = current.ready().cloned();
            rsx! {
                StatusBanner {
                    banner,
                    loading_text: format!("Checking import requirements for {destination}…"),
                    on_retry: move |_| attempt += 1,
                }
                if let Some(report) = report {
                    ReportView {
                        report,
                        done: done(),
                        on_toggle: move |idx: usize| {
                            done.with_mut(|set| {
                                if !set.remove(&idx) {
                                    set.insert(idx);
                                }
                            });
                        },
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "page",
            header { class: "page-header",
                div {
                    h2 { "Compliance Check" }
                    p { class: "text-muted", "Documents, licences and rules of origin for your destination." }
                }
            }
            {body}
        }
    }
}

#[component]
fn ReportView(
    report: ComplianceReport,
    done: BTreeSet<usize>,
    on_toggle: EventHandler<usize>,
) -> Element {
    let total = report.checklist.len();
    let completed = done.iter().filter(|idx| **idx < total).count();
    let progress = if total == 0 {
        0
    } else {
        completed * 100 / total
    };
    let mandatory = report.mandatory_count();
    let risk_class = theme::risk_badge(report.risk_level);
    let risk_label = report.risk_level.label();
    let complexity = if report.estimated_complexity.is_empty() {
        "—".to_string()
    } else {
        report.estimated_complexity.clone()
    };

    rsx! {
        div { class: "grid-3",
            div { class: "card kpi",
                h3 { class: "label", "Risk level" }
                span { class: risk_class, "{risk_label}" }
            }
            KpiCard {
                title: "Complexity".to_string(),
                value: complexity,
            }
            KpiCard {
                title: "Mandatory requirements".to_string(),
                value: format!("{mandatory} of {total}"),
                description: Some(format!("{completed} completed")),
            }
        }

        if !report.summary_advice.is_empty() {
            section { class: "card",
                h3 { class: "section-title", "Advice" }
                p { "{report.summary_advice}" }
            }
        }

        section { class: "card",
            div { class: "row spread",
                h3 { class: "section-title", "Checklist" }
                span { class: "text-muted", "{progress}% complete" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {progress}%" }
            }
            if report.checklist.is_empty() {
                p { class: "text-muted", "No specific requirements were returned." }
            }
            ul { class: "list",
                for (idx, item) in report.checklist.iter().cloned().enumerate() {
                    ChecklistRow {
                        item,
                        done: done.contains(&idx),
                        on_toggle: move |_| on_toggle.call(idx),
                    }
                }
            }
        }

        if !report.rules_of_origin.is_empty() {
            section { class: "card",
                h3 { class: "section-title", "Rules of origin" }
                ul { class: "bullets",
                    for rule in report.rules_of_origin.clone() {
                        li { "{rule}" }
                    }
                }
            }
        }

        div { class: "row spread",
            span { class: "text-muted", "Next: see what the shipment will cost landed." }
            Link { class: "btn btn-primary", to: Route::LandedCost {}, "Continue to Landed Cost" }
        }
    }
}

#[component]
fn ChecklistRow(item: ComplianceRequirement, done: bool, on_toggle: EventHandler<()>) -> Element {
    let class = if done { "list-item done" } else { "list-item" };
    rsx! {
        li { class: class,
            input {
                r#type: "checkbox",
                checked: done,
                onchange: move |_| on_toggle.call(()),
            }
            div { class: "grow",
                p { class: "item-title",
                    "{item.title}"
                    if item.is_mandatory {
                        span { class: "badge badge-bad", "Mandatory" }
                    }
                }
                if !item.category.is_empty() {
                    p { class: "label", "{item.category}" }
                }
                p { class: "text-muted", "{item.description}" }
            }
        }
    }
}
