use dioxus::prelude::*;

use crate::{
    domain::{alerts::THRESHOLDS, Alert, AlertFeed, AlertFilter, Severity},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

const FILTERS: [AlertFilter; 4] = [
    AlertFilter::All,
    AlertFilter::Only(Severity::Critical),
    AlertFilter::Only(Severity::Warning),
    AlertFilter::Only(Severity::Info),
];

#[component]
pub fn AlertsPage() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut feed = use_signal(AlertFeed::default);

    let snapshot = feed();
    let unread = snapshot.unread();
    let visible: Vec<Alert> = snapshot.visible().cloned().collect();
    let selected = snapshot.selected().cloned();
    let selected_id = snapshot.selected;
    let chips: Vec<(AlertFilter, String)> = FILTERS
        .iter()
        .map(|filter| (*filter, chip_label(&snapshot, *filter)))
        .collect();

    let on_mark_all = move |_| {
        feed.with_mut(AlertFeed::mark_all_read);
        push_toast(toasts, ToastKind::Info, "All alerts marked as read.");
    };

    rsx! {
        div { class: "page",
            header { class: "page-header",
                div {
                    h2 { "Alerts & Notifications" }
                    p { class: "text-muted", "{unread} unread" }
                }
                button {
                    class: "btn btn-ghost",
                    disabled: unread == 0,
                    onclick: on_mark_all,
                    "Mark all read"
                }
            }

            div { class: "row",
                for (filter, label) in chips {
                    button {
                        class: theme::chip(snapshot.filter == filter),
                        onclick: move |_| feed.with_mut(|f| f.filter = filter),
                        "{label}"
                    }
                }
            }

            div { class: "grid-2",
                section { class: "card",
                    if visible.is_empty() {
                        p { class: "text-muted", "No alerts in this category." }
                    }
                    ul { class: "list",
                        for alert in visible {
                            AlertRow {
                                alert: alert.clone(),
                                selected: selected_id == Some(alert.id),
                                on_select: move |id: u32| feed.with_mut(|f| f.select(id)),
                            }
                        }
                    }
                }
                div {
                    if let Some(alert) = selected {
                        AlertDetail { alert }
                    } else {
                        section { class: "card",
                            p { class: "text-muted", "Select an alert to see details." }
                        }
                    }
                    section { class: "card",
                        h3 { class: "section-title", "Alert thresholds" }
                        table { class: "table",
                            tbody {
                                for (metric, limit) in THRESHOLDS {
                                    tr {
                                        td { "{metric}" }
                                        td { class: "num", "{limit}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn chip_label(feed: &AlertFeed, filter: AlertFilter) -> String {
    match filter {
        AlertFilter::All => "All".to_string(),
        AlertFilter::Only(severity) => format!("{} ({})", severity.label(), feed.count(severity)),
    }
}

#[component]
fn AlertRow(alert: Alert, selected: bool, on_select: EventHandler<u32>) -> Element {
    let class = theme::severity_row(alert.severity, alert.read, selected);
    let badge = theme::severity_badge(alert.severity);
    let label = alert.severity.label();
    let id = alert.id;

    rsx! {
        li { class: class, onclick: move |_| on_select.call(id),
            div { class: "row spread",
                span { class: badge, "{label}" }
                span { class: "text-muted", "{alert.time}" }
            }
            p { class: "item-title", "{alert.title}" }
        }
    }
}

#[component]
fn AlertDetail(alert: Alert) -> Element {
    let badge = theme::severity_badge(alert.severity);
    let label = alert.severity.label();

    rsx! {
        section { class: "card",
            div { class: "row spread",
                span { class: badge, "{label}" }
                span { class: "text-muted", "{alert.time}" }
            }
            h3 { "{alert.title}" }
            p { "{alert.detail}" }
        }
    }
}
