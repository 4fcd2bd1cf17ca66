use dioxus::prelude::*;

use crate::domain::{session::is_unset, SessionStore};
use crate::util::format_money;

/// One-line digest of the current trade, shown above every page.
#[component]
pub fn TradeSummary() -> Element {
    let store = use_context::<Signal<SessionStore>>();
    let session = store.with(|s| s.read());

    let product = if session.name.trim().is_empty() {
        "No product yet".to_string()
    } else {
        session.name.trim().to_string()
    };
    let hs_code = session
        .hs_code()
        .map(str::to_string)
        .unwrap_or_else(|| "Detecting…".to_string());
    let value = match session.declared_value() {
        Some(amount) => format!("{} {}", session.currency_code(), format_money(amount)),
        None => "—".to_string(),
    };
    let weight = match session.weight_kg() {
        Some(kg) => format!("{kg} kg"),
        None => "—".to_string(),
    };
    let mode = if is_unset(&session.transport) {
        "—".to_string()
    } else {
        session.transport.trim().to_string()
    };
    let route = session.route_label();

    rsx! {
        div {
            class: "trade-summary",
            SummaryItem { label: "Product", value: product }
            SummaryItem { label: "HS Code", value: hs_code }
            SummaryItem { label: "Route", value: route }
            SummaryItem { label: "Value", value: value }
            SummaryItem { label: "Weight", value: weight }
            SummaryItem { label: "Mode", value: mode }
        }
    }
}

#[component]
fn SummaryItem(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "summary-item",
            span { class: "label", "{label}" }
            span { class: "summary-value", "{value}" }
        }
    }
}
