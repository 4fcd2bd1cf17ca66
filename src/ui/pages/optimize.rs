use dioxus::prelude::*;

use crate::{
    domain::{
        rank_scenarios, MissingStep, RequestState, ScenarioComparison, SessionStore, Vendor,
        VendorRequest,
    },
    infra::api::TariffClient,
    ui::{
        components::{
            kpi_card::KpiCard,
            status_banner::{Banner, StatusBanner},
            step_prompt::StepPrompt,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        pages::{spawn_tracked, stand_down},
        theme,
    },
    util::{format_money, format_percent, request::RequestTracker},
};

#[component]
pub fn OptimizePage() -> Element {
    let store = use_context::<Signal<SessionStore>>();
    let client = use_context::<Option<TariffClient>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let vendors = use_signal(RequestState::<Vec<Vendor>>::default);
    let tracker = use_signal(RequestTracker::default);
    let mut attempt = use_signal(|| 0u32);
    let mut vendor_country = use_signal(|| None::<String>);

    let vendor_request = use_memo(move || {
        vendor_country().map(|country| VendorRequest::for_country(store.read().session(), &country))
    });

    use_effect(move || {
        let _ = attempt();
        match vendor_request() {
            Some(Ok(body)) => {
                let country = body.country.clone();
                let Some(client) = client.clone() else {
                    let mut vendors = vendors;
                    vendors.set(RequestState::Failed("backend client unavailable".into()));
                    return;
                };
                spawn_tracked(
                    "vendors",
                    tracker,
                    vendors,
                    async move { client.vendors(&body).await },
                    move |found: &Vec<Vendor>| {
                        push_toast(
                            toasts,
                            ToastKind::Info,
                            format!("Found {} suppliers in {country}.", found.len()),
                        )
                    },
                );
            }
            Some(Err(_)) | None => stand_down(tracker, vendors),
        }
    });

    let session = store.with(|s| s.read());
    let Some(baseline) = session.landed_cost.clone() else {
        return rsx! {
            div { class: "page",
                header { class: "page-header",
                    h2 { "Route & Supplier Optimization" }
                }
                StepPrompt { step: MissingStep::LandedCost }
            }
        };
    };

    let currency = session.currency_code().to_string();
    let ranked = rank_scenarios(&baseline, &session.scenarios);
    let best = ranked.first().filter(|best| best.savings > 0.0).cloned();
    let current_total = format_money(baseline.total_landed_cost);
    let route = session.route_label();
    let searching = vendor_country();
    let vendor_state = vendors();
    let banner = Banner::of(&vendor_state);

    rsx! {
        div { class: "page",
            header { class: "page-header",
                div {
                    h2 { "Route & Supplier Optimization" }
                    p { class: "text-muted", "Alternative origins priced against your current route." }
                }
            }

            div { class: "grid-3",
                KpiCard {
                    title: "Current route".to_string(),
                    value: format!("{currency} {current_total}"),
                    description: Some(route),
                }
                if let Some(best) = best.clone() {
                    KpiCard {
                        title: "Best alternative".to_string(),
                        value: best.scenario.route.clone(),
                        description: Some(format!("saves {currency} {}", format_money(best.savings))),
                        accent: Some("text-good"),
                    }
                } else {
                    KpiCard {
                        title: "Best alternative".to_string(),
                        value: "Current route".to_string(),
                        description: Some("No cheaper scenario was priced.".to_string()),
                    }
                }
                KpiCard {
                    title: "Scenarios compared".to_string(),
                    value: ranked.len().to_string(),
                }
            }

            section { class: "card",
                h3 { class: "section-title", "Scenarios" }
                if ranked.is_empty() {
                    p { class: "text-muted", "The backend returned no alternative scenarios for this shipment." }
                }
                ul { class: "list",
                    for comparison in ranked {
                        ScenarioRow {
                            comparison: comparison.clone(),
                            currency: currency.clone(),
                            searching: searching.as_deref() == Some(comparison.scenario.origin()),
                            on_vendors: move |country: String| {
                                vendor_country.set(Some(country));
                            },
                        }
                    }
                }
            }

            if let Some(country) = searching {
                section { class: "card",
                    div { class: "row spread",
                        h3 { class: "section-title", "Suppliers in {country}" }
                        button {
                            class: "btn btn-small btn-ghost",
                            onclick: move |_| vendor_country.set(None),
                            "Close"
                        }
                    }
                    StatusBanner {
                        banner,
                        loading_text: format!("Searching suppliers in {country}…"),
                        on_retry: move |_| attempt += 1,
                    }
                    if let RequestState::Ready(list) = vendor_state {
                        if list.is_empty() {
                            p { class: "text-muted", "No suppliers found." }
                        }
                        ul { class: "list",
                            for vendor in list {
                                VendorRow { vendor }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ScenarioRow(
    comparison: ScenarioComparison,
    currency: String,
    searching: bool,
    on_vendors: EventHandler<String>,
) -> Element {
    let cost = &comparison.scenario.cost;
    let total = format_money(cost.total_landed_cost);
    let duty = format_percent(cost.tariff_rate);
    let savings_class = theme::delta_text(comparison.savings);
    let savings = if comparison.savings >= 0.0 {
        format!(
            "saves {currency} {} ({:.1}%)",
            format_money(comparison.savings),
            comparison.savings_pct
        )
    } else {
        format!("costs {currency} {} more", format_money(-comparison.savings))
    };
    let origin = comparison.scenario.origin().to_string();
    let class = if searching { "list-item selected" } else { "list-item" };

    rsx! {
        li { class: class,
            div { class: "grow",
                p { class: "item-title", "{comparison.scenario.route}" }
                p { class: "text-muted", "{currency} {total} · duty {duty}" }
            }
            span { class: savings_class, "{savings}" }
            if !origin.is_empty() {
                button {
                    class: "btn btn-small",
                    onclick: move |_| on_vendors.call(origin.clone()),
                    "Find suppliers"
                }
            }
        }
    }
}

#[component]
fn VendorRow(vendor: Vendor) -> Element {
    let trust_class = theme::trust_badge(vendor.trust_score);
    let trust = (vendor.trust_score * 100.0).round() as u32;
    let kind = if vendor.vendor_type.is_empty() {
        "Supplier".to_string()
    } else {
        vendor.vendor_type.clone()
    };

    rsx! {
        li { class: "list-item",
            div { class: "grow",
                p { class: "item-title", "{vendor.name}" }
                p { class: "label", "{kind}" }
                if !vendor.snippet.is_empty() {
                    p { class: "text-muted", "{vendor.snippet}" }
                }
                if !vendor.website.is_empty() {
                    a { href: "{vendor.website}", target: "_blank", "{vendor.website}" }
                }
            }
            div {
                span { class: trust_class, "Trust {trust}%" }
                if !vendor.sells_product {
                    span { class: "badge badge-muted", "Unconfirmed" }
                }
            }
        }
    }
}
