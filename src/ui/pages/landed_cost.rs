use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::{
        cost::{estimate_freight, what_if},
        LandedCost, LandedCostRequest, RequestState, SessionStore, TradeSessionPatch,
        TransportMode,
    },
    infra::api::{LandedCostQuote, TariffClient},
    ui::{
        components::{
            kpi_card::KpiCard,
            status_banner::{Banner, StatusBanner},
            step_prompt::StepPrompt,
        },
        pages::{spawn_tracked, stand_down},
        theme,
    },
    util::{format_money, format_percent, request::RequestTracker},
};

#[component]
pub fn LandedCostPage() -> Element {
    let store = use_context::<Signal<SessionStore>>();
    let client = use_context::<Option<TariffClient>>();

    let state = use_signal(RequestState::<LandedCostQuote>::default);
    let tracker = use_signal(RequestTracker::default);
    let mut attempt = use_signal(|| 0u32);

    let request = use_memo(move || LandedCostRequest::from_session(store.read().session()));

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
                    "landed-cost",
                    tracker,
                    state,
                    async move { client.landed_cost(&body).await },
                    move |quote: &LandedCostQuote| store_quote(store, quote),
                );
            }
            Err(_) => stand_down(tracker, state),
        }
    });

    let current = state();
    let banner = Banner::of(&current);
    // The last stored result stays on screen while a new one loads.
    let cost = current
        .ready()
        .map(|quote| quote.landed_cost.clone())
        .or_else(|| store.with(|s| s.session().landed_cost.clone()));
    let currency = store.with(|s| s.session().currency_code().to_string());

    let body = match request() {
        Err(step) => rsx! { StepPrompt { step } },
        Ok(body) => {
            let loading_text = format!(
                "Pricing {} kg by {} from {}…",
                body.weight_kg, body.mode, body.origin
            );
            rsx! {
                StatusBanner {
                    banner,
                    loading_text,
                    on_retry: move |_| attempt += 1,
                }
                if let Some(cost) = cost {
                    CostView { cost, currency }
                }
            }
        }
    };

    rsx! {
        div { class: "page",
            header { class: "page-header",
                div {
                    h2 { "Landed Cost Calculator" }
                    p { class: "text-muted", "Goods, freight, insurance, duty and taxes to the destination door." }
                }
            }
            {body}
        }
    }
}

/// Keeps the result in the session so the optimizer and impact screens can use it.
fn store_quote(mut store: Signal<SessionStore>, quote: &LandedCostQuote) {
    store.with_mut(|s| {
        s.update(
            TradeSessionPatch::default()
                .landed_cost(Some(quote.landed_cost.clone()))
                .scenarios(quote.scenarios.clone()),
        )
    });
}

#[component]
fn CostView(cost: LandedCost, currency: String) -> Element {
    let mut what_if_pct = use_signal(String::new);

    let total = format_money(cost.total_landed_cost);
    let duty = format_money(cost.import_duty);
    let duty_rate = format_percent(cost.tariff_rate);
    let logistics = format_money(cost.logistics_cost());
    let taxes = format_money(cost.taxes());
    let route_note = if cost.mode.is_empty() {
        None
    } else {
        Some(format!("{} · {:.0} km", cost.mode, cost.distance_km))
    };

    // Mode comparison only makes sense once the backend has priced a distance.
    let freight_modes: Vec<(&'static str, String)> = if cost.distance_km > 0.0 && cost.weight_kg > 0.0 {
        [TransportMode::Sea, TransportMode::Air]
            .into_iter()
            .map(|mode| {
                let estimate = estimate_freight(mode, cost.weight_kg, cost.distance_km);
                (mode.label(), format_money(estimate))
            })
            .collect()
    } else {
        Vec::new()
    };

    let rows: Vec<(&'static str, String)> = [
        ("Product value", cost.product_value),
        ("Freight", cost.shipping_cost),
        ("Insurance", cost.insurance_cost),
        ("CIF value", cost.cif_value),
        ("Import duty", cost.import_duty),
        ("Import VAT", cost.import_vat),
        ("GST", cost.gst_cost),
        ("Cess", cost.cess_cost),
        ("Handling fees", cost.handling_fees),
        ("Documentation fees", cost.doc_fees),
    ]
    .into_iter()
    .filter(|(label, amount)| *amount != 0.0 || matches!(*label, "Product value" | "Import duty"))
    .map(|(label, amount)| (label, format_money(amount)))
    .collect();

    let scenario = what_if_pct()
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|pct| pct.is_finite() && *pct >= 0.0)
        .map(|pct| {
            let replayed = what_if(&cost, pct / 100.0);
            let delta = cost.total_landed_cost - replayed.total_landed_cost;
            (replayed, delta)
        });

    rsx! {
        div { class: "grid-3",
            KpiCard {
                title: "Total landed cost".to_string(),
                value: format!("{currency} {total}"),
                description: route_note,
                accent: Some("text-warn"),
            }
            KpiCard {
                title: "Import duty".to_string(),
                value: format!("{currency} {duty}"),
                description: Some(format!("at {duty_rate}")),
            }
            KpiCard {
                title: "Logistics".to_string(),
                value: format!("{currency} {logistics}"),
                description: Some("Freight and insurance".to_string()),
            }
        }
        div { class: "grid-2",
            section { class: "card",
                h3 { class: "section-title", "Cost breakdown" }
                table { class: "table",
                    tbody {
                        for (label, amount) in rows {
                            tr {
                                td { "{label}" }
                                td { class: "num", "{amount}" }
                            }
                        }
                        tr { class: "total",
                            td { "Taxes" }
                            td { class: "num", "{taxes}" }
                        }
                        tr { class: "total",
                            td { "Total landed cost" }
                            td { class: "num", "{total}" }
                        }
                    }
                }
            }
            section { class: "card",
                h3 { class: "section-title", "Tariff transparency" }
                p { class: "text-muted",
                    "Duty is charged on the CIF value. VAT and GST apply to CIF plus duty; cess applies to the duty itself."
                }
                p { "Applied tariff rate: {duty_rate}" }
                if !freight_modes.is_empty() {
                    h4 { class: "label", "Freight estimate by mode" }
                    for (mode, estimate) in freight_modes {
                        p { "{mode}: {currency} {estimate}" }
                    }
                }

                h3 { class: "section-title", "What if the tariff changes?" }
                div { class: "row",
                    input {
                        class: "input grow",
                        placeholder: "Tariff rate in %, e.g. 12.5",
                        value: "{what_if_pct}",
                        oninput: move |evt| what_if_pct.set(evt.value()),
                    }
                }
                if let Some((replayed, delta)) = scenario {
                    WhatIfResult { replayed, delta, currency: currency.clone() }
                }
            }
        }
        div { class: "row spread",
            span { class: "text-muted", "Next: compare cheaper routes and suppliers." }
            Link { class: "btn btn-primary", to: Route::Optimize {}, "Continue to Optimize" }
        }
    }
}

#[component]
fn WhatIfResult(replayed: LandedCost, delta: f64, currency: String) -> Element {
    let total = format_money(replayed.total_landed_cost);
    let duty = format_money(replayed.import_duty);
    let amount = format_money(delta.abs());
    let class = theme::delta_text(delta);
    let verdict = if delta > 0.0 {
        "cheaper"
    } else if delta < 0.0 {
        "more expensive"
    } else {
        "no change"
    };

    rsx! {
        div { class: "what-if",
            p { "New total: {currency} {total} (duty {duty})" }
            p { class: class, "{currency} {amount} {verdict}" }
        }
    }
}
