use dioxus::prelude::*;

use crate::{
    domain::{
        impact::{project, sample_baseline, ImpactProjection, POLICY_SCENARIOS},
        SessionStore,
    },
    ui::{components::kpi_card::KpiCard, theme},
    util::{format_money, format_percent},
};

const DEFAULT_SHIPMENTS: u32 = 4;

#[component]
pub fn ImpactPage() -> Element {
    let store = use_context::<Signal<SessionStore>>();

    let mut scenario_idx = use_signal(|| 0usize);
    let mut shipments_raw = use_signal(|| DEFAULT_SHIPMENTS.to_string());

    let session = store.with(|s| s.read());
    let currency = session.currency_code().to_string();
    let (baseline, from_session) = match session.landed_cost.clone() {
        Some(cost) if cost.total_landed_cost > 0.0 => (cost, true),
        _ => (sample_baseline(), false),
    };

    let shipments = shipments_raw().trim().parse::<u32>().unwrap_or(0);
    let scenario = POLICY_SCENARIOS
        .get(scenario_idx())
        .copied()
        .unwrap_or(POLICY_SCENARIOS[0]);
    let projection = project(&baseline, &scenario, shipments);

    let baseline_note = if from_session {
        format!("Based on your {} shipment.", session.route_label())
    } else {
        "Based on a sample $10,000 shipment. Calculate your landed cost for real figures.".to_string()
    };
    let per_shipment = format_money(projection.per_shipment_increase);
    let monthly = format_money(projection.monthly_increase);
    let annual = format_money(projection.annual_increase);
    let rate_before = format_percent(projection.effective_rate_before);
    let rate_after = format_percent(projection.effective_rate_after);
    let shocked = format_money(projection.shocked_per_shipment);
    let choices: Vec<(usize, &'static str)> = POLICY_SCENARIOS
        .iter()
        .enumerate()
        .map(|(idx, s)| (idx, s.short_name))
        .collect();

    rsx! {
        div { class: "page",
            header { class: "page-header",
                div {
                    h2 { "Policy Impact Simulator" }
                    p { class: "text-muted", "{baseline_note}" }
                }
            }

            section { class: "card",
                h3 { class: "section-title", "Scenario" }
                div { class: "row",
                    for (idx, name) in choices {
                        button {
                            class: theme::chip(idx == scenario_idx()),
                            onclick: move |_| scenario_idx.set(idx),
                            "{name}"
                        }
                    }
                }
                p { class: "text-muted", "{scenario.label}" }
                div { class: "field",
                    label { class: "label", "Shipments per month" }
                    input {
                        class: "input",
                        r#type: "number",
                        min: "0",
                        value: "{shipments_raw}",
                        oninput: move |evt| shipments_raw.set(evt.value()),
                    }
                }
            }

            div { class: "grid-3",
                KpiCard {
                    title: "Per shipment".to_string(),
                    value: format!("+{currency} {per_shipment}"),
                    description: Some(format!("{currency} {shocked} after the shock")),
                    accent: Some("text-bad"),
                }
                KpiCard {
                    title: "Per month".to_string(),
                    value: format!("+{currency} {monthly}"),
                    description: Some(format!("{shipments} shipments")),
                    accent: Some("text-bad"),
                }
                KpiCard {
                    title: "Per year".to_string(),
                    value: format!("+{currency} {annual}"),
                    description: Some(format!("Duty {rate_before} → {rate_after}")),
                    accent: Some("text-bad"),
                }
            }

            MonthlyChart { projection }
        }
    }
}

/// Stacked bars of baseline and added cost for each projected month.
#[component]
fn MonthlyChart(projection: ImpactProjection) -> Element {
    let peak = projection
        .months
        .iter()
        .map(|point| point.base + point.impact)
        .fold(0.0_f64, f64::max);
    let bars: Vec<(&'static str, String, String, String)> = projection
        .months
        .iter()
        .map(|point| {
            let base_style = format!("height: {:.1}%", share(point.base, peak));
            let impact_style = format!("height: {:.1}%", share(point.impact, peak));
            let title = format!(
                "{}: {} + {}",
                point.month,
                format_money(point.base),
                format_money(point.impact)
            );
            (point.month, base_style, impact_style, title)
        })
        .collect();

    rsx! {
        section { class: "card",
            div { class: "row spread",
                h3 { class: "section-title", "12-month projection" }
                div { class: "row",
                    span { class: "legend legend-base", "Baseline" }
                    span { class: "legend legend-impact", "Added cost" }
                }
            }
            if peak <= 0.0 {
                p { class: "text-muted", "Enter a shipment volume to see the projection." }
            } else {
                div { class: "chart",
                    for (month, base_style, impact_style, title) in bars {
                        div { class: "chart-col", title: "{title}",
                            div { class: "chart-stack",
                                div { class: "bar bar-impact", style: impact_style }
                                div { class: "bar bar-base", style: base_style }
                            }
                            span { class: "chart-label", "{month}" }
                        }
                    }
                }
            }
        }
    }
}

fn share(value: f64, peak: f64) -> f64 {
    if peak > 0.0 {
        (value / peak * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_share_is_bounded() {
        assert_eq!(share(50.0, 200.0), 25.0);
        assert_eq!(share(300.0, 200.0), 100.0);
        assert_eq!(share(10.0, 0.0), 0.0);
    }
}
