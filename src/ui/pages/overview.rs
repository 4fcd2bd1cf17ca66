use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::{AlertFeed, Overview, SessionStore},
    ui::components::{kpi_card::KpiCard, step_prompt::StepPrompt},
    util::format_money,
};

/// Landing dashboard: where the current trade stands and what to do next.
#[component]
pub fn OverviewPage() -> Element {
    let store = use_context::<Signal<SessionStore>>();

    let session = store.with(|s| s.read());
    let overview = Overview::of(&session, AlertFeed::default().unread());
    let currency = session.currency_code().to_string();
    let route = session.route_label();

    let landed = match overview.total_landed_cost {
        Some(total) => format!("{currency} {}", format_money(total)),
        None => "Not calculated".to_string(),
    };
    let (savings, savings_note, savings_accent) = match &overview.best_alternative {
        Some(best) => (
            format!("{currency} {}", format_money(best.savings)),
            format!("via {} ({:.1}%)", best.scenario.route, best.savings_pct),
            Some("text-good"),
        ),
        None if overview.total_landed_cost.is_some() => (
            "None".to_string(),
            "Your current route is the cheapest priced.".to_string(),
            None,
        ),
        None => (
            "—".to_string(),
            "Calculate the landed cost to compare routes.".to_string(),
            None,
        ),
    };
    let (compliance, compliance_note, compliance_accent) = match overview.compliance_blocker {
        None => (
            "Ready to check".to_string(),
            format!("Requirements for {route}"),
            Some("text-good"),
        ),
        Some(step) => ("Blocked".to_string(), step.prompt().to_string(), Some("text-warn")),
    };
    let alerts_accent = (overview.unread_alerts > 0).then_some("text-bad");
    let missing = overview.missing_inputs.join(", ");

    rsx! {
        div { class: "page",
            header { class: "page-header",
                div {
                    h2 { "Trade Overview" }
                    p { class: "text-muted", "{route}" }
                }
            }

            div { class: "grid-2",
                KpiCard {
                    title: "Total landed cost".to_string(),
                    value: landed,
                    description: Some(route.clone()),
                }
                KpiCard {
                    title: "Best savings".to_string(),
                    value: savings,
                    description: Some(savings_note),
                    accent: savings_accent,
                }
                KpiCard {
                    title: "Compliance".to_string(),
                    value: compliance,
                    description: Some(compliance_note),
                    accent: compliance_accent,
                }
                KpiCard {
                    title: "Unread alerts".to_string(),
                    value: overview.unread_alerts.to_string(),
                    accent: alerts_accent,
                }
            }

            if let Some(step) = overview.next_step {
                StepPrompt { step }
            } else {
                section { class: "card",
                    h3 { class: "section-title", "Workflow complete" }
                    p { class: "text-muted", "Every step has a result. Stress-test it or look for a cheaper route." }
                }
            }

            if !missing.is_empty() {
                section { class: "card",
                    h3 { class: "section-title", "Missing trade inputs" }
                    p { class: "text-muted", "{missing}" }
                    Link { class: "btn btn-small", to: Route::TradeInput {}, "Open Trade Input" }
                }
            }

            section { class: "card",
                h3 { class: "section-title", "Shortcuts" }
                div { class: "row",
                    Link { class: "btn", to: Route::Impact {}, "Run impact analysis" }
                    Link { class: "btn", to: Route::Optimize {}, "Optimize routes" }
                    Link { class: "btn", to: Route::TariffNews {}, "Read tariff news" }
                }
            }
        }
    }
}
