use dioxus::prelude::*;
use tracing::{error, info};

use crate::{
    domain::SessionStore,
    infra::api::TariffClient,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{
            AlertsPage, CompliancePage, HsCodePage, ImpactPage, LandedCostPage, OptimizePage,
            OverviewPage, TariffNewsPage, TradeInputPage,
        },
        shell::Shell,
    },
    util::{assets, config::AppConfig, persistence::FileStorage},
};

#[derive(Routable, Clone, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Overview {},
    #[route("/trade-input")]
    TradeInput {},
    #[route("/hs-code")]
    HsCode {},
    #[route("/compliance")]
    Compliance {},
    #[route("/landed-cost")]
    LandedCost {},
    #[route("/optimize")]
    Optimize {},
    #[route("/tariff-news")]
    TariffNews {},
    #[route("/alerts")]
    Alerts {},
    #[route("/impact")]
    Impact {},
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Route::Overview {} => "Overview",
            Route::TradeInput {} => "Trade Input",
            Route::HsCode {} => "HS Code",
            Route::Compliance {} => "Compliance",
            Route::LandedCost {} => "Landed Cost",
            Route::Optimize {} => "Optimize",
            Route::TariffNews {} => "Tariff News",
            Route::Alerts {} => "Alerts",
            Route::Impact {} => "Impact",
        }
    }

    /// Sidebar order.
    pub fn all() -> [Route; 9] {
        [
            Route::Overview {},
            Route::TradeInput {},
            Route::HsCode {},
            Route::Compliance {},
            Route::LandedCost {},
            Route::Optimize {},
            Route::TariffNews {},
            Route::Alerts {},
            Route::Impact {},
        ]
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::from_env);
    use_context_provider(|| config.clone());

    let store = use_signal(|| SessionStore::open(FileStorage::in_config_dir()));
    use_context_provider(|| store);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let client = use_hook(|| match TariffClient::new(&config) {
        Ok(client) => {
            info!("backend at {}", client.base_url());
            Some(client)
        }
        Err(err) => {
            error!("failed to initialise backend client: {err}");
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Backend client unavailable: {err}"),
            );
            None
        }
    });
    use_context_provider(|| client.clone());

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Overview() -> Element {
    rsx! { Shell { OverviewPage {} } }
}

#[component]
pub fn TradeInput() -> Element {
    rsx! { Shell { TradeInputPage {} } }
}

#[component]
pub fn HsCode() -> Element {
    rsx! { Shell { HsCodePage {} } }
}

#[component]
pub fn Compliance() -> Element {
    rsx! { Shell { CompliancePage {} } }
}

#[component]
pub fn LandedCost() -> Element {
    rsx! { Shell { LandedCostPage {} } }
}

#[component]
pub fn Optimize() -> Element {
    rsx! { Shell { OptimizePage {} } }
}

#[component]
pub fn TariffNews() -> Element {
    rsx! { Shell { TariffNewsPage {} } }
}

#[component]
pub fn Alerts() -> Element {
    rsx! { Shell { AlertsPage {} } }
}

#[component]
pub fn Impact() -> Element {
    rsx! { Shell { ImpactPage {} } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_is_the_landing_route() {
        assert_eq!(Route::all()[0], Route::Overview {});
        assert_eq!(Route::Overview {}.to_string(), "/");
        assert_eq!(Route::TradeInput {}.to_string(), "/trade-input");
    }

    #[test]
    fn every_sidebar_route_has_a_distinct_label() {
        let labels: std::collections::HashSet<&str> =
            Route::all().iter().map(Route::label).collect();
        assert_eq!(labels.len(), Route::all().len());
    }
}
