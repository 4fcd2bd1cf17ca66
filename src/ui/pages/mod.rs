use std::future::Future;

use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::domain::RequestState;
use crate::infra::api::ApiError;
use crate::util::request::RequestTracker;

pub mod alerts;
pub mod compliance;
pub mod hs_code;
pub mod impact;
pub mod landed_cost;
pub mod optimize;
pub mod overview;
pub mod tariff_news;
pub mod trade_input;

pub use alerts::AlertsPage;
pub use compliance::CompliancePage;
pub use hs_code::HsCodePage;
pub use impact::ImpactPage;
pub use landed_cost::LandedCostPage;
pub use optimize::OptimizePage;
pub use overview::OverviewPage;
pub use tariff_news::TariffNewsPage;
pub use trade_input::TradeInputPage;

/// Runs `call` under a fresh request token.
///
/// The outcome reaches `state` (and `on_ready`) only while the token is still
/// current; a newer request or a `cancel` makes the response stale.
pub fn spawn_tracked<T, Fut>(
    label: &'static str,
    mut tracker: Signal<RequestTracker>,
    mut state: Signal<RequestState<T>>,
    call: Fut,
    on_ready: impl FnOnce(&T) + 'static,
) where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let token = tracker.write().begin();
    state.set(RequestState::Loading);
    debug!("[{label}] request started");

    spawn(async move {
        let outcome = call.await;
        if !tracker.write().finish(token) {
            debug!("[{label}] discarding stale response");
            return;
        }
        match outcome {
            Ok(value) => {
                on_ready(&value);
                state.set(RequestState::Ready(value));
            }
            Err(err) if err.is_timeout() => {
                warn!("[{label}] {err}");
                state.set(RequestState::TimedOut);
            }
            Err(err) => {
                warn!("[{label}] {err}");
                state.set(RequestState::Failed(err.to_string()));
            }
        }
    });
}

/// Supersedes any in-flight request and returns the page to idle.
pub fn stand_down<T: 'static>(
    mut tracker: Signal<RequestTracker>,
    mut state: Signal<RequestState<T>>,
) {
    tracker.write().cancel();
    state.set(RequestState::Idle);
}
