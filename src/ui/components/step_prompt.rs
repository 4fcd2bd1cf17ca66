use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::MissingStep;

/// Shown instead of a page body when an upstream step is incomplete.
#[component]
pub fn StepPrompt(step: MissingStep) -> Element {
    let target = match step {
        MissingStep::Classification => Route::HsCode {},
        MissingStep::LandedCost => Route::LandedCost {},
        MissingStep::ProductDetails | MissingStep::Routing | MissingStep::ShipmentDetails => {
            Route::TradeInput {}
        }
    };
    let label = target.label();

    rsx! {
        div {
            class: "card step-prompt",
            p { class: "step-title", "Complete the previous step" }
            p { class: "text-muted", "{step.prompt()}" }
            Link { class: "btn btn-primary", to: target, "Go to {label}" }
        }
    }
}
