use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::SessionStore;
use crate::ui::{components::trade_summary::TradeSummary, theme};
use crate::util::version::{version_label, APP_NAME, APP_TAGLINE};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();
    let store = use_context::<Signal<SessionStore>>();
    let durable = store.with(|s| s.is_durable());

    rsx! {
        div { class: "app",
            aside { class: "sidebar",
                div { class: "brand",
                    h1 { "{APP_NAME}" }
                    p { class: "text-muted", "{APP_TAGLINE}" }
                }
                nav { class: "nav",
                    for route in Route::all() {
                        NavButton {
                            active: route == current_route,
                            label: route.label(),
                            onclick: {
                                let route = route.clone();
                                move |_| {
                                    nav.push(route.clone());
                                }
                            },
                        }
                    }
                }
                div { class: "sidebar-footer text-muted",
                    if !durable {
                        p { class: "text-warn", "Session not saved to disk" }
                    }
                    span { "{version_label()}" }
                }
            }
            div { class: "main",
                header { class: "topbar",
                    TradeSummary {}
                }
                main { class: "content",
                    {children}
                }
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: theme::nav_item(active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
