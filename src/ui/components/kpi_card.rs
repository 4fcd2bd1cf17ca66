use dioxus::prelude::*;

#[component]
pub fn KpiCard(
    title: String,
    value: String,
    description: Option<String>,
    accent: Option<&'static str>,
) -> Element {
    let value_class = format!("kpi-value {}", accent.unwrap_or_default());
    rsx! {
        div {
            class: "card kpi",
            h3 { class: "label", "{title}" }
            p { class: "{value_class}", "{value}" }
            if let Some(desc) = description {
                p { class: "kpi-note text-muted", "{desc}" }
            }
        }
    }
}
