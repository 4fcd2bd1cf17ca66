use dioxus::prelude::*;

/// Classifier confidence, 0..=1, as a labelled percentage.
#[component]
pub fn ConfidenceBadge(value: f32) -> Element {
    let (label, color) = match value {
        v if v >= 0.75 => ("High", "badge-good"),
        v if v >= 0.45 => ("Medium", "badge-warn"),
        v if v > 0.0 => ("Low", "badge-bad"),
        _ => ("N/A", "badge-muted"),
    };
    let percent = (value * 100.0).round() as u32;

    rsx! {
        span {
            class: "badge {color}",
            if value > 0.0 {
                "{label} · {percent}%"
            } else {
                "{label}"
            }
        }
    }
}
