use dioxus::prelude::*;

use crate::domain::RequestState;

/// The parts of a [`RequestState`] that need a banner.
#[derive(Clone, Debug, PartialEq)]
pub enum Banner {
    Hidden,
    Loading,
    Failed(String),
    TimedOut,
}

impl Banner {
    pub fn of<T>(state: &RequestState<T>) -> Self {
        match state {
            RequestState::Idle | RequestState::Ready(_) => Banner::Hidden,
            RequestState::Loading => Banner::Loading,
            RequestState::Failed(message) => Banner::Failed(message.clone()),
            RequestState::TimedOut => Banner::TimedOut,
        }
    }
}

#[component]
pub fn StatusBanner(banner: Banner, loading_text: String, on_retry: EventHandler<()>) -> Element {
    match banner {
        Banner::Hidden => rsx! { Fragment {} },
        Banner::Loading => rsx! {
            div { class: "banner banner-info",
                span { class: "spinner" }
                span { "{loading_text}" }
            }
        },
        Banner::Failed(message) => rsx! {
            div { class: "banner banner-bad",
                span { "Request failed: {message}" }
                button { class: "btn btn-small", onclick: move |_| on_retry.call(()), "Retry" }
            }
        },
        Banner::TimedOut => rsx! {
            div { class: "banner banner-warn",
                span { "The analysis service took too long to answer." }
                button { class: "btn btn-small", onclick: move |_| on_retry.call(()), "Try again" }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_and_idle_states_hide_the_banner() {
        assert_eq!(Banner::of(&RequestState::<u8>::Idle), Banner::Hidden);
        assert_eq!(Banner::of(&RequestState::Ready(3u8)), Banner::Hidden);
        assert_eq!(
            Banner::of(&RequestState::<u8>::Failed("backend error 500".into())),
            Banner::Failed("backend error 500".into())
        );
        assert_eq!(Banner::of(&RequestState::<u8>::TimedOut), Banner::TimedOut);
    }
}
