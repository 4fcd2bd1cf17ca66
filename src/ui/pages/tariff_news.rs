use std::time::SystemTime;

use dioxus::prelude::*;

use crate::{
    domain::{
        news::{is_relevant, sample_news},
        NewsItem, RequestState, SessionStore,
    },
    infra::{
        api::{CacheStatus, CachedPayload, TariffClient},
        cache::humanize_secs,
    },
    ui::{
        components::status_banner::{Banner, StatusBanner},
        pages::spawn_tracked,
        theme,
    },
    util::request::RequestTracker,
};

type NewsFeed = CachedPayload<Vec<NewsItem>>;

#[component]
pub fn TariffNewsPage() -> Element {
    let store = use_context::<Signal<SessionStore>>();
    let client = use_context::<Option<TariffClient>>();

    let state = use_signal(RequestState::<NewsFeed>::default);
    let tracker = use_signal(RequestTracker::default);
    let mut attempt = use_signal(|| 0u32);
    let mut force = use_signal(|| false);
    let mut relevant_only = use_signal(|| false);

    use_effect(move || {
        let _ = attempt();
        let forced = *force.peek();
        force.set(false);

        let Some(client) = client.clone() else {
            let mut state = state;
            state.set(RequestState::Failed("backend client unavailable".into()));
            return;
        };
        spawn_tracked(
            "news",
            tracker,
            state,
            async move { client.news(forced).await },
            |_: &NewsFeed| {},
        );
    });

    let current = state();
    let loading = current.is_loading();
    let session = store.with(|s| s.read());

    let (items, source_note) = match current.ready() {
        Some(feed) if !feed.data.is_empty() => (feed.data.clone(), freshness(feed)),
        Some(_) => (sample_news(), "No live articles yet. Showing sample coverage.".to_string()),
        None if matches!(current, RequestState::Failed(_) | RequestState::TimedOut) => (
            sample_news(),
            "Live feed unavailable. Showing sample coverage.".to_string(),
        ),
        None => (Vec::new(), String::new()),
    };
    // Sample articles are shown beside the error, so the banner only offers a retry.
    let banner = Banner::of(&current);

    let mut cards: Vec<(NewsItem, bool)> = items
        .into_iter()
        .map(|item| {
            let relevant = is_relevant(&item, &session);
            (item, relevant)
        })
        .filter(|(_, relevant)| !relevant_only() || *relevant)
        .collect();
    cards.sort_by_key(|(_, relevant)| !*relevant);
    let relevant_count = cards.iter().filter(|(_, relevant)| *relevant).count();

    rsx! {
        div { class: "page",
            header { class: "page-header",
                div {
                    h2 { "Tariff News & Policy Watch" }
                    p { class: "text-muted", "Trade policy coverage, analysed for your product and route." }
                }
                button {
                    class: "btn btn-ghost",
                    disabled: loading,
                    onclick: move |_| {
                        force.set(true);
                        attempt += 1;
                    },
                    if loading { "Refreshing…" } else { "Refresh" }
                }
            }

            StatusBanner {
                banner,
                loading_text: "Fetching the latest policy news…".to_string(),
                on_retry: move |_| attempt += 1,
            }

            if !source_note.is_empty() {
                div { class: "row spread",
                    span { class: "text-muted", "{source_note}" }
                    div { class: "row",
                        button {
                            class: theme::chip(!relevant_only()),
                            onclick: move |_| relevant_only.set(false),
                            "All"
                        }
                        button {
                            class: theme::chip(relevant_only()),
                            onclick: move |_| relevant_only.set(true),
                            "Relevant to my trade"
                        }
                    }
                }
            }

            if relevant_only() && relevant_count == 0 && !source_note.is_empty() {
                div { class: "card",
                    p { class: "text-muted", "Nothing in the feed touches your HS chapter or route." }
                }
            }

            for (item, relevant) in cards {
                NewsCard { item, relevant }
            }
        }
    }
}

fn freshness(feed: &NewsFeed) -> String {
    let age = SystemTime::now()
        .duration_since(feed.fetched_at)
        .map(|age| humanize_secs(age.as_secs()))
        .unwrap_or_else(|_| "0s".to_string());
    match feed.status {
        CacheStatus::Fresh => "Live feed, just updated.".to_string(),
        CacheStatus::Cached => format!("Cached copy, updated {age} ago."),
        CacheStatus::Stale => format!("Offline. Showing the copy from {age} ago."),
    }
}

#[component]
fn NewsCard(item: NewsItem, relevant: bool) -> Element {
    let risk_class = theme::risk_badge(item.risk_level());
    let tag = item.impact_tag();
    let summary = item.summary().to_string();
    let byline = match (item.source.is_empty(), item.published.is_empty()) {
        (false, false) => format!("{} · {}", item.source, item.published),
        (false, true) => item.source.clone(),
        (true, false) => item.published.clone(),
        (true, true) => String::new(),
    };
    let chapters = item
        .policy
        .get("likely_affected_hs_chapters")
        .filter(|chapters| !chapters.is_empty())
        .cloned();
    let class = if relevant { "card news relevant" } else { "card news" };

    rsx! {
        article { class: class,
            div { class: "row spread",
                span { class: risk_class, "{tag}" }
                if relevant {
                    span { class: "badge badge-info", "Affects your trade" }
                }
            }
            h3 { class: "item-title",
                if item.url.is_empty() {
                    "{item.title}"
                } else {
                    a { href: "{item.url}", target: "_blank", "{item.title}" }
                }
            }
            if !byline.is_empty() {
                p { class: "label", "{byline}" }
            }
            if !summary.is_empty() {
                p { "{summary}" }
            }
            if let Some(chapters) = chapters {
                p { class: "text-muted", "HS chapters: {chapters}" }
            }
        }
    }
}
