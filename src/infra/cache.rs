//! Persistent on-disk cache for the tariff news feed.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::NewsItem;

const NEWS_CACHE_FILENAME: &str = "news_cache.json";

/// News articles as last fetched, with the fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsCache {
    /// Unix timestamp (seconds) when this cache was created.
    pub cached_at: u64,
    pub items: Vec<NewsItem>,
}

impl NewsCache {
    pub fn new(items: Vec<NewsItem>) -> Self {
        Self {
            cached_at: unix_now(),
            items,
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }

    pub fn age(&self) -> Duration {
        Duration::from_secs(unix_now().saturating_sub(self.cached_at))
    }

    pub fn fetched_at(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.cached_at)
    }

    /// Human-readable age string.
    pub fn age_string(&self) -> String {
        humanize_secs(self.age().as_secs())
    }
}

pub fn humanize_secs(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Cache file in the local data directory.
pub fn news_cache_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tariffiq");
        let _ = fs::create_dir_all(&base);
        base.join(NEWS_CACHE_FILENAME)
    })
    .clone()
}

/// Load the news cache regardless of age; callers decide about freshness.
pub fn load_news_cache(path: &Path) -> Option<NewsCache> {
    if !path.exists() {
        debug!("[news-cache] no cache at {}", path.display());
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<NewsCache>(&content) {
            Ok(cache) => {
                debug!(
                    "[news-cache] loaded {} articles (age: {})",
                    cache.items.len(),
                    cache.age_string()
                );
                Some(cache)
            }
            Err(e) => {
                warn!("[news-cache] failed to parse: {e}");
                None
            }
        },
        Err(e) => {
            warn!("[news-cache] failed to read: {e}");
            None
        }
    }
}

pub fn save_news_cache(path: &Path, cache: &NewsCache) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string(cache)?;
    fs::write(path, content)?;
    info!(
        "[news-cache] saved {} articles to {}",
        cache.items.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            ..NewsItem::default()
        }
    }

    #[test]
    fn cache_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        let cache = NewsCache::new(vec![article("EU extends GSP")]);

        save_news_cache(&path, &cache).unwrap();
        assert_eq!(load_news_cache(&path), Some(cache));
    }

    #[test]
    fn corrupt_cache_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        fs::write(&path, "{oops").unwrap();
        assert_eq!(load_news_cache(&path), None);
        assert_eq!(load_news_cache(&dir.path().join("missing.json")), None);
    }

    #[test]
    fn expiry_follows_ttl() {
        let mut cache = NewsCache::new(Vec::new());
        assert!(!cache.is_expired(Duration::from_secs(3600)));

        cache.cached_at = cache.cached_at.saturating_sub(7200);
        assert!(cache.is_expired(Duration::from_secs(3600)));
        assert_eq!(cache.age_string(), "2h");
    }

    #[test]
    fn ages_are_humanized() {
        assert_eq!(humanize_secs(42), "42s");
        assert_eq!(humanize_secs(125), "2m");
        assert_eq!(humanize_secs(3 * 86400), "3d");
    }
}
