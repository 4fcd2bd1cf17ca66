//! Reading of analysed news items and relevance to the current trade.

use std::collections::BTreeMap;

use super::entities::{NewsItem, RiskLevel};
use super::session::{is_unset, TradeSession};

impl NewsItem {
    pub fn risk_level(&self) -> RiskLevel {
        self.analysis
            .get("risk_level")
            .map(|raw| RiskLevel::parse(raw))
            .unwrap_or_default()
    }

    /// Short tag shown on the article card.
    pub fn impact_tag(&self) -> &'static str {
        match self.risk_level() {
            RiskLevel::High | RiskLevel::Critical => "HIGH IMPACT",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
            RiskLevel::Unknown => "INFO",
        }
    }

    pub fn summary(&self) -> &str {
        self.analysis
            .get("impact_summary")
            .or_else(|| self.policy.get("headline"))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// First two digits of an HS code, ignoring dots and spaces.
pub fn hs_chapter(code: &str) -> Option<String> {
    let digits: String = code.chars().filter(char::is_ascii_digit).take(2).collect();
    (digits.len() == 2).then_some(digits)
}

/// Whether `item` touches the session's HS chapter or either end of its route.
pub fn is_relevant(item: &NewsItem, session: &TradeSession) -> bool {
    if let Some(chapter) = session.hs_code().and_then(hs_chapter) {
        let listed = item
            .policy
            .get("likely_affected_hs_chapters")
            .is_some_and(|chapters| {
                chapters
                    .split(',')
                    .any(|entry| entry.trim().starts_with(chapter.as_str()))
            });
        if listed || item.mentions_any(&[format!("HS {chapter}"), format!("chapter {chapter}")]) {
            return true;
        }
    }

    let countries: Vec<String> = [&session.origin, &session.dest]
        .into_iter()
        .filter(|country| !is_unset(country))
        .map(|country| country.trim().to_string())
        .collect();
    item.mentions_any(&countries)
}

/// Shown when neither the backend nor the cache has any articles.
pub fn sample_news() -> Vec<NewsItem> {
    let item = |title: &str, summary: &str, source: &str, date: &str, risk: &str, chapters: &str| {
        NewsItem {
            title: title.to_string(),
            url: String::new(),
            source: source.to_string(),
            published: date.to_string(),
            policy: BTreeMap::from([(
                "likely_affected_hs_chapters".to_string(),
                chapters.to_string(),
            )]),
            analysis: BTreeMap::from([
                ("risk_level".to_string(), risk.to_string()),
                ("impact_summary".to_string(), summary.to_string()),
            ]),
        }
    };

    vec![
        item(
            "US Imposes 25% Additional Tariff on Chinese Electronics",
            "The USTR announced new Section 301 tariffs on electronics imports from China, effective March 1, 2026. Products under HS 8471 are directly affected.",
            "Reuters",
            "Feb 20, 2026",
            "high",
            "84, 85",
        ),
        item(
            "EU Extends GSP Scheme Through 2027",
            "The European Commission confirmed a two-year extension of the Generalized System of Preferences, keeping duty-free access open for 67 developing nations exporting electronics and textiles.",
            "European Commission",
            "Feb 18, 2026",
            "medium",
            "61, 62, 85",
        ),
        item(
            "India-UAE CEPA: Duty Cuts on Electronics Kick In",
            "Electronics exports from India to UAE now qualify for 0-3% preferential duty, down from 5%. Covers HS chapters 84 and 85.",
            "Ministry of Commerce India",
            "Feb 15, 2026",
            "low",
            "84, 85",
        ),
        item(
            "WCO HS 2025 Nomenclature Updates, March 1 Deadline",
            "The World Customs Organization published the final HS 2025 correlation table. 351 HS codes were modified. Verify existing classifications before the effective date.",
            "World Customs Organization",
            "Feb 10, 2026",
            "",
            "",
        ),
        item(
            "Vietnam Upgraded to GSP+ with Full Tariff Elimination",
            "Vietnam moved to GSP+ status. Electronics exports (HS 84-85) now qualify for complete tariff elimination, making Vietnam routes highly attractive.",
            "USTR",
            "Feb 8, 2026",
            "high",
            "84, 85",
        ),
    ]
}
