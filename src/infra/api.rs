//! Asynchronous client for the TariffIQ analysis backend.
//!
//! - One typed method per endpoint, each with its own timeout.
//! - Response decoding is permissive: missing or oddly typed fields fall back
//!   to empty values instead of failing the whole call.
//! - The news feed is cached in memory and on disk with stale fallbacks.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{multipart, Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{
    ClassifyRequest, Classification, ComplianceReport, ComplianceRequest, ComplianceRequirement,
    ExtractedDocument, HsCandidate, LandedCost, LandedCostRequest, NewsItem, RiskLevel, Scenario,
    Vendor, VendorRequest,
};
use crate::infra::cache::{load_news_cache, news_cache_path, save_news_cache, NewsCache};
use crate::util::{config::AppConfig, version};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("backend error {status}: {detail}"),
        None => format!("backend error {status}"),
    }
}

/// Backend routes and how long each may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Classify,
    Compliance,
    LandedCost,
    Vendors,
    News,
    ParseDocument,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Classify => "api/classify",
            Endpoint::Compliance => "api/compliance",
            Endpoint::LandedCost => "api/landed-cost",
            Endpoint::Vendors => "api/vendors",
            Endpoint::News => "api/news",
            Endpoint::ParseDocument => "api/parse-document",
        }
    }

    pub fn default_timeout(&self) -> Duration {
        match self {
            Endpoint::Classify | Endpoint::LandedCost => Duration::from_secs(60),
            Endpoint::Compliance
            | Endpoint::Vendors
            | Endpoint::News
            | Endpoint::ParseDocument => Duration::from_secs(120),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

/// Landed cost plus the alternative routings the backend priced alongside it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandedCostQuote {
    pub hs_code: Option<String>,
    pub landed_cost: LandedCost,
    pub scenarios: Vec<Scenario>,
}

#[derive(Clone)]
pub struct TariffClient {
    http: Client,
    base_url: Url,
    timeout_override: Option<Duration>,
    news_ttl: Duration,
    news_path: PathBuf,
    news: Arc<Mutex<Option<NewsCache>>>,
}

impl TariffClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = Client::builder().user_agent(version::user_agent()).build()?;
        Ok(Self {
            http,
            base_url: Url::parse(&config.api_base_url)?,
            timeout_override: config.timeout_override,
            news_ttl: config.news_ttl,
            news_path: news_cache_path(),
            news: Arc::new(Mutex::new(None)),
        })
    }

    pub fn with_news_cache_path(mut self, path: PathBuf) -> Self {
        self.news_path = path;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout_for(&self, endpoint: Endpoint) -> Duration {
        self.timeout_override
            .unwrap_or_else(|| endpoint.default_timeout())
    }

    pub async fn classify(&self, request: &ClassifyRequest) -> Result<Classification, ApiError> {
        let raw = self.post_json(Endpoint::Classify, request).await?;
        Ok(decode_classification(raw)?)
    }

    pub async fn compliance(
        &self,
        request: &ComplianceRequest,
    ) -> Result<ComplianceReport, ApiError> {
        let raw = self.post_json(Endpoint::Compliance, request).await?;
        Ok(decode_compliance(raw)?)
    }

    pub async fn landed_cost(
        &self,
        request: &LandedCostRequest,
    ) -> Result<LandedCostQuote, ApiError> {
        let raw = self.post_json(Endpoint::LandedCost, request).await?;
        Ok(decode_landed_cost(&raw))
    }

    pub async fn vendors(&self, request: &VendorRequest) -> Result<Vec<Vendor>, ApiError> {
        let raw = self.post_json(Endpoint::Vendors, request).await?;
        Ok(decode_vendors(raw)?)
    }

    /// Uploads a PDF and returns whatever fields the backend could extract.
    pub async fn parse_document(&self, path: &Path) -> Result<ExtractedDocument, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        debug!("uploading {file_name} ({} bytes) for extraction", bytes.len());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);

        let url = self.url(Endpoint::ParseDocument)?;
        let raw = self
            .send(Endpoint::ParseDocument, self.http.post(url).multipart(form))
            .await?;
        Ok(decode_document(&raw))
    }

    /// News feed, served from cache while it is younger than the configured TTL
    /// unless `force` is set. A failed fetch falls back to whatever was cached before.
    pub async fn news(&self, force: bool) -> Result<CachedPayload<Vec<NewsItem>>, ApiError> {
        if !force {
            let memory = self.news.lock().await;
            if let Some(cache) = memory.as_ref().filter(|c| !c.is_expired(self.news_ttl)) {
                debug!("[news] using in-memory cache (age: {})", cache.age_string());
                return Ok(payload(cache, CacheStatus::Cached));
            }
        }

        let disk = load_news_cache(&self.news_path);
        if let Some(cache) = disk
            .as_ref()
            .filter(|c| !force && !c.is_expired(self.news_ttl))
        {
            debug!("[news] disk cache valid (age: {})", cache.age_string());
            *self.news.lock().await = Some(cache.clone());
            return Ok(payload(cache, CacheStatus::Cached));
        }

        match self.refresh_news().await {
            Ok(cache) => Ok(payload(&cache, CacheStatus::Fresh)),
            Err(error) => {
                let memory = self.news.lock().await.clone();
                match memory.or(disk) {
                    Some(stale) => {
                        warn!(
                            "[news] fetch failed ({error}); serving stale cache (age: {})",
                            stale.age_string()
                        );
                        Ok(payload(&stale, CacheStatus::Stale))
                    }
                    None => Err(error),
                }
            }
        }
    }

    /// Force a fetch of the news feed, bypassing both caches.
    pub async fn refresh_news(&self) -> Result<NewsCache, ApiError> {
        let url = self.url(Endpoint::News)?;
        let raw = self.send(Endpoint::News, self.http.get(url)).await?;
        let cache = NewsCache::new(decode_news(raw)?);
        info!("[news] fetched {} articles", cache.items.len());

        if let Err(e) = save_news_cache(&self.news_path, &cache) {
            warn!("[news] failed to save cache: {e}");
        }
        *self.news.lock().await = Some(cache.clone());
        Ok(cache)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<Value, ApiError> {
        let url = self.url(endpoint)?;
        self.send(endpoint, self.http.post(url).json(body)).await
    }

    async fn send(&self, endpoint: Endpoint, builder: RequestBuilder) -> Result<Value, ApiError> {
        let timeout = self.timeout_for(endpoint);
        debug!("POST/GET {} (timeout {}s)", endpoint.path(), timeout.as_secs());

        let response = builder
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        if !status.is_success() {
            let detail = extract_detail(&body);
            warn!(
                "{} failed with {}: {}",
                endpoint.path(),
                status.as_u16(),
                detail.as_deref().unwrap_or("no detail")
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn url(&self, endpoint: Endpoint) -> Result<Url, url::ParseError> {
        self.base_url.join(endpoint.path())
    }
}

fn payload(cache: &NewsCache, status: CacheStatus) -> CachedPayload<Vec<NewsItem>> {
    CachedPayload {
        data: cache.items.clone(),
        fetched_at: cache.fetched_at(),
        status,
    }
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout(timeout)
    } else {
        ApiError::Http(error)
    }
}

/// Pulls the `detail` field out of an error body. Non-string details are
/// rendered as compact JSON.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClassifyDto {
    reranked: Option<RerankedDto>,
    candidates: Option<Vec<CandidateDto>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RerankedDto {
    #[serde(deserialize_with = "string_from_json")]
    primary_hs: String,
    confidence: Value,
    confidence_score: Value,
    #[serde(deserialize_with = "string_from_json")]
    reasoning: String,
    extracted_features: Value,
    candidate_explanations: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateDto {
    #[serde(deserialize_with = "string_from_json")]
    hs_code: String,
    #[serde(deserialize_with = "string_from_json")]
    description: String,
    #[serde(deserialize_with = "string_from_json")]
    reasoning: String,
}

fn decode_classification(raw: Value) -> Result<Classification, serde_json::Error> {
    let dto: ClassifyDto = serde_json::from_value(raw)?;
    let reranked = dto.reranked.unwrap_or_default();
    let explanations = flatten_object(&reranked.candidate_explanations);
    let confidence = number_from_value(&reranked.confidence)
        .or_else(|| number_from_value(&reranked.confidence_score))
        .map(normalize_confidence)
        .unwrap_or(0.0);

    let candidates = dto
        .candidates
        .unwrap_or_default()
        .into_iter()
        .filter(|c| !c.hs_code.trim().is_empty())
        .map(|c| HsCandidate {
            // Without a reranked block the candidate's own reasoning is all there is.
            explanation: explanations
                .get(c.hs_code.trim())
                .cloned()
                .or_else(|| Some(c.reasoning.trim().to_string()).filter(|r| !r.is_empty())),
            hs_code: c.hs_code.trim().to_string(),
            description: c.description,
        })
        .collect();

    Ok(Classification {
        primary_hs: reranked.primary_hs.trim().to_string(),
        confidence,
        reasoning: reranked.reasoning,
        extracted_features: flatten_object(&reranked.extracted_features),
        candidates,
    })
}

/// Confidence arrives either as a fraction or as a percentage.
fn normalize_confidence(raw: f64) -> f32 {
    let fraction = if raw > 1.0 { raw / 100.0 } else { raw };
    fraction.clamp(0.0, 1.0) as f32
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ComplianceDto {
    #[serde(deserialize_with = "string_from_json")]
    risk_level: String,
    #[serde(deserialize_with = "string_from_json")]
    estimated_complexity: String,
    #[serde(deserialize_with = "string_from_json")]
    summary_advice: String,
    #[serde(deserialize_with = "null_as_default")]
    compliance_checklist: Vec<RequirementDto>,
    rules_of_origin_evaluation: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RequirementDto {
    #[serde(deserialize_with = "string_from_json")]
    requirement_title: String,
    #[serde(deserialize_with = "string_from_json")]
    description: String,
    #[serde(deserialize_with = "string_from_json")]
    category: String,
    is_mandatory: Value,
}

impl From<RequirementDto> for ComplianceRequirement {
    fn from(dto: RequirementDto) -> Self {
        Self {
            title: dto.requirement_title,
            description: dto.description,
            category: dto.category,
            is_mandatory: bool_from_value(&dto.is_mandatory),
        }
    }
}

fn decode_compliance(raw: Value) -> Result<ComplianceReport, serde_json::Error> {
    let dto: ComplianceDto = serde_json::from_value(raw)?;
    let rules_of_origin = match &dto.rules_of_origin_evaluation {
        Value::Array(entries) => entries.iter().map(text_from_value).collect(),
        Value::Null => Vec::new(),
        other => vec![text_from_value(other)],
    };

    Ok(ComplianceReport {
        risk_level: RiskLevel::parse(&dto.risk_level),
        estimated_complexity: dto.estimated_complexity,
        summary_advice: dto.summary_advice,
        checklist: dto
            .compliance_checklist
            .into_iter()
            .map(ComplianceRequirement::from)
            .collect(),
        rules_of_origin: rules_of_origin
            .into_iter()
            .filter(|rule: &String| !rule.is_empty())
            .collect(),
    })
}

/// Reads a landed-cost object field by field so one bad value does not
/// discard the rest of the breakdown.
fn landed_cost_from_value(value: &Value) -> LandedCost {
    let number = |key: &str| value.get(key).and_then(number_from_value).unwrap_or(0.0);
    LandedCost {
        product_value: number("product_value"),
        shipping_cost: number("shipping_cost"),
        insurance_cost: number("insurance_cost"),
        cif_value: number("cif_value"),
        tariff_rate: number("tariff_rate"),
        import_duty: number("import_duty"),
        import_vat: number("import_vat"),
        gst_cost: number("gst_cost"),
        cess_cost: number("cess_cost"),
        handling_fees: number("handling_fees"),
        doc_fees: number("doc_fees"),
        total_landed_cost: number("total_landed_cost"),
        distance_km: number("distance_km"),
        weight_kg: number("weight_kg"),
        mode: value.get("mode").map(text_from_value).unwrap_or_default(),
    }
}

fn decode_landed_cost(raw: &Value) -> LandedCostQuote {
    let scenarios = raw
        .get("scenarios")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| Scenario {
                    route: entry.get("route").map(text_from_value).unwrap_or_default(),
                    cost: landed_cost_from_value(entry),
                })
                .collect()
        })
        .unwrap_or_default();

    LandedCostQuote {
        hs_code: raw
            .get("hs_code")
            .map(text_from_value)
            .filter(|code| !code.trim().is_empty()),
        landed_cost: raw
            .get("landed_cost")
            .map(landed_cost_from_value)
            .unwrap_or_default(),
        scenarios,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VendorsDto {
    #[serde(deserialize_with = "null_as_default")]
    vendors: Vec<VendorDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VendorDto {
    #[serde(deserialize_with = "string_from_json")]
    name: String,
    #[serde(deserialize_with = "string_from_json")]
    website: String,
    #[serde(deserialize_with = "string_from_json")]
    vendor_type: String,
    sells_product: Value,
    trust_score: Value,
    #[serde(deserialize_with = "string_from_json")]
    snippet: String,
}

impl From<VendorDto> for Vendor {
    fn from(dto: VendorDto) -> Self {
        Self {
            name: dto.name,
            website: dto.website,
            vendor_type: dto.vendor_type,
            sells_product: bool_from_value(&dto.sells_product),
            trust_score: number_from_value(&dto.trust_score)
                .map(|score| score.clamp(0.0, 1.0) as f32)
                .unwrap_or(0.0),
            snippet: dto.snippet,
        }
    }
}

fn decode_vendors(raw: Value) -> Result<Vec<Vendor>, serde_json::Error> {
    let dto: VendorsDto = serde_json::from_value(raw)?;
    Ok(dto.vendors.into_iter().map(Vendor::from).collect())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NewsFeedDto {
    #[serde(deserialize_with = "null_as_default")]
    news: Vec<NewsEntryDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NewsEntryDto {
    #[serde(deserialize_with = "null_as_default")]
    article: ArticleDto,
    #[serde(deserialize_with = "null_as_default")]
    analysis: AnalysisDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArticleDto {
    #[serde(deserialize_with = "string_from_json")]
    title: String,
    #[serde(deserialize_with = "string_from_json")]
    url: String,
    source: Value,
    #[serde(rename = "dateTime", alias = "date_time", deserialize_with = "string_from_json")]
    date_time: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnalysisDto {
    extracted_policy: Value,
    strategic_analysis: Value,
}

impl From<NewsEntryDto> for NewsItem {
    fn from(dto: NewsEntryDto) -> Self {
        // Sources come either as a plain name or as `{ "title": ... }`.
        let source = match &dto.article.source {
            Value::Object(map) => map.get("title").map(text_from_value).unwrap_or_default(),
            other => text_from_value(other),
        };
        Self {
            title: dto.article.title,
            url: dto.article.url,
            source,
            published: format_published(&dto.article.date_time),
            policy: flatten_object(&dto.analysis.extracted_policy),
            analysis: flatten_object(&dto.analysis.strategic_analysis),
        }
    }
}

fn decode_news(raw: Value) -> Result<Vec<NewsItem>, serde_json::Error> {
    let dto: NewsFeedDto = serde_json::from_value(raw)?;
    Ok(dto.news.into_iter().map(NewsItem::from).collect())
}

/// `2026-02-20T10:00:00Z` → `Feb 20, 2026`; anything else is shown as-is.
fn format_published(raw: &str) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    OffsetDateTime::parse(raw.trim(), &Rfc3339)
        .ok()
        .and_then(|dt| dt.format(format).ok())
        .unwrap_or_else(|| raw.trim().to_string())
}

fn decode_document(raw: &Value) -> ExtractedDocument {
    let data = raw.get("extracted_data").unwrap_or(raw);
    let field = |keys: &[&str]| {
        keys.iter()
            .filter_map(|key| data.get(*key))
            .map(text_from_value)
            .find(|text| !text.trim().is_empty())
    };
    ExtractedDocument {
        name: field(&["name", "product_name"]),
        category: field(&["category"]),
        description: field(&["description"]),
        material: field(&["material"]),
        intended_use: field(&["intendedUse", "intended_use"]),
        value: field(&["value"]),
        currency: field(&["currency"]),
        qty: field(&["qty", "quantity"]),
        weight: field(&["weight"]),
        dimensions: field(&["dimensions"]),
        origin: field(&["origin"]),
        dest: field(&["dest", "destination"]),
        transport: field(&["transport"]),
    }
}

// ---------------------------------------------------------------------------
// Lenient value helpers
// ---------------------------------------------------------------------------

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

fn bool_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "mandatory"
        ),
        _ => false,
    }
}

fn text_from_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(text_from_value)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", humanize_key(key), text_from_value(value)))
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

/// One level of key/value pairs, nested values rendered as text.
fn flatten_object(value: &Value) -> BTreeMap<String, String> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), text_from_value(value)))
            .filter(|(_, text)| !text.is_empty())
            .collect(),
        _ => BTreeMap::new(),
    }
}

pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string, number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classification_accepts_numeric_codes_and_score_alias() {
        let raw = json!({
            "reranked": {
                "primary_hs": 610910,
                "confidence_score": "87",
                "reasoning": "Knitted cotton garment",
                "extracted_features": { "material": "cotton", "knit": true },
                "candidate_explanations": { "610910": "Exact match on fibre" }
            },
            "candidates": [
                { "hs_code": "610910", "description": "T-shirts of cotton" },
                { "hs_code": 620520, "description": null },
                { "hs_code": "", "description": "dropped" }
            ]
        });

        let result = decode_classification(raw).unwrap();
        assert_eq!(result.primary_hs, "610910");
        assert!((result.confidence - 0.87).abs() < 1e-6);
        assert_eq!(result.extracted_features["knit"], "true");
        assert_eq!(result.candidates.len(), 2);
        assert_eq!(
            result.candidates[0].explanation.as_deref(),
            Some("Exact match on fibre")
        );
        assert_eq!(result.candidates[1].hs_code, "620520");
        assert_eq!(result.candidates[1].description, "");
    }

    #[test]
    fn empty_classification_defaults_everything() {
        let result = decode_classification(json!({})).unwrap();
        assert_eq!(result, Classification::default());
    }

    #[test]
    fn candidates_without_reranking_keep_their_reasoning() {
        let raw = json!({
            "reranked": null,
            "candidates": [
                { "hs_code": "610910", "description": "T-shirts, knitted", "reasoning": "Knitted cotton" },
                { "hs_code": "620520", "reasoning": "" }
            ]
        });

        let result = decode_classification(raw).unwrap();
        assert_eq!(result.primary_hs, "");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.candidates.len(), 2);
        assert_eq!(result.candidates[0].hs_code, "610910");
        assert_eq!(result.candidates[0].explanation.as_deref(), Some("Knitted cotton"));
        assert_eq!(result.candidates[1].explanation, None);
    }

    #[test]
    fn reranked_explanations_win_over_candidate_reasoning() {
        let raw = json!({
            "reranked": {
                "primary_hs": "610910",
                "candidate_explanations": { "610910": "Best match on material" }
            },
            "candidates": [{ "hs_code": "610910", "reasoning": "Knitted cotton" }]
        });

        let result = decode_classification(raw).unwrap();
        assert_eq!(
            result.candidates[0].explanation.as_deref(),
            Some("Best match on material")
        );
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let report = decode_compliance(json!({ "compliance_checklist": null })).unwrap();
        assert!(report.checklist.is_empty());

        let vendors = decode_vendors(json!({ "vendors": null })).unwrap();
        assert!(vendors.is_empty());

        let items = decode_news(json!({ "news": null })).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn news_entries_survive_null_article_or_analysis() {
        let raw = json!({
            "news": [
                { "article": null, "analysis": { "strategic_analysis": { "impact": "Low" } } },
                { "article": { "title": "Port fees rise" }, "analysis": null }
            ]
        });

        let items = decode_news(raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "");
        assert_eq!(items[0].analysis["impact"], "Low");
        assert_eq!(items[1].title, "Port fees rise");
        assert!(items[1].policy.is_empty());
    }

    #[test]
    fn compliance_tolerates_string_flags_and_object_rules() {
        let raw = json!({
            "risk_level": "HIGH",
            "estimated_complexity": "Moderate",
            "compliance_checklist": [
                { "requirement_title": "CPSIA certificate", "is_mandatory": "yes" },
                { "requirement_title": "Care labels", "is_mandatory": false }
            ],
            "rules_of_origin_evaluation": [
                { "agreement": "USMCA", "eligible": false },
                "Not applicable"
            ]
        });

        let report = decode_compliance(raw).unwrap();
        assert_eq!(report.risk_level, RiskLevel::High);
        assert_eq!(report.mandatory_count(), 1);
        assert_eq!(report.summary_advice, "");
        assert_eq!(
            report.rules_of_origin,
            vec!["Agreement: USMCA; Eligible: false", "Not applicable"]
        );
    }

    #[test]
    fn landed_cost_survives_bad_fields() {
        let raw = json!({
            "hs_code": "610910",
            "landed_cost": {
                "product_value": 12000,
                "shipping_cost": "1240.5",
                "tariff_rate": 0.165,
                "gst_cost": null,
                "total_landed_cost": 16345.12,
                "mode": "sea"
            },
            "scenarios": [
                { "route": "vietnam → usa", "total_landed_cost": 15110.0 }
            ]
        });

        let quote = decode_landed_cost(&raw);
        assert_eq!(quote.hs_code.as_deref(), Some("610910"));
        assert_eq!(quote.landed_cost.shipping_cost, 1240.5);
        assert_eq!(quote.landed_cost.gst_cost, 0.0);
        assert_eq!(quote.landed_cost.mode, "sea");
        assert_eq!(quote.scenarios.len(), 1);
        assert_eq!(quote.scenarios[0].origin(), "vietnam");
        assert_eq!(quote.scenarios[0].cost.total_landed_cost, 15110.0);
    }

    #[test]
    fn missing_landed_cost_is_all_zero() {
        let quote = decode_landed_cost(&Value::Null);
        assert_eq!(quote, LandedCostQuote::default());
    }

    #[test]
    fn vendor_scores_are_clamped() {
        let raw = json!({
            "vendors": [
                { "name": "Saigon Knits", "sells_product": "true", "trust_score": 1.7 },
                { "name": "Unknown", "trust_score": "n/a" }
            ]
        });
        let vendors = decode_vendors(raw).unwrap();
        assert!(vendors[0].sells_product);
        assert_eq!(vendors[0].trust_score, 1.0);
        assert_eq!(vendors[1].trust_score, 0.0);
        assert!(!vendors[1].sells_product);
    }

    #[test]
    fn news_entries_are_flattened() {
        let raw = json!({
            "news": [{
                "article": {
                    "title": "US raises Section 301 duties",
                    "url": "https://example.org/a",
                    "source": { "title": "Reuters" },
                    "dateTime": "2026-02-20T10:00:00Z"
                },
                "analysis": {
                    "extracted_policy": { "affected_hs_codes": ["6109", "6110"], "country": "China" },
                    "strategic_analysis": { "impact": "High" }
                }
            }]
        });

        let items = decode_news(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, "Reuters");
        assert_eq!(items[0].published, "Feb 20, 2026");
        assert_eq!(items[0].policy["affected_hs_codes"], "6109, 6110");
        assert_eq!(items[0].analysis["impact"], "High");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_published(" yesterday "), "yesterday");
    }

    #[test]
    fn document_fields_accept_numbers_and_aliases() {
        let raw = json!({
            "extracted_data": {
                "name": "Cotton T-Shirts",
                "value": 12000,
                "qty": "500",
                "intended_use": "Retail",
                "origin": "",
                "destination": "USA"
            }
        });
        let doc = decode_document(&raw);
        assert_eq!(doc.name.as_deref(), Some("Cotton T-Shirts"));
        assert_eq!(doc.value.as_deref(), Some("12000"));
        assert_eq!(doc.intended_use.as_deref(), Some("Retail"));
        assert_eq!(doc.origin, None);
        assert_eq!(doc.dest.as_deref(), Some("USA"));
    }

    #[test]
    fn detail_is_extracted_from_error_bodies() {
        assert_eq!(
            extract_detail(r#"{"detail":"HS code required"}"#).as_deref(),
            Some("HS code required")
        );
        assert_eq!(
            extract_detail(r#"{"detail":[{"loc":["body","weight_kg"],"msg":"field required"}]}"#)
                .as_deref(),
            Some(r#"[{"loc":["body","weight_kg"],"msg":"field required"}]"#)
        );
        assert_eq!(extract_detail(r#"{"detail":null}"#), None);
        assert_eq!(extract_detail("Internal Server Error"), None);
    }

    #[test]
    fn status_errors_render_detail() {
        let error = ApiError::Status {
            status: 422,
            detail: Some("weight_kg must be positive".into()),
        };
        assert_eq!(error.to_string(), "backend error 422: weight_kg must be positive");
        assert!(ApiError::Timeout(Duration::from_secs(60)).is_timeout());
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(60)).to_string(),
            "request timed out after 60s"
        );
    }

    #[test]
    fn timeouts_follow_endpoint_unless_overridden() {
        let config = AppConfig::default();
        let client = TariffClient::new(&config).unwrap();
        assert_eq!(client.timeout_for(Endpoint::Classify), Duration::from_secs(60));
        assert_eq!(client.timeout_for(Endpoint::News), Duration::from_secs(120));

        let config = AppConfig {
            timeout_override: Some(Duration::from_secs(5)),
            ..AppConfig::default()
        };
        let client = TariffClient::new(&config).unwrap();
        assert_eq!(client.timeout_for(Endpoint::Compliance), Duration::from_secs(5));
        assert_eq!(
            client.url(Endpoint::LandedCost).unwrap().as_str(),
            "http://127.0.0.1:8000/api/landed-cost"
        );
    }

    #[test]
    fn malformed_base_url_is_rejected_at_construction() {
        let config = AppConfig {
            api_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            TariffClient::new(&config),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn news_falls_back_to_stale_cache_when_backend_is_down() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        let mut stale = NewsCache::new(vec![NewsItem {
            title: "Cached headline".into(),
            ..NewsItem::default()
        }]);
        stale.cached_at = stale.cached_at.saturating_sub(2 * 3600);
        save_news_cache(&path, &stale).unwrap();

        let config = AppConfig {
            api_base_url: "http://127.0.0.1:9/".to_string(),
            timeout_override: Some(Duration::from_secs(2)),
            news_ttl: Duration::from_secs(3600),
        };
        let client = TariffClient::new(&config)
            .unwrap()
            .with_news_cache_path(path);

        let payload = client.news(false).await.unwrap();
        assert_eq!(payload.status, CacheStatus::Stale);
        assert_eq!(payload.data[0].title, "Cached headline");
    }

    #[test]
    fn keys_are_humanized() {
        assert_eq!(humanize_key("affected_hs_codes"), "Affected hs codes");
        assert_eq!(humanize_key(""), "");
    }
}
