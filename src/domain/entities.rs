use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Transport mode picked on the trade input screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Sea,
    Air,
    Other,
}

impl TransportMode {
    /// Interprets the free-text transport field. Anything mentioning air is air freight.
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_ascii_lowercase();
        if lower.contains("air") {
            TransportMode::Air
        } else if lower.contains("sea") || lower.contains("ocean") {
            TransportMode::Sea
        } else {
            TransportMode::Other
        }
    }

    /// Mode string the backend accepts. It only knows `air` and `sea`.
    pub fn api_mode(&self) -> &'static str {
        match self {
            TransportMode::Air => "air",
            TransportMode::Sea | TransportMode::Other => "sea",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Sea => "Sea Freight",
            TransportMode::Air => "Air Freight",
            TransportMode::Other => "Other",
        }
    }
}

/// Landed cost breakdown as returned by `/api/landed-cost`.
///
/// Rates are fractions and amounts are in the declared currency.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandedCost {
    pub product_value: f64,
    pub shipping_cost: f64,
    pub insurance_cost: f64,
    pub cif_value: f64,
    pub tariff_rate: f64,
    pub import_duty: f64,
    pub import_vat: f64,
    pub gst_cost: f64,
    pub cess_cost: f64,
    pub handling_fees: f64,
    pub doc_fees: f64,
    pub total_landed_cost: f64,
    pub distance_km: f64,
    pub weight_kg: f64,
    pub mode: String,
}

impl LandedCost {
    /// Freight plus insurance, shown as "total logistics cost".
    pub fn logistics_cost(&self) -> f64 {
        self.shipping_cost + self.insurance_cost
    }

    pub fn taxes(&self) -> f64 {
        self.import_vat + self.gst_cost + self.cess_cost
    }
}

/// One alternative routing or sourcing option.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub route: String,
    #[serde(flatten)]
    pub cost: LandedCost,
}

impl Scenario {
    /// Origin half of a `"origin → destination"` route label.
    pub fn origin(&self) -> &str {
        self.route
            .split('→')
            .next()
            .map(str::trim)
            .unwrap_or_default()
    }
}

/// Result of the HS classification endpoint, flattened for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classification {
    pub primary_hs: String,
    pub confidence: f32,
    pub reasoning: String,
    pub extracted_features: BTreeMap<String, String>,
    pub candidates: Vec<HsCandidate>,
}

impl Classification {
    /// The backend can answer with candidates only, leaving no primary pick.
    pub fn primary(&self) -> Option<&str> {
        Some(self.primary_hs.trim()).filter(|code| !code.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HsCandidate {
    pub hs_code: String,
    pub description: String,
    pub explanation: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    Unknown,
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" | "moderate" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            "critical" | "severe" => RiskLevel::Critical,
            _ => RiskLevel::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::Critical => "Critical Risk",
            RiskLevel::Unknown => "Risk Pending",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplianceReport {
    pub risk_level: RiskLevel,
    pub estimated_complexity: String,
    pub summary_advice: String,
    pub checklist: Vec<ComplianceRequirement>,
    pub rules_of_origin: Vec<String>,
}

impl ComplianceReport {
    pub fn mandatory_count(&self) -> usize {
        self.checklist.iter().filter(|item| item.is_mandatory).count()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplianceRequirement {
    pub title: String,
    pub description: String,
    pub category: String,
    pub is_mandatory: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vendor {
    pub name: String,
    pub website: String,
    pub vendor_type: String,
    pub sells_product: bool,
    /// 0..=1, clamped on decode.
    pub trust_score: f32,
    pub snippet: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published: String,
    /// Flattened key/value pairs of the backend's `extracted_policy`.
    pub policy: BTreeMap<String, String>,
    /// Flattened key/value pairs of the backend's `strategic_analysis`.
    pub analysis: BTreeMap<String, String>,
}

impl NewsItem {
    /// Whether the article text or its extracted policy mentions any of the needles.
    pub fn mentions_any(&self, needles: &[String]) -> bool {
        let haystack = format!(
            "{} {} {}",
            self.title,
            self.policy.values().cloned().collect::<Vec<_>>().join(" "),
            self.analysis.values().cloned().collect::<Vec<_>>().join(" ")
        )
        .to_lowercase();
        needles
            .iter()
            .filter(|needle| !needle.trim().is_empty())
            .any(|needle| haystack.contains(&needle.to_lowercase()))
    }
}

/// Fields pulled out of an uploaded commercial document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedDocument {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub material: Option<String>,
    pub intended_use: Option<String>,
    pub value: Option<String>,
    pub currency: Option<String>,
    pub qty: Option<String>,
    pub weight: Option<String>,
    pub dimensions: Option<String>,
    pub origin: Option<String>,
    pub dest: Option<String>,
    pub transport: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_labels_map_to_backend_modes() {
        assert_eq!(TransportMode::from_label("Air Freight"), TransportMode::Air);
        assert_eq!(TransportMode::from_label("Sea Freight (FCL)"), TransportMode::Sea);
        assert_eq!(
            TransportMode::from_label("Select transport mode"),
            TransportMode::Other
        );
        assert_eq!(TransportMode::Other.api_mode(), "sea");
    }

    #[test]
    fn scenario_origin_is_left_of_arrow() {
        let scenario = Scenario {
            route: "vietnam → usa".to_string(),
            ..Scenario::default()
        };
        assert_eq!(scenario.origin(), "vietnam");
    }

    #[test]
    fn scenario_decodes_flattened_cost() {
        let raw = r#"{"route":"india → usa","total_landed_cost":1200.5,"mode":"sea"}"#;
        let scenario: Scenario = serde_json::from_str(raw).unwrap();
        assert_eq!(scenario.cost.total_landed_cost, 1200.5);
        assert_eq!(scenario.cost.mode, "sea");
        assert_eq!(scenario.cost.import_duty, 0.0);
    }

    #[test]
    fn blank_primary_code_is_no_primary() {
        let result = Classification {
            candidates: vec![HsCandidate {
                hs_code: "610910".into(),
                ..HsCandidate::default()
            }],
            ..Classification::default()
        };
        assert_eq!(result.primary(), None);

        let result = Classification {
            primary_hs: "610910".into(),
            ..Classification::default()
        };
        assert_eq!(result.primary(), Some("610910"));
    }

    #[test]
    fn news_relevance_matches_case_insensitively() {
        let item = NewsItem {
            title: "US raises tariffs on Chinese electronics".into(),
            ..NewsItem::default()
        };
        assert!(item.mentions_any(&["china".into(), "chinese".into()]));
        assert!(!item.mentions_any(&["".into(), "vietnam".into()]));
    }
}
