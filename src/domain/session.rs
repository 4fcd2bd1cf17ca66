//! The shared trade scenario record and its merge-style patch.

use serde::{Deserialize, Serialize};

use super::entities::{ExtractedDocument, LandedCost, Scenario, TransportMode};

pub const CATEGORY_PLACEHOLDER: &str = "Select category";
pub const ORIGIN_PLACEHOLDER: &str = "Select origin";
pub const DEST_PLACEHOLDER: &str = "Select destination";
pub const TRANSPORT_PLACEHOLDER: &str = "Select transport mode";
pub const DEFAULT_CURRENCY: &str = "USD - US Dollar";

/// True for blank input or an untouched `Select …` picker.
pub fn is_unset(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.starts_with("Select ")
}

/// Lenient numeric coercion for form fields (`"12,500.00"` → 12500.0).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' ' | '$'))
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// The user's in-progress trade scenario.
///
/// Every field is optional in spirit: screens must cope with a record that
/// is only partly filled in. Numeric inputs stay as entered; consumers
/// coerce them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TradeSession {
    pub name: String,
    pub category: String,
    pub description: String,
    pub material: String,
    pub intended_use: String,
    pub value: String,
    pub currency: String,
    pub qty: String,
    pub weight: String,
    pub dimensions: String,
    pub origin: String,
    pub dest: String,
    pub transport: String,
    pub hs_code: Option<String>,
    pub landed_cost: Option<LandedCost>,
    pub scenarios: Vec<Scenario>,
}

impl Default for TradeSession {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: CATEGORY_PLACEHOLDER.to_string(),
            description: String::new(),
            material: String::new(),
            intended_use: String::new(),
            value: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            qty: String::new(),
            weight: String::new(),
            dimensions: String::new(),
            origin: ORIGIN_PLACEHOLDER.to_string(),
            dest: DEST_PLACEHOLDER.to_string(),
            transport: TRANSPORT_PLACEHOLDER.to_string(),
            hs_code: None,
            landed_cost: None,
            scenarios: Vec::new(),
        }
    }
}

impl TradeSession {
    /// Overlays every field present in `patch`. Absent fields are untouched.
    pub fn apply(&mut self, patch: TradeSessionPatch) {
        let TradeSessionPatch {
            name,
            category,
            description,
            material,
            intended_use,
            value,
            currency,
            qty,
            weight,
            dimensions,
            origin,
            dest,
            transport,
            hs_code,
            landed_cost,
            scenarios,
        } = patch;

        overlay(&mut self.name, name);
        overlay(&mut self.category, category);
        overlay(&mut self.description, description);
        overlay(&mut self.material, material);
        overlay(&mut self.intended_use, intended_use);
        overlay(&mut self.value, value);
        overlay(&mut self.currency, currency);
        overlay(&mut self.qty, qty);
        overlay(&mut self.weight, weight);
        overlay(&mut self.dimensions, dimensions);
        overlay(&mut self.origin, origin);
        overlay(&mut self.dest, dest);
        overlay(&mut self.transport, transport);
        overlay(&mut self.hs_code, hs_code);
        overlay(&mut self.landed_cost, landed_cost);
        overlay(&mut self.scenarios, scenarios);
    }

    /// Text sent to the classifier: name and description joined.
    pub fn product_text(&self) -> String {
        format!("{} {}", self.name.trim(), self.description.trim())
            .trim()
            .to_string()
    }

    pub fn has_product(&self) -> bool {
        !self.product_text().is_empty()
    }

    pub fn has_route(&self) -> bool {
        !is_unset(&self.origin) && !is_unset(&self.dest)
    }

    pub fn hs_code(&self) -> Option<&str> {
        self.hs_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    pub fn transport_mode(&self) -> TransportMode {
        TransportMode::from_label(&self.transport)
    }

    pub fn declared_value(&self) -> Option<f64> {
        parse_amount(&self.value)
    }

    pub fn weight_kg(&self) -> Option<f64> {
        parse_amount(&self.weight)
    }

    pub fn quantity(&self) -> Option<u64> {
        self.qty.trim().replace(',', "").parse().ok()
    }

    /// Currency code, the part before ` - ` in the picker label.
    pub fn currency_code(&self) -> &str {
        self.currency
            .split_whitespace()
            .next()
            .unwrap_or(DEFAULT_CURRENCY)
    }

    /// Labels of required trade-input fields that are still empty.
    pub fn missing_inputs(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("Product name");
        }
        if self.declared_value().is_none() {
            missing.push("Product value");
        }
        if self.quantity().is_none() {
            missing.push("Quantity");
        }
        if self.weight_kg().is_none() {
            missing.push("Weight");
        }
        if is_unset(&self.origin) {
            missing.push("Origin");
        }
        if is_unset(&self.dest) {
            missing.push("Destination");
        }
        if is_unset(&self.transport) {
            missing.push("Transport mode");
        }
        missing
    }

    /// Route label such as `China → USA`, with dashes for unset ends.
    pub fn route_label(&self) -> String {
        let end = |value: &str| {
            if is_unset(value) {
                "—".to_string()
            } else {
                value.trim().to_string()
            }
        };
        format!("{} → {}", end(&self.origin), end(&self.dest))
    }
}

fn overlay<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Partial update for [`TradeSession`].
///
/// `hs_code` and `landed_cost` are double options: `Some(None)` clears the
/// field, `None` leaves it alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TradeSessionPatch {
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
    pub hs_code: Option<Option<String>>,
    pub landed_cost: Option<Option<LandedCost>>,
    pub scenarios: Option<Vec<Scenario>>,
}

macro_rules! patch_setters {
    ($($field:ident),* $(,)?) => {
        $(
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

impl TradeSessionPatch {
    patch_setters!(
        name,
        category,
        description,
        material,
        intended_use,
        value,
        currency,
        qty,
        weight,
        dimensions,
        origin,
        dest,
        transport,
    );

    pub fn hs_code(mut self, code: Option<String>) -> Self {
        self.hs_code = Some(code);
        self
    }

    pub fn landed_cost(mut self, cost: Option<LandedCost>) -> Self {
        self.landed_cost = Some(cost);
        self
    }

    pub fn scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = Some(scenarios);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<ExtractedDocument> for TradeSessionPatch {
    /// Only fields the parser actually found are carried over.
    fn from(doc: ExtractedDocument) -> Self {
        let keep = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            name: keep(doc.name),
            category: keep(doc.category),
            description: keep(doc.description),
            material: keep(doc.material),
            intended_use: keep(doc.intended_use),
            value: keep(doc.value),
            currency: keep(doc.currency),
            qty: keep(doc.qty),
            weight: keep(doc.weight),
            dimensions: keep(doc.dimensions),
            origin: keep(doc.origin),
            dest: keep(doc.dest),
            transport: keep(doc.transport),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_inputs_lists_required_gaps() {
        let mut session = TradeSession::default();
        assert_eq!(session.missing_inputs().len(), 7);

        session.apply(
            TradeSessionPatch::default()
                .name("Cotton T-Shirts")
                .value("12,000")
                .qty("500")
                .weight("250")
                .origin("China")
                .dest("USA"),
        );
        assert_eq!(session.missing_inputs(), vec!["Transport mode"]);
    }

    #[test]
    fn defaults_use_placeholder_sentinels() {
        let session = TradeSession::default();
        assert_eq!(session.category, CATEGORY_PLACEHOLDER);
        assert_eq!(session.origin, ORIGIN_PLACEHOLDER);
        assert_eq!(session.hs_code, None);
        assert!(session.scenarios.is_empty());
        assert!(!session.has_route());
        assert!(!session.has_product());
    }

    #[test]
    fn disjoint_patches_compose_in_call_order() {
        let mut session = TradeSession::default();
        session.apply(TradeSessionPatch::default().name("Cotton T-Shirts"));
        session.apply(TradeSessionPatch::default().origin("China").dest("USA"));

        let expected = TradeSession {
            name: "Cotton T-Shirts".into(),
            origin: "China".into(),
            dest: "USA".into(),
            ..TradeSession::default()
        };
        assert_eq!(session, expected);
        assert_eq!(session.category, "Select category");
    }

    #[test]
    fn overlapping_patches_resolve_last_write_wins() {
        let mut session = TradeSession::default();
        session.apply(TradeSessionPatch::default().hs_code(Some("6109.10".into())));
        session.apply(TradeSessionPatch::default().hs_code(Some("6109.90".into())));
        assert_eq!(session.hs_code(), Some("6109.90"));
    }

    #[test]
    fn double_option_clears_hs_code() {
        let mut session = TradeSession::default();
        session.apply(TradeSessionPatch::default().hs_code(Some("8471.30".into())));
        session.apply(TradeSessionPatch::default().name("Laptop"));
        assert_eq!(session.hs_code(), Some("8471.30"));

        session.apply(TradeSessionPatch::default().hs_code(None));
        assert_eq!(session.hs_code, None);
        assert_eq!(session.name, "Laptop");
    }

    #[test]
    fn unset_detects_blank_and_placeholders() {
        assert!(is_unset(""));
        assert!(is_unset("   "));
        assert!(is_unset("Select destination"));
        assert!(!is_unset("Selected Goods Ltd"));
        assert!(!is_unset("India"));
    }

    #[test]
    fn amounts_are_coerced_leniently() {
        assert_eq!(parse_amount("12,500.50"), Some(12500.5));
        assert_eq!(parse_amount("$ 40"), Some(40.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn persisted_record_uses_camel_case_keys() {
        let session = TradeSession {
            intended_use: "Retail".into(),
            hs_code: Some("6109.10".into()),
            ..TradeSession::default()
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["intendedUse"], "Retail");
        assert_eq!(json["hsCode"], "6109.10");
        assert!(json["landedCost"].is_null());
    }

    #[test]
    fn partial_persisted_record_fills_defaults() {
        let session: TradeSession = serde_json::from_str(r#"{"name":"Mugs"}"#).unwrap();
        assert_eq!(session.name, "Mugs");
        assert_eq!(session.dest, DEST_PLACEHOLDER);
        assert_eq!(session.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn extracted_document_skips_blank_fields() {
        let doc = ExtractedDocument {
            name: Some("Steel bolts".into()),
            material: Some("  ".into()),
            origin: Some("India".into()),
            ..ExtractedDocument::default()
        };
        let patch = TradeSessionPatch::from(doc);
        assert_eq!(patch.name.as_deref(), Some("Steel bolts"));
        assert_eq!(patch.material, None);
        assert_eq!(patch.origin.as_deref(), Some("India"));
        assert_eq!(patch.hs_code, None);
    }

    #[test]
    fn route_label_marks_unset_ends() {
        let session = TradeSession {
            origin: "China".into(),
            ..TradeSession::default()
        };
        assert_eq!(session.route_label(), "China → —");
        assert_eq!(session.currency_code(), "USD");
    }
}
