//! Backend request bodies and the gates that derive them from a session.
//!
//! A gate either yields a complete request or names the upstream step the
//! user still has to finish. Pages never issue a call from a failed gate.

use serde::Serialize;

use super::session::{is_unset, TradeSession};

/// The earlier screen a page depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingStep {
    ProductDetails,
    Routing,
    Classification,
    ShipmentDetails,
    LandedCost,
}

impl MissingStep {
    pub fn prompt(&self) -> &'static str {
        match self {
            MissingStep::ProductDetails => "Describe your product on the Trade Input screen first.",
            MissingStep::Routing => "Pick an origin and destination on the Trade Input screen first.",
            MissingStep::Classification => "Confirm an HS code on the HS Code screen first.",
            MissingStep::ShipmentDetails => {
                "Enter a declared value and shipment weight on the Trade Input screen first."
            }
            MissingStep::LandedCost => "Calculate the landed cost on the Landed Cost screen first.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassifyRequest {
    pub product_description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComplianceRequest {
    pub product_description: String,
    pub destination: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LandedCostRequest {
    pub product_description: String,
    pub origin: String,
    pub destination: String,
    pub mode: &'static str,
    pub weight_kg: f64,
    pub product_value: f64,
    pub hs_code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VendorRequest {
    pub product: String,
    pub country: String,
}

impl ClassifyRequest {
    pub fn from_session(session: &TradeSession) -> Result<Self, MissingStep> {
        if !session.has_product() {
            return Err(MissingStep::ProductDetails);
        }
        Ok(Self {
            product_description: session.product_text(),
        })
    }
}

impl ComplianceRequest {
    pub fn from_session(session: &TradeSession) -> Result<Self, MissingStep> {
        if !session.has_product() {
            return Err(MissingStep::ProductDetails);
        }
        if !session.has_route() {
            return Err(MissingStep::Routing);
        }
        if session.hs_code().is_none() {
            return Err(MissingStep::Classification);
        }
        Ok(Self {
            product_description: description_or_name(session),
            destination: session.dest.trim().to_string(),
        })
    }
}

impl LandedCostRequest {
    pub fn from_session(session: &TradeSession) -> Result<Self, MissingStep> {
        if !session.has_product() {
            return Err(MissingStep::ProductDetails);
        }
        if !session.has_route() {
            return Err(MissingStep::Routing);
        }
        let hs_code = session.hs_code().ok_or(MissingStep::Classification)?;
        let product_value = session
            .declared_value()
            .filter(|value| *value > 0.0)
            .ok_or(MissingStep::ShipmentDetails)?;
        let weight_kg = session
            .weight_kg()
            .filter(|weight| *weight > 0.0)
            .ok_or(MissingStep::ShipmentDetails)?;

        Ok(Self {
            product_description: description_or_name(session),
            origin: session.origin.trim().to_string(),
            destination: session.dest.trim().to_string(),
            mode: session.transport_mode().api_mode(),
            weight_kg,
            product_value,
            hs_code: hs_code.to_string(),
        })
    }
}

impl VendorRequest {
    /// Vendors selling the session's product in `country`.
    pub fn for_country(session: &TradeSession, country: &str) -> Result<Self, MissingStep> {
        if !session.has_product() {
            return Err(MissingStep::ProductDetails);
        }
        if is_unset(country) {
            return Err(MissingStep::Routing);
        }
        let product = if session.name.trim().is_empty() {
            session.product_text()
        } else {
            session.name.trim().to_string()
        };
        Ok(Self {
            product,
            country: country.trim().to_string(),
        })
    }
}

fn description_or_name(session: &TradeSession) -> String {
    if session.description.trim().is_empty() {
        session.name.trim().to_string()
    } else {
        session.description.trim().to_string()
    }
}

/// Page-local lifecycle of one backend call.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
    TimedOut,
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            RequestState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::TradeSessionPatch;

    fn complete_session() -> TradeSession {
        let mut session = TradeSession::default();
        session.apply(
            TradeSessionPatch::default()
                .name("Cotton T-Shirts")
                .description("Knitted, 100% cotton")
                .value("12,000")
                .weight("350")
                .origin("China")
                .dest("USA")
                .transport("Air Freight")
                .hs_code(Some("6109.10".into())),
        );
        session
    }

    #[test]
    fn default_session_opens_no_gate() {
        let session = TradeSession::default();
        assert_eq!(
            ClassifyRequest::from_session(&session),
            Err(MissingStep::ProductDetails)
        );
        assert_eq!(
            ComplianceRequest::from_session(&session),
            Err(MissingStep::ProductDetails)
        );
        assert_eq!(
            LandedCostRequest::from_session(&session),
            Err(MissingStep::ProductDetails)
        );
    }

    #[test]
    fn placeholder_routing_blocks_downstream_calls() {
        let mut session = complete_session();
        session.apply(TradeSessionPatch::default().dest("Select destination"));
        assert_eq!(
            ComplianceRequest::from_session(&session),
            Err(MissingStep::Routing)
        );
        assert_eq!(
            LandedCostRequest::from_session(&session),
            Err(MissingStep::Routing)
        );
    }

    #[test]
    fn missing_hs_code_blocks_compliance_and_cost() {
        let mut session = complete_session();
        session.apply(TradeSessionPatch::default().hs_code(None));
        assert!(ClassifyRequest::from_session(&session).is_ok());
        assert_eq!(
            ComplianceRequest::from_session(&session),
            Err(MissingStep::Classification)
        );
        assert_eq!(
            LandedCostRequest::from_session(&session),
            Err(MissingStep::Classification)
        );

        session.apply(TradeSessionPatch::default().hs_code(Some("   ".into())));
        assert_eq!(
            LandedCostRequest::from_session(&session),
            Err(MissingStep::Classification)
        );
    }

    #[test]
    fn landed_cost_needs_positive_numbers() {
        let mut session = complete_session();
        session.apply(TradeSessionPatch::default().weight("heavy"));
        assert_eq!(
            LandedCostRequest::from_session(&session),
            Err(MissingStep::ShipmentDetails)
        );
    }

    #[test]
    fn complete_session_builds_requests() {
        let session = complete_session();

        let classify = ClassifyRequest::from_session(&session).unwrap();
        assert_eq!(
            classify.product_description,
            "Cotton T-Shirts Knitted, 100% cotton"
        );

        let cost = LandedCostRequest::from_session(&session).unwrap();
        assert_eq!(cost.mode, "air");
        assert_eq!(cost.product_value, 12_000.0);
        assert_eq!(cost.weight_kg, 350.0);
        assert_eq!(cost.hs_code, "6109.10");
        assert_eq!(cost.product_description, "Knitted, 100% cotton");

        let body = serde_json::to_value(&cost).unwrap();
        assert_eq!(body["destination"], "USA");
        assert_eq!(body["mode"], "air");
    }

    #[test]
    fn vendor_request_rejects_placeholder_country() {
        let session = complete_session();
        assert_eq!(
            VendorRequest::for_country(&session, "Select origin"),
            Err(MissingStep::Routing)
        );
        let request = VendorRequest::for_country(&session, " Vietnam ").unwrap();
        assert_eq!(request.product, "Cotton T-Shirts");
        assert_eq!(request.country, "Vietnam");
    }
}
