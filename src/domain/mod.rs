//! Trade session state, request gates and cost arithmetic live here.

pub mod alerts;
pub mod catalog;
pub mod cost;
pub mod entities;
pub mod impact;
pub mod news;
pub mod overview;
pub mod requests;
pub mod session;
pub mod store;

#[allow(unused_imports)]
pub use alerts::{Alert, AlertFeed, AlertFilter, Severity};
#[allow(unused_imports)]
pub use cost::{rank_scenarios, what_if, ScenarioComparison};
#[allow(unused_imports)]
pub use entities::{
    Classification, ComplianceReport, ComplianceRequirement, ExtractedDocument, HsCandidate,
    LandedCost, NewsItem, RiskLevel, Scenario, TransportMode, Vendor,
};
#[allow(unused_imports)]
pub use overview::Overview;
#[allow(unused_imports)]
pub use requests::{
    ClassifyRequest, ComplianceRequest, LandedCostRequest, MissingStep, RequestState,
    VendorRequest,
};
#[allow(unused_imports)]
pub use session::{TradeSession, TradeSessionPatch};
#[allow(unused_imports)]
pub use store::SessionStore;
