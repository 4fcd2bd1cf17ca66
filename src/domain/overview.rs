//! Landing dashboard figures, derived from the saved session.

use super::cost::{rank_scenarios, ScenarioComparison};
use super::requests::{ComplianceRequest, LandedCostRequest, MissingStep};
use super::session::TradeSession;

#[derive(Clone, Debug, PartialEq)]
pub struct Overview {
    pub total_landed_cost: Option<f64>,
    /// Cheapest priced alternative, only when it actually saves money.
    pub best_alternative: Option<ScenarioComparison>,
    /// What still blocks a compliance check, if anything.
    pub compliance_blocker: Option<MissingStep>,
    /// The first unfinished step of the workflow.
    pub next_step: Option<MissingStep>,
    pub missing_inputs: Vec<&'static str>,
    pub unread_alerts: usize,
}

impl Overview {
    pub fn of(session: &TradeSession, unread_alerts: usize) -> Self {
        let landed_cost = session
            .landed_cost
            .as_ref()
            .filter(|cost| cost.total_landed_cost > 0.0);
        let best_alternative = landed_cost.and_then(|cost| {
            rank_scenarios(cost, &session.scenarios)
                .into_iter()
                .next()
                .filter(|best| best.savings > 0.0)
        });
        let next_step = LandedCostRequest::from_session(session)
            .err()
            .or_else(|| landed_cost.is_none().then_some(MissingStep::LandedCost));

        Self {
            total_landed_cost: landed_cost.map(|cost| cost.total_landed_cost),
            best_alternative,
            compliance_blocker: ComplianceRequest::from_session(session).err(),
            next_step,
            missing_inputs: session.missing_inputs(),
            unread_alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LandedCost, Scenario};
    use crate::domain::session::TradeSessionPatch;

    fn priced(total: f64) -> LandedCost {
        LandedCost {
            total_landed_cost: total,
            ..LandedCost::default()
        }
    }

    fn scenario(route: &str, total: f64) -> Scenario {
        Scenario {
            route: route.into(),
            cost: priced(total),
        }
    }

    fn classified_session() -> TradeSession {
        let mut session = TradeSession::default();
        session.apply(
            TradeSessionPatch::default()
                .name("Cotton T-Shirts")
                .value("12000")
                .qty("500")
                .weight("350")
                .origin("China")
                .dest("USA")
                .transport("Sea Freight")
                .hs_code(Some("6109.10".into())),
        );
        session
    }

    #[test]
    fn fresh_session_points_at_trade_input() {
        let overview = Overview::of(&TradeSession::default(), 3);
        assert_eq!(overview.total_landed_cost, None);
        assert_eq!(overview.best_alternative, None);
        assert_eq!(overview.next_step, Some(MissingStep::ProductDetails));
        assert_eq!(overview.compliance_blocker, Some(MissingStep::ProductDetails));
        assert!(overview.missing_inputs.contains(&"Product name"));
        assert_eq!(overview.unread_alerts, 3);
    }

    #[test]
    fn classified_session_waits_for_landed_cost() {
        let overview = Overview::of(&classified_session(), 0);
        assert_eq!(overview.compliance_blocker, None);
        assert_eq!(overview.next_step, Some(MissingStep::LandedCost));
        assert!(overview.missing_inputs.is_empty());
    }

    #[test]
    fn best_alternative_is_the_cheapest_saving_route() {
        let mut session = classified_session();
        session.apply(
            TradeSessionPatch::default()
                .landed_cost(Some(priced(16_000.0)))
                .scenarios(vec![
                    scenario("India → USA", 15_500.0),
                    scenario("Vietnam → USA", 14_800.0),
                    scenario("Mexico → USA", 17_200.0),
                ]),
        );

        let overview = Overview::of(&session, 0);
        assert_eq!(overview.next_step, None);
        assert_eq!(overview.total_landed_cost, Some(16_000.0));
        let best = overview.best_alternative.unwrap();
        assert_eq!(best.scenario.route, "Vietnam → USA");
        assert_eq!(best.savings, 1_200.0);
    }

    #[test]
    fn dearer_alternatives_are_not_offered() {
        let mut session = classified_session();
        session.apply(
            TradeSessionPatch::default()
                .landed_cost(Some(priced(16_000.0)))
                .scenarios(vec![scenario("Mexico → USA", 17_200.0)]),
        );
        assert_eq!(Overview::of(&session, 0).best_alternative, None);
    }
}
