//! Landed-cost arithmetic shared by every screen that recomputes costs.

use super::entities::{LandedCost, Scenario, TransportMode};

/// Distance at which the freight distance factor equals 1.0.
pub const DISTANCE_NORM_KM: f64 = 5000.0;

/// Flat charge and per-kilogram rate used for freight estimates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FreightRate {
    pub base_charge: f64,
    pub per_kg_rate: f64,
}

impl FreightRate {
    pub fn for_mode(mode: TransportMode) -> Self {
        match mode {
            TransportMode::Air => Self {
                base_charge: 250.0,
                per_kg_rate: 6.0,
            },
            TransportMode::Sea | TransportMode::Other => Self {
                base_charge: 120.0,
                per_kg_rate: 1.2,
            },
        }
    }
}

/// Freight estimate: base charge plus weight × rate × distance factor.
pub fn estimate_freight(mode: TransportMode, weight_kg: f64, distance_km: f64) -> f64 {
    let rate = FreightRate::for_mode(mode);
    let factor = round2(distance_km.max(0.0) / DISTANCE_NORM_KM);
    round2(rate.base_charge + weight_kg.max(0.0) * rate.per_kg_rate * factor)
}

/// Everything needed to derive a landed cost. Rates are fractions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostInputs {
    pub product_value: f64,
    pub shipping_cost: f64,
    pub insurance_rate: f64,
    pub tariff_rate: f64,
    pub vat_rate: f64,
    pub gst_rate: f64,
    pub cess_rate: f64,
    pub handling_fees: f64,
    pub doc_fees: f64,
}

impl CostInputs {
    /// Recovers the rates implied by a backend result so it can be replayed.
    pub fn implied_by(cost: &LandedCost) -> Self {
        let goods_and_freight = cost.product_value + cost.shipping_cost;
        let cif = if cost.cif_value > 0.0 {
            cost.cif_value
        } else {
            goods_and_freight + cost.insurance_cost
        };
        let tax_base = cif + cost.import_duty;

        Self {
            product_value: cost.product_value,
            shipping_cost: cost.shipping_cost,
            insurance_rate: ratio(cost.insurance_cost, goods_and_freight),
            tariff_rate: cost.tariff_rate,
            vat_rate: ratio(cost.import_vat, tax_base),
            gst_rate: ratio(cost.gst_cost, tax_base),
            cess_rate: ratio(cost.cess_cost, cost.import_duty),
            handling_fees: cost.handling_fees,
            doc_fees: cost.doc_fees,
        }
    }
}

/// Applies the CIF-based formula chain. Amounts are rounded to cents.
pub fn compute(inputs: &CostInputs) -> LandedCost {
    let insurance = round2((inputs.product_value + inputs.shipping_cost) * inputs.insurance_rate);
    let cif = round2(inputs.product_value + inputs.shipping_cost + insurance);
    let duty = round2(cif * inputs.tariff_rate);
    let tax_base = cif + duty;
    let vat = round2(tax_base * inputs.vat_rate);
    let gst = round2(tax_base * inputs.gst_rate);
    let cess = round2(duty * inputs.cess_rate);
    let total = round2(cif + duty + vat + gst + cess + inputs.handling_fees + inputs.doc_fees);

    LandedCost {
        product_value: inputs.product_value,
        shipping_cost: inputs.shipping_cost,
        insurance_cost: insurance,
        cif_value: cif,
        tariff_rate: inputs.tariff_rate,
        import_duty: duty,
        import_vat: vat,
        gst_cost: gst,
        cess_cost: cess,
        handling_fees: inputs.handling_fees,
        doc_fees: inputs.doc_fees,
        total_landed_cost: total,
        ..LandedCost::default()
    }
}

/// Replays a backend result with a different tariff rate.
pub fn what_if(cost: &LandedCost, tariff_rate: f64) -> LandedCost {
    let mut inputs = CostInputs::implied_by(cost);
    inputs.tariff_rate = tariff_rate.max(0.0);
    LandedCost {
        distance_km: cost.distance_km,
        weight_kg: cost.weight_kg,
        mode: cost.mode.clone(),
        ..compute(&inputs)
    }
}

/// A scenario compared against the current route.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioComparison {
    pub scenario: Scenario,
    /// Positive when the scenario is cheaper than the baseline.
    pub savings: f64,
    pub savings_pct: f64,
}

/// Scenarios sorted cheapest first, each with its savings against `baseline`.
pub fn rank_scenarios(baseline: &LandedCost, scenarios: &[Scenario]) -> Vec<ScenarioComparison> {
    let mut ranked: Vec<_> = scenarios
        .iter()
        .filter(|scenario| scenario.cost.total_landed_cost > 0.0)
        .map(|scenario| {
            let savings = round2(baseline.total_landed_cost - scenario.cost.total_landed_cost);
            ScenarioComparison {
                scenario: scenario.clone(),
                savings,
                savings_pct: ratio(savings, baseline.total_landed_cost) * 100.0,
            }
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.scenario
            .cost
            .total_landed_cost
            .total_cmp(&b.scenario.cost.total_landed_cost)
    });
    ranked
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole.abs() > f64::EPSILON {
        part / whole
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inputs() -> CostInputs {
        CostInputs {
            product_value: 10_000.0,
            shipping_cost: 500.0,
            insurance_rate: 0.01,
            tariff_rate: 0.165,
            vat_rate: 0.05,
            gst_rate: 0.0,
            cess_rate: 0.1,
            handling_fees: 75.0,
            doc_fees: 25.0,
        }
    }

    #[test]
    fn duty_is_charged_on_cif() {
        let cost = compute(&sample_inputs());
        assert_eq!(cost.insurance_cost, 105.0);
        assert_eq!(cost.cif_value, 10_605.0);
        assert_eq!(cost.import_duty, 1749.83);
        assert_eq!(cost.import_vat, 617.74);
        assert_eq!(cost.cess_cost, 174.98);
        assert_eq!(
            cost.total_landed_cost,
            round2(10_605.0 + 1749.83 + 617.74 + 174.98 + 75.0 + 25.0)
        );
    }

    #[test]
    fn zero_rates_leave_only_cif_and_fees() {
        let cost = compute(&CostInputs {
            product_value: 1000.0,
            shipping_cost: 200.0,
            handling_fees: 10.0,
            ..CostInputs::default()
        });
        assert_eq!(cost.cif_value, 1200.0);
        assert_eq!(cost.import_duty, 0.0);
        assert_eq!(cost.total_landed_cost, 1210.0);
    }

    #[test]
    fn what_if_with_same_rate_reproduces_result() {
        let original = compute(&sample_inputs());
        let replayed = what_if(&original, original.tariff_rate);
        assert!((replayed.total_landed_cost - original.total_landed_cost).abs() < 0.05);
        assert!((replayed.import_vat - original.import_vat).abs() < 0.05);
    }

    #[test]
    fn what_if_with_higher_rate_raises_duty_and_total() {
        let original = compute(&sample_inputs());
        let shocked = what_if(&original, original.tariff_rate + 0.25);
        assert_eq!(shocked.cif_value, original.cif_value);
        assert!(shocked.import_duty > original.import_duty);
        assert!(shocked.total_landed_cost > original.total_landed_cost);
    }

    #[test]
    fn what_if_keeps_route_metadata() {
        let original = LandedCost {
            distance_km: 11_000.0,
            mode: "sea".into(),
            ..compute(&sample_inputs())
        };
        let replayed = what_if(&original, 0.0);
        assert_eq!(replayed.distance_km, 11_000.0);
        assert_eq!(replayed.mode, "sea");
        assert_eq!(replayed.import_duty, 0.0);
    }

    #[test]
    fn freight_estimate_follows_rate_card() {
        // 5000 km → factor 1.0
        assert_eq!(estimate_freight(TransportMode::Sea, 100.0, 5000.0), 240.0);
        // 11000 km → factor 2.2
        assert_eq!(estimate_freight(TransportMode::Air, 10.0, 11_000.0), 382.0);
    }

    #[test]
    fn scenarios_rank_cheapest_first_with_savings() {
        let baseline = LandedCost {
            total_landed_cost: 1000.0,
            ..LandedCost::default()
        };
        let scenario = |route: &str, total: f64| Scenario {
            route: route.into(),
            cost: LandedCost {
                total_landed_cost: total,
                ..LandedCost::default()
            },
        };
        let ranked = rank_scenarios(
            &baseline,
            &[
                scenario("china → usa", 1100.0),
                scenario("vietnam → usa", 800.0),
                scenario("broken → usa", 0.0),
            ],
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].scenario.origin(), "vietnam");
        assert_eq!(ranked[0].savings, 200.0);
        assert_eq!(ranked[0].savings_pct, 20.0);
        assert_eq!(ranked[1].savings, -100.0);
    }
}
