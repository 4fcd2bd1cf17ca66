//! Tariff policy shock simulation on top of the landed-cost utility.

use super::cost::{compute, round2, what_if, CostInputs};
use super::entities::LandedCost;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolicyScenario {
    pub label: &'static str,
    pub short_name: &'static str,
    /// Added to the current tariff rate, in percentage points.
    pub duty_delta_pct: f64,
}

pub const POLICY_SCENARIOS: [PolicyScenario; 4] = [
    PolicyScenario {
        label: "US-China Trade War +25% Tariff",
        short_name: "US-China +25%",
        duty_delta_pct: 25.0,
    },
    PolicyScenario {
        label: "EU Carbon Border Adjustment Tax",
        short_name: "EU CBAM +8%",
        duty_delta_pct: 8.0,
    },
    PolicyScenario {
        label: "GSP Eligibility Removed",
        short_name: "GSP Removed",
        duty_delta_pct: 5.0,
    },
    PolicyScenario {
        label: "USD/CNY Rate Shock +10%",
        short_name: "FX Shock +10%",
        duty_delta_pct: 10.0,
    },
];

pub const MONTHS: [&str; 12] = [
    "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec", "Jan", "Feb",
];

/// Peak seasonal deviation of a month's added cost from the monthly average.
const SEASONAL_SWING: f64 = 0.16;

/// Baseline used when the session has no landed cost yet.
pub fn sample_baseline() -> LandedCost {
    compute(&CostInputs {
        product_value: 10_000.0,
        shipping_cost: 480.0,
        insurance_rate: 0.01,
        tariff_rate: 0.035,
        ..CostInputs::default()
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImpactProjection {
    pub baseline_per_shipment: f64,
    pub shocked_per_shipment: f64,
    pub per_shipment_increase: f64,
    pub monthly_increase: f64,
    pub annual_increase: f64,
    pub effective_rate_before: f64,
    pub effective_rate_after: f64,
    pub months: Vec<MonthPoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthPoint {
    pub month: &'static str,
    pub base: f64,
    pub impact: f64,
}

/// Cost of `scenario` at `shipments_per_month`, month by month.
pub fn project(
    baseline: &LandedCost,
    scenario: &PolicyScenario,
    shipments_per_month: u32,
) -> ImpactProjection {
    let shocked = what_if(baseline, baseline.tariff_rate + scenario.duty_delta_pct / 100.0);
    let per_shipment_increase = round2(shocked.total_landed_cost - baseline.total_landed_cost);
    let volume = f64::from(shipments_per_month);
    let monthly_increase = round2(per_shipment_increase * volume);
    let monthly_base = round2(baseline.total_landed_cost * volume);

    // Centred on zero so the twelve months still add up to the annual figure.
    let waves: Vec<f64> = (0..MONTHS.len()).map(|i| (i as f64 * 0.8).sin()).collect();
    let mean_wave = waves.iter().sum::<f64>() / waves.len() as f64;

    ImpactProjection {
        baseline_per_shipment: baseline.total_landed_cost,
        shocked_per_shipment: shocked.total_landed_cost,
        per_shipment_increase,
        monthly_increase,
        annual_increase: round2(monthly_increase * 12.0),
        effective_rate_before: baseline.tariff_rate,
        effective_rate_after: shocked.tariff_rate,
        months: MONTHS
            .iter()
            .zip(&waves)
            .map(|(&month, wave)| MonthPoint {
                month,
                base: monthly_base,
                impact: round2(monthly_increase * (1.0 + SEASONAL_SWING * (wave - mean_wave))),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_volume_has_no_monthly_impact() {
        let projection = project(&sample_baseline(), &POLICY_SCENARIOS[0], 0);
        assert!(projection.per_shipment_increase > 0.0);
        assert_eq!(projection.monthly_increase, 0.0);
        assert_eq!(projection.annual_increase, 0.0);
        assert!(projection.months.iter().all(|point| point.impact == 0.0));
    }

    #[test]
    fn months_vary_around_the_monthly_average() {
        let projection = project(&sample_baseline(), &POLICY_SCENARIOS[0], 50);
        let impacts: Vec<f64> = projection.months.iter().map(|point| point.impact).collect();

        let low = impacts.iter().copied().fold(f64::INFINITY, f64::min);
        let high = impacts.iter().copied().fold(0.0_f64, f64::max);
        assert!(high > low);
        assert!(low > 0.0);
        assert!(high - low < projection.monthly_increase * 4.0 * SEASONAL_SWING);

        let total: f64 = impacts.iter().sum();
        assert!((total - projection.annual_increase).abs() < 0.01 * 12.0);
        assert!(projection
            .months
            .iter()
            .all(|point| point.base == projection.months[0].base));
    }

    #[test]
    fn impact_scales_with_volume_and_delta() {
        let baseline = sample_baseline();
        let heavy = project(&baseline, &POLICY_SCENARIOS[0], 10);
        let light = project(&baseline, &POLICY_SCENARIOS[2], 10);

        assert!(heavy.per_shipment_increase > light.per_shipment_increase);
        assert_eq!(
            heavy.annual_increase,
            round2(heavy.monthly_increase * 12.0)
        );
        assert_eq!(heavy.months.len(), 12);
        assert!((heavy.effective_rate_after - 0.285).abs() < 1e-9);
    }

    #[test]
    fn increase_is_delta_on_cif() {
        let baseline = sample_baseline();
        let projection = project(&baseline, &POLICY_SCENARIOS[2], 1);
        // no VAT/GST/cess in the sample, so the increase is 5% of CIF
        assert_eq!(
            projection.per_shipment_increase,
            round2(baseline.cif_value * 0.05)
        );
    }
}
