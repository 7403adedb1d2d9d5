//! Sensitivity sweeps for a single residential property
//!
//! Re-evaluates one deal across a range of interest rates or down payments.
//! Variants are independent, so they run in parallel; results keep input order.

use crate::calculator::{InvestmentCalculator, ResidentialResult};
use crate::error::CalcResult;
use crate::property::PropertyInputs;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Headline figures for one variant of the property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Swept input value (percent)
    pub value: f64,
    pub monthly_payment: f64,
    pub total_monthly: f64,
    pub cash_flow_at_full_occupancy: f64,
    pub annual_roi_at_full_occupancy: Option<f64>,
    pub profitable_at_75: bool,
}

impl SensitivityPoint {
    fn from_result(value: f64, result: &ResidentialResult) -> Self {
        let full = result.scenarios.last();
        Self {
            value,
            monthly_payment: result.loan.monthly_payment,
            total_monthly: result.total_monthly,
            cash_flow_at_full_occupancy: full.map(|s| s.monthly_cash_flow).unwrap_or(0.0),
            annual_roi_at_full_occupancy: full.and_then(|s| s.annual_roi_pct),
            profitable_at_75: result.profitable_at_75,
        }
    }
}

/// Runs what-if variants of a residential deal
///
/// # Example
/// ```ignore
/// let runner = SensitivityRunner::new();
/// let points = runner.sweep_interest_rate(&inputs, &[2.0, 4.0, 6.0])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SensitivityRunner {
    calculator: InvestmentCalculator,
}

impl SensitivityRunner {
    /// Runner using the built-in rate table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calculator(calculator: InvestmentCalculator) -> Self {
        Self { calculator }
    }

    /// Vary the annual interest rate (percent)
    pub fn sweep_interest_rate(
        &self,
        inputs: &PropertyInputs,
        rates_pct: &[f64],
    ) -> CalcResult<Vec<SensitivityPoint>> {
        self.sweep(inputs, rates_pct, |variant, rate| variant.interest_rate_pct = rate)
    }

    /// Vary the down payment (percent of price)
    pub fn sweep_down_payment(
        &self,
        inputs: &PropertyInputs,
        down_payments_pct: &[f64],
    ) -> CalcResult<Vec<SensitivityPoint>> {
        self.sweep(inputs, down_payments_pct, |variant, pct| variant.down_payment_pct = pct)
    }

    fn sweep<F>(&self, inputs: &PropertyInputs, values: &[f64], apply: F) -> CalcResult<Vec<SensitivityPoint>>
    where
        F: Fn(&mut PropertyInputs, f64) + Sync,
    {
        log::debug!("Running {} sensitivity variants", values.len());

        values
            .par_iter()
            .map(|&value| -> CalcResult<SensitivityPoint> {
                let mut variant = inputs.clone();
                apply(&mut variant, value);
                let result = self.calculator.compute_residential(&variant)?;
                Ok(SensitivityPoint::from_result(value, &result))
            })
            .collect()
    }

    pub fn calculator(&self) -> &InvestmentCalculator {
        &self.calculator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_rate_sweep() {
        let runner = SensitivityRunner::new();
        let inputs = PropertyInputs::default();

        let points = runner.sweep_interest_rate(&inputs, &[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(
            points.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![2.0, 4.0, 6.0, 8.0]
        );

        // Higher rate means higher payment and lower cash flow
        for pair in points.windows(2) {
            assert!(pair[1].monthly_payment > pair[0].monthly_payment);
            assert!(pair[1].cash_flow_at_full_occupancy < pair[0].cash_flow_at_full_occupancy);
        }
    }

    #[test]
    fn test_sweep_matches_direct_calculation() {
        let runner = SensitivityRunner::new();
        let inputs = PropertyInputs::default();

        let points = runner.sweep_interest_rate(&inputs, &[2.0]).unwrap();
        let direct = runner.calculator().compute_residential(&inputs).unwrap();

        assert_eq!(points[0].monthly_payment, direct.loan.monthly_payment);
        assert_eq!(points[0].total_monthly, direct.total_monthly);
        assert_eq!(points[0].annual_roi_at_full_occupancy, direct.scenarios[2].annual_roi_pct);
    }

    #[test]
    fn test_down_payment_sweep_with_zero_down() {
        let runner = SensitivityRunner::new();
        let points = runner
            .sweep_down_payment(&PropertyInputs::default(), &[0.0, 20.0, 50.0])
            .unwrap();

        assert!(points[0].annual_roi_at_full_occupancy.is_none());
        assert!(points[1].annual_roi_at_full_occupancy.is_some());
        assert!(points[2].monthly_payment < points[1].monthly_payment);
    }

    #[test]
    fn test_invalid_variant_fails_sweep() {
        let runner = SensitivityRunner::new();
        let result = runner.sweep_interest_rate(&PropertyInputs::default(), &[3.0, 12.0]);
        assert!(result.is_err());
    }
}
