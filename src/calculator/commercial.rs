//! Commercial property analysis: NOI, debt service, cash-on-cash return

use super::results::{CommercialResult, DealRating, ExpenseBreakdown, ExpenseCategory, LoanSummary};
use crate::amortization::monthly_payment;
use crate::error::CalcResult;
use crate::property::CommercialInputs;
use crate::rates::RateTables;

/// Annual loan rate applied to every commercial deal
pub const COMMERCIAL_LOAN_RATE: f64 = 0.065;

/// Property management fee as a share of gross rents (before vacancy)
pub const COMMERCIAL_MANAGEMENT_FEE_RATE: f64 = 0.04;

/// Closing costs as a share of purchase price
pub const CLOSING_COST_RATE: f64 = 0.03;

/// Compute the annual operating statement and returns
pub fn compute(inputs: &CommercialInputs, rates: &RateTables) -> CalcResult<CommercialResult> {
    inputs.validate()?;
    let state_rates = rates.get(inputs.state)?;

    let amount_down = inputs.amount_down();
    let annual_insurance = inputs.purchase_price * state_rates.commercial_insurance_rate;
    let annual_property_tax = inputs.purchase_price * state_rates.commercial_tax_rate;
    let annual_pm_fee = inputs.annual_gross_rents * COMMERCIAL_MANAGEMENT_FEE_RATE;

    let mut expenses = ExpenseBreakdown::new();
    expenses.push(ExpenseCategory::Insurance, annual_insurance);
    expenses.push(ExpenseCategory::PropertyTax, annual_property_tax);
    expenses.push(ExpenseCategory::PropertyManagement, annual_pm_fee);
    expenses.push(ExpenseCategory::OtherExpenses, inputs.other_annual_expenses);

    let effective_gross_income = inputs.annual_gross_rents * (1.0 - inputs.vacancy_rate_pct / 100.0);
    let noi = effective_gross_income - expenses.total();

    let loan_amount = inputs.purchase_price - amount_down;
    let monthly_rate = COMMERCIAL_LOAN_RATE / 12.0;
    let num_payments = inputs.num_payments();
    let payment = monthly_payment(loan_amount, monthly_rate, num_payments);
    let loan = LoanSummary::new(amount_down, loan_amount, monthly_rate, num_payments, payment);

    let annual_debt_service = payment * 12.0;
    let annual_cash_flow = noi - annual_debt_service;

    let closing_costs = inputs.purchase_price * CLOSING_COST_RATE;
    let total_cash_invested = amount_down + closing_costs;
    let cash_on_cash_pct = cash_on_cash_return_pct(annual_cash_flow, total_cash_invested);

    log::debug!(
        "Commercial {}: NOI {:.2}, debt service {:.2}, cash flow {:.2}",
        inputs.state,
        noi,
        annual_debt_service,
        annual_cash_flow
    );

    let good_deal = annual_cash_flow > 0.0;
    let rating = if good_deal { DealRating::Good } else { DealRating::Bad };

    Ok(CommercialResult {
        loan,
        expenses,
        effective_gross_income,
        noi,
        annual_debt_service,
        annual_cash_flow,
        closing_costs,
        total_cash_invested,
        cash_on_cash_pct,
        good_deal,
        rating,
        annual_noi_listing: inputs.annual_noi_listing,
    })
}

/// Annual cash flow over cash invested, in percent; 0 when nothing was invested
pub fn cash_on_cash_return_pct(annual_cash_flow: f64, total_cash_invested: f64) -> f64 {
    if total_cash_invested == 0.0 {
        log::warn!("No cash invested; cash-on-cash return reported as 0");
        return 0.0;
    }
    annual_cash_flow / total_cash_invested * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::State;
    use crate::rates::{StateRates, RateTables};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_scenario() {
        // 1.97M in TX, 30% down, 152,195 gross, 3% vacancy, 5k other, 25 years
        let result = compute(&CommercialInputs::default(), &RateTables::default()).unwrap();

        assert_abs_diff_eq!(result.loan.amount_down, 591_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.expenses.amount(ExpenseCategory::Insurance).unwrap(), 9_850.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.expenses.amount(ExpenseCategory::PropertyTax).unwrap(), 33_490.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.expenses.amount(ExpenseCategory::PropertyManagement).unwrap(), 6_087.8, epsilon = 1e-6);
        assert_eq!(result.expenses.amount(ExpenseCategory::OtherExpenses), Some(5_000.0));

        assert_abs_diff_eq!(result.noi, 93_201.35, epsilon = 0.01);
        assert_abs_diff_eq!(result.loan.monthly_payment, 9_311.11, epsilon = 0.01);
        assert_abs_diff_eq!(result.annual_debt_service, 111_733.28, epsilon = 0.01);
        assert_abs_diff_eq!(result.annual_cash_flow, -18_531.93, epsilon = 0.01);

        assert_abs_diff_eq!(result.closing_costs, 59_100.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.total_cash_invested, 650_100.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.cash_on_cash_pct, -2.85, epsilon = 0.01);

        assert!(!result.good_deal);
        assert_eq!(result.rating, DealRating::Bad);
    }

    #[test]
    fn test_noi_formula() {
        let inputs = CommercialInputs::default();
        let result = compute(&inputs, &RateTables::default()).unwrap();

        let expected = 152_195.0 * (1.0 - 3.0 / 100.0) - (9_850.0 + 33_490.0 + 6_087.8 + 5_000.0);
        assert_abs_diff_eq!(result.noi, expected, epsilon = 1e-6);
        assert_eq!(result.annual_cash_flow, result.noi - result.annual_debt_service);
    }

    #[test]
    fn test_management_fee_ignores_vacancy() {
        let low = compute(&CommercialInputs::default(), &RateTables::default()).unwrap();
        let high = compute(
            &CommercialInputs { vacancy_rate_pct: 40.0, ..CommercialInputs::default() },
            &RateTables::default(),
        )
        .unwrap();

        assert_eq!(
            low.expenses.amount(ExpenseCategory::PropertyManagement),
            high.expenses.amount(ExpenseCategory::PropertyManagement)
        );
        assert!(high.noi < low.noi);
    }

    #[test]
    fn test_good_deal() {
        let inputs = CommercialInputs {
            purchase_price: 1_000_000.0,
            down_payment_pct: 50.0,
            annual_gross_rents: 180_000.0,
            annual_noi_listing: 120_000.0,
            vacancy_rate_pct: 5.0,
            other_annual_expenses: 10_000.0,
            loan_years: 30,
            state: State::Nv,
        };
        let result = compute(&inputs, &RateTables::default()).unwrap();

        assert!(result.annual_cash_flow > 0.0);
        assert!(result.good_deal);
        assert_eq!(result.rating, DealRating::Good);
        assert!(result.cash_on_cash_pct > 0.0);
    }

    #[test]
    fn test_listing_noi_does_not_affect_results() {
        let base = CommercialInputs::default();
        let with_listing = CommercialInputs { annual_noi_listing: 250_000.0, ..base.clone() };

        let a = compute(&base, &RateTables::default()).unwrap();
        let b = compute(&with_listing, &RateTables::default()).unwrap();

        assert_eq!(a.noi, b.noi);
        assert_eq!(a.annual_cash_flow, b.annual_cash_flow);
        assert_eq!(a.cash_on_cash_pct, b.cash_on_cash_pct);
        assert_eq!(b.annual_noi_listing, 250_000.0);
    }

    #[test]
    fn test_zero_price_guard() {
        let inputs = CommercialInputs {
            purchase_price: 0.0,
            down_payment_pct: 0.0,
            ..CommercialInputs::default()
        };
        let result = compute(&inputs, &RateTables::default()).unwrap();

        assert_eq!(result.total_cash_invested, 0.0);
        assert_eq!(result.cash_on_cash_pct, 0.0);
        assert!(result.cash_on_cash_pct.is_finite());
        assert_eq!(result.annual_debt_service, 0.0);
    }

    #[test]
    fn test_zero_down_still_has_closing_costs() {
        let inputs = CommercialInputs { down_payment_pct: 0.0, ..CommercialInputs::default() };
        let result = compute(&inputs, &RateTables::default()).unwrap();

        assert_abs_diff_eq!(result.total_cash_invested, 59_100.0, epsilon = 1e-6);
        assert!(result.cash_on_cash_pct.is_finite());
    }

    #[test]
    fn test_cash_on_cash_guard() {
        assert_eq!(cash_on_cash_return_pct(10_000.0, 0.0), 0.0);
        assert_eq!(cash_on_cash_return_pct(10_000.0, 100_000.0), 10.0);
    }

    #[test]
    fn test_loaded_rates_are_used() {
        let tables = RateTables::from_rows(State::ALL.map(|state| {
            (
                state,
                StateRates {
                    residential_tax_rate: 0.01,
                    commercial_tax_rate: 0.02,
                    commercial_insurance_rate: 0.008,
                },
            )
        }));
        let result = compute(&CommercialInputs::default(), &tables).unwrap();

        assert_abs_diff_eq!(result.expenses.amount(ExpenseCategory::Insurance).unwrap(), 15_760.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.expenses.amount(ExpenseCategory::PropertyTax).unwrap(), 39_400.0, epsilon = 1e-6);
    }
}
