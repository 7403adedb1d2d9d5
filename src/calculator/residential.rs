//! Residential rental analysis: monthly costs, occupancy scenarios, ROI

use super::results::{
    CashFlowScenario, ExpenseBreakdown, ExpenseCategory, InvestmentStatus, LoanSummary,
    ResidentialResult,
};
use crate::amortization::monthly_payment;
use crate::error::CalcResult;
use crate::property::PropertyInputs;
use crate::rates::{RateTables, RESIDENTIAL_INSURANCE_RATE};

/// Property management fee as a share of scheduled rent
pub const RESIDENTIAL_MANAGEMENT_FEE_RATE: f64 = 0.10;

/// Flat monthly maintenance allowance
pub const MONTHLY_MAINTENANCE: f64 = 250.0;

/// Occupancy levels evaluated for every residential deal, lowest first
pub const OCCUPANCY_RATES: [f64; 3] = [0.75, 0.90, 1.0];

/// Compute the monthly expense breakdown and occupancy scenarios
pub fn compute(inputs: &PropertyInputs, rates: &RateTables) -> CalcResult<ResidentialResult> {
    inputs.validate()?;
    let tax_rate = rates.residential_tax(inputs.state)?;

    let loan_amount = inputs.loan_amount();
    let monthly_rate = inputs.monthly_rate();
    let num_payments = inputs.loan_years.num_payments();
    let monthly_pi = monthly_payment(loan_amount, monthly_rate, num_payments);

    let loan = LoanSummary::new(
        inputs.amount_down(),
        loan_amount,
        monthly_rate,
        num_payments,
        monthly_pi,
    );

    let monthly_insurance = inputs.purchase_price * RESIDENTIAL_INSURANCE_RATE / 12.0;
    let monthly_tax = inputs.purchase_price * tax_rate / 12.0;
    // Charged on scheduled rent regardless of occupancy
    let pm_fee = inputs.monthly_rent * RESIDENTIAL_MANAGEMENT_FEE_RATE;

    let mut expenses = ExpenseBreakdown::new();
    expenses.push(ExpenseCategory::PrincipalAndInterest, monthly_pi);
    expenses.push(ExpenseCategory::Insurance, monthly_insurance);
    expenses.push(ExpenseCategory::PropertyTax, monthly_tax);
    expenses.push(ExpenseCategory::PropertyManagement, pm_fee);
    expenses.push(ExpenseCategory::Maintenance, MONTHLY_MAINTENANCE);
    let total_monthly = expenses.total();

    log::debug!(
        "Residential {}: loan {:.2}, P&I {:.2}, total monthly {:.2}",
        inputs.state,
        loan_amount,
        monthly_pi,
        total_monthly
    );

    let equity = inputs.amount_down();
    if equity <= 0.0 {
        log::warn!("No down payment; annual ROI is undefined for every scenario");
    }

    let scenarios: Vec<CashFlowScenario> = OCCUPANCY_RATES
        .iter()
        .map(|&occupancy_rate| {
            let monthly_income = inputs.monthly_rent * occupancy_rate;
            let monthly_cash_flow = monthly_income - total_monthly;
            CashFlowScenario {
                occupancy_rate,
                monthly_income,
                monthly_cash_flow,
                annual_roi_pct: annual_roi_pct(monthly_cash_flow, equity),
            }
        })
        .collect();

    let profitable_at_75 = scenarios[0].monthly_cash_flow > 0.0;
    let status = if profitable_at_75 {
        InvestmentStatus::Good
    } else {
        InvestmentStatus::HighRisk
    };

    Ok(ResidentialResult {
        loan,
        expenses,
        total_monthly,
        scenarios,
        profitable_at_75,
        status,
    })
}

/// Annualized cash flow as a percent of the down payment; None without equity
pub fn annual_roi_pct(monthly_cash_flow: f64, equity: f64) -> Option<f64> {
    if equity > 0.0 {
        Some(monthly_cash_flow * 12.0 / equity * 100.0)
    } else {
        None
    }
}
