//! Residential and commercial investment calculators

mod engine;
mod results;
pub mod residential;
pub mod commercial;

pub use engine::{InvestmentCalculator, CalculatorConfig, DEFAULT_SCHEDULE_ROWS};
pub use results::{
    CashFlowScenario, CommercialResult, DealRating, DealResult, ExpenseBreakdown, ExpenseCategory,
    ExpenseLine, InvestmentStatus, LoanSummary, ResidentialResult,
};
pub use residential::{MONTHLY_MAINTENANCE, OCCUPANCY_RATES, RESIDENTIAL_MANAGEMENT_FEE_RATE};
pub use commercial::{CLOSING_COST_RATE, COMMERCIAL_LOAN_RATE, COMMERCIAL_MANAGEMENT_FEE_RATE};

use crate::error::CalcResult;
use crate::property::{CommercialInputs, PropertyInputs};
use crate::rates::RateTables;

/// Residential analysis against the built-in rate table
pub fn compute_residential(inputs: &PropertyInputs) -> CalcResult<ResidentialResult> {
    residential::compute(inputs, &RateTables::default())
}

/// Commercial analysis against the built-in rate table
pub fn compute_commercial(inputs: &CommercialInputs) -> CalcResult<CommercialResult> {
    commercial::compute(inputs, &RateTables::default())
}
