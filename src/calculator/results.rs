//! Result records returned by the calculators

use crate::amortization::{generate_schedule, total_interest, AmortizationSchedule};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expense line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    PrincipalAndInterest,
    Insurance,
    PropertyTax,
    PropertyManagement,
    Maintenance,
    OtherExpenses,
}

impl ExpenseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::PrincipalAndInterest => "Principal & Interest",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::PropertyTax => "Property Tax",
            ExpenseCategory::PropertyManagement => "Property Management",
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::OtherExpenses => "Other Expenses",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub category: ExpenseCategory,
    pub amount: f64,
}

/// Ordered list of expense lines (monthly for residential, annual for commercial)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseBreakdown {
    lines: Vec<ExpenseLine>,
}

impl ExpenseBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line, keeping insertion order
    pub fn push(&mut self, category: ExpenseCategory, amount: f64) {
        self.lines.push(ExpenseLine { category, amount });
    }

    /// Sum of all lines in order
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.amount).sum()
    }

    pub fn amount(&self, category: ExpenseCategory) -> Option<f64> {
        self.lines
            .iter()
            .find(|line| line.category == category)
            .map(|line| line.amount)
    }

    pub fn lines(&self) -> &[ExpenseLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Loan terms derived from a deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub amount_down: f64,
    pub loan_amount: f64,
    pub monthly_rate: f64,
    pub num_payments: u32,
    pub monthly_payment: f64,
    /// Payments over the full term
    pub total_paid: f64,
    pub total_interest: f64,
}

impl LoanSummary {
    pub fn new(amount_down: f64, loan_amount: f64, monthly_rate: f64, num_payments: u32, monthly_payment: f64) -> Self {
        Self {
            amount_down,
            loan_amount,
            monthly_rate,
            num_payments,
            monthly_payment,
            total_paid: monthly_payment * num_payments as f64,
            total_interest: total_interest(loan_amount, monthly_payment, num_payments),
        }
    }

    /// Schedule of the first `rows` payments of this loan
    pub fn schedule(&self, rows: u32) -> AmortizationSchedule {
        generate_schedule(self.loan_amount, self.monthly_rate, self.monthly_payment, rows)
    }

    /// Schedule over the full term
    pub fn full_schedule(&self) -> AmortizationSchedule {
        self.schedule(self.num_payments)
    }
}

/// Cash flow at one occupancy level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowScenario {
    pub occupancy_rate: f64,
    pub monthly_income: f64,
    pub monthly_cash_flow: f64,
    /// None when there is no down payment to measure against
    pub annual_roi_pct: Option<f64>,
}

/// Residential classification from the lowest-occupancy scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    /// Profitable even at 75% occupancy
    Good,
    HighRisk,
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvestmentStatus::Good => f.write_str("Good Investment: Profitable even at 75% occupancy"),
            InvestmentStatus::HighRisk => f.write_str("High Risk: Not profitable at 75% occupancy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentialResult {
    pub loan: LoanSummary,
    /// Monthly expenses
    pub expenses: ExpenseBreakdown,
    pub total_monthly: f64,
    pub scenarios: Vec<CashFlowScenario>,
    pub profitable_at_75: bool,
    pub status: InvestmentStatus,
}

impl ResidentialResult {
    pub fn scenario(&self, occupancy_rate: f64) -> Option<&CashFlowScenario> {
        self.scenarios
            .iter()
            .find(|s| (s.occupancy_rate - occupancy_rate).abs() < 1e-9)
    }
}

/// Commercial classification from annual cash flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealRating {
    Good,
    Bad,
}

impl fmt::Display for DealRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealRating::Good => f.write_str("Good Deal: Positive annual cash flow"),
            DealRating::Bad => f.write_str("Bad Deal: Negative annual cash flow"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialResult {
    pub loan: LoanSummary,
    /// Annual operating expenses
    pub expenses: ExpenseBreakdown,
    pub effective_gross_income: f64,
    pub noi: f64,
    pub annual_debt_service: f64,
    pub annual_cash_flow: f64,
    pub closing_costs: f64,
    pub total_cash_invested: f64,
    pub cash_on_cash_pct: f64,
    pub good_deal: bool,
    pub rating: DealRating,
    /// Listing NOI as supplied; not used in any figure above
    pub annual_noi_listing: f64,
}

/// Result of evaluating a [`Deal`](crate::property::Deal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property_type", rename_all = "snake_case")]
pub enum DealResult {
    Residential(ResidentialResult),
    Commercial(CommercialResult),
}

impl DealResult {
    pub fn loan(&self) -> &LoanSummary {
        match self {
            DealResult::Residential(result) => &result.loan,
            DealResult::Commercial(result) => &result.loan,
        }
    }

    pub fn expenses(&self) -> &ExpenseBreakdown {
        match self {
            DealResult::Residential(result) => &result.expenses,
            DealResult::Commercial(result) => &result.expenses,
        }
    }

    /// Whether the deal clears its property type's bar
    pub fn is_favorable(&self) -> bool {
        match self {
            DealResult::Residential(result) => result.profitable_at_75,
            DealResult::Commercial(result) => result.good_deal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_total_and_lookup() {
        let mut breakdown = ExpenseBreakdown::new();
        breakdown.push(ExpenseCategory::Insurance, 100.0);
        breakdown.push(ExpenseCategory::PropertyTax, 250.5);
        breakdown.push(ExpenseCategory::Maintenance, 250.0);

        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown.total(), 600.5);
        assert_eq!(breakdown.amount(ExpenseCategory::PropertyTax), Some(250.5));
        assert_eq!(breakdown.amount(ExpenseCategory::OtherExpenses), None);
        assert_eq!(breakdown.lines()[0].category.label(), "Insurance");
    }

    #[test]
    fn test_breakdown_serializes_as_list() {
        let mut breakdown = ExpenseBreakdown::new();
        breakdown.push(ExpenseCategory::PrincipalAndInterest, 1000.0);

        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json[0]["category"], "principal_and_interest");
        assert_eq!(json[0]["amount"], 1000.0);
    }

    #[test]
    fn test_loan_summary_totals() {
        let summary = LoanSummary::new(20_000.0, 12_000.0, 0.0, 12, 1_000.0);
        assert_eq!(summary.total_paid, 12_000.0);
        assert_eq!(summary.total_interest, 0.0);
        assert_eq!(summary.full_schedule().count(), 12);
        assert_eq!(summary.schedule(3).count(), 3);
    }
}
