//! Calculator entry point: rate tables plus run configuration

use super::results::{CommercialResult, DealResult, ResidentialResult};
use super::{commercial, residential};
use crate::amortization::AmortizationSchedule;
use crate::error::CalcResult;
use crate::property::{CommercialInputs, Deal, PropertyInputs};
use crate::rates::RateTables;
use serde::Deserialize;
use std::env;

/// Default schedule length: the first loan year
pub const DEFAULT_SCHEDULE_ROWS: u32 = 12;

fn default_schedule_rows() -> u32 {
    DEFAULT_SCHEDULE_ROWS
}

/// Configuration for a calculator
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalculatorConfig {
    /// Number of amortization rows to produce per deal
    #[serde(default = "default_schedule_rows")]
    pub schedule_rows: u32,
}

impl CalculatorConfig {
    /// Read overrides from the environment (`SCHEDULE_ROWS`)
    pub fn from_env() -> Self {
        let schedule_rows = env::var("SCHEDULE_ROWS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SCHEDULE_ROWS);

        Self { schedule_rows }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            schedule_rows: DEFAULT_SCHEDULE_ROWS,
        }
    }
}

/// Stateless deal calculator
///
/// Holds only read-only lookup data; every call recomputes from its inputs.
#[derive(Debug, Clone, Default)]
pub struct InvestmentCalculator {
    rates: RateTables,
    config: CalculatorConfig,
}

impl InvestmentCalculator {
    pub fn new(rates: RateTables, config: CalculatorConfig) -> Self {
        Self { rates, config }
    }

    pub fn compute_residential(&self, inputs: &PropertyInputs) -> CalcResult<ResidentialResult> {
        residential::compute(inputs, &self.rates)
    }

    pub fn compute_commercial(&self, inputs: &CommercialInputs) -> CalcResult<CommercialResult> {
        commercial::compute(inputs, &self.rates)
    }

    /// Dispatch a deal to the calculator for its property type
    pub fn evaluate(&self, deal: &Deal) -> CalcResult<DealResult> {
        match deal {
            Deal::Residential(inputs) => self.compute_residential(inputs).map(DealResult::Residential),
            Deal::Commercial(inputs) => self.compute_commercial(inputs).map(DealResult::Commercial),
        }
    }

    /// Configured-length schedule for an evaluated deal
    pub fn schedule(&self, result: &DealResult) -> AmortizationSchedule {
        result.loan().schedule(self.config.schedule_rows)
    }

    pub fn rates(&self) -> &RateTables {
        &self.rates
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}
