//! Property Investment - calculation engine for rental property deals
//!
//! This library provides:
//! - Residential analysis: monthly cost breakdown, cash flow and ROI at 75/90/100% occupancy
//! - Commercial analysis: operating expenses, NOI, debt service, cash-on-cash return
//! - Amortization primitives and lazy period-by-period loan schedules
//! - Per-state property tax and insurance rate tables (built-in or loaded from CSV)
//! - Parallel interest-rate and down-payment sensitivity sweeps

pub mod error;
pub mod property;
pub mod rates;
pub mod amortization;
pub mod calculator;
pub mod scenario;

// Re-export commonly used types
pub use error::{CalcError, CalcResult};
pub use property::{State, LoanTerm, PropertyInputs, CommercialInputs, Deal};
pub use rates::RateTables;
pub use amortization::{generate_schedule, AmortizationRow, AmortizationSchedule};
pub use calculator::{
    compute_residential, compute_commercial, InvestmentCalculator, CalculatorConfig,
    ResidentialResult, CommercialResult, DealResult,
};
pub use scenario::SensitivityRunner;
