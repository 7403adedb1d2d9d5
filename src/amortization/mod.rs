//! Amortizing loan primitives and schedule generation

mod math;
mod schedule;

pub use math::{monthly_payment, split_payment, total_interest, PaymentSplit};
pub use schedule::{generate_schedule, write_schedule_csv, AmortizationRow, AmortizationSchedule};
