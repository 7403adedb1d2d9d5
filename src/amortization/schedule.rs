//! Period-by-period amortization schedule

use super::math::split_payment;
use crate::error::CalcResult;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::iter::FusedIterator;

/// Balances at or below this are treated as paid off
const PAYOFF_TOLERANCE: f64 = 1e-6;

/// Payoff threshold as a share of the loan amount; floating residue grows with the principal
const RELATIVE_PAYOFF_TOLERANCE: f64 = 1e-10;

/// One payment period of a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based payment number
    pub payment_index: u32,
    pub principal: f64,
    pub interest: f64,
    pub remaining_balance: f64,
}

/// Lazy, finite schedule of [`AmortizationRow`]s
///
/// Yields at most `rows` rows and stops early once the balance is paid off.
/// The final payoff row is capped at the outstanding balance, so the balance
/// never goes negative. Clone the schedule or call [`restart`](Self::restart)
/// to replay it from the first payment.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    loan_amount: f64,
    monthly_rate: f64,
    fixed_payment: f64,
    rows: u32,
    next_index: u32,
    balance: f64,
    payoff_tolerance: f64,
}

impl AmortizationSchedule {
    pub fn new(loan_amount: f64, monthly_rate: f64, fixed_payment: f64, rows: u32) -> Self {
        if loan_amount > 0.0 && fixed_payment <= loan_amount * monthly_rate {
            log::warn!(
                "Payment {:.2} does not cover first-period interest {:.2}; balance will not decline",
                fixed_payment,
                loan_amount * monthly_rate
            );
        }

        Self {
            loan_amount,
            monthly_rate,
            fixed_payment,
            rows,
            next_index: 1,
            balance: loan_amount,
            payoff_tolerance: PAYOFF_TOLERANCE.max(loan_amount.abs() * RELATIVE_PAYOFF_TOLERANCE),
        }
    }

    /// Rewind to the first payment
    pub fn restart(&mut self) {
        self.next_index = 1;
        self.balance = self.loan_amount;
    }

    pub fn fixed_payment(&self) -> f64 {
        self.fixed_payment
    }

    pub fn requested_rows(&self) -> u32 {
        self.rows
    }

    fn remaining_rows(&self) -> usize {
        (self.rows as usize + 1).saturating_sub(self.next_index as usize)
    }
}

impl Iterator for AmortizationSchedule {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index > self.rows {
            return None;
        }
        if self.balance <= self.payoff_tolerance {
            if self.next_index > 1 && self.next_index <= self.rows {
                log::debug!(
                    "Loan paid off after {} payments; {} requested",
                    self.next_index - 1,
                    self.rows
                );
            }
            // Fuse
            self.next_index = self.rows.saturating_add(1);
            return None;
        }

        let split = split_payment(self.balance, self.monthly_rate, self.fixed_payment);
        let (principal, remaining_balance) = if split.new_balance <= self.payoff_tolerance {
            (self.balance, 0.0)
        } else {
            (split.principal, split.new_balance)
        };

        let row = AmortizationRow {
            payment_index: self.next_index,
            principal,
            interest: split.interest,
            remaining_balance,
        };

        self.balance = remaining_balance;
        self.next_index += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.balance <= self.payoff_tolerance {
            (0, Some(0))
        } else {
            (0, Some(self.remaining_rows()))
        }
    }
}

impl FusedIterator for AmortizationSchedule {}

/// Build a schedule of up to `rows` payments
pub fn generate_schedule(
    loan_amount: f64,
    monthly_rate: f64,
    fixed_payment: f64,
    rows: u32,
) -> AmortizationSchedule {
    AmortizationSchedule::new(loan_amount, monthly_rate, fixed_payment, rows)
}

/// Write rows as CSV with `Payment,Principal,Interest,Balance` headers
pub fn write_schedule_csv<W: Write>(
    writer: W,
    rows: impl IntoIterator<Item = AmortizationRow>,
) -> CalcResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Payment", "Principal", "Interest", "Balance"])?;

    for row in rows {
        csv_writer.write_record([
            row.payment_index.to_string(),
            format!("{:.2}", row.principal),
            format!("{:.2}", row.interest),
            format!("{:.2}", row.remaining_balance),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
