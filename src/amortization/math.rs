//! Level-payment loan math

/// Rates below this are treated as interest-free
const ZERO_RATE_EPSILON: f64 = 1e-12;

/// Fixed monthly payment that fully amortizes `principal` over `num_payments` periods
///
/// Standard annuity formula `P * r(1+r)^n / ((1+r)^n - 1)`. At a zero rate the
/// formula divides by zero, so the payment falls back to straight-line `P / n`.
///
/// # Arguments
/// * `principal` - Amount borrowed
/// * `monthly_rate` - Periodic rate as a decimal (annual rate / 12)
/// * `num_payments` - Number of periods; zero periods yields a zero payment
pub fn monthly_payment(principal: f64, monthly_rate: f64, num_payments: u32) -> f64 {
    if num_payments == 0 {
        return 0.0;
    }

    let n = num_payments as f64;
    if monthly_rate.abs() < ZERO_RATE_EPSILON {
        return principal / n;
    }

    let growth = (1.0 + monthly_rate).powi(num_payments as i32);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Split of one payment into interest and principal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentSplit {
    pub interest: f64,
    pub principal: f64,
    /// Balance after the payment; may dip fractionally below zero on the last period
    pub new_balance: f64,
}

/// Apply one fixed payment to a balance
pub fn split_payment(balance: f64, monthly_rate: f64, fixed_payment: f64) -> PaymentSplit {
    let interest = balance * monthly_rate;
    let principal = fixed_payment - interest;
    PaymentSplit {
        interest,
        principal,
        new_balance: balance - principal,
    }
}

/// Total interest paid over the full term of a level-payment loan
pub fn total_interest(principal: f64, fixed_payment: f64, num_payments: u32) -> f64 {
    fixed_payment * num_payments as f64 - principal
}
