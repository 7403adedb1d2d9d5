//! Property input records for residential and commercial deals

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported state for tax and insurance lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum State {
    /// Arizona
    Az,
    /// California
    Ca,
    /// Indiana
    In,
    /// Nevada
    Nv,
    /// Texas
    Tx,
    /// Michigan
    Mi,
}

impl State {
    /// All supported states, in selection order
    pub const ALL: [State; 6] = [State::Az, State::Ca, State::In, State::Nv, State::Tx, State::Mi];

    /// Two-letter postal code
    pub fn code(&self) -> &'static str {
        match self {
            State::Az => "AZ",
            State::Ca => "CA",
            State::In => "IN",
            State::Nv => "NV",
            State::Tx => "TX",
            State::Mi => "MI",
        }
    }
}

impl FromStr for State {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        State::ALL
            .iter()
            .copied()
            .find(|state| state.code() == code)
            .ok_or(CalcError::UnknownState { code })
    }
}

impl TryFrom<String> for State {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        state.code().to_string()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Residential loan term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LoanTerm {
    Fifteen,
    Thirty,
}

impl LoanTerm {
    pub fn years(&self) -> u32 {
        match self {
            LoanTerm::Fifteen => 15,
            LoanTerm::Thirty => 30,
        }
    }

    /// Number of monthly payments over the term
    pub fn num_payments(&self) -> u32 {
        self.years() * 12
    }
}

impl TryFrom<u32> for LoanTerm {
    type Error = CalcError;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        match years {
            15 => Ok(LoanTerm::Fifteen),
            30 => Ok(LoanTerm::Thirty),
            other => Err(CalcError::invalid("loan_years", other, "residential term must be 15 or 30")),
        }
    }
}

impl From<LoanTerm> for u32 {
    fn from(term: LoanTerm) -> Self {
        term.years()
    }
}

/// Residential rental property inputs
///
/// Percentages are whole-number percents (20.0 = 20%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInputs {
    pub purchase_price: f64,
    pub down_payment_pct: f64,
    pub interest_rate_pct: f64,
    pub loan_years: LoanTerm,
    pub monthly_rent: f64,
    pub state: State,
}

impl PropertyInputs {
    /// Check every field against its accepted range
    pub fn validate(&self) -> CalcResult<()> {
        positive("purchase_price", self.purchase_price)?;
        in_range("down_payment_pct", self.down_payment_pct, 0.0, 100.0)?;
        in_range("interest_rate_pct", self.interest_rate_pct, 0.0, 10.0)?;
        non_negative("monthly_rent", self.monthly_rent)?;
        Ok(())
    }

    /// Cash paid at purchase
    pub fn amount_down(&self) -> f64 {
        self.purchase_price * self.down_payment_pct / 100.0
    }

    pub fn loan_amount(&self) -> f64 {
        self.purchase_price * (1.0 - self.down_payment_pct / 100.0)
    }

    /// Monthly fractional interest rate
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate_pct / 100.0 / 12.0
    }
}

impl Default for PropertyInputs {
    fn default() -> Self {
        Self {
            purchase_price: 650_000.0,
            down_payment_pct: 20.0,
            interest_rate_pct: 2.0,
            loan_years: LoanTerm::Fifteen,
            monthly_rent: 5_000.0,
            state: State::Tx,
        }
    }
}

/// Commercial property inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialInputs {
    pub purchase_price: f64,
    pub down_payment_pct: f64,
    pub annual_gross_rents: f64,
    /// NOI quoted on the listing; carried for display only
    #[serde(default)]
    pub annual_noi_listing: f64,
    pub vacancy_rate_pct: f64,
    #[serde(default)]
    pub other_annual_expenses: f64,
    pub loan_years: u32,
    pub state: State,
}

impl CommercialInputs {
    /// Check every field against its accepted range
    ///
    /// A zero purchase price is accepted so the cash-on-cash guard stays reachable.
    pub fn validate(&self) -> CalcResult<()> {
        non_negative("purchase_price", self.purchase_price)?;
        in_range("down_payment_pct", self.down_payment_pct, 0.0, 100.0)?;
        non_negative("annual_gross_rents", self.annual_gross_rents)?;
        finite("annual_noi_listing", self.annual_noi_listing)?;
        in_range("vacancy_rate_pct", self.vacancy_rate_pct, 0.0, 50.0)?;
        non_negative("other_annual_expenses", self.other_annual_expenses)?;
        if !(1..=30).contains(&self.loan_years) {
            return Err(CalcError::invalid(
                "loan_years",
                self.loan_years,
                "commercial term must be between 1 and 30 years",
            ));
        }
        Ok(())
    }

    pub fn amount_down(&self) -> f64 {
        self.purchase_price * self.down_payment_pct / 100.0
    }

    pub fn loan_amount(&self) -> f64 {
        self.purchase_price - self.amount_down()
    }

    pub fn num_payments(&self) -> u32 {
        self.loan_years * 12
    }
}

impl Default for CommercialInputs {
    fn default() -> Self {
        Self {
            purchase_price: 1_970_000.0,
            down_payment_pct: 30.0,
            annual_gross_rents: 152_195.0,
            annual_noi_listing: 0.0,
            vacancy_rate_pct: 3.0,
            other_annual_expenses: 5_000.0,
            loan_years: 25,
            state: State::Tx,
        }
    }
}

/// A deal to evaluate, tagged by property type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property_type", rename_all = "snake_case")]
pub enum Deal {
    Residential(PropertyInputs),
    Commercial(CommercialInputs),
}

impl Deal {
    pub fn state(&self) -> State {
        match self {
            Deal::Residential(inputs) => inputs.state,
            Deal::Commercial(inputs) => inputs.state,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        match self {
            Deal::Residential(inputs) => inputs.validate(),
            Deal::Commercial(inputs) => inputs.validate(),
        }
    }
}

fn finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid(field, value, "must be a finite number"))
    }
}

fn positive(field: &str, value: f64) -> CalcResult<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid(field, value, "must be greater than zero"))
    }
}

fn non_negative(field: &str, value: f64) -> CalcResult<()> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid(field, value, "must not be negative"))
    }
}

fn in_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<()> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CalcError::invalid(
            field,
            value,
            &format!("must be between {} and {}", min, max),
        ))
    }
}
