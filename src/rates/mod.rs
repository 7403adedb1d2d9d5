//! Per-state property tax and insurance rate tables

pub mod loader;

use crate::error::{CalcError, CalcResult};
use crate::property::State;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Annual residential insurance rate, applied to purchase price in every state
pub const RESIDENTIAL_INSURANCE_RATE: f64 = 0.01;

/// Annual commercial insurance rate used for every built-in state row
pub const COMMERCIAL_INSURANCE_RATE: f64 = 0.005;

/// Rates for a single state (annual, fraction of purchase price)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateRates {
    pub residential_tax_rate: f64,
    pub commercial_tax_rate: f64,
    pub commercial_insurance_rate: f64,
}

/// Lookup table from state to its tax and insurance rates
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    rates: HashMap<State, StateRates>,
}

impl RateTables {
    /// Build a table from explicit rows
    pub fn from_rows(rows: impl IntoIterator<Item = (State, StateRates)>) -> Self {
        Self {
            rates: rows.into_iter().collect(),
        }
    }

    /// Built-in six-state table
    pub fn builtin() -> Self {
        // Commercial tax follows the residential levy for each state
        let property_tax = [
            (State::Az, 0.0062),
            (State::Ca, 0.0125),
            (State::In, 0.0137),
            (State::Nv, 0.0065),
            (State::Tx, 0.0170),
            (State::Mi, 0.0321),
        ];

        Self::from_rows(property_tax.into_iter().map(|(state, tax)| {
            (
                state,
                StateRates {
                    residential_tax_rate: tax,
                    commercial_tax_rate: tax,
                    commercial_insurance_rate: COMMERCIAL_INSURANCE_RATE,
                },
            )
        }))
    }

    /// Load a table from a CSV file (see [`loader`] for the format)
    pub fn from_csv_path(path: &Path) -> CalcResult<Self> {
        let table = loader::load_rate_table(path)?;
        log::info!("Loaded rate table for {} states from {}", table.len(), path.display());
        Ok(table)
    }

    /// All rates for a state; fails if the table has no row for it
    pub fn get(&self, state: State) -> CalcResult<&StateRates> {
        self.rates.get(&state).ok_or_else(|| CalcError::UnknownState {
            code: state.code().to_string(),
        })
    }

    pub fn residential_tax(&self, state: State) -> CalcResult<f64> {
        Ok(self.get(state)?.residential_tax_rate)
    }

    pub fn commercial_tax(&self, state: State) -> CalcResult<f64> {
        Ok(self.get(state)?.commercial_tax_rate)
    }

    pub fn commercial_insurance(&self, state: State) -> CalcResult<f64> {
        Ok(self.get(state)?.commercial_insurance_rate)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::builtin()
    }
}
