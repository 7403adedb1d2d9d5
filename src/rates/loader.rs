//! CSV-based rate table loader
//!
//! Expected columns:
//! `state,residential_tax_rate,commercial_tax_rate,commercial_insurance_rate`
//! with rates as annual fractions (0.017 = 1.7%). Every supported state must appear once.

use super::{RateTables, StateRates};
use crate::error::{CalcError, CalcResult};
use crate::property::State;
use csv::Reader;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    state: String,
    residential_tax_rate: f64,
    commercial_tax_rate: f64,
    commercial_insurance_rate: f64,
}

impl CsvRow {
    fn into_rates(self) -> CalcResult<(State, StateRates)> {
        let state: State = self.state.parse()?;

        for (name, rate) in [
            ("residential_tax_rate", self.residential_tax_rate),
            ("commercial_tax_rate", self.commercial_tax_rate),
            ("commercial_insurance_rate", self.commercial_insurance_rate),
        ] {
            if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
                return Err(CalcError::RateTable {
                    reason: format!("{} for {} must be a fraction in [0, 1), got {}", name, state, rate),
                });
            }
        }

        Ok((
            state,
            StateRates {
                residential_tax_rate: self.residential_tax_rate,
                commercial_tax_rate: self.commercial_tax_rate,
                commercial_insurance_rate: self.commercial_insurance_rate,
            },
        ))
    }
}

/// Load a rate table from a CSV file
pub fn load_rate_table<P: AsRef<Path>>(path: P) -> CalcResult<RateTables> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load a rate table from any reader (e.g., string buffer, request body)
pub fn load_rate_table_from_reader<R: Read>(reader: R) -> CalcResult<RateTables> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: Read>(mut reader: Reader<R>) -> CalcResult<RateTables> {
    let mut rates = HashMap::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let (state, row_rates) = row.into_rates()?;
        if rates.insert(state, row_rates).is_some() {
            return Err(CalcError::RateTable {
                reason: format!("duplicate row for {}", state),
            });
        }
    }

    if let Some(missing) = State::ALL.iter().find(|state| !rates.contains_key(*state)) {
        return Err(CalcError::RateTable {
            reason: format!("no row for {}", missing),
        });
    }

    Ok(RateTables::from_rows(rates))
}
