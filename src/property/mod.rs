//! Property input records and validation

mod data;

pub use data::{State, LoanTerm, PropertyInputs, CommercialInputs, Deal};
