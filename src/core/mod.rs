//! Core record types, errors, and amount handling.
//!
//! These types are shared by every stage: extraction, aggregation,
//! the customer summary, and filtering.

mod amount;
mod error;
mod types;

pub use amount::*;
pub use error::*;
pub use types::*;
