//! Shared types for the stock ledger.
//!
//! # Invariants
//! - An `ItemName` is never empty.
//! - A `Quantity` is never negative.

pub mod config;
pub mod types;

pub use config::{DEFAULT_LOW_STOCK_THRESHOLD, LedgerConfig};
pub use types::{ItemName, Quantity, ValidationError};
