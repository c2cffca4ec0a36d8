//! Read-only views of the ledger for the console.
//!
//! # Invariants
//! - Views never mutate the ledger.

pub mod report;

pub use report::{LedgerSummary, LowStockReport, StockReport};
