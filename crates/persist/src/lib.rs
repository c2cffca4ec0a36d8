//! Persistence: the ledger as a flat JSON object file.
//!
//! # Invariants
//! - A load either replaces the whole ledger or leaves it untouched.
//! - Saves rewrite the full table every time.

pub mod store;

pub use store::{LedgerStore, StoreError, read_stock, write_stock};
