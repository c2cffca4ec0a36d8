//! Stock Ledger kernel: the authoritative item-to-quantity table.
//!
//! # Invariants
//! - No entry is ever held at zero; removals that empty an item delete it.
//! - Failed operations leave the table unchanged.
//! - Every successful mutation appends exactly one journal event; the journal
//!   is bounded and drops its oldest events first.

pub mod ledger;

pub use ledger::{DEFAULT_JOURNAL_CAPACITY, Ledger, LedgerError, LedgerEvent, Removal};
