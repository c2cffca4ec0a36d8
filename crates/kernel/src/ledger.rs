use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use stockledger_common::{ItemName, Quantity, ValidationError};

/// A record produced by every successful mutation of the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Units were added to an item.
    Added {
        item: ItemName,
        quantity: Quantity,
        at: DateTime<Utc>,
    },
    /// Units were taken from an item that still has stock left.
    Removed {
        item: ItemName,
        quantity: Quantity,
        remaining: Quantity,
        at: DateTime<Utc>,
    },
    /// A removal emptied the item and its entry was deleted.
    Depleted { item: ItemName, at: DateTime<Utc> },
    /// The whole table was replaced (load).
    Loaded { items: usize, at: DateTime<Utc> },
}

impl LedgerEvent {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Added { at, .. }
            | Self::Removed { at, .. }
            | Self::Depleted { at, .. }
            | Self::Loaded { at, .. } => *at,
        }
    }
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let at = self.at().to_rfc3339_opts(SecondsFormat::Millis, true);
        match self {
            Self::Added { item, quantity, .. } => write!(f, "{at}: Added {quantity} of {item}"),
            Self::Removed { item, quantity, .. } => {
                write!(f, "{at}: Removed {quantity} of {item}")
            }
            Self::Depleted { item, .. } => write!(f, "{at}: Removed item {item} completely"),
            Self::Loaded { items, .. } => write!(f, "{at}: Loaded {items} items"),
        }
    }
}

/// Errors from ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("item not found: {0}")]
    ItemNotFound(String),
    #[error("adding {added} to {item} (holding {current}) overflows")]
    Overflow {
        item: String,
        current: Quantity,
        added: Quantity,
    },
}

/// Outcome of a successful removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Stock remains for the item.
    Decremented { remaining: Quantity },
    /// The removal took the item to zero or below; its entry is gone.
    Depleted,
}

/// Journal entries kept before the oldest are discarded.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 1024;

/// The authoritative stock table.
///
/// All mutations go through explicit operations and each one is recorded in
/// the event journal. The journal keeps at most `journal_capacity` events;
/// callers that need the full history drain it as they go. Uses BTreeMap so
/// iteration (reports, low-stock scans, saved files) is ordered by item name.
#[derive(Debug, Clone)]
pub struct Ledger {
    stock: BTreeMap<ItemName, Quantity>,
    journal: Vec<LedgerEvent>,
    journal_capacity: usize,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_journal_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ledger whose journal holds at most `capacity` events.
    pub fn with_journal_capacity(capacity: usize) -> Self {
        Self {
            stock: BTreeMap::new(),
            journal: Vec::new(),
            journal_capacity: capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.stock.contains_key(item)
    }

    /// Read-only access to the table.
    pub fn stock(&self) -> &BTreeMap<ItemName, Quantity> {
        &self.stock
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, Quantity)> {
        self.stock.iter().map(|(name, qty)| (name, *qty))
    }

    /// Sum of all quantities, saturating at `u64::MAX`.
    pub fn total_units(&self) -> u64 {
        self.stock
            .values()
            .fold(0u64, |acc, q| acc.saturating_add(q.get()))
    }

    /// Read-only access to the event journal.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.journal
    }

    /// Drain and return the event journal.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.journal)
    }

    fn record(&mut self, event: LedgerEvent) {
        if self.journal_capacity == 0 {
            return;
        }
        if self.journal.len() >= self.journal_capacity {
            let excess = self.journal.len() + 1 - self.journal_capacity;
            self.journal.drain(..excess);
        }
        self.journal.push(event);
    }

    /// Add `quantity` units of `item`, returning the new total.
    ///
    /// Zero is accepted but never creates an entry.
    pub fn add(&mut self, item: &str, quantity: i64) -> Result<Quantity, LedgerError> {
        self.add_with(item, quantity, None)
    }

    /// Same as [`Ledger::add`], also appending the timestamped message to `log`.
    pub fn add_logged(
        &mut self,
        item: &str,
        quantity: i64,
        log: &mut Vec<String>,
    ) -> Result<Quantity, LedgerError> {
        self.add_with(item, quantity, Some(log))
    }

    fn add_with(
        &mut self,
        item: &str,
        quantity: i64,
        log: Option<&mut Vec<String>>,
    ) -> Result<Quantity, LedgerError> {
        let name = ItemName::parse(item).inspect_err(|e| {
            tracing::warn!(item, error = %e, "rejected add");
        })?;
        let quantity = Quantity::try_from(quantity).inspect_err(|e| {
            tracing::warn!(item, error = %e, "rejected add");
        })?;

        let current = self.stock.get(item).copied().unwrap_or_default();
        let Some(total) = current.checked_add(quantity) else {
            tracing::warn!(item, %current, %quantity, "rejected add: quantity overflow");
            return Err(LedgerError::Overflow {
                item: item.to_owned(),
                current,
                added: quantity,
            });
        };

        if !total.is_zero() {
            self.stock.insert(name.clone(), total);
        }
        let event = LedgerEvent::Added {
            item: name,
            quantity,
            at: Utc::now(),
        };
        tracing::info!(item, %quantity, %total, "{event}");
        if let Some(log) = log {
            log.push(event.to_string());
        }
        self.record(event);
        Ok(total)
    }

    /// Remove `quantity` units of `item`. The entry is deleted once it hits zero.
    pub fn remove(&mut self, item: &str, quantity: i64) -> Result<Removal, LedgerError> {
        let Some((name, current)) = self
            .stock
            .get_key_value(item)
            .map(|(name, qty)| (name.clone(), *qty))
        else {
            tracing::warn!(item, "Item not found");
            return Err(LedgerError::ItemNotFound(item.to_owned()));
        };
        let quantity = Quantity::positive(quantity).inspect_err(|e| {
            tracing::warn!(item, error = %e, "rejected remove");
        })?;

        let at = Utc::now();
        if quantity >= current {
            self.stock.remove(item);
            tracing::info!(item, "Removed item {item} completely");
            self.record(LedgerEvent::Depleted { item: name, at });
            return Ok(Removal::Depleted);
        }

        let remaining = Quantity(current.get() - quantity.get());
        self.stock.insert(name.clone(), remaining);
        tracing::info!(item, %remaining, "Removed {quantity} of {item}");
        self.record(LedgerEvent::Removed {
            item: name,
            quantity,
            remaining,
            at,
        });
        Ok(Removal::Decremented { remaining })
    }

    /// Quantity held for `item`, or `None` when it is not stocked.
    pub fn get_quantity(&self, item: &str) -> Option<Quantity> {
        let found = self.stock.get(item).copied();
        if found.is_none() {
            tracing::warn!(item, "Item not found");
        }
        found
    }

    /// Items holding strictly fewer than `threshold` units, in name order.
    pub fn low_stock(&self, threshold: u64) -> Vec<ItemName> {
        self.stock
            .iter()
            .filter(|(_, qty)| qty.get() < threshold)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Replace the whole table. Zero-valued entries are dropped.
    pub fn replace(&mut self, stock: BTreeMap<ItemName, Quantity>) {
        let before = stock.len();
        self.stock = stock.into_iter().filter(|(_, q)| !q.is_zero()).collect();
        if self.stock.len() != before {
            tracing::debug!(dropped = before - self.stock.len(), "dropped zero-quantity entries");
        }
        self.record(LedgerEvent::Loaded {
            items: self.stock.len(),
            at: Utc::now(),
        });
    }
}
