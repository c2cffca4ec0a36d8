use stockledger_common::{ItemName, Quantity};
use stockledger_kernel::Ledger;

const RULE: &str = "--------------------";

/// Fixed-format listing of every item and its quantity.
#[derive(Debug, Clone)]
pub struct StockReport {
    pub rows: Vec<(ItemName, Quantity)>,
}

impl StockReport {
    pub fn capture(ledger: &Ledger) -> Self {
        Self {
            rows: ledger.iter().map(|(name, qty)| (name.clone(), qty)).collect(),
        }
    }
}

impl std::fmt::Display for StockReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No items in inventory.");
        }
        writeln!(f, "Inventory Report:")?;
        writeln!(f, "{RULE}")?;
        for (name, qty) in &self.rows {
            writeln!(f, "{name} -> {qty}")?;
        }
        writeln!(f, "{RULE}")
    }
}

/// Items below a threshold, with what is left of each.
#[derive(Debug, Clone)]
pub struct LowStockReport {
    pub threshold: u64,
    pub items: Vec<(ItemName, Quantity)>,
}

impl LowStockReport {
    pub fn capture(ledger: &Ledger, threshold: u64) -> Self {
        let items = ledger
            .low_stock(threshold)
            .into_iter()
            .filter_map(|name| {
                let qty = ledger.stock().get(&name).copied()?;
                Some((name, qty))
            })
            .collect();
        Self { threshold, items }
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl std::fmt::Display for LowStockReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Low items (< {}): ", self.threshold)?;
        if self.items.is_empty() {
            return write!(f, "none");
        }
        let listed: Vec<String> = self
            .items
            .iter()
            .map(|(name, qty)| format!("{name} ({qty})"))
            .collect();
        write!(f, "{}", listed.join(", "))
    }
}

/// One-line overview of the ledger.
#[derive(Debug, Clone)]
pub struct LedgerSummary {
    pub items: usize,
    pub total_units: u64,
    pub pending_events: usize,
}

impl LedgerSummary {
    pub fn capture(ledger: &Ledger) -> Self {
        Self {
            items: ledger.len(),
            total_units: ledger.total_units(),
            pending_events: ledger.events().len(),
        }
    }
}

impl std::fmt::Display for LedgerSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ledger: items={} units={} pending_events={}",
            self.items, self.total_units, self.pending_events
        )
    }
}
