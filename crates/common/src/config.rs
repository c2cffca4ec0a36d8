use std::path::PathBuf;

/// Threshold below which an item counts as low on stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 5;

/// Ledger configuration: where the stock table lives and how it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// JSON file the ledger is saved to and loaded from.
    pub data_file: PathBuf,
    /// Items holding strictly fewer units than this are reported as low.
    pub low_stock_threshold: u64,
    /// Spaces per indentation level in the saved JSON.
    pub json_indent: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("inventory.json"),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            json_indent: 4,
        }
    }
}
