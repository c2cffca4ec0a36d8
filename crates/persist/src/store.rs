//! File-backed ledger persistence.
//!
//! The file is one flat JSON object, item name to quantity:
//! ```text
//! {
//!     "apple": 7,
//!     "banana": 5
//! }
//! ```
//! No envelope, no schema version.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use stockledger_common::{ItemName, LedgerConfig, Quantity};
use stockledger_kernel::Ledger;

/// Errors from file-backed persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid data format: expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("invalid entry {item:?}: {reason}")]
    InvalidEntry { item: String, reason: String },
}

/// Parse a stock table from JSON.
///
/// The whole document is validated before anything is returned.
pub fn read_stock<R: Read>(reader: R) -> Result<BTreeMap<ItemName, Quantity>, StoreError> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let entries = match value {
        serde_json::Value::Object(entries) => entries,
        other => {
            return Err(StoreError::NotAnObject {
                found: json_kind(&other),
            });
        }
    };

    let mut stock = BTreeMap::new();
    for (key, value) in entries {
        let name = ItemName::try_from(key.clone()).map_err(|e| StoreError::InvalidEntry {
            item: key.clone(),
            reason: e.to_string(),
        })?;
        let Some(quantity) = value.as_u64() else {
            return Err(StoreError::InvalidEntry {
                item: key,
                reason: format!("quantity must be a non-negative integer, found {value}"),
            });
        };
        stock.insert(name, Quantity(quantity));
    }
    Ok(stock)
}

/// Write the ledger as an indented flat JSON object.
pub fn write_stock<W: Write>(writer: W, ledger: &Ledger, indent: usize) -> Result<(), StoreError> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    ledger.stock().serialize(&mut ser)?;
    let mut writer = ser.into_inner();
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// JSON file holding a ledger.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
    indent: usize,
}

impl LedgerStore {
    /// Store at `path` with the default indentation.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            indent: LedgerConfig::default().json_indent,
        }
    }

    pub fn with_config(config: &LedgerConfig) -> Self {
        Self {
            path: config.data_file.clone(),
            indent: config.json_indent,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the ledger's contents with the file's. Returns the item count.
    ///
    /// On any failure the ledger is left exactly as it was.
    pub fn load_into(&self, ledger: &mut Ledger) -> Result<usize, StoreError> {
        let path = self.path.display();
        let stock = std::fs::File::open(&self.path)
            .map_err(StoreError::from)
            .and_then(read_stock)
            .inspect_err(|e| tracing::error!(%path, error = %e, "Error loading data"))?;

        ledger.replace(stock);
        tracing::info!(%path, items = ledger.len(), "Data loaded successfully");
        Ok(ledger.len())
    }

    /// Write the full ledger, truncating any previous file.
    ///
    /// Written in place; a crash mid-write can leave a partial file.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let path = self.path.display();
        std::fs::File::create(&self.path)
            .map_err(StoreError::from)
            .and_then(|file| write_stock(std::io::BufWriter::new(file), ledger, self.indent))
            .inspect_err(|e| tracing::error!(%path, error = %e, "Error saving data"))?;

        tracing::info!(%path, items = ledger.len(), "Data saved successfully");
        Ok(())
    }
}
